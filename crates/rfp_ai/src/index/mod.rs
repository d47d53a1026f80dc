use rfp_core::error::AppError;

use crate::backend::AiBackend;
use crate::chunking::Segment;

mod similarity;

/// One stored (segment, embedding) pair. Never mutated after insertion.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub segment: Segment,
    pub vector: Vec<f32>,
    norm: f32,
}

/// Session-scoped, append-only similarity index. Insertions are not
/// deduplicated: the same text inserted twice produces two entries.
#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dims: Option<usize>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embed and append the given segments. Returns the number of entries
    /// added. All embeddings must share one dimension.
    pub fn insert(&mut self, backend: &AiBackend, segments: Vec<Segment>) -> Result<usize, AppError> {
        let added = segments.len();
        for segment in segments {
            let vector = backend.embed(&segment.text)?;
            match self.dims {
                None => self.dims = Some(vector.len()),
                Some(d) if d == vector.len() => {}
                Some(d) => {
                    return Err(AppError::new(
                        "AI_INDEX_BUILD_FAILED",
                        "Embedding dimension mismatch across segments",
                    )
                    .with_details(format!("expected={d}; got={}", vector.len())));
                }
            }
            let norm = similarity::l2_norm(&vector);
            self.entries.push(IndexEntry {
                segment,
                vector,
                norm,
            });
        }
        log::debug!("index now holds {} entries", self.entries.len());
        Ok(added)
    }

    /// Return up to `k` segments ranked by cosine similarity to `text`.
    /// Equal scores keep insertion order.
    pub fn query(&self, backend: &AiBackend, text: &str, k: usize) -> Result<Vec<Segment>, AppError> {
        let q = text.trim();
        if q.is_empty() {
            return Err(AppError::new("INPUT_EMPTY", "Query must not be empty"));
        }
        if self.entries.is_empty() {
            return Err(AppError::new(
                "AI_INDEX_NOT_READY",
                "No segments indexed yet; ingest a document before querying",
            ));
        }

        let qv = backend.embed(q)?;
        if Some(qv.len()) != self.dims {
            return Err(AppError::new(
                "AI_RETRIEVAL_FAILED",
                "Query embedding dims do not match index dims",
            )
            .with_details(format!(
                "index_dims={:?}; query_dims={}",
                self.dims,
                qv.len()
            )));
        }
        let qnorm = similarity::l2_norm(&qv);
        if qnorm == 0.0 {
            return Err(AppError::new(
                "AI_RETRIEVAL_FAILED",
                "Query embedding norm is zero",
            ));
        }

        let mut hits: Vec<(usize, f32)> = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.norm == 0.0 {
                continue;
            }
            let score = similarity::cosine_similarity(&qv, &entry.vector, qnorm, entry.norm);
            hits.push((i, score));
        }

        // Stable sort: ties keep insertion order.
        hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);

        Ok(hits
            .into_iter()
            .map(|(i, _)| self.entries[i].segment.clone())
            .collect())
    }
}
