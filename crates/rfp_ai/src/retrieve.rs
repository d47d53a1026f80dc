use rfp_core::error::AppError;
use rfp_core::prompts::{fill, PromptSet};

use crate::backend::AiBackend;
use crate::index::VectorIndex;

pub const RETRIEVAL_TOP_K: usize = 5;

/// Answer a free-text query using only the top-k most similar indexed
/// segments as context. Returns the raw model text; backend failures
/// propagate to the caller untouched.
pub fn answer_with_retrieval(
    index: &VectorIndex,
    backend: &AiBackend,
    prompts: &PromptSet,
    query: &str,
) -> Result<String, AppError> {
    let segments = index.query(backend, query, RETRIEVAL_TOP_K)?;
    log::debug!("retrieved {} segments for query", segments.len());

    let context = segments
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join("\n\n");
    let prompt = fill(
        &prompts.retrieval_answer_template,
        &[("context", context.as_str()), ("question", query)],
    );
    backend.complete(&prompt)
}
