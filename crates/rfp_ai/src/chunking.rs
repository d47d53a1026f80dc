use rfp_core::error::AppError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_TOKENS: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 0;

/// A bounded slice of source text used as a retrieval unit. `source_offset`
/// is the byte offset of the slice within the source it was split from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub source_offset: usize,
}

/// Split text into segments of at most `max_tokens` whitespace-delimited
/// words, with `overlap` words shared between consecutive segments.
///
/// Segments are exact slices of the source in reading order. Truncating each
/// segment at the next segment's `source_offset` and concatenating
/// reconstructs the source byte-for-byte.
pub fn split(text: &str, max_tokens: usize, overlap: usize) -> Result<Vec<Segment>, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::new(
            "INPUT_EMPTY",
            "Text to split must not be empty",
        ));
    }
    if max_tokens == 0 {
        return Err(AppError::new(
            "INPUT_INVALID",
            "Chunk size must be at least one token",
        ));
    }
    if overlap >= max_tokens {
        return Err(AppError::new(
            "INPUT_INVALID",
            "Chunk overlap must be smaller than the chunk size",
        )
        .with_details(format!("max_tokens={max_tokens}; overlap={overlap}")));
    }

    // Byte offsets where each word starts. Non-empty because the text has
    // at least one non-whitespace char.
    let mut word_starts: Vec<usize> = Vec::new();
    let mut prev_was_ws = true;
    for (i, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        if prev_was_ws && !ws {
            word_starts.push(i);
        }
        prev_was_ws = ws;
    }

    let step = max_tokens - overlap;
    let word_count = word_starts.len();
    let mut segments = Vec::new();
    let mut token = 0usize;
    loop {
        // The first segment starts at byte 0 so leading whitespace survives.
        let begin = if token == 0 { 0 } else { word_starts[token] };
        let last = token + max_tokens;
        let end = if last >= word_count {
            text.len()
        } else {
            word_starts[last]
        };
        segments.push(Segment {
            text: text[begin..end].to_string(),
            source_offset: begin,
        });
        if last >= word_count {
            break;
        }
        token += step;
    }

    log::debug!(
        "split {} bytes into {} segments (max_tokens={}, overlap={})",
        text.len(),
        segments.len(),
        max_tokens,
        overlap
    );
    Ok(segments)
}
