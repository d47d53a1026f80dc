use std::collections::BTreeSet;
use std::path::PathBuf;

use rfp_core::error::AppError;
use rfp_core::report::Report;

use crate::analysis::AnalysisStep;
use crate::backend::AiBackend;
use crate::chat::ConversationTurn;
use crate::chunking::{self, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_TOKENS};
use crate::index::VectorIndex;

/// Pipeline progress plus the step outputs later steps template into their
/// prompts. The completed set makes re-entry after a partial failure an
/// explicit state transition: finished steps are skipped, the failed step
/// and everything after it run again on resubmission.
#[derive(Debug, Default)]
pub struct AnalysisState {
    pub completed: BTreeSet<AnalysisStep>,
    pub client_name: Option<String>,
    pub client_description: Option<String>,
    pub summary: Option<String>,
    pub technical_requirements: Option<String>,
    pub use_cases: Vec<String>,
    /// Use cases whose idea sections are already in the report.
    pub ideas_done: usize,
    pub report_path: Option<PathBuf>,
}

/// All mutable state for one interactive session: the ingested document, the
/// similarity index, the report in progress, and the conversation
/// transcript. Owned by the caller and passed into every component call, so
/// nothing leaks across sessions.
#[derive(Default)]
pub struct SessionContext {
    pub rfp_text: Option<String>,
    pub index: VectorIndex,
    pub report: Report,
    pub transcript: Vec<ConversationTurn>,
    pub analysis: AnalysisState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ingested(&self) -> bool {
        self.rfp_text.is_some()
    }

    /// Chunk the RFP text and load it into the index. The text is retained
    /// for the pipeline steps that prompt over the whole document.
    pub fn ingest_rfp(&mut self, backend: &AiBackend, text: &str) -> Result<usize, AppError> {
        let text = text.trim();
        let segments = chunking::split(text, DEFAULT_CHUNK_TOKENS, DEFAULT_CHUNK_OVERLAP)?;
        let added = self.index.insert(backend, segments)?;
        self.rfp_text = Some(text.to_string());
        log::info!("ingested RFP: {added} segments indexed");
        Ok(added)
    }
}
