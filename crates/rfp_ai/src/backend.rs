use rfp_core::config::Settings;
use rfp_core::error::AppError;

use crate::embeddings::openai_embed::OpenAiEmbedder;
use crate::embeddings::Embedder;
use crate::llm::openai_llm::OpenAiLlm;
use crate::llm::Llm;
use crate::openai::OpenAiClient;

/// Narrow capability surface over the delegated model backends: one way to
/// turn text into a vector, one way to turn a prompt into text. Everything
/// above this type is deterministic under stubbed `Embedder`/`Llm` impls.
pub struct AiBackend {
    embedder: Box<dyn Embedder>,
    llm: Box<dyn Llm>,
    embed_model: String,
    chat_model: String,
}

impl AiBackend {
    pub fn new(
        embedder: Box<dyn Embedder>,
        llm: Box<dyn Llm>,
        embed_model: impl Into<String>,
        chat_model: impl Into<String>,
    ) -> Self {
        Self {
            embedder,
            llm,
            embed_model: embed_model.into(),
            chat_model: chat_model.into(),
        }
    }

    /// Wire both capabilities to the configured OpenAI-compatible endpoint.
    pub fn openai(settings: &Settings) -> Result<Self, AppError> {
        let client = OpenAiClient::new(&settings.base_url, &settings.api_key)?;
        Ok(Self::new(
            Box::new(OpenAiEmbedder::new(client.clone())),
            Box::new(OpenAiLlm::new(client)),
            settings.embed_model.clone(),
            settings.chat_model.clone(),
        ))
    }

    pub fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        self.embedder.embed(&self.embed_model, text)
    }

    pub fn complete(&self, prompt: &str) -> Result<String, AppError> {
        self.llm.complete(&self.chat_model, prompt)
    }
}
