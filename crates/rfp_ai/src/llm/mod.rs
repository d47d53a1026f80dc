use rfp_core::error::AppError;

pub trait Llm {
    fn complete(&self, model: &str, prompt: &str) -> Result<String, AppError>;
}

pub mod openai_llm;
