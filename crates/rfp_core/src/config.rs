use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PROMPTS_FILE: &str = "prompts.json";
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Environment-sourced settings. The API key is the only required value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub chat_model: String,
    pub embed_model: String,
    pub base_url: String,
    pub prompts_file: PathBuf,
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary lookup so tests never touch the
    /// process environment.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key = match lookup("OPENAI_API_KEY") {
            Some(k) if !k.trim().is_empty() => k,
            _ => {
                return Err(AppError::new(
                    "CONFIG_MISSING_API_KEY",
                    "OPENAI_API_KEY is not set; the LLM backend requires an API key",
                ));
            }
        };

        let non_empty = |v: Option<String>, default: &str| -> String {
            match v {
                Some(s) if !s.trim().is_empty() => s,
                _ => default.to_string(),
            }
        };

        let base_url = non_empty(lookup("OPENAI_BASE_URL"), DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            chat_model: non_empty(lookup("OPENAI_MODEL"), DEFAULT_CHAT_MODEL),
            embed_model: non_empty(lookup("OPENAI_EMBED_MODEL"), DEFAULT_EMBED_MODEL),
            base_url,
            prompts_file: PathBuf::from(non_empty(lookup("PROMPTS_FILE"), DEFAULT_PROMPTS_FILE)),
            data_dir: PathBuf::from(non_empty(lookup("DATA_PATH"), DEFAULT_DATA_DIR)),
        })
    }
}
