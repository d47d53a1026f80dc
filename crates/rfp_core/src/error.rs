use serde::{Deserialize, Serialize};
use std::fmt;

/// Single structured error shape used across all layers and surfaced to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Fatal configuration problems (`CONFIG_*`) halt startup; everything
    /// else aborts only the current action.
    pub fn is_config(&self) -> bool {
        self.code.starts_with("CONFIG_")
    }

    /// Invalid user input (`INPUT_*`), recoverable by re-submitting.
    pub fn is_input(&self) -> bool {
        self.code.starts_with("INPUT_")
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
