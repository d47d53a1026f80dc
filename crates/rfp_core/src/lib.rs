pub mod config;
pub mod error;
pub mod listparse;
pub mod prompts;
pub mod report;

#[cfg(test)]
mod tests {
    use super::error::AppError;

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new("AI_TEST", "backend failed").with_retryable(true);
        assert_eq!(err.code, "AI_TEST");
        assert_eq!(err.message, "backend failed");
        assert!(err.retryable);
        assert!(!err.is_config());
        assert!(!err.is_input());
    }

    #[test]
    fn error_kinds_follow_code_prefixes() {
        assert!(AppError::new("CONFIG_MISSING_API_KEY", "no key").is_config());
        assert!(AppError::new("INPUT_EMPTY", "empty text").is_input());
    }
}
