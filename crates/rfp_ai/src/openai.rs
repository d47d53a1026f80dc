use rfp_core::error::AppError;

/// Blocking client for an OpenAI-compatible API endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(AppError::new(
                "CONFIG_INVALID_BASE_URL",
                "API base URL must start with http:// or https://",
            )
            .with_details(format!("base_url={base_url}")));
        }
        if api_key.trim().is_empty() {
            return Err(AppError::new(
                "CONFIG_MISSING_API_KEY",
                "API key must not be empty",
            ));
        }

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Verify the backend is reachable and the key is accepted before any
    /// analysis work starts.
    pub fn health_check(&self) -> Result<(), AppError> {
        let url = format!("{}/models", self.base_url);
        let resp = ureq::get(&url)
            .set("Authorization", &self.bearer_header())
            .timeout(std::time::Duration::from_secs(5))
            .call();

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(
                AppError::new("AI_BACKEND_UNHEALTHY", "Backend health check failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(ureq::Error::Status(401, _)) | Err(ureq::Error::Status(403, _)) => Err(
                AppError::new("AI_AUTH_FAILED", "The LLM backend rejected the API key"),
            ),
            Err(ureq::Error::Status(code, _)) => Err(
                AppError::new("AI_BACKEND_UNHEALTHY", "Backend health check failed")
                    .with_details(format!("status={code}")),
            ),
            Err(e) => Err(
                AppError::new("AI_BACKEND_UNREACHABLE", "Failed to reach the LLM backend")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
