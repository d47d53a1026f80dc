use rfp_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Llm;
use crate::openai::OpenAiClient;

#[derive(Debug, Clone)]
pub struct OpenAiLlm {
    client: OpenAiClient,
}

impl OpenAiLlm {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl Llm for OpenAiLlm {
    fn complete(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.client.base_url());
        let req = ChatCompletionRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let resp = ureq::post(&url)
            .set("Authorization", &self.client.bearer_header())
            .timeout(std::time::Duration::from_secs(120))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("AI_COMPLETION_FAILED", "Failed to encode completion request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: ChatCompletionResponse = r.into_json().map_err(|e| {
                    AppError::new("AI_COMPLETION_FAILED", "Failed to decode completion response")
                        .with_details(e.to_string())
                })?;
                let text = v
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message.content)
                    .unwrap_or_default();
                if text.trim().is_empty() {
                    return Err(AppError::new(
                        "AI_COMPLETION_FAILED",
                        "Completion response was empty",
                    ));
                }
                Ok(text)
            }
            Ok(r) => Err(
                AppError::new("AI_COMPLETION_FAILED", "Completion request failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(ureq::Error::Status(429, _)) => Err(
                AppError::new("AI_COMPLETION_FAILED", "The LLM backend rate-limited the request")
                    .with_details("status=429".to_string())
                    .with_retryable(true),
            ),
            Err(ureq::Error::Status(code, _)) => Err(
                AppError::new("AI_COMPLETION_FAILED", "Completion request failed")
                    .with_details(format!("status={code}")),
            ),
            Err(e) => Err(
                AppError::new("AI_COMPLETION_FAILED", "Failed to call completion endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
