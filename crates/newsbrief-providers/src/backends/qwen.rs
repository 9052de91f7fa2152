//! Qwen backend implementation
//!
//! Calls Alibaba's Qwen models via the DashScope OpenAI-compatible API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{backend::GenerationBackend, error::ProviderError, models::GenerationRequest};

const DASHSCOPE_INTL_URL: &str = "https://dashscope-intl.aliyuncs.com/compatible-mode/v1";

/// Qwen backend for Alibaba's DashScope API
pub struct QwenBackend {
    api_key: String,
    client: Arc<Client>,
    base_url: String,
}

impl QwenBackend {
    /// Create a backend for DashScope International
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_client_and_base_url(
            Arc::new(Client::new()),
            api_key,
            DASHSCOPE_INTL_URL.to_string(),
        )
    }

    /// Create a backend with a custom HTTP client and base URL
    pub fn with_client_and_base_url(
        client: Arc<Client>,
        api_key: String,
        base_url: String,
    ) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::ConfigError(
                "DashScope API key is required".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            client,
            base_url,
        })
    }

    /// Extract the generated text from a chat-completions response
    fn convert_response(response: QwenChatResponse) -> Result<String, ProviderError> {
        response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| ProviderError::ProviderError("No content in response".to_string()))
    }
}

#[async_trait]
impl GenerationBackend for QwenBackend {
    fn id(&self) -> &str {
        "qwen"
    }

    fn name(&self) -> &str {
        "Qwen"
    }

    fn supports(&self, model: &str) -> bool {
        model.starts_with("qwen")
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let mut messages = Vec::new();
        if let Some(system) = &request.system_prompt {
            messages.push(QwenMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(QwenMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        let qwen_request = QwenChatRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
        };

        debug!("Sending generation request to Qwen model: {}", request.model);

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&qwen_request)
            .send()
            .await
            .map_err(|e| {
                error!("DashScope API request failed: {}", e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("DashScope API error ({}): {}", status, error_text);

            return match status.as_u16() {
                401 | 403 => Err(ProviderError::AuthError),
                429 => Err(ProviderError::RateLimited(60)),
                _ => Err(ProviderError::ProviderError(format!(
                    "DashScope API error {}: {}",
                    status, error_text
                ))),
            };
        }

        let qwen_response: QwenChatResponse = response.json().await?;
        Self::convert_response(qwen_response)
    }
}

/// DashScope chat-completions request format
#[derive(Debug, Serialize)]
struct QwenChatRequest {
    model: String,
    messages: Vec<QwenMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
struct QwenMessage {
    role: String,
    content: String,
}

/// DashScope chat-completions response format
#[derive(Debug, Deserialize)]
struct QwenChatResponse {
    #[serde(default)]
    choices: Vec<QwenChoice>,
}

/// Response choice format
#[derive(Debug, Deserialize)]
struct QwenChoice {
    message: QwenMessage,
}
