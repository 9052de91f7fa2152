//! Google Gemini backend implementation
//!
//! Calls Gemini models via the Google Generative Language API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{backend::GenerationBackend, error::ProviderError, models::GenerationRequest};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Google Gemini backend implementation
pub struct GeminiBackend {
    api_key: String,
    client: Arc<Client>,
    base_url: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend instance
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_client(Arc::new(Client::new()), api_key)
    }

    /// Create a new Gemini backend with a custom HTTP client
    pub fn with_client(client: Arc<Client>, api_key: String) -> Result<Self, ProviderError> {
        Self::with_client_and_base_url(client, api_key, GEMINI_BASE_URL.to_string())
    }

    /// Create a new Gemini backend with a custom HTTP client and base URL
    pub fn with_client_and_base_url(
        client: Arc<Client>,
        api_key: String,
        base_url: String,
    ) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::ConfigError(
                "Gemini API key is required".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            client,
            base_url,
        })
    }

    /// Extract the generated text from a Gemini response
    fn convert_response(response: GeminiResponse) -> Result<String, ProviderError> {
        response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| ProviderError::ProviderError("No content in response".to_string()))
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    fn id(&self) -> &str {
        "gemini"
    }

    fn name(&self) -> &str {
        "Google Gemini"
    }

    fn supports(&self, model: &str) -> bool {
        model.starts_with("gemini")
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        // System prompt goes in as a separate leading content part
        let mut parts = Vec::new();
        if let Some(system) = &request.system_prompt {
            parts.push(GeminiPart {
                text: system.clone(),
            });
        }
        parts.push(GeminiPart {
            text: request.prompt.clone(),
        });

        let gemini_request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts,
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: request.temperature,
                top_p: request.top_p,
                max_output_tokens: request.max_tokens,
            }),
        };

        debug!("Sending generation request to Gemini model: {}", request.model);

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, request.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error ({}): {}", status, error_text);

            return match status.as_u16() {
                401 | 403 => Err(ProviderError::AuthError),
                429 => Err(ProviderError::RateLimited(60)),
                _ => Err(ProviderError::ProviderError(format!(
                    "Gemini API error {}: {}",
                    status, error_text
                ))),
            };
        }

        let gemini_response: GeminiResponse = response.json().await?;
        Self::convert_response(gemini_response)
    }
}

/// Gemini API request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

/// Gemini API content format
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

/// Gemini API part format
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

/// Gemini API generation config
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// Gemini API candidate format
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}
