//! Configuration for the fallback dispatcher

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    backend::BackendRegistry,
    backends::{GeminiBackend, QwenBackend},
    dispatcher::FallbackDispatcher,
    error::ProviderError,
};

/// Built-in model priority order, best-first
pub const DEFAULT_MODEL_PRIORITY: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
    "qwen-plus",
    "qwen-turbo",
];

/// Dispatcher configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Ordered candidate model list, best-first
    pub model_priority: Vec<String>,
    /// API key for the Gemini backend
    pub gemini_api_key: Option<String>,
    /// API key for the DashScope (Qwen) backend
    pub dashscope_api_key: Option<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            model_priority: DEFAULT_MODEL_PRIORITY
                .iter()
                .map(|m| m.to_string())
                .collect(),
            gemini_api_key: None,
            dashscope_api_key: None,
        }
    }
}

impl DispatcherConfig {
    /// Load configuration from environment variables over built-in defaults.
    ///
    /// Recognized variables: `GEMINI_API_KEY`, `DASHSCOPE_API_KEY`, and
    /// `NEWSBRIEF_MODEL_PRIORITY` (comma-separated model ids overriding the
    /// built-in priority list).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.gemini_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("DASHSCOPE_API_KEY") {
            if !key.is_empty() {
                config.dashscope_api_key = Some(key);
            }
        }
        if let Ok(list) = std::env::var("NEWSBRIEF_MODEL_PRIORITY") {
            let priority = parse_priority(&list);
            if !priority.is_empty() {
                debug!("model priority overridden from environment: {:?}", priority);
                config.model_priority = priority;
            }
        }

        config
    }

    /// Build a dispatcher with backends for whichever API keys are present.
    ///
    /// Models whose backend has no key remain in the priority list; calls to
    /// them are recorded as failures and fall through like any other error.
    pub fn build_dispatcher(&self) -> Result<FallbackDispatcher, ProviderError> {
        let mut backends = BackendRegistry::new();

        if let Some(key) = &self.gemini_api_key {
            backends.register(Arc::new(GeminiBackend::new(key.clone())?))?;
        }
        if let Some(key) = &self.dashscope_api_key {
            backends.register(Arc::new(QwenBackend::new(key.clone())?))?;
        }

        Ok(FallbackDispatcher::new(self.model_priority.clone(), backends))
    }
}

/// Parse a comma-separated model list, dropping empty segments
fn parse_priority(list: &str) -> Vec<String> {
    list.split(',')
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
        .collect()
}
