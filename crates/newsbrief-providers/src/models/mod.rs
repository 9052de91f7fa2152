//! Data models for dispatch requests, results, and statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default maximum output tokens per generation call
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default nucleus sampling parameter
pub const DEFAULT_TOP_P: f32 = 0.9;

/// Per-call configuration supplied by the caller
///
/// All fields are optional; accessors resolve the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallConfig {
    /// Preferred model to try first (if configured and enabled)
    pub model: Option<String>,
    /// System prompt prepended as a separate content part
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for sampling
    pub temperature: Option<f32>,
    /// Nucleus sampling parameter
    pub top_p: Option<f32>,
}

impl CallConfig {
    /// Maximum output tokens, defaulting to 4096
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    /// Sampling temperature, defaulting to 0.7
    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Nucleus sampling parameter, defaulting to 0.9
    pub fn top_p(&self) -> f32 {
        self.top_p.unwrap_or(DEFAULT_TOP_P)
    }
}

/// A fully resolved generation request handed to a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model to call
    pub model: String,
    /// User prompt
    pub prompt: String,
    /// Optional system prompt
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling parameter
    pub top_p: f32,
}

/// Outcome of a dispatch attempt across all candidate models
///
/// Dispatch never returns an `Err` or panics; total exhaustion of the
/// candidate list is reported through this type with `success == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Whether any candidate model produced a response
    pub success: bool,
    /// Generated text, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Model that produced the response, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Aggregate error message, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    /// Build a successful result
    pub fn success(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            model: Some(model.into()),
            error: None,
        }
    }

    /// Build a failure result
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            model: None,
            error: Some(error.into()),
        }
    }
}

/// Point-in-time statistics for one configured model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatsSnapshot {
    /// Model identifier
    pub model: String,
    /// Number of successful calls
    pub success_count: u64,
    /// Number of failed calls since the last success
    pub error_count: u64,
    /// Success-rate percentage string, or "N/A" with zero attempts
    pub success_rate: String,
    /// Most recent error message
    pub last_error: Option<String>,
    /// When the most recent error was recorded
    pub last_error_at: Option<DateTime<Utc>>,
    /// Whether the model is excluded from candidate orders
    pub disabled: bool,
}

/// Aggregate view across all configured models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Total recorded attempts across all models
    pub total_requests: u64,
    /// Total successful attempts
    pub total_successes: u64,
    /// Total failed attempts
    pub total_errors: u64,
    /// Overall success-rate percentage string, or "N/A" with zero attempts
    pub overall_success_rate: String,
    /// Free-text operator hint derived from the current state
    pub recommendation: String,
}

impl DispatchSummary {
    /// Derive a summary from per-model snapshots
    pub fn from_snapshots(snapshots: &[ModelStatsSnapshot]) -> Self {
        let total_successes: u64 = snapshots.iter().map(|s| s.success_count).sum();
        let total_errors: u64 = snapshots.iter().map(|s| s.error_count).sum();
        let total_requests = total_successes + total_errors;
        let disabled_count = snapshots.iter().filter(|s| s.disabled).count();

        let overall_success_rate = format_success_rate(total_successes, total_requests);

        let recommendation = if total_requests == 0 {
            "No requests recorded yet.".to_string()
        } else if (total_successes as f64) < (total_requests as f64) * 0.5 {
            "Most attempts are failing; check provider API keys and quota limits.".to_string()
        } else if disabled_count > 0 {
            format!(
                "{disabled_count} model(s) disabled; re-enable them once their quotas recover."
            )
        } else {
            "All models operating normally.".to_string()
        };

        Self {
            total_requests,
            total_successes,
            total_errors,
            overall_success_rate,
            recommendation,
        }
    }
}

/// Format a success rate as a percentage string, "N/A" with zero attempts
pub(crate) fn format_success_rate(successes: u64, attempts: u64) -> String {
    if attempts == 0 {
        "N/A".to_string()
    } else {
        format!("{:.1}%", (successes as f64 / attempts as f64) * 100.0)
    }
}
