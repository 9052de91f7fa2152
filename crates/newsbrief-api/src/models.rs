//! Request and response models for the API

use chrono::{DateTime, Utc};
use newsbrief_providers::{CallConfig, DispatchResult, DispatchSummary, ModelStatsSnapshot};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// User prompt (must be non-empty)
    pub prompt: String,
    /// Preferred model to try first
    pub model: Option<String>,
    /// System prompt prepended to the generation call
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate (default 4096)
    pub max_tokens: Option<u32>,
    /// Sampling temperature (default 0.7)
    pub temperature: Option<f32>,
    /// Nucleus sampling parameter (default 0.9)
    pub top_p: Option<f32>,
}

impl GenerateRequest {
    /// Convert into a dispatcher call configuration
    pub fn call_config(&self) -> CallConfig {
        CallConfig {
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

/// Generation response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateResponse {
    /// Whether generation succeeded
    pub success: bool,
    /// Generated text, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Model that produced the text, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Aggregate error message, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-model stats snapshot attached on failure for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<ModelStatsEntry>>,
}

impl GenerateResponse {
    /// Build a response from a successful dispatch result
    pub fn from_result(result: DispatchResult) -> Self {
        Self {
            success: result.success,
            content: result.content,
            model: result.model,
            error: result.error,
            stats: None,
        }
    }

    /// Build a failure response carrying a stats snapshot
    pub fn failure_with_stats(result: DispatchResult, stats: Vec<ModelStatsEntry>) -> Self {
        Self {
            success: false,
            content: None,
            model: None,
            error: result.error,
            stats: Some(stats),
        }
    }
}

/// Per-model statistics entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelStatsEntry {
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
    /// Whether the model is currently disabled
    pub disabled: bool,
}

impl From<ModelStatsSnapshot> for ModelStatsEntry {
    fn from(snapshot: ModelStatsSnapshot) -> Self {
        Self {
            model: snapshot.model,
            success_count: snapshot.success_count,
            error_count: snapshot.error_count,
            success_rate: snapshot.success_rate,
            last_error: snapshot.last_error,
            last_error_at: snapshot.last_error_at,
            disabled: snapshot.disabled,
        }
    }
}

/// Aggregate statistics summary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsSummary {
    /// Total recorded attempts across all models
    pub total_requests: u64,
    /// Total successful attempts
    pub total_successes: u64,
    /// Total failed attempts
    pub total_errors: u64,
    /// Overall success-rate percentage string, or "N/A" with zero attempts
    pub overall_success_rate: String,
    /// Operator hint derived from the current state
    pub recommendation: String,
}

impl From<DispatchSummary> for StatsSummary {
    fn from(summary: DispatchSummary) -> Self {
        Self {
            total_requests: summary.total_requests,
            total_successes: summary.total_successes,
            total_errors: summary.total_errors,
            overall_success_rate: summary.overall_success_rate,
            recommendation: summary.recommendation,
        }
    }
}

/// Model statistics response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelStatsResponse {
    /// Per-model statistics in priority order
    pub models: Vec<ModelStatsEntry>,
    /// Aggregate summary
    pub summary: StatsSummary,
}

/// Management action request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModelActionRequest {
    /// One of "reset", "disable", or "enable"
    pub action: String,
    /// Target model id, required for disable/enable
    pub model: Option<String>,
}

/// Management action response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelActionResponse {
    /// Whether the action was applied
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
}
