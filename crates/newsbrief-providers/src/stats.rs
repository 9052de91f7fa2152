//! Per-model call statistics and availability flags

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{format_success_rate, ModelStatsSnapshot};

/// Internal state for one configured model
struct ModelEntry {
    id: String,
    success_count: u64,
    error_count: u64,
    last_error: Option<String>,
    last_error_at: Option<DateTime<Utc>>,
    disabled: bool,
}

impl ModelEntry {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            success_count: 0,
            error_count: 0,
            last_error: None,
            last_error_at: None,
            disabled: false,
        }
    }
}

/// Registry of per-model call statistics
///
/// One entry per configured model, created up front and never removed (only
/// reset). Owned by the dispatcher rather than living in process-global
/// state so tests can construct isolated instances. Counters are best-effort
/// monitoring data, not billing-grade accounting.
pub struct ModelStatsRegistry {
    entries: RwLock<Vec<ModelEntry>>,
}

impl ModelStatsRegistry {
    /// Create a registry with one entry per model, preserving order
    pub fn new(models: &[String]) -> Self {
        Self {
            entries: RwLock::new(models.iter().map(ModelEntry::new).collect()),
        }
    }

    /// Record a successful call: success += 1, error count resets to zero
    pub fn record_success(&self, model: &str) {
        let mut entries = self.entries.write().expect("RwLock poisoned");
        if let Some(entry) = entries.iter_mut().find(|e| e.id == model) {
            entry.success_count += 1;
            entry.error_count = 0;
        }
    }

    /// Record a failed call with its error message and timestamp
    pub fn record_error(&self, model: &str, message: &str) {
        let mut entries = self.entries.write().expect("RwLock poisoned");
        if let Some(entry) = entries.iter_mut().find(|e| e.id == model) {
            entry.error_count += 1;
            entry.last_error = Some(message.to_string());
            entry.last_error_at = Some(Utc::now());
        }
    }

    /// Exclude a model from subsequent candidate orders. No-op for unknown ids.
    pub fn disable(&self, model: &str) {
        let mut entries = self.entries.write().expect("RwLock poisoned");
        if let Some(entry) = entries.iter_mut().find(|e| e.id == model) {
            entry.disabled = true;
            debug!("model {} disabled", model);
        }
    }

    /// Re-admit a model to candidate orders and reset its error counter.
    ///
    /// The success counter is untouched. No-op for unknown ids.
    pub fn enable(&self, model: &str) {
        let mut entries = self.entries.write().expect("RwLock poisoned");
        if let Some(entry) = entries.iter_mut().find(|e| e.id == model) {
            entry.disabled = false;
            entry.error_count = 0;
            debug!("model {} enabled, error count reset", model);
        }
    }

    /// Reset every entry to its initial state: zero counters, cleared
    /// last-error fields, disabled flags cleared
    pub fn reset_all(&self) {
        let mut entries = self.entries.write().expect("RwLock poisoned");
        for entry in entries.iter_mut() {
            entry.success_count = 0;
            entry.error_count = 0;
            entry.last_error = None;
            entry.last_error_at = None;
            entry.disabled = false;
        }
        debug!("model statistics reset");
    }

    /// Whether the given model is currently disabled (false for unknown ids)
    pub fn is_disabled(&self, model: &str) -> bool {
        let entries = self.entries.read().expect("RwLock poisoned");
        entries
            .iter()
            .find(|e| e.id == model)
            .map(|e| e.disabled)
            .unwrap_or(false)
    }

    /// Whether the given model id is configured
    pub fn has_model(&self, model: &str) -> bool {
        let entries = self.entries.read().expect("RwLock poisoned");
        entries.iter().any(|e| e.id == model)
    }

    /// Configured priority order with disabled models removed
    pub fn enabled_order(&self) -> Vec<String> {
        let entries = self.entries.read().expect("RwLock poisoned");
        entries
            .iter()
            .filter(|e| !e.disabled)
            .map(|e| e.id.clone())
            .collect()
    }

    /// Per-model summaries in configured order. Pure read, no mutation.
    pub fn snapshot(&self) -> Vec<ModelStatsSnapshot> {
        let entries = self.entries.read().expect("RwLock poisoned");
        entries
            .iter()
            .map(|e| ModelStatsSnapshot {
                model: e.id.clone(),
                success_count: e.success_count,
                error_count: e.error_count,
                success_rate: format_success_rate(
                    e.success_count,
                    e.success_count + e.error_count,
                ),
                last_error: e.last_error.clone(),
                last_error_at: e.last_error_at,
                disabled: e.disabled,
            })
            .collect()
    }
}
