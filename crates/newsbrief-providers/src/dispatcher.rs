//! Model fallback dispatcher
//!
//! Tries candidate models in priority order until one succeeds, recording
//! per-model statistics along the way. A preferred model (when configured
//! and enabled) jumps to the front of the order; disabled models are
//! excluded entirely.

use tracing::{debug, warn};

use crate::{
    backend::BackendRegistry,
    models::{CallConfig, DispatchResult, DispatchSummary, GenerationRequest, ModelStatsSnapshot},
    stats::ModelStatsRegistry,
};

/// Central coordinator for fallback generation calls
pub struct FallbackDispatcher {
    priority: Vec<String>,
    backends: BackendRegistry,
    stats: ModelStatsRegistry,
}

impl FallbackDispatcher {
    /// Create a dispatcher over the given model priority list and backends
    pub fn new(priority: Vec<String>, backends: BackendRegistry) -> Self {
        let stats = ModelStatsRegistry::new(&priority);
        Self {
            priority,
            backends,
            stats,
        }
    }

    /// The configured model priority list
    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Whether the given model id is configured
    pub fn has_model(&self, model: &str) -> bool {
        self.stats.has_model(model)
    }

    /// Candidate order for one call: enabled models in priority order, with
    /// the preferred model (when present in that filtered list) moved to the
    /// front. The remaining models keep their relative order.
    pub fn candidate_order(&self, preferred: Option<&str>) -> Vec<String> {
        let mut order = self.stats.enabled_order();
        if let Some(preferred) = preferred {
            if let Some(pos) = order.iter().position(|m| m == preferred) {
                let model = order.remove(pos);
                order.insert(0, model);
            }
        }
        order
    }

    /// Try each candidate model in order and return the first success.
    ///
    /// Per-candidate failures are recorded and classified (quota vs. other)
    /// for the log line only; both classes fall through to the next
    /// candidate. Exhausting every candidate yields a failure-shaped
    /// `DispatchResult` whose message contains the last error encountered.
    /// This method never panics and never surfaces a backend error directly.
    pub async fn dispatch(&self, prompt: &str, config: &CallConfig) -> DispatchResult {
        let candidates = self.candidate_order(config.model.as_deref());
        if candidates.is_empty() {
            return DispatchResult::failure(
                "no models available: every configured model is disabled",
            );
        }

        let mut last_error: Option<(String, String)> = None;

        for model in &candidates {
            let backend = match self.backends.resolve(model) {
                Some(backend) => backend,
                None => {
                    let message = format!("no backend configured for model {model}");
                    warn!("{}", message);
                    self.stats.record_error(model, &message);
                    last_error = Some((model.clone(), message));
                    continue;
                }
            };

            let request = GenerationRequest {
                model: model.clone(),
                prompt: prompt.to_string(),
                system_prompt: config.system_prompt.clone(),
                max_tokens: config.max_tokens(),
                temperature: config.temperature(),
                top_p: config.top_p(),
            };

            debug!("trying model {} via backend {}", model, backend.id());

            match backend.generate(request).await {
                Ok(content) => {
                    self.stats.record_success(model);
                    debug!("model {} succeeded", model);
                    return DispatchResult::success(content, model.clone());
                }
                Err(err) => {
                    let message = err.to_string();
                    // Classification is informational only; both quota and
                    // non-quota failures continue to the next candidate.
                    if err.is_quota_error() {
                        warn!("model {} hit quota/rate limit: {}", model, message);
                    } else {
                        warn!("model {} failed: {}", model, message);
                    }
                    self.stats.record_error(model, &message);
                    last_error = Some((model.clone(), message));
                }
            }
        }

        match last_error {
            Some((model, error)) => DispatchResult::failure(format!(
                "all {} candidate models failed; last error from {}: {}",
                candidates.len(),
                model,
                error
            )),
            None => DispatchResult::failure("no models available"),
        }
    }

    /// Per-model statistics in configured order. Pure read, no mutation.
    pub fn stats(&self) -> Vec<ModelStatsSnapshot> {
        self.stats.snapshot()
    }

    /// Aggregate statistics across all configured models
    pub fn summary(&self) -> DispatchSummary {
        DispatchSummary::from_snapshots(&self.stats.snapshot())
    }

    /// Exclude a model from subsequent candidate orders. No-op for unknown ids.
    pub fn disable_model(&self, model: &str) {
        self.stats.disable(model);
    }

    /// Re-admit a model and reset its error counter. No-op for unknown ids.
    pub fn enable_model(&self, model: &str) {
        self.stats.enable(model);
    }

    /// Reset all counters, disabled flags, and last-error fields
    pub fn reset_stats(&self) {
        self.stats.reset_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> FallbackDispatcher {
        FallbackDispatcher::new(
            vec![
                "model-a".to_string(),
                "model-b".to_string(),
                "model-c".to_string(),
            ],
            BackendRegistry::new(),
        )
    }

    #[test]
    fn test_candidate_order_default() {
        let dispatcher = dispatcher();
        assert_eq!(
            dispatcher.candidate_order(None),
            vec!["model-a", "model-b", "model-c"]
        );
    }

    #[test]
    fn test_candidate_order_preferred_moves_to_front() {
        let dispatcher = dispatcher();
        assert_eq!(
            dispatcher.candidate_order(Some("model-c")),
            vec!["model-c", "model-a", "model-b"]
        );
    }

    #[test]
    fn test_candidate_order_unknown_preferred_is_ignored() {
        let dispatcher = dispatcher();
        assert_eq!(
            dispatcher.candidate_order(Some("model-z")),
            vec!["model-a", "model-b", "model-c"]
        );
    }

    #[test]
    fn test_candidate_order_excludes_disabled() {
        let dispatcher = dispatcher();
        dispatcher.disable_model("model-b");
        assert_eq!(dispatcher.candidate_order(None), vec!["model-a", "model-c"]);
    }

    #[test]
    fn test_candidate_order_disabled_preferred_is_excluded() {
        let dispatcher = dispatcher();
        dispatcher.disable_model("model-a");
        assert_eq!(
            dispatcher.candidate_order(Some("model-a")),
            vec!["model-b", "model-c"]
        );
    }

    #[tokio::test]
    async fn test_dispatch_with_all_models_disabled() {
        let dispatcher = dispatcher();
        dispatcher.disable_model("model-a");
        dispatcher.disable_model("model-b");
        dispatcher.disable_model("model-c");

        let result = dispatcher.dispatch("hello", &CallConfig::default()).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("disabled"));
    }

    #[tokio::test]
    async fn test_dispatch_with_no_backends_fails_and_records_errors() {
        let dispatcher = dispatcher();
        let result = dispatcher.dispatch("hello", &CallConfig::default()).await;

        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("model-c"), "should name the last model: {error}");
        assert!(error.contains("no backend configured"));

        for snapshot in dispatcher.stats() {
            assert_eq!(snapshot.error_count, 1);
        }
    }
}
