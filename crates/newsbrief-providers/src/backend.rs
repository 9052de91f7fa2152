//! Generation backend trait and registry

use std::sync::Arc;

use async_trait::async_trait;

use crate::{error::ProviderError, models::GenerationRequest};

/// Core trait that all generation backends must implement
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Get the backend's unique identifier
    fn id(&self) -> &str;

    /// Get the backend's human-readable name
    fn name(&self) -> &str;

    /// Whether this backend serves the given model id
    fn supports(&self, model: &str) -> bool;

    /// Issue a generation call and return the generated text
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}

/// Ordered registry of generation backends
///
/// A model id resolves to the first registered backend that supports it.
#[derive(Default)]
pub struct BackendRegistry {
    backends: Vec<Arc<dyn GenerationBackend>>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend. Fails if a backend with the same id already exists.
    pub fn register(&mut self, backend: Arc<dyn GenerationBackend>) -> Result<(), ProviderError> {
        if self.backends.iter().any(|b| b.id() == backend.id()) {
            return Err(ProviderError::ConfigError(format!(
                "Backend already registered: {}",
                backend.id()
            )));
        }
        self.backends.push(backend);
        Ok(())
    }

    /// Resolve a model id to the first backend that supports it
    pub fn resolve(&self, model: &str) -> Option<Arc<dyn GenerationBackend>> {
        self.backends
            .iter()
            .find(|b| b.supports(model))
            .map(Arc::clone)
    }

    /// Number of registered backends
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Whether no backends are registered
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
