//! Newsbrief AI Providers - Model fallback dispatcher for generation backends
//!
//! This crate maximizes the chance that a generation request succeeds despite
//! individual model quota exhaustion or transient failure: requests are tried
//! against an ordered list of candidate models, failures are recorded per
//! model, and operators can disable or re-enable individual models at runtime.

pub mod backend;
pub mod backends;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod stats;

// Re-export commonly used types
pub use backend::{BackendRegistry, GenerationBackend};
pub use backends::{GeminiBackend, QwenBackend};
pub use config::{DispatcherConfig, DEFAULT_MODEL_PRIORITY};
pub use dispatcher::FallbackDispatcher;
pub use error::ProviderError;
pub use models::{
    CallConfig, DispatchResult, DispatchSummary, GenerationRequest, ModelStatsSnapshot,
};
pub use stats::ModelStatsRegistry;
