//! Application state for the API server

use std::sync::Arc;
use std::time::Instant;

use newsbrief_providers::FallbackDispatcher;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Model fallback dispatcher
    pub dispatcher: Arc<FallbackDispatcher>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state around a dispatcher
    pub fn new(dispatcher: Arc<FallbackDispatcher>) -> Self {
        Self {
            dispatcher,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
