#![warn(missing_docs)]

//! Newsbrief HTTP API
//!
//! Exposes AI generation over the fallback dispatcher plus a monitoring
//! endpoint for per-model statistics and manual enable/disable control.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use server::ApiServer;
pub use state::AppState;
