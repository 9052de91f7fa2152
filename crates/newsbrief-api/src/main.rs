//! Newsbrief API server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use newsbrief_api::{ApiServer, AppState};
use newsbrief_providers::DispatcherConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DispatcherConfig::from_env();
    if config.gemini_api_key.is_none() && config.dashscope_api_key.is_none() {
        tracing::warn!(
            "No provider API keys configured; set GEMINI_API_KEY or DASHSCOPE_API_KEY. \
             Every generation request will fail."
        );
    }

    let dispatcher = config
        .build_dispatcher()
        .context("failed to build fallback dispatcher")?;
    let state = AppState::new(Arc::new(dispatcher));

    let addr = std::env::var("NEWSBRIEF_API_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()
        .context("invalid NEWSBRIEF_API_ADDR")?;

    ApiServer::new(addr)
        .serve(state)
        .await
        .context("API server error")
}
