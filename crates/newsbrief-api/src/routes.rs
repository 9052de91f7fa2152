//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::{generate, health, monitor},
    state::AppState,
};

/// API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Generation
        .route("/api/v1/generate", post(generate::generate))
        // Model monitoring and management
        .route(
            "/api/v1/models/stats",
            get(monitor::get_model_stats).post(monitor::model_action),
        )
        // CORS
        .layer(CorsLayer::permissive())
}

/// Swagger UI routes
pub fn swagger_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Combined routes
pub fn all_routes() -> Router<AppState> {
    api_routes().merge(swagger_routes())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        generate::generate,
        monitor::get_model_stats,
        monitor::model_action,
    ),
    components(schemas(
        crate::models::GenerateRequest,
        crate::models::GenerateResponse,
        crate::models::ModelStatsEntry,
        crate::models::StatsSummary,
        crate::models::ModelStatsResponse,
        crate::models::ModelActionRequest,
        crate::models::ModelActionResponse,
        crate::models::HealthResponse,
    )),
    info(
        title = "Newsbrief API",
        version = "1.0.0",
        description = "AI generation with model fallback, plus model statistics monitoring"
    )
)]
struct ApiDoc;
