//! Generation endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{GenerateRequest, GenerateResponse},
    state::AppState,
};

/// Generate text through the model fallback dispatcher
///
/// A successful dispatch returns 200 with the generated text and the model
/// that produced it. Exhausting every candidate model returns 500 with the
/// aggregate error and a per-model stats snapshot for diagnostics. The
/// handler itself never retries.
#[utoipa::path(
    post,
    path = "/api/v1/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generation succeeded", body = GenerateResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "All candidate models failed", body = GenerateResponse)
    )
)]
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Response> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("prompt must not be empty".to_string()));
    }

    let config = request.call_config();
    let result = state.dispatcher.dispatch(&request.prompt, &config).await;

    if result.success {
        Ok((StatusCode::OK, Json(GenerateResponse::from_result(result))).into_response())
    } else {
        let stats = state
            .dispatcher
            .stats()
            .into_iter()
            .map(Into::into)
            .collect();
        Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(GenerateResponse::failure_with_stats(result, stats)),
        )
            .into_response())
    }
}
