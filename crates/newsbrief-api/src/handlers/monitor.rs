//! Model monitoring and management endpoint

use axum::{extract::State, Json};

use crate::{
    error::{ApiError, ApiResult},
    models::{ModelActionRequest, ModelActionResponse, ModelStatsResponse},
    state::AppState,
};

/// Get per-model statistics plus an aggregate summary
#[utoipa::path(
    get,
    path = "/api/v1/models/stats",
    responses(
        (status = 200, description = "Current model statistics", body = ModelStatsResponse)
    )
)]
pub async fn get_model_stats(State(state): State<AppState>) -> ApiResult<Json<ModelStatsResponse>> {
    let models = state
        .dispatcher
        .stats()
        .into_iter()
        .map(Into::into)
        .collect();
    let summary = state.dispatcher.summary().into();

    Ok(Json(ModelStatsResponse { models, summary }))
}

/// Apply a management action: reset statistics, or disable/enable a model
///
/// Disabling or enabling an unconfigured model id is a no-op and still
/// reports success.
#[utoipa::path(
    post,
    path = "/api/v1/models/stats",
    request_body = ModelActionRequest,
    responses(
        (status = 200, description = "Action applied", body = ModelActionResponse),
        (status = 400, description = "Unknown action or missing model id")
    )
)]
pub async fn model_action(
    State(state): State<AppState>,
    Json(request): Json<ModelActionRequest>,
) -> ApiResult<Json<ModelActionResponse>> {
    match request.action.as_str() {
        "reset" => {
            state.dispatcher.reset_stats();
            Ok(Json(ModelActionResponse {
                success: true,
                message: "model statistics reset".to_string(),
            }))
        }
        action @ ("disable" | "enable") => {
            let model = request.model.as_deref().ok_or_else(|| {
                ApiError::BadRequest(format!("action '{action}' requires a model id"))
            })?;

            let message = if state.dispatcher.has_model(model) {
                if action == "disable" {
                    state.dispatcher.disable_model(model);
                    format!("model {model} disabled")
                } else {
                    state.dispatcher.enable_model(model);
                    format!("model {model} enabled, error count reset")
                }
            } else {
                format!("model {model} is not configured; no changes made")
            };

            Ok(Json(ModelActionResponse {
                success: true,
                message,
            }))
        }
        other => Err(ApiError::BadRequest(format!("unknown action: {other}"))),
    }
}
