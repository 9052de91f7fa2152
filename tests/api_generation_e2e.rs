//! End-to-end tests for the HTTP API over a dispatcher with mock backends
//! Exercises generation, the statistics endpoint, and management actions
//! through the full router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use newsbrief_api::{routes::all_routes, AppState};
use newsbrief_providers::{
    BackendRegistry, FallbackDispatcher, GenerationBackend, GenerationRequest, ProviderError,
};

/// Mock backend serving one model that always succeeds
struct SucceedBackend {
    id: String,
    model: String,
}

#[async_trait::async_trait]
impl GenerationBackend for SucceedBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Succeed"
    }

    fn supports(&self, model: &str) -> bool {
        model == self.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        Ok(format!("briefing from {}", request.model))
    }
}

/// Mock backend serving one model that always fails
struct FailBackend {
    id: String,
    model: String,
    message: String,
}

#[async_trait::async_trait]
impl GenerationBackend for FailBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Fail"
    }

    fn supports(&self, model: &str) -> bool {
        model == self.model
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<String, ProviderError> {
        Err(ProviderError::ProviderError(self.message.clone()))
    }
}

fn succeed(id: &str, model: &str) -> Arc<dyn GenerationBackend> {
    Arc::new(SucceedBackend {
        id: id.to_string(),
        model: model.to_string(),
    })
}

fn fail(id: &str, model: &str, message: &str) -> Arc<dyn GenerationBackend> {
    Arc::new(FailBackend {
        id: id.to_string(),
        model: model.to_string(),
        message: message.to_string(),
    })
}

/// Router over model-a (failing with a quota message) and model-b (healthy)
fn test_app() -> Router {
    let mut backends = BackendRegistry::new();
    backends
        .register(fail("a", "model-a", "RESOURCE_EXHAUSTED: quota exceeded"))
        .unwrap();
    backends.register(succeed("b", "model-b")).unwrap();

    let dispatcher = FallbackDispatcher::new(
        vec!["model-a".to_string(), "model-b".to_string()],
        backends,
    );
    all_routes().with_state(AppState::new(Arc::new(dispatcher)))
}

/// Router whose every model fails
fn failing_app() -> Router {
    let mut backends = BackendRegistry::new();
    backends.register(fail("a", "model-a", "a broke")).unwrap();
    backends.register(fail("b", "model-b", "b broke")).unwrap();

    let dispatcher = FallbackDispatcher::new(
        vec!["model-a".to_string(), "model-b".to_string()],
        backends,
    );
    all_routes().with_state(AppState::new(Arc::new(dispatcher)))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_generate_falls_back_and_succeeds() {
    let app = test_app();
    let request = json_request(
        Method::POST,
        "/api/v1/generate",
        json!({"prompt": "summarize today's news"}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["model"], json!("model-b"));
    assert_eq!(body["content"], json!("briefing from model-b"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_generate_empty_prompt_is_rejected() {
    let app = test_app();
    let request = json_request(Method::POST, "/api/v1/generate", json!({"prompt": "   "}));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"]["type"], json!("bad_request"));
}

#[tokio::test]
async fn test_generate_exhaustion_returns_error_with_stats() {
    let app = failing_app();
    let request = json_request(Method::POST, "/api/v1/generate", json!({"prompt": "hello"}));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(false));
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("b broke"), "last error should surface: {error}");
    assert!(error.contains("model-b"));

    let stats = body["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["model"], json!("model-a"));
    assert_eq!(stats[0]["error_count"], json!(1));
}

#[tokio::test]
async fn test_stats_endpoint_reflects_traffic() {
    let app = test_app();

    let request = json_request(Method::POST, "/api/v1/generate", json!({"prompt": "hello"}));
    app.clone().oneshot(request).await.unwrap();

    let response = app.oneshot(get_request("/api/v1/models/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0]["model"], json!("model-a"));
    assert_eq!(models[0]["error_count"], json!(1));
    assert_eq!(models[0]["success_rate"], json!("0.0%"));
    assert_eq!(models[1]["model"], json!("model-b"));
    assert_eq!(models[1]["success_count"], json!(1));
    assert_eq!(models[1]["success_rate"], json!("100.0%"));

    assert_eq!(body["summary"]["total_requests"], json!(2));
    assert_eq!(body["summary"]["overall_success_rate"], json!("50.0%"));
    assert!(body["summary"]["recommendation"].is_string());
}

#[tokio::test]
async fn test_disable_action_removes_model_from_rotation() {
    let app = test_app();

    let request = json_request(
        Method::POST,
        "/api/v1/models/stats",
        json!({"action": "disable", "model": "model-a"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["message"].as_str().unwrap().contains("disabled"));

    // model-a no longer attempted, so its error count stays at zero
    let request = json_request(Method::POST, "/api/v1/generate", json!({"prompt": "hello"}));
    app.clone().oneshot(request).await.unwrap();

    let response = app.oneshot(get_request("/api/v1/models/stats")).await.unwrap();
    let body = response_json(response).await;
    let models = body["models"].as_array().unwrap();
    assert_eq!(models[0]["disabled"], json!(true));
    assert_eq!(models[0]["error_count"], json!(0));
}

#[tokio::test]
async fn test_enable_action_resets_error_count() {
    let app = test_app();

    let request = json_request(Method::POST, "/api/v1/generate", json!({"prompt": "hello"}));
    app.clone().oneshot(request).await.unwrap();

    let request = json_request(
        Method::POST,
        "/api/v1/models/stats",
        json!({"action": "enable", "model": "model-a"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/api/v1/models/stats")).await.unwrap();
    let body = response_json(response).await;
    let models = body["models"].as_array().unwrap();
    assert_eq!(models[0]["disabled"], json!(false));
    assert_eq!(models[0]["error_count"], json!(0));
}

#[tokio::test]
async fn test_reset_action_clears_all_stats() {
    let app = test_app();

    let request = json_request(Method::POST, "/api/v1/generate", json!({"prompt": "hello"}));
    app.clone().oneshot(request).await.unwrap();

    let request = json_request(
        Method::POST,
        "/api/v1/models/stats",
        json!({"action": "reset"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/api/v1/models/stats")).await.unwrap();
    let body = response_json(response).await;
    for model in body["models"].as_array().unwrap() {
        assert_eq!(model["success_count"], json!(0));
        assert_eq!(model["error_count"], json!(0));
        assert_eq!(model["success_rate"], json!("N/A"));
    }
    assert_eq!(body["summary"]["total_requests"], json!(0));
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let app = test_app();

    let request = json_request(
        Method::POST,
        "/api/v1/models/stats",
        json!({"action": "explode"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_action_on_unconfigured_model_is_a_noop() {
    let app = test_app();

    let request = json_request(
        Method::POST,
        "/api/v1/models/stats",
        json!({"action": "disable", "model": "model-z"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["message"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], json!("healthy"));
    assert!(body["version"].is_string());
}
