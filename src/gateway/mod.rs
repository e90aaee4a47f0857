//! HTTP gateway (Axum) for grading answers.
//!
//! This module is primarily used by the `grader` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{examples_handler, grade_handler, methods_handler};
pub use state::HandlerState;

use handler::make_response;

/// Response header carrying the outcome of every gateway call.
pub const GRADER_STATUS_HEADER: &str = "x-grader-status";
pub const GRADER_STATUS_HEALTHY: &str = "healthy";
pub const GRADER_STATUS_READY: &str = "ready";
pub const GRADER_STATUS_PENDING: &str = "pending";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/examples", get(examples_handler))
        .route("/v1/methods", get(methods_handler))
        .route("/v1/grade", post(grade_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub embedding: &'static str,
    pub embedder_mode: &'static str,
    pub default_model: String,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    make_response(
        StatusCode::OK,
        GRADER_STATUS_HEALTHY,
        Json(HealthResponse { status: "ok" }),
    )
}

/// Ready once the default model is loaded.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let loaded = state.registry.loaded(&state.default_model);
    let embedding_status = if loaded.is_some() {
        GRADER_STATUS_READY
    } else {
        GRADER_STATUS_PENDING
    };

    let is_stub = match &loaded {
        Some(embedder) => embedder.is_stub(),
        None => state.registry.is_stub_only(),
    };
    let embedder_mode = if is_stub { "stub" } else { "real" };

    let components = ComponentStatus {
        http: GRADER_STATUS_READY,
        embedding: embedding_status,
        embedder_mode,
        default_model: state.default_model.clone(),
    };

    let is_ready = components.embedding == GRADER_STATUS_READY;
    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, GRADER_STATUS_READY)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, GRADER_STATUS_PENDING)
    };

    make_response(
        status_code,
        status_msg,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
}
