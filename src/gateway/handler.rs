use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument, warn};

use super::GRADER_STATUS_HEADER;
use crate::bank::EXAMPLES;
use crate::constants::KNOWN_MODEL_IDS;
use crate::embedding::Embedder;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{ExamplesResponse, GradePayload, MethodInfo, MethodsResponse};
use crate::gateway::state::HandlerState;
use crate::grading::{Grader, GradingError, grade_with_timeout};
use crate::similarity::SimilarityMethod;

pub(crate) fn make_response<T: IntoResponse>(
    status: StatusCode,
    grader_status: &'static str,
    body: T,
) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(GRADER_STATUS_HEADER, HeaderValue::from_static(grader_status));
    (status, headers, body).into_response()
}

/// `POST /v1/grade`
#[instrument(skip(state, body), fields(method = tracing::field::Empty, model = tracing::field::Empty))]
pub async fn grade_handler(
    State(state): State<HandlerState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let payload: GradePayload = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let model_id = payload
        .model
        .clone()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| state.default_model.clone());
    let request = payload.into_request(state.default_method)?;

    let span = tracing::Span::current();
    span.record("method", tracing::field::display(request.method));

    let grader = if request.method.uses_embeddings() {
        span.record("model", tracing::field::display(&model_id));
        let embedder = resolve_embedder(&state, model_id).await?;
        Grader::new(embedder, state.scoring)?
    } else {
        debug!("Lexical method, skipping embedder");
        Grader::lexical(state.scoring)?
    };

    let report = grade_with_timeout(Arc::new(grader), request, state.timeout)
        .await
        .inspect_err(|e| warn!(code = e.code(), error = %e, "Grading failed"))?;

    info!(
        final_score = report.final_score,
        label = %report.label,
        "Grade request served"
    );

    Ok(make_response(StatusCode::OK, "graded", Json(report)))
}

/// Loads (or reuses) the embedder on the blocking pool; first loads read checkpoints from disk.
///
/// A first load is bounded by the request deadline. A load that misses it keeps running
/// and still lands in the registry for later requests.
pub(crate) async fn resolve_embedder(
    state: &HandlerState,
    model_id: String,
) -> Result<Arc<dyn Embedder>, GatewayError> {
    if let Some(embedder) = state.registry.loaded(&model_id) {
        return Ok(embedder);
    }

    let registry = Arc::clone(&state.registry);
    let load = tokio::task::spawn_blocking(move || registry.get(&model_id));
    let joined = tokio::time::timeout(state.timeout, load).await.map_err(|_| {
        GradingError::Timeout {
            timeout_ms: state.timeout.as_millis() as u64,
        }
    })?;
    let embedder = joined
        .map_err(|e| GatewayError::InternalError(format!("model load task failed: {}", e)))??;
    Ok(embedder)
}

/// `GET /v1/methods`
#[instrument(skip(state))]
pub async fn methods_handler(State(state): State<HandlerState>) -> Response {
    let methods = SimilarityMethod::ALL
        .into_iter()
        .map(|method| MethodInfo {
            name: method.as_str(),
            uses_embeddings: method.uses_embeddings(),
            is_distance: method.is_distance(),
        })
        .collect();

    make_response(
        StatusCode::OK,
        "ok",
        Json(MethodsResponse {
            default: state.default_method,
            methods,
            models: KNOWN_MODEL_IDS.to_vec(),
        }),
    )
}

/// `GET /v1/examples`
#[instrument]
pub async fn examples_handler() -> Response {
    make_response(
        StatusCode::OK,
        "ok",
        Json(ExamplesResponse { examples: EXAMPLES }),
    )
}
