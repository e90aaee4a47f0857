use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::GRADER_STATUS_HEADER;
use crate::embedding::EmbeddingError;
use crate::grading::GradingError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown example '{0}'")]
    UnknownExample(String),

    #[error(transparent)]
    Grading(#[from] GradingError),

    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(#[from] EmbeddingError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl GatewayError {
    /// HTTP status and `X-Grader-Status` value for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::UnknownExample(_) => (StatusCode::NOT_FOUND, "unknown_example"),
            GatewayError::Grading(err) => match err {
                GradingError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.code()),
                e if e.is_client_error() => (StatusCode::BAD_REQUEST, err.code()),
                GradingError::Embedding(_) => (StatusCode::BAD_GATEWAY, err.code()),
                GradingError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, err.code()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, err.code()),
            },
            GatewayError::ModelUnavailable(_) => (StatusCode::BAD_GATEWAY, "embedding_error"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, grader_status) = self.status();

        let mut headers = HeaderMap::new();
        headers.insert(GRADER_STATUS_HEADER, HeaderValue::from_static(grader_status));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
            kind: grader_status,
        });

        (status, headers, body).into_response()
    }
}
