use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Canonical JSON payload for error responses.
#[derive(Debug, Serialize, Clone)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Plain acknowledgement for write endpoints.
#[derive(Debug, Serialize, Clone)]
pub struct SuccessBody {
    pub success: bool,
}

impl SuccessBody {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Helper for handlers that return `(StatusCode, Json<ErrorBody>)`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(ErrorBody::new(message)))
}

pub fn server_error() -> (StatusCode, Json<ErrorBody>) {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
}

pub fn not_found() -> (StatusCode, Json<ErrorBody>) {
    json_error(StatusCode::NOT_FOUND, "Not found")
}
