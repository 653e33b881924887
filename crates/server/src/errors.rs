use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::MessageBody;

pub const PROVIDER_NOT_FOUND: &str = "Provider not found";
pub const PROVIDER_ID_REQUIRED: &str = "Provider ID is required";

/// Handler failure rendered as `{ "message": ... }` with the chosen status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, PROVIDER_NOT_FOUND)
    }

    pub fn missing_id() -> Self {
        Self::bad_request(PROVIDER_ID_REQUIRED)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageBody::new(self.message))).into_response()
    }
}
