use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error surfaced by the HTTP layer. Serialized as `{"error": .., "detail": ..}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Drawing not found")]
    NotFound,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Failed to {action}: {message}")]
    Internal { action: &'static str, message: String },
}

impl ApiError {
    /// Map a service failure; `action` (e.g. "create drawing") prefixes 500 messages.
    pub fn from_service(err: ServiceError, action: &'static str) -> Self {
        match err {
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Validation(msg) => ApiError::InvalidRequest(msg),
            other => ApiError::Internal { action, message: other.to_string() },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ApiError::NotFound => "Not Found",
            ApiError::InvalidRequest(_) => "Invalid Request",
            ApiError::Internal { .. } => "Internal Error",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        if status.is_server_error() {
            error!(error = %detail, "request failed");
        }
        (status, Json(serde_json::json!({"error": self.title(), "detail": detail}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let nf = ApiError::from_service(ServiceError::not_found("drawing"), "get drawing");
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);
        assert_eq!(nf.to_string(), "Drawing not found");

        let bad = ApiError::from_service(ServiceError::Validation("No fields to update".into()), "update drawing");
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.to_string(), "No fields to update");

        let db = ApiError::from_service(ServiceError::Db("disk I/O error".into()), "create drawing");
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.to_string(), "Failed to create drawing: database error: disk I/O error");
    }
}
