//! Error types for the REST query surface.
//!
//! [`ApiError`] covers the read-only endpoints and converts into an Axum
//! HTTP response via its [`IntoResponse`] implementation. WebSocket
//! command rejections never surface here -- they are logged and the
//! connection stays open.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the REST query layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested game does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
