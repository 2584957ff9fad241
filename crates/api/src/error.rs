use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use visa_site_core::ContentError;

/// API error type that maps to JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::UnknownDomain(name) => {
                ApiError::NotFound(format!("content domain `{name}`"))
            }
            ContentError::NotFound(what) => ApiError::NotFound(what),
            ContentError::UnknownLanguage(tag) => {
                ApiError::BadRequest(format!("unknown language `{tag}`"))
            }
            ContentError::CannotDeleteDefault => ApiError::Conflict(err.to_string()),
            ContentError::WriteFailed(msg) => ApiError::WriteFailed(msg),
            ContentError::StoreUnavailable(msg) => ApiError::Unavailable(msg),
            ContentError::MalformedDocument { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Editor sign-in required".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::WriteFailed(msg) => {
                tracing::warn!("Write failed: {msg}");
                (StatusCode::BAD_GATEWAY, "writeFailed", msg.clone())
            }
            ApiError::Unavailable(msg) => {
                tracing::warn!("Store unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storeUnavailable",
                    "Content store is unreachable, try again shortly".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
