//! API error handling.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<jobly_core::Error> for ApiError {
    fn from(err: jobly_core::Error) -> Self {
        match err {
            jobly_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            jobly_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            jobly_core::Error::Conflict(msg) => ApiError::Conflict(msg),
            jobly_core::Error::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ApiError::Internal("internal server error".to_string())
            }
        }
    }
}

impl From<jobly_db::DbError> for ApiError {
    fn from(err: jobly_db::DbError) -> Self {
        match err {
            jobly_db::DbError::NotFound(msg) => ApiError::NotFound(msg),
            jobly_db::DbError::Duplicate(msg) => ApiError::Conflict(msg),
            jobly_db::DbError::InvalidInput(msg) => ApiError::BadRequest(msg),
            _ => {
                tracing::error!(error = %err, "Database error");
                ApiError::Internal("internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
