//! API error types and JSON error response formatting.
//!
//! Every failed request answers with `{error, message}` where `error` is a
//! stable machine-readable code.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use leadbot_chat::ChatError;
use leadbot_core::LeadbotError;
use leadbot_notify::NotifyError;

/// Shown to the visitor when a contact form cannot be delivered.
pub const DELIVERY_FAILED: &str =
    "Sorry, there was an error sending your message. Please try again.";

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400: empty or oversized message, malformed parameters.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// 404: unknown session.
    #[error("not found: {0}")]
    NotFound(String),
    /// 422: contact form failed validation.
    #[error("unprocessable entity: {0}")]
    UnprocessableEntity(String),
    /// 502: the notification backend refused the delivery.
    #[error("bad gateway: {0}")]
    BadGateway(String),
    /// 503: chat or notifications switched off.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_entity", msg)
            }
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal API error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyMessage | ChatError::MessageTooLong(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ChatError::SessionNotFound(_) => ApiError::NotFound(err.to_string()),
            ChatError::Disabled => ApiError::ServiceUnavailable(err.to_string()),
            ChatError::Config(_) | ChatError::Internal(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::InvalidSubmission(msg) => ApiError::UnprocessableEntity(msg),
            NotifyError::Disabled => ApiError::ServiceUnavailable(err.to_string()),
            NotifyError::Delivery { backend, reason } => {
                tracing::warn!(backend, reason = %reason, "Contact form delivery failed");
                ApiError::BadGateway(DELIVERY_FAILED.to_string())
            }
            NotifyError::Config(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<LeadbotError> for ApiError {
    fn from(err: LeadbotError) -> Self {
        match err {
            LeadbotError::Config(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
