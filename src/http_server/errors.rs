//! HTTP error envelope
//!
//! Every failure is reported as `{success: false, error, message?}` with the
//! status code of the underlying error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::contact::ContactError;
use crate::trends::TrendsError;

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Trends(#[from] TrendsError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            ApiError::Trends(e) => e.status_code(),
            ApiError::Contact(e) => e.status_code(),
            ApiError::MethodNotAllowed => 405,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            // Relay failures keep a fixed headline and carry the cause separately
            ApiError::Contact(e) if !e.is_client_error() => ErrorResponse {
                success: false,
                error: "Failed to send email".to_string(),
                message: Some(e.to_string()),
            },
            other => ErrorResponse {
                success: false,
                error: other.to_string(),
                message: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(self.to_error_response())).into_response()
    }
}

/// Fallback for methods a route does not serve
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
