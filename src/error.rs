//! Service error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type. Only two shapes ever reach the
//! wire: `400 {"error": "Invalid input"}` for validation failures and
//! `500 {"error": "Server error"}` for everything else. The variant detail
//! strings exist for logs, never for responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// ```json
/// { "error": "Invalid input" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Generic, caller-facing error message.
    pub error: &'static str,
}

/// Server-side error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed (missing/empty name, malformed email).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Primary backend unreachable or misconfigured. Absorbed by the
    /// service layer's file fallback; maps to 500 if it ever escapes.
    #[error("primary backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Fallback store failure (filesystem or serialization).
    #[error("storage error: {0}")]
    Storage(String),

    /// Any other unexpected failure, including an unparseable request body.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::BackendUnavailable(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the fixed caller-facing message for this variant.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Invalid input",
            Self::BackendUnavailable(_) | Self::Storage(_) | Self::Internal(_) => "Server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.public_message(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::InvalidInput("empty name".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Invalid input");
    }

    #[test]
    fn storage_and_internal_map_to_server_error() {
        for err in [
            ApiError::BackendUnavailable("refused".to_string()),
            ApiError::Storage("disk full".to_string()),
            ApiError::Internal("oops".to_string()),
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.public_message(), "Server error");
        }
    }

    #[test]
    fn detail_never_leaks_into_public_message() {
        let err = ApiError::Storage("/secret/path unwritable".to_string());
        assert!(!err.public_message().contains("secret"));
    }
}
