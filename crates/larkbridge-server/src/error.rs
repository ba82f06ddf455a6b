//! Error types for the relay server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use larkbridge_alerts::AlertError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors that can occur in the relay server.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// The request body was missing or malformed.
    #[error("invalid request format: {0}")]
    InvalidRequest(String),

    /// The request carried an empty `alerts` array.
    #[error("request contains no alerts")]
    EmptyAlerts,

    /// Alert transformation failed.
    #[error(transparent)]
    Alert(#[from] AlertError),

    /// Every destination rejected the message or was unreachable.
    #[error("failed to send message to Lark")]
    DispatchFailed,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Self::InvalidRequest(_) | Self::EmptyAlerts => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            // Structural and timestamp problems live in the client-supplied
            // body, so they are client errors.
            Self::Alert(AlertError::MissingLabels | AlertError::InvalidTimestamp { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_alert")
            }
            Self::DispatchFailed => (StatusCode::INTERNAL_SERVER_ERROR, "dispatch_failed"),
            Self::BindFailed(_, _) | Self::Alert(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"error":"internal_error","message":"failed to serialize error"}"#.to_string()
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}
