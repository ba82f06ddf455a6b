//! Error types for the larkbridge-alerts crate.

use thiserror::Error;

/// Errors that can occur while transforming or delivering an alert.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The raw payload carried no `labels` object.
    #[error("alert payload has no labels object")]
    MissingLabels,

    /// A timestamp string did not match the `YYYY-MM-DDTHH:MM:SSZ` wire format.
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// The offending timestamp string.
        value: String,
        /// The underlying parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// Notification delivery could not be attempted.
    #[error("notification failed: {reason}")]
    NotificationFailed {
        /// The reason the notification failed.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for alert operations.
pub type Result<T> = std::result::Result<T, AlertError>;
