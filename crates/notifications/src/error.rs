//! Notification error types.

use thiserror::Error;

/// Errors that can occur while delivering notifications.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The message bus rejected a message.
    #[error("Publish failed: {0}")]
    Publish(String),

    /// The mail transport rejected a message.
    #[error("Mail delivery failed: {0}")]
    Mail(String),

    /// A payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for notification results.
pub type Result<T> = std::result::Result<T, NotificationError>;
