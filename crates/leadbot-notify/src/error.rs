//! Error types for lead notification.

use leadbot_core::error::LeadbotError;

/// Errors from rendering or delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),
    #[error("Notifications are disabled")]
    Disabled,
    #[error("Delivery via {backend} failed: {reason}")]
    Delivery {
        backend: &'static str,
        reason: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<LeadbotError> for NotifyError {
    fn from(err: LeadbotError) -> Self {
        NotifyError::Config(err.to_string())
    }
}
