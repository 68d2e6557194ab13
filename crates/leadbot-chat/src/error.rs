//! Error types for chat sessions.

use leadbot_core::error::LeadbotError;

/// Errors from the session layer. The engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session not found: {0}")]
    SessionNotFound(uuid::Uuid),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<LeadbotError> for ChatError {
    fn from(err: LeadbotError) -> Self {
        match err {
            LeadbotError::Config(msg) => ChatError::Config(msg),
            other => ChatError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::Disabled.to_string(), "chat is disabled");
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::Internal("lock poisoned".into()).to_string(),
            "internal error: lock poisoned"
        );
    }

    #[test]
    fn test_session_not_found_preserves_uuid() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            ChatError::SessionNotFound(id).to_string(),
            "session not found: 550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_from_leadbot_error() {
        let err: ChatError = LeadbotError::Config("bad pricing".into()).into();
        assert!(matches!(err, ChatError::Config(ref m) if m == "bad pricing"));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: ChatError = LeadbotError::Io(io).into();
        assert!(matches!(err, ChatError::Internal(_)));
        assert!(err.to_string().contains("boom"));
    }
}
