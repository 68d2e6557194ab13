use thiserror::Error;

/// Top-level error type for Leadbot.
///
/// Subsystem crates define their own error types and implement
/// `From<LeadbotError>` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeadbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for LeadbotError {
    fn from(err: toml::de::Error) -> Self {
        LeadbotError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for LeadbotError {
    fn from(err: toml::ser::Error) -> Self {
        LeadbotError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for LeadbotError {
    fn from(err: serde_json::Error) -> Self {
        LeadbotError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Leadbot operations.
pub type Result<T> = std::result::Result<T, LeadbotError>;
