//! Error types for Sentinel.

use thiserror::Error;

/// Library-level error type for Sentinel operations.
#[derive(Error, Debug)]
pub enum SentinelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The two error categories visible at the pipeline boundary.
///
/// Everything that isn't a caller mistake is some external backend being
/// unreachable, misconfigured, or timing out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is missing or malformed.
    InvalidInput,
    /// An external backend call failed or timed out.
    ServiceUnavailable,
}

impl SentinelError {
    /// Collapse the error into its caller-visible category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SentinelError::InvalidInput(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::ServiceUnavailable,
        }
    }
}

/// Result type alias for Sentinel operations.
pub type Result<T> = std::result::Result<T, SentinelError>;
