//! Error types for Clipdeck Core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Player error types
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Playback rate {rate}x is not in the allowed set")]
    UnsupportedRate { rate: f64 },

    // Source errors
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    // Lifecycle errors
    #[error("Player is unmounted")]
    Unmounted,

    #[error("Player task failed: {0}")]
    Runtime(String),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code for logs and host reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::UnsupportedRate { .. } => "UNSUPPORTED_RATE",
            Error::InvalidSource(_) => "INVALID_SOURCE",
            Error::Url(_) => "INVALID_URL",
            Error::Unmounted => "UNMOUNTED",
            Error::Runtime(_) => "RUNTIME",
            Error::Json(_) => "JSON",
            Error::Io(_) => "IO",
        }
    }
}

/// Failure reported by the decoder library.
///
/// This is forwarded to the host's `on_error` handler as-is. The player
/// never retries; recovery (e.g. swapping the source) belongs to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderError {
    /// Decoder-specific error code, if any
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl DecoderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl std::fmt::Display for DecoderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Unmounted.error_code(), "UNMOUNTED");
        assert_eq!(Error::UnsupportedRate { rate: 3.0 }.error_code(), "UNSUPPORTED_RATE");
        assert_eq!(Error::InvalidConfig("x".into()).error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_decoder_error_display() {
        let err = DecoderError::new("stream not found").with_code("404");
        assert_eq!(err.to_string(), "[404] stream not found");
        assert_eq!(DecoderError::new("boom").to_string(), "boom");
    }
}
