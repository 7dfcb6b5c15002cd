//! Error types for unit conversion and content negotiation

use thiserror::Error;

/// Errors that can occur while converting or serving a unit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    /// The gzip writer failed
    #[error("gzip encode failed: {0}")]
    Encode(String),

    /// Stored bytes are not a valid gzip stream
    #[error("gzip decode failed: {0}")]
    Decode(String),

    /// Invalid negotiation configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CompressionError {
    /// Maps errors to HTTP status codes
    ///
    /// Every variant is a server-side failure: a decode error means the
    /// stored content is corrupt, not that the client sent anything wrong.
    pub fn to_http_status(&self) -> u16 {
        match self {
            CompressionError::Encode(_) => 500,
            CompressionError::Decode(_) => 500,
            CompressionError::InvalidConfig(_) => 500,
        }
    }
}
