//! Client-layer error types

use thiserror::Error;

/// Errors raised by backend dispatch and configuration
#[derive(Error, Debug)]
pub enum ClientError {
    /// The configured backend kind is not known
    #[error("unsupported completion backend: {name}")]
    UnsupportedBackend {
        /// The backend name as configured
        name: String,
    },

    /// A backend failed to produce or continue a stream
    #[error("backend failure: {0}")]
    Backend(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
