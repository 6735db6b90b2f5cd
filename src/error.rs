//! Error types for folio.

use thiserror::Error;

/// Main error type for folio operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the filesystem or terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds values the animator or console cannot use.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    /// The audio player could not be started.
    #[error("audio error: {message}")]
    Audio { message: String },

    /// Logging could not be initialized.
    #[error("logging error: {message}")]
    Logging { message: String },
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type alias using folio's Error.
pub type Result<T> = std::result::Result<T, Error>;
