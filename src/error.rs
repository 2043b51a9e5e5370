//! Error types for semlayer.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SemError>;

#[derive(Error, Debug)]
pub enum SemError {
    /// Bad or missing concept/document source, or invalid configuration.
    /// Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A query was issued before the pipeline finished initializing.
    #[error("pipeline not initialized; call initialize() first")]
    NotReady,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Embedding provider failure or contract violation. Never retried.
    #[error("embedding provider error: {0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SemError {
    /// Stable machine-readable code used by robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::NotReady => "not_ready",
            Self::InvalidInput(_) => "invalid_input",
            Self::Provider(_) => "provider_error",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
        }
    }
}

impl From<serde_json::Error> for SemError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
