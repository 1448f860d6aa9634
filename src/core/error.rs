//! Error types for the water simulation

use thiserror::Error;

/// Main error type for the simulation
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grid dimensions {width}x{length}: both must be at least 2")]
    InvalidDimensions { width: usize, length: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
