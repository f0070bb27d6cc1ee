//! Error types for pada-detect

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// pada-detect error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Detection model could not be opened or parsed
    #[error("failed to open model file '{}': {reason}", path.display())]
    ModelLoad {
        /// Configured model path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Engine name in configuration is not known
    #[error("Unknown detection engine: {0}")]
    UnknownEngine(String),

    /// Detection engine reported an internal failure
    #[error("Detection engine error: {0}")]
    Engine(String),

    /// Inbound scan violates its own declared limits
    #[error("Invalid scan: {0}")]
    InvalidScan(String),

    /// Wire encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// In-process channel has no receiver or sender left
    #[error("Channel closed: {0}")]
    ChannelClosed(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
