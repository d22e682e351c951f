//! Error types for GatiIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// GatiIO error types
///
/// Covers session-fatal and startup conditions only. Per-record decode
/// failures use [`crate::decode::DecodeError`] and are absorbed inside the
/// ingestion loop; they never appear here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error (transport read, config file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file write error
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
