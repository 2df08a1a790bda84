//! Unified error types for the status service and its diagnostics.

use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Probe-related error.
    #[error("probe error: {0}")]
    Probe(#[from] ProbeError),

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Network probe errors.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The host's interfaces could not be listed.
    #[error("failed to enumerate network interfaces: {0}")]
    InterfaceEnumeration(#[source] std::io::Error),

    /// A probe target URL could not be built.
    #[error("invalid probe target {target}: {reason}")]
    InvalidTarget {
        /// The address or URL that failed.
        target: String,
        /// Reason for failure.
        reason: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
