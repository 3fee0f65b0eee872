//! Error types for the rowscope crate.
//!
//! Almost nothing in the engine fails: invalid references degrade to no-ops.
//! Errors exist for the edges that touch serialization and the host.

use thiserror::Error;

/// Errors from building exports or loading configuration.
#[derive(Debug, Error)]
pub enum TableError {
    /// CSV serialization failed.
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON options could not be parsed.
    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML options could not be parsed.
    #[error("invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Unknown filter operator name.
    #[error("unknown filter operator '{0}', expected one of: contains, equals, startsWith, endsWith")]
    InvalidOperator(String),
}

/// Errors reported by a [`Host`](crate::Host) when a download or print is triggered.
///
/// The table never surfaces these to the caller; they are logged and dropped.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host environment has no such facility.
    #[error("{0} is not supported by this host")]
    Unsupported(&'static str),

    /// Writing the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rowscope operations.
pub type Result<T> = std::result::Result<T, TableError>;
