//! Error types for reading catalogs and writing migration scripts.

use oxide_pgdiff_core::DiffError;

/// Errors that can occur while producing a migration script.
#[derive(Debug, thiserror::Error)]
pub enum PgDiffError {
    /// Database error while reading a catalog.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The catalog rows are inconsistent or the schemas cannot be diffed.
    #[error("Schema error: {0}")]
    Diff(#[from] DiffError),

    /// IO error while writing the script.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the JSON report.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid connection settings.
    #[error("Invalid configuration: {field} {message}")]
    Config {
        /// The offending setting.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, PgDiffError>;
