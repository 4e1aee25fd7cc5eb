// Catalog errors

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Catalog error types
#[derive(Debug, Error)]
pub enum CatalogError {
    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A JSON column or seed file could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A course failed validation and was not written
    #[error("Invalid course: {0}")]
    InvalidCourse(#[from] coursimil::SimilarityError),

    /// Seed file could not be read
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}
