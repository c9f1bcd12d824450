//! Error types for catalog ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the catalog and structure sheets.
///
/// Malformed cells and missing columns are not errors; they normalize to
/// empty values and surface as warnings in the load report.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Data directory not found or not readable.
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data directory holds no CSV sheet to use as catalog.
    #[error("no catalog sheet found in {path}")]
    CatalogNotFound { path: PathBuf },

    /// Failed to parse a CSV sheet.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
