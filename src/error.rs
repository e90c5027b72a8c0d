use std::io;
use thiserror::Error;

/// Error type for cleaning operations.
///
/// Row-level problems are never errors: they are recorded in the report's
/// log. These variants cover I/O and configuration only.
#[derive(Error, Debug)]
pub enum CleanError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet writing error.
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleanError>;
