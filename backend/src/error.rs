//! Error types for the evidence map.
//!
//! - [`LoadError`] - Spreadsheet loading errors (fatal at startup)
//! - [`RenderError`] - Chart drawing errors
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while loading the evidence spreadsheet.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook could not be opened or read.
    #[error("Invalid workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// Invalid CSV content.
    #[error("Invalid CSV format: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook has no worksheet.
    #[error("Workbook has no worksheet")]
    NoWorksheet,

    /// Sheet or file has no header row.
    #[error("Spreadsheet is empty")]
    EmptySheet,

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// File extension is not a known spreadsheet format.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors while drawing the scatter chart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Drawing backend failure.
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart rendering failed while answering a request.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
