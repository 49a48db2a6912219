//! Error types for workbook inspection

use thiserror::Error;

/// Result type alias for workbook operations
pub type WorkbookResult<T> = std::result::Result<T, WorkbookError>;

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("Failed to decode workbook: {0}")]
    Decode(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
