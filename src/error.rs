use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("invalid match pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("source directory '{0}' does not exist or is not a directory")]
    SourceDirMissing(PathBuf),

    #[error("page {page} is not present in '{file}'")]
    PageOutOfRange { file: String, page: u32 },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}
