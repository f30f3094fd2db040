//! Error types for the `askdoc-extract` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting content from a file.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file's extension is not in the supported set.
    #[error("unsupported file type: {}", .0.display())]
    UnsupportedType(PathBuf),

    /// Reading the file from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF text extraction failed.
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// DOCX container or XML parsing failed.
    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    /// Image decoding failed.
    #[error("image decoding failed: {0}")]
    Image(String),
}
