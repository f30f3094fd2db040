//! File-kind dispatch by extension.

use std::path::Path;

/// The closed set of file kinds the ingestion pipeline accepts.
///
/// Selection is by extension, case-insensitive. Files outside the set are
/// not errors; they are simply not candidates for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Plain UTF-8 text (`.txt`).
    PlainText,
    /// PDF documents (`.pdf`).
    Pdf,
    /// Word-processor documents (`.doc`, `.docx`).
    Docx,
    /// Raster images (`.png`, `.jpg`, `.jpeg`, `.bmp`).
    Image,
}

impl FileKind {
    /// Classify a path by its extension, or `None` if unsupported.
    pub fn from_path(path: &Path) -> Option<FileKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(FileKind::PlainText),
            "pdf" => Some(FileKind::Pdf),
            "doc" | "docx" => Some(FileKind::Docx),
            "png" | "jpg" | "jpeg" | "bmp" => Some(FileKind::Image),
            _ => None,
        }
    }

    /// Whether this kind carries an image rather than text.
    pub fn is_image(self) -> bool {
        matches!(self, FileKind::Image)
    }
}
