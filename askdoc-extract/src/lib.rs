//! # askdoc-extract
//!
//! Content extraction from the file formats accepted by the askdoc
//! ingestion pipeline.
//!
//! Extraction is dispatched over a closed set of [`FileKind`]s selected by
//! file extension. Text-bearing formats (plain text, PDF, DOCX) produce
//! [`ExtractedContent::Text`]; images decode to an RGB raster plus a
//! synthetic label built from the file name.
//!
//! | Kind | Extensions | Output |
//! |------|------------|--------|
//! | [`FileKind::PlainText`] | `.txt` | whole file, lossy UTF-8 |
//! | [`FileKind::Pdf`] | `.pdf` | concatenated per-page text |
//! | [`FileKind::Docx`] | `.doc`, `.docx` | concatenated paragraph text |
//! | [`FileKind::Image`] | `.png`, `.jpg`, `.jpeg`, `.bmp` | RGB raster + label |
//!
//! Extraction failures are typed ([`ExtractError`]) and expected to be
//! handled per-file by the caller; one bad file must never abort a run.

mod docx;
mod error;
mod image;
mod kind;
mod pdf;
mod text;

use std::path::Path;

pub use crate::image::image_label;
pub use error::ExtractError;
pub use kind::FileKind;

/// Content produced by extracting a single file.
#[derive(Debug, Clone)]
pub enum ExtractedContent {
    /// Textual content from a text-bearing format.
    Text(String),
    /// A decoded image with its synthetic textual label.
    Image {
        /// Label standing in for textual content, built from the file name.
        label: String,
        /// The decoded raster, normalized to RGB8.
        raster: ::image::RgbImage,
    },
}

impl ExtractedContent {
    /// The textual representation of this content: the text itself, or the
    /// label for images.
    pub fn as_text(&self) -> &str {
        match self {
            ExtractedContent::Text(text) => text,
            ExtractedContent::Image { label, .. } => label,
        }
    }
}

/// Extract the content of `path`, dispatching on its [`FileKind`].
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedType`] when the extension is not in
/// the supported set, or a format-specific error when extraction fails.
pub async fn extract(path: &Path) -> Result<ExtractedContent, ExtractError> {
    let kind = FileKind::from_path(path)
        .ok_or_else(|| ExtractError::UnsupportedType(path.to_path_buf()))?;

    match kind {
        FileKind::PlainText => text::extract_text(path).await.map(ExtractedContent::Text),
        FileKind::Pdf => pdf::extract_pdf(path).await.map(ExtractedContent::Text),
        FileKind::Docx => docx::extract_docx(path).await.map(ExtractedContent::Text),
        FileKind::Image => image::extract_image(path).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_extension_is_an_error() {
        let err = extract(Path::new("/tmp/archive.tar.gz")).await.unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType(_)));
    }

    #[tokio::test]
    async fn as_text_returns_label_for_images() {
        let content = ExtractedContent::Image {
            label: "image: cat.png".to_string(),
            raster: ::image::RgbImage::new(1, 1),
        };
        assert_eq!(content.as_text(), "image: cat.png");
    }
}
