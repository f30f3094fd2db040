//! Image extractor.
//!
//! Images carry no extractable text; they decode to a normalized RGB
//! raster and a synthetic label derived from the file name. The label is
//! what gets indexed as the point's content.

use std::path::Path;

use tracing::debug;

use crate::error::ExtractError;
use crate::ExtractedContent;

/// The synthetic textual label for an image file.
///
/// The same rule is applied at ingestion time and when an image is used as
/// a query, so both sides agree on the textual stand-in.
pub fn image_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("image: {name}")
}

pub(crate) async fn extract_image(path: &Path) -> Result<ExtractedContent, ExtractError> {
    debug!(path = %path.display(), "decoding image");
    let label = image_label(path);
    let owned = path.to_path_buf();

    let raster = tokio::task::spawn_blocking(move || image::open(&owned))
        .await
        .map_err(|e| ExtractError::Image(format!("task join error: {e}")))?
        .map_err(|e| ExtractError::Image(e.to_string()))?
        .to_rgb8();

    Ok(ExtractedContent::Image { label, raster })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_the_base_name() {
        assert_eq!(image_label(Path::new("/data/photos/cat.png")), "image: cat.png");
    }

    #[tokio::test]
    async fn decodes_a_png_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let content = extract_image(&path).await.unwrap();
        match content {
            ExtractedContent::Image { label, raster } => {
                assert_eq!(label, "image: dot.png");
                assert_eq!(raster.dimensions(), (2, 2));
                assert_eq!(raster.get_pixel(0, 0), &image::Rgb([10, 20, 30]));
            }
            ExtractedContent::Text(_) => panic!("expected image content"),
        }
    }

    #[tokio::test]
    async fn truncated_image_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n only a header").unwrap();

        let err = extract_image(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::Image(_)));
    }
}
