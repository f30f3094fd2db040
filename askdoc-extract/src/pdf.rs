//! PDF text extractor.
//!
//! Uses pdf-extract, which concatenates per-page text; pages without any
//! extractable text contribute nothing rather than failing the document.

use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::ExtractError;

pub(crate) async fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    debug!(path = %path.display(), "extracting PDF");
    let bytes = fs::read(path).await?;

    // pdf-extract is CPU-bound and synchronous.
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ExtractError::Pdf(format!("task join error: {e}")))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn garbage_bytes_fail_as_pdf_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = extract_pdf(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = extract_pdf(Path::new("/nonexistent/nope.pdf")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
