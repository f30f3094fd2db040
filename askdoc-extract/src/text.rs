//! Plain text extractor.

use std::path::Path;

use tokio::fs;

use crate::error::ExtractError;

/// Read a whole file as text, replacing undecodable bytes.
///
/// Invalid UTF-8 sequences become U+FFFD rather than failing the file.
pub(crate) async fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "Django is a web framework.").unwrap();

        let text = extract_text(&path).await.unwrap();
        assert_eq!(text, "Django is a web framework.");
    }

    #[tokio::test]
    async fn replaces_undecodable_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        std::fs::write(&path, b"ok \xff\xfe end").unwrap();

        let text = extract_text(&path).await.unwrap();
        assert!(text.starts_with("ok "));
        assert!(text.ends_with(" end"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn empty_file_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        assert_eq!(extract_text(&path).await.unwrap(), "");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = extract_text(Path::new("/nonexistent/nope.txt")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
