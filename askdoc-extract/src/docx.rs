//! DOCX paragraph text extractor.
//!
//! A DOCX file is a ZIP container; the document body lives in
//! `word/document.xml`. Text runs (`w:t`) are concatenated within each
//! paragraph (`w:p`), and paragraphs are joined with newlines. Legacy
//! binary `.doc` files are not ZIP containers and fail the archive open,
//! which callers treat as a per-file skip.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tokio::fs;
use tracing::debug;

use crate::error::ExtractError;

pub(crate) async fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    debug!(path = %path.display(), "extracting DOCX");
    let bytes = fs::read(path).await?;

    tokio::task::spawn_blocking(move || docx_paragraph_text(&bytes))
        .await
        .map_err(|e| ExtractError::Docx(format!("task join error: {e}")))?
}

/// Pull paragraph text out of the raw DOCX bytes.
fn docx_paragraph_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(format!("not a DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(format!("missing document body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(format!("unreadable document body: {e}")))?;

    paragraphs_from_xml(&xml)
}

/// Collect `w:t` run text per `w:p` paragraph, newline-joined.
fn paragraphs_from_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut in_text_run = false;
    let mut current = String::new();
    let mut paragraphs: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let run = t
                    .unescape()
                    .map_err(|e| ExtractError::Docx(format!("bad text run: {e}")))?;
                current.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ExtractError::Docx(format!("malformed XML: {e}"))),
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn concatenates_runs_and_joins_paragraphs() {
        let text = docx_paragraph_text(&docx_bytes(DOCUMENT_XML)).unwrap();
        assert_eq!(text, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn unescapes_xml_entities() {
        let xml = r#"<w:document xmlns:w="ns"><w:body><w:p><w:r><w:t>a &amp; b</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(paragraphs_from_xml(xml).unwrap(), "a & b");
    }

    #[test]
    fn legacy_doc_bytes_fail_the_container_open() {
        let err = docx_paragraph_text(b"\xd0\xcf\x11\xe0 legacy word file").unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }

    #[tokio::test]
    async fn extracts_from_a_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.docx");
        std::fs::write(&path, docx_bytes(DOCUMENT_XML)).unwrap();

        let text = extract_docx(&path).await.unwrap();
        assert!(text.contains("First paragraph."));
    }
}
