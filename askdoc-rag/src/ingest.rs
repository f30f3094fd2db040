//! Ingestion pipeline: walk paths, extract, embed, batch into the store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use askdoc_extract::{extract, ExtractedContent, FileKind};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::IndexConfig;
use crate::document::DocumentPoint;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Summary of one ingestion run.
///
/// `candidates` counts the files collected by the walk, which separates
/// "no matching files were found" (`candidates == 0`) from "every
/// candidate failed" (`candidates > 0 && indexed == 0`). Per-file failures
/// end up in `skipped`, never as raised errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Files with supported extensions found under the input paths.
    pub candidates: usize,
    /// Files successfully extracted, embedded, and written.
    pub indexed: usize,
    /// Files skipped after an extraction or embedding failure.
    pub skipped: usize,
}

/// The write path: files in, points out.
///
/// Holds long-lived, injected handles to the embedding provider and the
/// vector store. Collection initialization is explicit and additive;
/// [`reset_collection`](IngestionPipeline::reset_collection) is the only
/// destructive operation and never runs implicitly.
pub struct IngestionPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    config: IndexConfig,
}

impl std::fmt::Debug for IngestionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl IngestionPipeline {
    /// Build a pipeline, verifying that the embedding provider's
    /// dimensionality matches the collection configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] on a dimension mismatch; nothing is
    /// written in that case.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        config: IndexConfig,
    ) -> Result<Self> {
        if embedder.dimensions() != config.dimension {
            return Err(RagError::Config(format!(
                "embedding provider produces {}-dimensional vectors but collection '{}' is configured for {}",
                embedder.dimensions(),
                config.collection,
                config.dimension
            )));
        }
        Ok(Self { embedder, store, config })
    }

    /// The pipeline's collection configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Create the collection if it does not exist; leave it untouched if
    /// it does. Ingestion is additive.
    pub async fn ensure_collection(&self) -> Result<()> {
        if self.store.collection_exists(&self.config.collection).await? {
            return Ok(());
        }
        self.store
            .create_collection(&self.config.collection, self.config.dimension)
            .await?;
        info!(
            collection = %self.config.collection,
            dimension = self.config.dimension,
            "created collection"
        );
        Ok(())
    }

    /// Delete the collection if present and recreate it empty.
    ///
    /// This drops all indexed points. Callers opt in explicitly; it is
    /// never a side effect of building the pipeline or of ingesting.
    pub async fn reset_collection(&self) -> Result<()> {
        if self.store.collection_exists(&self.config.collection).await? {
            self.store.delete_collection(&self.config.collection).await?;
            info!(collection = %self.config.collection, "deleted collection for reset");
        }
        self.store
            .create_collection(&self.config.collection, self.config.dimension)
            .await
    }

    /// Ingest the given paths (files or directories, scanned recursively).
    ///
    /// Ids are zero-based and sequential over successfully embedded files
    /// only. All resulting points go to the store in a single batch; if no
    /// file survives, nothing is written.
    pub async fn ingest(&self, paths: &[PathBuf]) -> Result<IngestReport> {
        let files = collect_files(paths);
        let mut points: Vec<DocumentPoint> = Vec::new();
        let mut skipped = 0usize;

        for path in &files {
            match self.process_file(path, points.len() as u64).await {
                Ok(point) => {
                    // A provider emitting the wrong length here is a broken
                    // deployment, not a bad file: halt before any write.
                    if point.vector.len() != self.config.dimension {
                        return Err(RagError::Config(format!(
                            "embedding for {} has length {} but collection '{}' requires {}",
                            path.display(),
                            point.vector.len(),
                            self.config.collection,
                            self.config.dimension
                        )));
                    }
                    points.push(point);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping file");
                    skipped += 1;
                }
            }
        }

        let report = IngestReport { candidates: files.len(), indexed: points.len(), skipped };

        if points.is_empty() {
            info!(candidates = report.candidates, "no files embedded, nothing written");
            return Ok(report);
        }

        self.store.upsert(&self.config.collection, &points).await?;
        info!(
            collection = %self.config.collection,
            indexed = report.indexed,
            skipped = report.skipped,
            "ingestion complete"
        );
        Ok(report)
    }

    async fn process_file(&self, path: &Path, id: u64) -> Result<DocumentPoint> {
        let content = extract(path).await?;
        let vector = match &content {
            ExtractedContent::Text(text) => self.embedder.embed_text(text).await?,
            ExtractedContent::Image { raster, .. } => self.embedder.embed_image(raster).await?,
        };

        Ok(DocumentPoint {
            id,
            content: content.as_text().to_string(),
            source_path: path.display().to_string(),
            vector,
        })
    }
}

/// Collect ingestion candidates from the input paths.
///
/// Directories are walked recursively with entries sorted, so ids are
/// deterministic for a given tree. Unsupported extensions are dropped
/// without comment; paths that do not exist are logged and skipped.
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(std::result::Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .filter(|entry| FileKind::from_path(entry.path()).is_some())
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else if path.is_file() {
            if FileKind::from_path(path).is_some() {
                files.push(path.clone());
            }
        } else {
            warn!(path = %path.display(), "input path does not exist, skipping");
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_files_filters_unsupported_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("b.md"), "b").unwrap();
        std::fs::write(dir.path().join("c.TXT"), "c").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn collect_files_recurses_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("inner");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("deep.txt"), "deep").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("inner/deep.txt"));
    }

    #[test]
    fn collect_files_skips_missing_paths() {
        let files = collect_files(&[PathBuf::from("/definitely/not/here")]);
        assert!(files.is_empty());
    }

    #[test]
    fn collect_files_takes_single_files_directly() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.txt");
        std::fs::write(&file, "x").unwrap();

        let files = collect_files(&[file.clone(), dir.path().join("absent.pdf")]);
        assert_eq!(files, vec![file]);
    }
}
