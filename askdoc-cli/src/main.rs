//! # askdoc CLI
//!
//! Command-line interface for the askdoc pipeline.
//!
//! ## Commands
//!
//! - `askdoc ingest <PATHS>...` - Index files or directories
//! - `askdoc reset` - Wipe and recreate the collection
//! - `askdoc ask <QUESTION>` - Answer a question over indexed content
//!
//! ## Examples
//!
//! ```bash
//! # Index a directory of documents
//! askdoc ingest ~/Documents/notes
//!
//! # Rebuild the index from scratch
//! askdoc ingest --reset ~/Documents/notes
//!
//! # Ask a question, optionally about an image
//! askdoc ask "what is a web framework?"
//! askdoc ask "what is in this picture?" --image photo.jpg
//! ```
//!
//! The binary owns the long-lived service handles (Qdrant, Ollama) and
//! injects them into the pipeline and engine.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use askdoc_model::{ModelConfig, OllamaClient};
use askdoc_rag::{
    AnswerError, HashEmbedder, IndexConfig, IngestionPipeline, OllamaEmbedder, QdrantStore,
    QueryInput, RagEngine,
};
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "askdoc")]
#[command(about = "Index documents and answer questions over them")]
#[command(version)]
struct Cli {
    /// Qdrant gRPC endpoint
    #[arg(long, env = "QDRANT_URL", default_value = "http://localhost:6334", global = true)]
    qdrant_url: String,

    /// Ollama endpoint (embeddings and generation)
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434", global = true)]
    ollama_url: String,

    /// Embedding model name
    #[arg(long, env = "ASKDOC_EMBED_MODEL", default_value = "all-minilm", global = true)]
    embed_model: String,

    /// Generation model name
    #[arg(long, env = "ASKDOC_MODEL", default_value = "llama3.2-vision", global = true)]
    model: String,

    /// Collection name
    #[arg(long, env = "ASKDOC_COLLECTION", default_value = "docs", global = true)]
    collection: String,

    /// Embedding dimensionality (must match the embedding model)
    #[arg(long, env = "ASKDOC_DIMENSION", default_value_t = 384, global = true)]
    dimension: usize,

    /// Use deterministic hashed embeddings instead of a model service
    #[arg(long, global = true)]
    hash_embeddings: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index files or directories into the collection
    Ingest {
        /// Files or directories to ingest
        paths: Vec<PathBuf>,

        /// Wipe the collection and rebuild from scratch (destructive)
        #[arg(long)]
        reset: bool,
    },

    /// Delete the collection and recreate it empty (destructive)
    Reset,

    /// Answer a question over the indexed content
    Ask {
        /// The question to answer
        question: String,

        /// Attach an image to the generation request
        #[arg(long)]
        image: Option<PathBuf>,

        /// Number of context hits to retrieve
        #[arg(long, default_value_t = 5)]
        top_k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = IndexConfig::builder()
        .collection(&cli.collection)
        .dimension(cli.dimension)
        .build()?;

    let store = Arc::new(QdrantStore::new(&cli.qdrant_url)?);
    let embedder: Arc<dyn askdoc_rag::EmbeddingProvider> = if cli.hash_embeddings {
        Arc::new(HashEmbedder::new(cli.dimension))
    } else {
        Arc::new(
            OllamaEmbedder::new(&cli.ollama_url, cli.dimension)?.with_model(&cli.embed_model),
        )
    };

    match cli.command {
        Commands::Ingest { paths, reset } => {
            if paths.is_empty() {
                bail!("nothing to ingest: pass at least one file or directory");
            }

            let pipeline = IngestionPipeline::new(embedder, store, config)?;
            if reset {
                pipeline.reset_collection().await?;
            } else {
                pipeline.ensure_collection().await?;
            }

            let report = pipeline.ingest(&paths).await?;
            if report.candidates == 0 {
                println!("No supported files found under the given paths.");
            } else {
                println!(
                    "Indexed {} of {} files ({} skipped).",
                    report.indexed, report.candidates, report.skipped
                );
            }
        }

        Commands::Reset => {
            let pipeline = IngestionPipeline::new(embedder, store, config)?;
            pipeline.reset_collection().await?;
            println!("Collection '{}' reset.", cli.collection);
        }

        Commands::Ask { question, image, top_k } => {
            if question.trim().is_empty() {
                bail!("question must not be empty");
            }

            let image_bytes = match &image {
                Some(path) => Some(
                    std::fs::read(path)
                        .with_context(|| format!("reading image {}", path.display()))?,
                ),
                None => None,
            };

            let generator = Arc::new(OllamaClient::new(
                ModelConfig::new(&cli.ollama_url, &cli.model),
            )?);
            let engine = RagEngine::new(embedder, store, generator, config);

            let query = QueryInput::Text(question);
            match engine.ask(&query, top_k, image_bytes.as_deref()).await {
                Ok(answer) => println!("{answer}"),
                Err(AnswerError::Retrieval(e)) => {
                    bail!("could not retrieve context (is the vector store reachable?): {e}")
                }
                Err(AnswerError::Generation(e)) => {
                    bail!("could not generate an answer (is the model service reachable?): {e}")
                }
            }
        }
    }

    Ok(())
}
