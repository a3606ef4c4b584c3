//! Sentinel - Video Ingestion and Semantic Search
//!
//! A pipeline that transcribes video uploads or URL references, embeds the
//! transcription into a fixed-length vector, and indexes it for
//! natural-language search.
//!
//! # Overview
//!
//! Sentinel allows you to:
//! - Ingest a video file or URL and get back a transcription
//! - Persist the transcription's embedding in a vector index
//! - Search indexed videos with free-text queries, ranked by similarity
//!
//! Ingestion is a best-effort enrichment pipeline: the transcription is the
//! primary deliverable, and embedding or index outages never fail a request.
//! Search, by contrast, surfaces backend failures explicitly.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `media` - Media input types (file bytes or URL reference)
//! - `transcription` - Speech-to-text adapter with degraded-output policy
//! - `embedding` - Embedding generation
//! - `index` - Vector index abstraction
//! - `orchestrator` - Pipeline coordination
//! - `cli` - Command-line interface and HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use sentinel_stream::config::Settings;
//! use sentinel_stream::media::MediaInput;
//! use sentinel_stream::orchestrator::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     let bytes = std::fs::read("talk.mp4")?;
//!     let media = MediaInput::from_parts(Some(("talk.mp4".to_string(), bytes)), None)?;
//!     let result = pipeline.ingest(media).await?;
//!     println!("{}", result.transcription);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod media;
pub mod orchestrator;
pub mod transcription;

pub use error::{ErrorKind, Result, SentinelError};
