//! Embedding generation for semantic search and retrieval.

mod hf;

pub use hf::HfEmbedder;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for embedding generation.
///
/// Unlike transcription, there is no degraded fallback here: failures are
/// surfaced to the orchestrator, which decides what to do with them.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}
