//! Vector index abstraction for Sentinel.
//!
//! Provides a trait-based interface over durable stores that support
//! upsert-by-id and approximate nearest-neighbor queries.

mod memory;
mod pinecone;

pub use memory::MemoryIndex;
pub use pinecone::PineconeIndex;

use crate::error::{Result, SentinelError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata stored alongside each vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordMetadata {
    /// The transcription text this record was built from.
    pub text: String,
    /// Filename or URL the media came from.
    pub source: String,
    /// Record kind. Always "video" in this pipeline.
    #[serde(rename = "type")]
    pub kind: String,
    /// When the media was ingested.
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

impl RecordMetadata {
    /// Metadata for a freshly ingested video.
    pub fn video(text: String, source: String) -> Self {
        Self {
            text,
            source,
            kind: "video".to_string(),
            uploaded_at: Utc::now(),
        }
    }
}

/// A record persisted in the vector index. Records are never updated in
/// place; re-ingestion creates a new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedRecord {
    /// Unique record ID.
    pub id: String,
    /// Embedding vector.
    pub vector: Vec<f32>,
    /// Associated metadata.
    pub metadata: RecordMetadata,
}

impl IndexedRecord {
    /// Create a record with a fresh unique id.
    pub fn new(vector: Vec<f32>, metadata: RecordMetadata) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vector,
            metadata,
        }
    }
}

/// A query match with its similarity score. Constructed per query, never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub id: String,
    /// Similarity score (higher is better, approximately in [0, 1]).
    pub score: f32,
    pub metadata: RecordMetadata,
}

/// Trait for vector index implementations.
///
/// Failures at this layer are reported as errors, never swallowed; the
/// ingestion orchestrator decides which of them to absorb.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert-or-replace a record by id.
    async fn upsert(&self, record: &IndexedRecord) -> Result<()>;

    /// Return up to `top_k` nearest records, ordered by descending score.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// The vector dimensionality this index accepts.
    fn dimensions(&self) -> usize;
}

/// Reject a record whose vector length doesn't match the index.
pub(crate) fn check_dimensions(expected: usize, got: usize) -> Result<()> {
    if got != expected {
        return Err(SentinelError::Index(format!(
            "vector dimensionality {} does not match index dimensionality {}",
            got, expected
        )));
    }
    Ok(())
}

/// Reject out-of-range top_k values before any backend call.
pub(crate) fn check_top_k(top_k: usize, max_top_k: usize) -> Result<()> {
    if top_k == 0 || top_k > max_top_k {
        return Err(SentinelError::InvalidInput(format!(
            "top_k must be between 1 and {}, got {}",
            max_top_k, top_k
        )));
    }
    Ok(())
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
