//! Pinecone vector index implementation.
//!
//! Talks to a pre-provisioned serverless index over its data-plane HTTP API.

use super::{check_dimensions, check_top_k, IndexedRecord, RecordMetadata, SearchResult, VectorIndex};
use crate::config::IndexSettings;
use crate::error::{Result, SentinelError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct UpsertVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: &'a RecordMetadata,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    score: f32,
    metadata: Option<RecordMetadata>,
}

/// Pinecone-backed vector index.
pub struct PineconeIndex {
    client: reqwest::Client,
    host: String,
    dimensions: usize,
    max_top_k: usize,
    api_key: Option<String>,
}

impl PineconeIndex {
    /// Create an index adapter from settings, reading `PINECONE_API_KEY`
    /// from the environment. A missing key is not an error until a call is
    /// attempted.
    pub fn new(settings: &IndexSettings, host: &str, dimensions: usize) -> Result<Self> {
        Self::with_config(
            host,
            dimensions,
            settings.max_top_k,
            Duration::from_secs(settings.timeout_seconds),
        )
    }

    /// Create an index adapter with explicit configuration.
    pub fn with_config(
        host: &str,
        dimensions: usize,
        max_top_k: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            dimensions,
            max_top_k,
            api_key: std::env::var("PINECONE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SentinelError::Index("PINECONE_API_KEY is not set".to_string()))
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn upsert(&self, record: &IndexedRecord) -> Result<()> {
        check_dimensions(self.dimensions, record.vector.len())?;
        let api_key = self.api_key()?;

        let body = json!({
            "vectors": [UpsertVector {
                id: &record.id,
                values: &record.vector,
                metadata: &record.metadata,
            }],
        });

        debug!("Upserting record to index");
        self.client
            .post(format!("{}/vectors/upsert", self.host))
            .header("Api-Key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SentinelError::Index(format!("Upsert failed: {}", e)))?;

        Ok(())
    }

    #[instrument(skip(self, vector))]
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        check_top_k(top_k, self.max_top_k)?;
        check_dimensions(self.dimensions, vector.len())?;
        let api_key = self.api_key()?;

        let body = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
        });

        let response = self
            .client
            .post(format!("{}/query", self.host))
            .header("Api-Key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SentinelError::Index(format!("Query failed: {}", e)))?;

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| SentinelError::Index(format!("Malformed query response: {}", e)))?;

        let mut results: Vec<SearchResult> = parsed
            .matches
            .into_iter()
            .filter_map(|m| {
                m.metadata.map(|metadata| SearchResult {
                    id: m.id,
                    score: m.score,
                    metadata,
                })
            })
            .collect();

        // The backend already ranks matches; re-sort locally so the
        // descending-score contract never depends on it.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        Ok(results)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
