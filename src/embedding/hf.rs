//! Hugging Face feature-extraction embeddings implementation.

use super::Embedder;
use crate::config::EmbeddingSettings;
use crate::error::{Result, SentinelError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

/// The feature-extraction pipeline returns either a flat vector for a single
/// input or a token-level matrix, depending on the model's pooling setup.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureExtractionResponse {
    Pooled(Vec<f32>),
    TokenLevel(Vec<Vec<f32>>),
}

/// Embedder backed by the Hugging Face Inference API.
pub struct HfEmbedder {
    client: reqwest::Client,
    api_base: String,
    model: String,
    dimensions: usize,
    token: Option<String>,
}

impl HfEmbedder {
    /// Create an embedder from settings, reading `HF_TOKEN` from the
    /// environment.
    pub fn new(settings: &EmbeddingSettings) -> Result<Self> {
        Self::with_config(
            &settings.api_base,
            &settings.model,
            settings.dimensions as usize,
            Duration::from_secs(settings.timeout_seconds),
        )
    }

    /// Create an embedder with explicit configuration.
    pub fn with_config(
        api_base: &str,
        model: &str,
        dimensions: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            dimensions,
            token: std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty()),
        })
    }

    /// Mean-pool token-level vectors into a single embedding.
    fn mean_pool(rows: Vec<Vec<f32>>) -> Vec<f32> {
        let count = rows.len();
        if count == 0 {
            return Vec::new();
        }
        let width = rows[0].len();
        let mut pooled = vec![0.0f32; width];
        for row in &rows {
            for (i, v) in row.iter().enumerate().take(width) {
                pooled[i] += v;
            }
        }
        for v in &mut pooled {
            *v /= count as f32;
        }
        pooled
    }
}

#[async_trait]
impl Embedder for HfEmbedder {
    #[instrument(skip(self, text), fields(len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(SentinelError::InvalidInput(
                "cannot embed empty text".to_string(),
            ));
        }

        let token = self
            .token
            .as_ref()
            .ok_or_else(|| SentinelError::Embedding("HF_TOKEN is not set".to_string()))?;

        let url = format!(
            "{}/pipeline/feature-extraction/{}",
            self.api_base, self.model
        );
        debug!("Requesting embedding from {}", self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "inputs": text }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SentinelError::Embedding(format!("Embedding backend error: {}", e)))?;

        let parsed: FeatureExtractionResponse = response.json().await.map_err(|e| {
            SentinelError::Embedding(format!("Malformed embedding response: {}", e))
        })?;

        let vector = match parsed {
            FeatureExtractionResponse::Pooled(v) => v,
            FeatureExtractionResponse::TokenLevel(rows) => Self::mean_pool(rows),
        };

        if vector.len() != self.dimensions {
            return Err(SentinelError::Embedding(format!(
                "Backend returned a {}-dim vector, expected {}",
                vector.len(),
                self.dimensions
            )));
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn embedder_with_base(api_base: &str, dimensions: usize) -> HfEmbedder {
        let mut e = HfEmbedder::with_config(
            api_base,
            "sentence-transformers/all-MiniLM-L6-v2",
            dimensions,
            Duration::from_secs(2),
        )
        .unwrap();
        e.token = Some("test-token".to_string());
        e
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let embedder = embedder_with_base("http://127.0.0.1:1", 3);
        let err = embedder.embed("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_backend_failure_is_an_error() {
        let embedder = embedder_with_base("http://127.0.0.1:1", 3);
        let err = embedder.embed("AI safety").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_pooled_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[0.1, 0.2, 0.3]")
            .create_async()
            .await;

        let embedder = embedder_with_base(&server.url(), 3);
        let vector = embedder.embed("hello").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_token_level_response_is_pooled() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[[1.0, 2.0], [3.0, 4.0]]")
            .create_async()
            .await;

        let embedder = embedder_with_base(&server.url(), 2);
        let vector = embedder.embed("hello").await.unwrap();
        assert_eq!(vector, vec![2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[0.1, 0.2]")
            .create_async()
            .await;

        let embedder = embedder_with_base(&server.url(), 384);
        let err = embedder.embed("hello").await.unwrap_err();
        assert!(err.to_string().contains("expected 384"));
    }
}
