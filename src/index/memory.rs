//! In-memory vector index implementation.
//!
//! Useful for tests and credential-less local runs.

use super::{check_dimensions, check_top_k, cosine_similarity, IndexedRecord, SearchResult, VectorIndex};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory vector index with last-write-wins upsert semantics.
pub struct MemoryIndex {
    records: RwLock<HashMap<String, IndexedRecord>>,
    dimensions: usize,
    max_top_k: usize,
}

impl MemoryIndex {
    /// Create a new in-memory index for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            dimensions,
            max_top_k: 100,
        }
    }

    /// Number of records currently stored.
    pub fn record_count(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Fetch a stored record by id.
    pub fn get(&self, id: &str) -> Option<IndexedRecord> {
        self.records.read().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn upsert(&self, record: &IndexedRecord) -> Result<()> {
        check_dimensions(self.dimensions, record.vector.len())?;
        let mut records = self.records.write().unwrap();
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        check_top_k(top_k, self.max_top_k)?;
        check_dimensions(self.dimensions, vector.len())?;

        let records = self.records.read().unwrap();

        let mut results: Vec<SearchResult> = records
            .values()
            .map(|record| SearchResult {
                id: record.id.clone(),
                score: cosine_similarity(vector, &record.vector),
                metadata: record.metadata.clone(),
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        Ok(results)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RecordMetadata;

    fn record(vector: Vec<f32>, source: &str) -> IndexedRecord {
        IndexedRecord::new(
            vector,
            RecordMetadata::video(format!("transcript of {}", source), source.to_string()),
        )
    }

    #[tokio::test]
    async fn test_upsert_and_query_ordering() {
        let index = MemoryIndex::new(3);

        index.upsert(&record(vec![1.0, 0.0, 0.0], "a.mp4")).await.unwrap();
        index.upsert(&record(vec![0.9, 0.1, 0.0], "b.mp4")).await.unwrap();
        index.upsert(&record(vec![0.0, 1.0, 0.0], "c.mp4")).await.unwrap();

        let results = index.query(&[1.0, 0.0, 0.0], 10).await.unwrap();
        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(results[0].metadata.source, "a.mp4");
    }

    #[tokio::test]
    async fn test_truncates_to_top_k() {
        let index = MemoryIndex::new(2);
        for i in 0..5 {
            index
                .upsert(&record(vec![1.0, i as f32 * 0.1], &format!("{}.mp4", i)))
                .await
                .unwrap();
        }

        let results = index.query(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_rejected_before_write() {
        let index = MemoryIndex::new(3);
        let err = index.upsert(&record(vec![1.0, 0.0], "bad.mp4")).await.unwrap_err();
        assert!(err.to_string().contains("dimensionality"));
        assert_eq!(index.record_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_top_k_rejected() {
        let index = MemoryIndex::new(2);
        assert!(index.query(&[1.0, 0.0], 0).await.is_err());
        assert!(index.query(&[1.0, 0.0], 101).await.is_err());
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let index = MemoryIndex::new(2);
        let mut rec = record(vec![1.0, 0.0], "a.mp4");
        index.upsert(&rec).await.unwrap();

        rec.vector = vec![0.0, 1.0];
        index.upsert(&rec).await.unwrap();

        assert_eq!(index.record_count(), 1);
        assert_eq!(index.get(&rec.id).unwrap().vector, vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_repeated_query_is_identical() {
        let index = MemoryIndex::new(2);
        index.upsert(&record(vec![1.0, 0.0], "a.mp4")).await.unwrap();
        index.upsert(&record(vec![0.5, 0.5], "b.mp4")).await.unwrap();

        let first = index.query(&[1.0, 0.0], 10).await.unwrap();
        let second = index.query(&[1.0, 0.0], 10).await.unwrap();

        let ids: Vec<_> = first.iter().map(|r| (&r.id, r.score)).collect();
        let ids2: Vec<_> = second.iter().map(|r| (&r.id, r.score)).collect();
        assert_eq!(ids, ids2);
    }

    #[tokio::test]
    async fn test_empty_index_returns_empty() {
        let index = MemoryIndex::new(2);
        let results = index.query(&[1.0, 0.0], 10).await.unwrap();
        assert!(results.is_empty());
    }
}
