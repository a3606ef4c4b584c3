//! Pipeline orchestrator for Sentinel.
//!
//! Sequences transcription, embedding, and indexing for ingestion, and
//! embedding plus retrieval for search. The two paths have deliberately
//! asymmetric failure policies: ingestion's primary deliverable is the
//! transcription, so embedding and index failures are absorbed and logged;
//! search has no meaningful degraded result, so its failures propagate.

use crate::config::Settings;
use crate::embedding::{Embedder, HfEmbedder};
use crate::error::{Result, SentinelError};
use crate::index::{IndexedRecord, MemoryIndex, PineconeIndex, RecordMetadata, SearchResult, VectorIndex};
use crate::media::MediaInput;
use crate::transcription::{HfWhisperTranscriber, Transcriber};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The contract returned to the caller after ingestion.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineResult {
    pub transcription: String,
    pub summary: String,
}

const INGEST_SUMMARY: &str = "Video processed successfully.";

/// The main pipeline for ingestion and search.
///
/// Constructed once per process; adapters are shared across requests.
pub struct Pipeline {
    settings: Settings,
    transcriber: Arc<dyn Transcriber>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl Pipeline {
    /// Create a pipeline from settings with the production adapters.
    pub fn new(settings: Settings) -> Result<Self> {
        let transcriber: Arc<dyn Transcriber> =
            Arc::new(HfWhisperTranscriber::new(&settings.transcription)?);

        let embedder: Arc<dyn Embedder> = Arc::new(HfEmbedder::new(&settings.embedding)?);

        let dimensions = settings.embedding.dimensions as usize;
        let index: Arc<dyn VectorIndex> = match settings.index.provider.as_str() {
            "memory" => Arc::new(MemoryIndex::new(dimensions)),
            _ => {
                // An unconfigured host is not a construction failure; calls
                // against it fail as ServiceUnavailable at request time.
                let host = settings.index_host().unwrap_or_default();
                Arc::new(PineconeIndex::new(&settings.index, &host, dimensions)?)
            }
        };

        Ok(Self {
            settings,
            transcriber,
            embedder,
            index,
        })
    }

    /// Create a pipeline with injected components.
    pub fn with_components(
        settings: Settings,
        transcriber: Arc<dyn Transcriber>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            settings,
            transcriber,
            embedder,
            index,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Ingest one media input: transcribe, embed, and persist a record.
    ///
    /// Embedding and indexing are best-effort enrichment; their failures are
    /// logged and never propagated into the returned result.
    #[instrument(skip(self, input), fields(source = %input.source(), size = input.size_bytes()))]
    pub async fn ingest(&self, input: MediaInput) -> Result<PipelineResult> {
        info!("Analyzing video");

        // Total by design: oversized files, backend outages, and URL inputs
        // all come back as placeholder text rather than errors.
        let transcript = self.transcriber.transcribe(&input).await?;
        info!(origin = ?transcript.origin, "Transcription obtained");

        match self.embedder.embed(&transcript.text).await {
            Ok(vector) => {
                let record = IndexedRecord::new(
                    vector,
                    RecordMetadata::video(transcript.text.clone(), input.source()),
                );
                if let Err(e) = self.index.upsert(&record).await {
                    warn!("Index upsert failed, continuing without persistence: {}", e);
                } else {
                    info!(id = %record.id, "Record persisted to index");
                }
            }
            Err(e) => {
                warn!("Embedding failed, continuing without indexing: {}", e);
            }
        }

        Ok(PipelineResult {
            transcription: transcript.text,
            summary: INGEST_SUMMARY.to_string(),
        })
    }

    /// Search the index for records similar to a free-text query.
    ///
    /// Unlike ingestion, backend failures here propagate to the caller; an
    /// empty result set is the valid "no matches" outcome.
    #[instrument(skip(self, query))]
    pub async fn search(&self, query: &str, top_k: Option<usize>) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(SentinelError::InvalidInput(
                "search query must not be empty".to_string(),
            ));
        }

        let top_k = top_k.unwrap_or(self.settings.index.top_k);

        let embedding = self.embedder.embed(query).await?;
        let results = self.index.query(&embedding, top_k).await?;

        info!("Search returned {} matches", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transcription::{Transcript, TranscriptOrigin};
    use async_trait::async_trait;

    struct FixedTranscriber {
        text: String,
    }

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(&self, _input: &MediaInput) -> Result<Transcript> {
            Ok(Transcript::new(self.text.clone(), TranscriptOrigin::Asr))
        }
    }

    /// Embeds any text as a deterministic 3-dim vector derived from length.
    struct StubEmbedder {
        fail: bool,
    }

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            if self.fail {
                return Err(SentinelError::Embedding("backend down".to_string()));
            }
            let n = text.len() as f32;
            Ok(vec![1.0, n % 7.0, n % 3.0])
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    struct FailingIndex;

    #[async_trait]
    impl VectorIndex for FailingIndex {
        async fn upsert(&self, _record: &IndexedRecord) -> Result<()> {
            Err(SentinelError::Index("index outage".to_string()))
        }

        async fn query(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<SearchResult>> {
            Err(SentinelError::Index("index outage".to_string()))
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    fn pipeline(
        transcription: &str,
        embed_fails: bool,
        index: Arc<dyn VectorIndex>,
    ) -> Pipeline {
        Pipeline::with_components(
            Settings::default(),
            Arc::new(FixedTranscriber {
                text: transcription.to_string(),
            }),
            Arc::new(StubEmbedder { fail: embed_fails }),
            index,
        )
    }

    fn file_input() -> MediaInput {
        MediaInput::File {
            name: "talk.mp4".to_string(),
            bytes: vec![0u8; 128],
        }
    }

    #[tokio::test]
    async fn test_healthy_ingest_upserts_one_video_record() {
        let index = Arc::new(MemoryIndex::new(3));
        let pipeline = pipeline("a talk about AI safety", false, index.clone());

        let result = pipeline.ingest(file_input()).await.unwrap();
        assert_eq!(result.transcription, "a talk about AI safety");
        assert_eq!(result.summary, "Video processed successfully.");

        assert_eq!(index.record_count(), 1);
        let records = index.query(&[1.0, 0.0, 0.0], 10).await.unwrap();
        assert_eq!(records[0].metadata.kind, "video");
        assert_eq!(records[0].metadata.source, "talk.mp4");
        assert_eq!(records[0].metadata.text, "a talk about AI safety");
    }

    #[tokio::test]
    async fn test_ingest_survives_index_outage() {
        let pipeline = pipeline("a talk about AI safety", false, Arc::new(FailingIndex));

        let result = pipeline.ingest(file_input()).await.unwrap();
        assert!(!result.transcription.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_survives_embedding_failure() {
        let index = Arc::new(MemoryIndex::new(3));
        let pipeline = pipeline("a talk about AI safety", true, index.clone());

        let result = pipeline.ingest(file_input()).await.unwrap();
        assert_eq!(result.transcription, "a talk about AI safety");
        // Nothing persisted when embedding fails.
        assert_eq!(index.record_count(), 0);
    }

    #[tokio::test]
    async fn test_reingestion_creates_new_record() {
        let index = Arc::new(MemoryIndex::new(3));
        let pipeline = pipeline("same talk", false, index.clone());

        pipeline.ingest(file_input()).await.unwrap();
        pipeline.ingest(file_input()).await.unwrap();
        assert_eq!(index.record_count(), 2);
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let pipeline = pipeline("ignored", false, Arc::new(MemoryIndex::new(3)));
        let err = pipeline.search("   ", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_search_propagates_embedding_failure() {
        let pipeline = pipeline("ignored", true, Arc::new(MemoryIndex::new(3)));
        let err = pipeline.search("AI safety", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_search_propagates_index_failure() {
        let pipeline = pipeline("ignored", false, Arc::new(FailingIndex));
        let err = pipeline.search("AI safety", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_search_results_ordered_and_idempotent() {
        let index = Arc::new(MemoryIndex::new(3));
        let pipeline = pipeline("unused", false, index.clone());

        // Seed records with varied vectors via differing transcript lengths.
        for name in ["short", "a medium one", "quite a lot longer transcript"] {
            let p = Pipeline::with_components(
                Settings::default(),
                Arc::new(FixedTranscriber {
                    text: name.to_string(),
                }),
                Arc::new(StubEmbedder { fail: false }),
                index.clone(),
            );
            p.ingest(file_input()).await.unwrap();
        }

        let first = pipeline.search("AI safety", None).await.unwrap();
        assert!(!first.is_empty());
        for pair in first.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }

        let second = pipeline.search("AI safety", None).await.unwrap();
        let a: Vec<_> = first.iter().map(|r| (&r.id, r.score)).collect();
        let b: Vec<_> = second.iter().map(|r| (&r.id, r.score)).collect();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_search_empty_index_is_ok() {
        let pipeline = pipeline("unused", false, Arc::new(MemoryIndex::new(3)));
        let results = pipeline.search("anything", None).await.unwrap();
        assert!(results.is_empty());
    }
}
