//! Hugging Face Whisper transcription implementation.

use super::{Transcriber, Transcript, TranscriptOrigin};
use crate::config::TranscriptionSettings;
use crate::error::{Result, SentinelError};
use crate::media::MediaInput;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Canned transcript for files over the upload threshold.
pub const LARGE_FILE_PLACEHOLDER: &str = "This is a simulated transcription of the uploaded \
     video. The video contains complex visual scenes and dialogue about artificial intelligence.";

/// Degraded transcript returned when the ASR backend call fails.
const ASR_FAILURE_PLACEHOLDER: &str = "Failed to transcribe video via API. Ensure HF_TOKEN is \
     valid. (Mock: A person is speaking about technology.)";

/// Template for URL references; the URL's content is never fetched.
pub const URL_ANALYSIS_TEMPLATE: &str = "Analysis of video at {url}. The content appears to be \
     educational.";

#[derive(Debug, Deserialize)]
struct AsrResponse {
    text: String,
}

/// Whisper-based transcriber backed by the Hugging Face Inference API.
pub struct HfWhisperTranscriber {
    client: reqwest::Client,
    api_base: String,
    model: String,
    max_upload_bytes: u64,
    token: Option<String>,
}

impl HfWhisperTranscriber {
    /// Create a transcriber from settings, reading `HF_TOKEN` from the
    /// environment. A missing token is not an error here; it surfaces as a
    /// degraded transcript when a backend call is attempted.
    pub fn new(settings: &TranscriptionSettings) -> Result<Self> {
        Self::with_config(
            &settings.api_base,
            &settings.model,
            settings.max_upload_bytes,
            Duration::from_secs(settings.timeout_seconds),
        )
    }

    /// Create a transcriber with explicit configuration.
    pub fn with_config(
        api_base: &str,
        model: &str,
        max_upload_bytes: u64,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            max_upload_bytes,
            token: std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty()),
        })
    }

    /// Send raw media bytes to the ASR backend and return its text.
    async fn call_backend(&self, bytes: &[u8]) -> Result<String> {
        let token = self.token.as_ref().ok_or_else(|| {
            SentinelError::Transcription("HF_TOKEN is not set".to_string())
        })?;

        let url = format!("{}/models/{}", self.api_base, self.model);
        debug!("Sending {} bytes to ASR backend", bytes.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .body(bytes.to_vec())
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SentinelError::Transcription(format!("ASR backend error: {}", e)))?;

        let parsed: AsrResponse = response
            .json()
            .await
            .map_err(|e| SentinelError::Transcription(format!("Malformed ASR response: {}", e)))?;

        Ok(parsed.text)
    }
}

#[async_trait]
impl Transcriber for HfWhisperTranscriber {
    #[instrument(skip(self, input), fields(source = %input.source()))]
    async fn transcribe(&self, input: &MediaInput) -> Result<Transcript> {
        match input {
            MediaInput::File { bytes, .. } => {
                if input.size_bytes() > self.max_upload_bytes {
                    // Too large for the synchronous request path; skip the
                    // backend entirely.
                    debug!("File exceeds upload threshold, using simulated transcription");
                    return Ok(Transcript::new(
                        LARGE_FILE_PLACEHOLDER.to_string(),
                        TranscriptOrigin::Simulated,
                    ));
                }

                match self.call_backend(bytes).await {
                    Ok(text) => Ok(Transcript::new(text, TranscriptOrigin::Asr)),
                    Err(e) => {
                        // Never hard-fail on ASR: ingestion must still return
                        // usable text when the backend is unreachable.
                        warn!("ASR backend call failed, degrading: {}", e);
                        Ok(Transcript::new(
                            ASR_FAILURE_PLACEHOLDER.to_string(),
                            TranscriptOrigin::Degraded,
                        ))
                    }
                }
            }
            MediaInput::Url(url) => {
                // Fetching arbitrary URLs is an SSRF and unbounded-download
                // hazard; synthesize a description instead.
                Ok(Transcript::new(
                    URL_ANALYSIS_TEMPLATE.replace("{url}", url.as_str()),
                    TranscriptOrigin::UrlSynthesis,
                ))
            }
        }
    }
}
