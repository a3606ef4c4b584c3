//! Transcription module for Sentinel.
//!
//! Turns raw media bytes or a URL reference into text. The production
//! implementation calls a hosted Whisper ASR backend, with deliberate
//! degraded-output policies for oversized files and backend outages.

mod whisper;

pub use whisper::{HfWhisperTranscriber, LARGE_FILE_PLACEHOLDER, URL_ANALYSIS_TEMPLATE};

use crate::error::Result;
use crate::media::MediaInput;
use async_trait::async_trait;

/// Where a transcript's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptOrigin {
    /// Real text returned by the ASR backend.
    Asr,
    /// Canned placeholder for files over the upload threshold.
    Simulated,
    /// Placeholder produced after an ASR backend failure.
    Degraded,
    /// Templated description synthesized for a URL reference.
    UrlSynthesis,
}

/// A transcript produced from one media input. Immutable after creation.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub text: String,
    pub origin: TranscriptOrigin,
}

impl Transcript {
    pub fn new(text: String, origin: TranscriptOrigin) -> Self {
        Self { text, origin }
    }
}

/// Trait for transcription services.
///
/// Degraded paths are outputs, not errors: implementations are expected to
/// return placeholder text rather than fail when the backend is unusable.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a media input into text.
    async fn transcribe(&self, input: &MediaInput) -> Result<Transcript>;
}
