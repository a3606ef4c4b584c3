//! Configuration settings for Sentinel.
//!
//! Credentials are deliberately not part of the settings file; they are read
//! from the environment (`HF_TOKEN`, `PINECONE_API_KEY`) by the adapters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcription: TranscriptionSettings,
    pub embedding: EmbeddingSettings,
    pub index: IndexSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Transcription service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// ASR model identifier on the inference backend.
    pub model: String,
    /// Base URL of the inference backend.
    pub api_base: String,
    /// Files larger than this are never sent to the backend; a simulated
    /// transcript is returned instead (synchronous request-size limit).
    pub max_upload_bytes: u64,
    /// Timeout for a single ASR request.
    pub timeout_seconds: u64,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "openai/whisper-large-v3".to_string(),
            api_base: "https://api-inference.huggingface.co".to_string(),
            max_upload_bytes: 10 * 1024 * 1024, // 10 MiB
            timeout_seconds: 120,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model identifier on the inference backend.
    pub model: String,
    /// Base URL of the inference backend.
    pub api_base: String,
    /// Embedding dimensions. Must match the index dimensionality.
    pub dimensions: u32,
    /// Timeout for a single embedding request.
    pub timeout_seconds: u64,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            api_base: "https://api-inference.huggingface.co".to_string(),
            dimensions: 384,
            timeout_seconds: 30,
        }
    }
}

/// Vector index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Index provider (pinecone, memory).
    pub provider: String,
    /// Logical index name. The index is assumed pre-provisioned.
    pub name: String,
    /// Index host URL (for the pinecone provider). Falls back to the
    /// `PINECONE_INDEX_HOST` environment variable when empty.
    pub host: String,
    /// Default number of matches returned by a query.
    pub top_k: usize,
    /// Upper bound accepted for a caller-supplied top_k.
    pub max_top_k: usize,
    /// Timeout for a single index request.
    pub timeout_seconds: u64,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            provider: "pinecone".to_string(),
            name: "sentinel-stream".to_string(),
            host: String::new(),
            top_k: 10,
            max_top_k: 100,
            timeout_seconds: 30,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SentinelError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sentinel")
            .join("config.toml")
    }

    /// Resolve the index host, preferring the settings file over the
    /// `PINECONE_INDEX_HOST` environment variable.
    pub fn index_host(&self) -> Option<String> {
        if !self.index.host.is_empty() {
            return Some(self.index.host.clone());
        }
        std::env::var("PINECONE_INDEX_HOST")
            .ok()
            .filter(|h| !h.is_empty())
    }
}
