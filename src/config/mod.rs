//! Configuration module for Sentinel.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    EmbeddingSettings, GeneralSettings, IndexSettings, Settings, TranscriptionSettings,
};
