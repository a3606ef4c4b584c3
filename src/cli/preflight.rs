//! Pre-flight checks before operations that need backend credentials.
//!
//! The adapters degrade or fail per-call when credentials are missing; these
//! checks exist so `doctor` can say up front what would go wrong.

use crate::config::Settings;
use crate::error::{Result, SentinelError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Ingestion wants the inference token and index credentials, though it
    /// degrades gracefully without them.
    Ingest,
    /// Search needs the inference token and index credentials outright.
    Search,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Ingest | Operation::Search => {
            check_env("HF_TOKEN")?;
            check_env("PINECONE_API_KEY")?;
            check_index_host(settings)?;
        }
    }
    Ok(())
}

/// Check that an environment variable is set and non-empty.
fn check_env(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Ok(()),
        Ok(_) => Err(SentinelError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        Err(_) => Err(SentinelError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}

/// Check that the index host is known, from config or environment.
fn check_index_host(settings: &Settings) -> Result<()> {
    if settings.index.provider == "memory" {
        return Ok(());
    }
    settings.index_host().map(|_| ()).ok_or_else(|| {
        SentinelError::Config(
            "Index host not configured. Set index.host in config.toml or export \
             PINECONE_INDEX_HOST."
                .to_string(),
        )
    })
}
