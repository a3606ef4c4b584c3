//! Ingest command implementation.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::media::MediaInput;
use crate::orchestrator::Pipeline;
use anyhow::Result;
use std::path::Path;

/// Run the ingest command.
pub async fn run_ingest(input: &str, as_url: bool, settings: Settings) -> Result<()> {
    let media = if as_url {
        MediaInput::from_parts(None, Some(input.to_string()))?
    } else {
        let path = Path::new(input);
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.mp4")
            .to_string();
        MediaInput::from_parts(Some((name, bytes)), None)?
    };

    // Ingestion degrades rather than fails without credentials; warn early
    // so a placeholder transcription isn't a surprise.
    if let Err(e) = preflight::check(preflight::Operation::Ingest, &settings) {
        Output::warning(&e.to_string());
    }

    Output::info(&format!("Ingesting {}", media.source()));

    let pipeline = Pipeline::new(settings)?;
    let result = pipeline.ingest(media).await?;

    Output::success(&result.summary);
    Output::header("Transcription");
    println!("{}", result.transcription);

    Ok(())
}
