//! Doctor command implementation.

use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the doctor command: report on credentials and configuration.
pub fn run_doctor(settings: &Settings) -> Result<()> {
    Output::header("Sentinel Doctor");

    let mut problems = 0;

    for var in ["HF_TOKEN", "PINECONE_API_KEY"] {
        match std::env::var(var) {
            Ok(v) if !v.is_empty() => Output::kv(var, "set"),
            _ => {
                Output::kv(var, "missing");
                problems += 1;
            }
        }
    }

    match settings.index_host() {
        Some(host) => Output::kv("Index host", &host),
        None if settings.index.provider == "memory" => {
            Output::kv("Index host", "(memory provider, not needed)")
        }
        None => {
            Output::kv("Index host", "missing (set index.host or PINECONE_INDEX_HOST)");
            problems += 1;
        }
    }

    Output::kv("Index name", &settings.index.name);
    Output::kv("ASR model", &settings.transcription.model);
    Output::kv("Embedding model", &settings.embedding.model);
    Output::kv(
        "Embedding dimensions",
        &settings.embedding.dimensions.to_string(),
    );

    println!();
    if problems == 0 {
        Output::success("All checks passed.");
    } else {
        Output::warning(&format!(
            "{} problem(s) found. Ingestion will degrade to placeholder \
             transcriptions and search will fail until resolved.",
            problems
        ));
    }

    Ok(())
}
