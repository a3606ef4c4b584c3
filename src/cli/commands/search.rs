//! Search command implementation.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::orchestrator::Pipeline;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(query: &str, top_k: Option<usize>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(preflight::Operation::Search, &settings) {
        Output::warning(&e.to_string());
    }

    let pipeline = Pipeline::new(settings)?;

    match pipeline.search(query, top_k).await {
        Ok(matches) => {
            if matches.is_empty() {
                Output::warning("No results found matching your query.");
            } else {
                Output::success(&format!("Found {} results", matches.len()));
                for m in &matches {
                    Output::search_result(&m.metadata.source, m.score, &m.metadata.text);
                }
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            Err(anyhow::anyhow!("{}", e))
        }
    }
}
