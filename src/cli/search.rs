use anyhow::Result;

use crate::config::QuickmemConfig;
use crate::memory::search::{truncate_preview, SearchOptions};
use crate::memory::MemorySession;

/// Run a keyword search from the terminal.
pub fn search(
    session: &MemorySession,
    config: &QuickmemConfig,
    query: &str,
    entity_type: Option<String>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let options = SearchOptions {
        max_results: limit.unwrap_or(config.retrieval.default_max_results),
        entity_type,
    };

    let response = session.engine().search(query, &options);

    if json {
        return super::print_json(&response);
    }

    if response.results.is_empty() {
        println!("No results found.");
        if let Some(ref hint) = response.hint {
            super::print_hint(hint);
        }
        return Ok(());
    }

    println!(
        "Found {} match(es) for {:?} (showing {})\n",
        response.total_matches,
        query,
        response.results.len()
    );

    for (i, hit) in response.results.iter().enumerate() {
        let entity = hit.entity;
        println!(
            "  {}. [{}] {} - {} (score: {:.2}, {})",
            i + 1,
            entity.entity_type,
            entity.entity_id,
            entity.name,
            hit.score,
            hit.relevance,
        );
        let summary = entity.summary();
        if !summary.is_empty() {
            println!(
                "     {}",
                truncate_preview(summary, config.retrieval.preview_chars)
            );
        }
        println!();
    }

    if response.total_matches > response.results.len() {
        println!(
            "{} more match(es); raise --limit to see them.",
            response.total_matches - response.results.len()
        );
    }

    Ok(())
}
