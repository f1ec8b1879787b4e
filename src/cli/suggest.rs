use anyhow::Result;

use crate::config::QuickmemConfig;
use crate::memory::tokenizer::MIN_TOKEN_LEN;
use crate::memory::MemorySession;

/// Print indexed keywords that match a partial word.
pub fn suggest(
    session: &MemorySession,
    config: &QuickmemConfig,
    partial: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let suggestions = session
        .engine()
        .suggest(partial, limit.unwrap_or(config.retrieval.suggest_limit));

    if json {
        return super::print_json(&suggestions);
    }

    if suggestions.is_empty() {
        println!("No keywords match {partial:?}.");
        super::print_hint(&format!(
            "keywords are {MIN_TOKEN_LEN}+ characters; try a shorter fragment, or `quickmem types` to browse"
        ));
        return Ok(());
    }

    println!("Keywords matching {partial:?}:");
    for s in &suggestions {
        println!("  {:<24} ({} entities)", s.keyword, s.entity_count);
    }

    Ok(())
}
