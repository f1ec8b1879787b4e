use anyhow::Result;

use crate::memory::MemorySession;

/// Display snapshot and index statistics in the terminal.
pub fn stats(session: &MemorySession, json: bool) -> Result<()> {
    let response = session.stats();

    if json {
        return super::print_json(&response);
    }

    println!("Memory Index Statistics");
    println!("{}", "=".repeat(40));
    if let Some(ref source) = response.source {
        println!("  Source:              {source}");
    }
    println!("  Entities:            {}", response.entity_count);
    println!("  Keywords:            {}", response.keyword_count);
    println!("  Relationships:       {}", response.relationship_count);
    println!("  Types:               {}", response.type_count);
    println!("  Build time:          {:.2} ms", response.build_time_ms);
    println!("  Built at:            {}", response.built_at);
    println!();

    if !response.by_type.is_empty() {
        println!("By Type:");
        for (t, count) in &response.by_type {
            println!("  {:<20} {}", t, count);
        }
        println!();
    }

    println!("Load report:");
    println!("  Skipped records:     {}", response.skipped_records);
    println!("  Duplicate ids:       {}", response.duplicate_records);
    println!("  Skipped edges:       {}", response.skipped_edges);
    println!("  Dangling relations:  {}", response.dangling_relations);

    Ok(())
}
