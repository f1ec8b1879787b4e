//! CLI `type` and `types` commands: browse entities by category.

use anyhow::Result;
use serde::Serialize;

use crate::config::QuickmemConfig;
use crate::memory::search::truncate_preview;
use crate::memory::types::Entity;
use crate::memory::MemorySession;

#[derive(Debug, Serialize)]
struct TypeListing<'a> {
    entity_type: &'a str,
    entities: Vec<&'a Entity>,
}

#[derive(Debug, Serialize)]
struct TypeCount<'a> {
    entity_type: &'a str,
    count: usize,
}

/// List every entity of one type, in load order.
pub fn list_type(
    session: &MemorySession,
    config: &QuickmemConfig,
    entity_type: &str,
    json: bool,
) -> Result<()> {
    let entities = session.engine().entities_of_type(entity_type);

    if json {
        return super::print_json(&TypeListing {
            entity_type,
            entities,
        });
    }

    if entities.is_empty() {
        println!("No entities of type {entity_type:?}.");
        super::print_hint("try `quickmem types` to list entity types");
        return Ok(());
    }

    println!("{} ({} entities)", entity_type, entities.len());
    println!("{}", "=".repeat(40));
    for entity in entities {
        println!("  {} - {}", entity.entity_id, entity.name);
        let summary = entity.summary();
        if !summary.is_empty() {
            println!(
                "      {}",
                truncate_preview(summary, config.retrieval.preview_chars)
            );
        }
    }

    Ok(())
}

/// List every type with its entity count.
pub fn list_types(session: &MemorySession, json: bool) -> Result<()> {
    let counts = session.engine().type_counts();

    if json {
        let counts: Vec<TypeCount<'_>> = counts
            .into_iter()
            .map(|(entity_type, count)| TypeCount { entity_type, count })
            .collect();
        return super::print_json(&counts);
    }

    if counts.is_empty() {
        println!("No entities loaded.");
        super::print_hint("check the memory source path with `quickmem stats`");
        return Ok(());
    }

    println!("Entity types:");
    for (entity_type, count) in counts {
        println!("  {:<20} {}", entity_type, count);
    }

    Ok(())
}
