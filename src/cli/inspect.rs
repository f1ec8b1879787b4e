//! CLI `inspect` command: display full details for a single entity.

use anyhow::Result;

use crate::memory::MemorySession;

/// Inspect a single entity by ID and display full details.
pub fn inspect(session: &MemorySession, id: &str, json: bool) -> Result<()> {
    let Some(response) = session.inspect(id) else {
        if json {
            return super::print_json(&serde_json::json!({
                "entity": null,
                "hint": format!("entity not found: {id}"),
            }));
        }
        println!("Entity not found: {id}");
        super::print_hint("try `quickmem search <text>` to find entity ids");
        return Ok(());
    };

    if json {
        return super::print_json(&response);
    }

    let e = response.entity;
    println!("Entity: {}", e.entity_id);
    println!("{}", "=".repeat(50));
    println!("  Name:           {}", e.name);
    println!("  Type:           {}", e.entity_type);
    if let Some(ref status) = e.status {
        println!("  Status:         {status}");
    }
    if let Some(ref description) = e.description {
        println!();
        println!("Description:");
        println!("  {description}");
    }

    if !e.observations.is_empty() {
        println!();
        println!("Observations:");
        for observation in &e.observations {
            println!("  - {observation}");
        }
    }

    if !e.relations.is_empty() {
        println!();
        println!("Relations:");
        let store = session.store();
        for rel in &e.relations {
            let target = store
                .get(&rel.target_id)
                .map(|t| format!("{} ({})", t.name, t.entity_type))
                .unwrap_or_else(|| "(not loaded)".to_string());
            println!("  --[{}]--> {} {}", rel.relation_type, rel.target_id, target);
        }
    }

    if !response.incoming.is_empty() {
        println!();
        println!("Referenced by:");
        for rel in &response.incoming {
            println!(
                "  {} ({}) --[{}]-->",
                rel.source.entity_id, rel.source.name, rel.relation_type
            );
        }
    }

    Ok(())
}
