//! CLI `related` command: walk the relation graph from one entity.

use anyhow::Result;
use serde::Serialize;

use crate::config::QuickmemConfig;
use crate::memory::relations::{PathStep, RelatedEntity};
use crate::memory::MemorySession;

#[derive(Debug, Serialize)]
struct RelatedResponse<'a> {
    entity_id: &'a str,
    max_depth: usize,
    related: Vec<RelatedEntity<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

/// Print entities related to `entity_id`, breadth-first.
pub fn related(
    session: &MemorySession,
    config: &QuickmemConfig,
    entity_id: &str,
    depth: Option<usize>,
    json: bool,
) -> Result<()> {
    let max_depth = depth.unwrap_or(config.retrieval.default_depth);
    let traverser = session.traverser();

    let (related, hint) = match traverser.try_find_related(entity_id, max_depth) {
        Ok(related) if related.is_empty() => (
            related,
            Some(format!(
                "no relations within {max_depth} hop(s); try a larger --depth or `quickmem inspect {entity_id}`"
            )),
        ),
        Ok(related) => (related, None),
        Err(e) => (
            Vec::new(),
            Some(format!(
                "{e}; try `quickmem search <text>` to find entity ids"
            )),
        ),
    };

    if json {
        return super::print_json(&RelatedResponse {
            entity_id,
            max_depth,
            related,
            hint,
        });
    }

    if related.is_empty() {
        println!("No related entities found.");
        if let Some(ref hint) = hint {
            super::print_hint(hint);
        }
        return Ok(());
    }

    let start_name = session
        .store()
        .get(entity_id)
        .map(|e| e.name.as_str())
        .unwrap_or(entity_id);
    println!(
        "Related to {entity_id} ({start_name}), up to {max_depth} hop(s): {} found\n",
        related.len()
    );

    for r in &related {
        println!(
            "  [depth {}] {} - {} ({})",
            r.depth, r.entity.entity_id, r.entity.name, r.entity.entity_type
        );
        println!("      {}", format_path(&r.path));
    }

    Ok(())
}

/// Render a path as `Start --TYPE--> Next --TYPE--> End`, using entity names.
pub fn format_path(path: &[PathStep]) -> String {
    let mut out = String::new();
    for step in path {
        if let Some(ref relation_type) = step.relation_type {
            out.push_str(&format!(" --{relation_type}--> "));
        }
        out.push_str(&step.name);
    }
    out
}
