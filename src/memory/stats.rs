use serde::Serialize;
use std::collections::BTreeMap;

use crate::memory::index::MemoryIndex;
use crate::memory::relations::Traverser;
use crate::memory::store::EntityStore;

/// Response from memory_stats.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub entity_count: usize,
    pub keyword_count: usize,
    pub relationship_count: usize,
    pub type_count: usize,
    pub by_type: BTreeMap<String, usize>,
    /// Relations whose target is not a loaded entity.
    pub dangling_relations: usize,
    pub skipped_records: usize,
    pub duplicate_records: usize,
    pub skipped_edges: usize,
    pub build_time_ms: f64,
    pub built_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Compute snapshot and index statistics.
pub fn memory_stats(store: &EntityStore, index: &MemoryIndex) -> StatsResponse {
    let by_type: BTreeMap<String, usize> = index
        .types()
        .iter()
        .map(|(t, ids)| (t.clone(), ids.len()))
        .collect();
    let report = store.report();

    StatsResponse {
        entity_count: store.len(),
        keyword_count: index.keyword_count(),
        relationship_count: index.relation_count(),
        type_count: by_type.len(),
        by_type,
        dangling_relations: Traverser::new(store, index).dangling_count(),
        skipped_records: report.skipped_records,
        duplicate_records: report.duplicate_records,
        skipped_edges: report.skipped_edges,
        build_time_ms: index.build_time().as_secs_f64() * 1000.0,
        built_at: index.built_at().to_string(),
        source: store.source().map(|p| p.display().to_string()),
    }
}
