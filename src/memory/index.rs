//! Keyword, type, and relation indexes built once over an [`EntityStore`].

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::memory::store::EntityStore;
use crate::memory::tokenizer::{entity_text, tokenize};
use crate::memory::types::Relation;

/// Read-only lookup structures derived from an entity snapshot.
///
/// Holds entity ids only; the entities themselves stay in the [`EntityStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    inverted: HashMap<String, HashSet<String>>,
    types: HashMap<String, HashSet<String>>,
    adjacency: HashMap<String, Vec<Relation>>,
    built_at: String,
    build_time: Duration,
}

/// Build every index in a single pass over the store.
pub fn build_index(store: &EntityStore) -> MemoryIndex {
    let started = Instant::now();

    let mut inverted: HashMap<String, HashSet<String>> = HashMap::new();
    let mut types: HashMap<String, HashSet<String>> = HashMap::new();
    let mut adjacency: HashMap<String, Vec<Relation>> = HashMap::new();

    for entity in store.entities() {
        for token in tokenize(&entity_text(entity)) {
            inverted
                .entry(token)
                .or_default()
                .insert(entity.entity_id.clone());
        }

        types
            .entry(entity.entity_type.clone())
            .or_default()
            .insert(entity.entity_id.clone());

        if !entity.relations.is_empty() {
            adjacency
                .entry(entity.entity_id.clone())
                .or_default()
                .extend(entity.relations.iter().cloned());
        }
    }

    let build_time = started.elapsed();
    tracing::info!(
        entities = store.len(),
        keywords = inverted.len(),
        types = types.len(),
        elapsed_ms = build_time.as_secs_f64() * 1000.0,
        "memory index built"
    );

    MemoryIndex {
        inverted,
        types,
        adjacency,
        built_at: chrono::Utc::now().to_rfc3339(),
        build_time,
    }
}

impl MemoryIndex {
    /// Entity ids whose text contains `keyword` (already normalized).
    pub fn lookup(&self, keyword: &str) -> Option<&HashSet<String>> {
        self.inverted.get(keyword)
    }

    /// Entity ids declared with `entity_type`.
    pub fn of_type(&self, entity_type: &str) -> Option<&HashSet<String>> {
        self.types.get(entity_type)
    }

    /// Outgoing relations of an entity, in declaration order.
    pub fn relations_of(&self, entity_id: &str) -> &[Relation] {
        self.adjacency
            .get(entity_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn inverted(&self) -> &HashMap<String, HashSet<String>> {
        &self.inverted
    }

    pub fn types(&self) -> &HashMap<String, HashSet<String>> {
        &self.types
    }

    pub fn adjacency(&self) -> &HashMap<String, Vec<Relation>> {
        &self.adjacency
    }

    pub fn keyword_count(&self) -> usize {
        self.inverted.len()
    }

    /// Total number of relation edges across all entities.
    pub fn relation_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    /// RFC 3339 timestamp of when the index was built.
    pub fn built_at(&self) -> &str {
        &self.built_at
    }
}
