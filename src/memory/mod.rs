pub mod index;
pub mod relations;
pub mod search;
pub mod stats;
pub mod store;
pub mod tokenizer;
pub mod types;

use serde::Serialize;
use std::path::Path;

use index::MemoryIndex;
use relations::{IncomingRelation, Traverser};
use search::QueryEngine;
use store::{EntityStore, LoadError};
use types::Entity;

/// An entity together with the relations that point at it.
#[derive(Debug, Serialize)]
pub struct InspectResponse<'a> {
    pub entity: &'a Entity,
    pub incoming: Vec<IncomingRelation<'a>>,
}

/// A loaded snapshot and the index built over it, for the lifetime of one process.
#[derive(Debug, Clone)]
pub struct MemorySession {
    store: EntityStore,
    index: MemoryIndex,
}

impl MemorySession {
    /// Load a snapshot file and index it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(Self::from_store(EntityStore::load(path)?))
    }

    /// Index an already-loaded store.
    pub fn from_store(store: EntityStore) -> Self {
        let index = index::build_index(&store);
        Self { store, index }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn index(&self) -> &MemoryIndex {
        &self.index
    }

    pub fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.store, &self.index)
    }

    pub fn traverser(&self) -> Traverser<'_> {
        Traverser::new(&self.store, &self.index)
    }

    /// Full record plus back-references, or `None` if the id is unknown.
    pub fn inspect(&self, entity_id: &str) -> Option<InspectResponse<'_>> {
        let entity = self.store.get(entity_id)?;
        Some(InspectResponse {
            entity,
            incoming: self.traverser().incoming(entity_id),
        })
    }

    pub fn stats(&self) -> stats::StatsResponse {
        stats::memory_stats(&self.store, &self.index)
    }
}
