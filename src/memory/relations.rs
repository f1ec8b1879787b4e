//! Bounded breadth-first traversal over entity relations.
//!
//! Relation graphs routinely contain back-references (`RESOLVED_BY` / `RESOLVES`),
//! so every id is visited at most once.

use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

use crate::memory::index::MemoryIndex;
use crate::memory::store::EntityStore;
use crate::memory::types::Entity;

/// Default hop limit for [`Traverser::find_related`].
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Traversal problems. Never fatal: [`Traverser::find_related`] returns an
/// empty sequence instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("entity not found: {entity_id}")]
    UnknownEntity { entity_id: String },
}

/// One hop on the way from the start entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub entity_id: String,
    pub name: String,
    /// Relation followed to reach this step; `None` for the start entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,
}

/// An entity reached by traversal.
#[derive(Debug, Clone, Serialize)]
pub struct RelatedEntity<'a> {
    pub entity: &'a Entity,
    /// Hop count from the start entity (always ≥ 1).
    pub depth: usize,
    /// Steps from the start entity to this one, both ends included.
    pub path: Vec<PathStep>,
}

/// A relation pointing at an entity from elsewhere in the store.
#[derive(Debug, Clone, Serialize)]
pub struct IncomingRelation<'a> {
    pub source: &'a Entity,
    pub relation_type: &'a str,
}

/// Read-only relation walker over a store and its index.
#[derive(Debug, Clone, Copy)]
pub struct Traverser<'a> {
    store: &'a EntityStore,
    index: &'a MemoryIndex,
}

impl<'a> Traverser<'a> {
    pub fn new(store: &'a EntityStore, index: &'a MemoryIndex) -> Self {
        Self { store, index }
    }

    /// Entities reachable from `entity_id` within `max_depth` hops, in BFS order.
    ///
    /// Unknown start ids yield an empty sequence.
    pub fn find_related(&self, entity_id: &str, max_depth: usize) -> Vec<RelatedEntity<'a>> {
        self.try_find_related(entity_id, max_depth)
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "traversal recovered as empty result");
                Vec::new()
            })
    }

    /// Like [`find_related`](Self::find_related), but reports an unknown start id.
    pub fn try_find_related(
        &self,
        entity_id: &str,
        max_depth: usize,
    ) -> Result<Vec<RelatedEntity<'a>>, TraversalError> {
        let start = self
            .store
            .get(entity_id)
            .ok_or_else(|| TraversalError::UnknownEntity {
                entity_id: entity_id.to_string(),
            })?;

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(start.entity_id.as_str());

        let mut queue: VecDeque<(&'a Entity, usize, Vec<PathStep>)> = VecDeque::new();
        queue.push_back((
            start,
            0,
            vec![PathStep {
                entity_id: start.entity_id.clone(),
                name: start.name.clone(),
                relation_type: None,
            }],
        ));

        let mut related = Vec::new();
        while let Some((current, depth, path)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for relation in self.index.relations_of(&current.entity_id) {
                let Some(next) = self.store.get(&relation.target_id) else {
                    tracing::trace!(target_id = %relation.target_id, "skipping dangling relation");
                    continue;
                };
                if !visited.insert(next.entity_id.as_str()) {
                    continue;
                }

                let mut next_path = path.clone();
                next_path.push(PathStep {
                    entity_id: next.entity_id.clone(),
                    name: next.name.clone(),
                    relation_type: Some(relation.relation_type.clone()),
                });

                related.push(RelatedEntity {
                    entity: next,
                    depth: depth + 1,
                    path: next_path.clone(),
                });
                queue.push_back((next, depth + 1, next_path));
            }
        }

        Ok(related)
    }

    /// Relations from other entities that point at `entity_id`, in store order.
    pub fn incoming(&self, entity_id: &str) -> Vec<IncomingRelation<'a>> {
        self.store
            .entities()
            .iter()
            .flat_map(move |source| {
                self.index
                    .relations_of(&source.entity_id)
                    .iter()
                    .filter(move |r| r.target_id == entity_id)
                    .map(move |r| IncomingRelation {
                        source,
                        relation_type: r.relation_type.as_str(),
                    })
            })
            .collect()
    }

    /// Relation targets that do not resolve to a loaded entity.
    pub fn dangling_count(&self) -> usize {
        self.index
            .adjacency()
            .values()
            .flatten()
            .filter(|r| !self.store.contains(&r.target_id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::index::build_index;

    fn cyclic_store() -> EntityStore {
        EntityStore::from_entities([
            Entity::new("A", "Docker permission bug", "issue").with_relation("B", "RESOLVED_BY"),
            Entity::new("B", "Fix file ownership", "solution").with_relation("A", "RESOLVES"),
        ])
    }

    fn chain_store() -> EntityStore {
        EntityStore::from_entities([
            Entity::new("root", "Root", "project")
                .with_relation("left", "HAS")
                .with_relation("right", "HAS")
                .with_relation("ghost", "HAS"),
            Entity::new("left", "Left", "module").with_relation("leaf", "CONTAINS"),
            Entity::new("right", "Right", "module")
                .with_relation("leaf", "CONTAINS")
                .with_relation("root", "PART_OF"),
            Entity::new("leaf", "Leaf", "file"),
        ])
    }

    #[test]
    fn test_back_reference_is_suppressed() {
        let store = cyclic_store();
        let index = build_index(&store);
        let traverser = Traverser::new(&store, &index);

        let related = traverser.find_related("A", 2);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].entity.entity_id, "B");
        assert_eq!(related[0].depth, 1);
    }

    #[test]
    fn test_bfs_order_and_paths() {
        let store = chain_store();
        let index = build_index(&store);
        let traverser = Traverser::new(&store, &index);

        let related = traverser.find_related("root", 5);
        let order: Vec<(&str, usize)> = related
            .iter()
            .map(|r| (r.entity.entity_id.as_str(), r.depth))
            .collect();
        assert_eq!(order, vec![("left", 1), ("right", 1), ("leaf", 2)]);

        let leaf_path: Vec<&str> = related[2].path.iter().map(|s| s.entity_id.as_str()).collect();
        assert_eq!(leaf_path, vec!["root", "left", "leaf"]);
        assert_eq!(related[2].path[0].relation_type, None);
        assert_eq!(related[2].path[2].relation_type.as_deref(), Some("CONTAINS"));
    }

    #[test]
    fn test_depth_bound() {
        let store = chain_store();
        let index = build_index(&store);
        let traverser = Traverser::new(&store, &index);

        assert!(traverser.find_related("root", 0).is_empty());
        let one_hop = traverser.find_related("root", 1);
        assert!(one_hop.iter().all(|r| r.depth == 1));
        assert_eq!(one_hop.len(), 2);
    }

    #[test]
    fn test_unknown_start() {
        let store = chain_store();
        let index = build_index(&store);
        let traverser = Traverser::new(&store, &index);

        assert!(traverser.find_related("nowhere", 3).is_empty());
        assert_eq!(
            traverser.try_find_related("nowhere", 3).unwrap_err(),
            TraversalError::UnknownEntity {
                entity_id: "nowhere".into()
            }
        );
    }

    #[test]
    fn test_incoming_and_dangling() {
        let store = chain_store();
        let index = build_index(&store);
        let traverser = Traverser::new(&store, &index);

        let incoming: Vec<&str> = traverser
            .incoming("leaf")
            .iter()
            .map(|r| r.source.entity_id.as_str())
            .collect();
        assert_eq!(incoming, vec!["left", "right"]);
        assert_eq!(traverser.dangling_count(), 1);
    }
}
