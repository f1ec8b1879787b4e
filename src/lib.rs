//! Keyword relevance search and relationship traversal over agent memory snapshots.
//!
//! quickmem loads a JSON memory store (entities with observations and typed
//! relations), builds an inverted keyword index once, and answers lookups
//! against that immutable index:
//!
//! | Operation | Entry point |
//! |-----------|-------------|
//! | Keyword search | [`memory::search::QueryEngine::search`] |
//! | Type listing | [`memory::search::QueryEngine::entities_of_type`] |
//! | Keyword suggestions | [`memory::search::QueryEngine::suggest`] |
//! | Relation traversal | [`memory::relations::Traverser::find_related`] |
//! | Statistics | [`memory::stats::memory_stats`] |
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and environment variables
//! - [`memory`] - Entity store, tokenizer, index, query engine, and traverser
//!
//! # Example
//!
//! ```
//! use quickmem::memory::store::EntityStore;
//! use quickmem::memory::search::SearchOptions;
//! use quickmem::memory::MemorySession;
//!
//! let store = EntityStore::from_value(serde_json::json!([
//!     {"entity_id": "A", "name": "Docker permission bug", "type": "issue",
//!      "relations": [{"targetId": "B", "relationType": "RESOLVED_BY"}]},
//!     {"entity_id": "B", "name": "Fix file ownership", "type": "solution"}
//! ])).unwrap();
//! let session = MemorySession::from_store(store);
//!
//! let response = session.engine().search("docker permission", &SearchOptions::default());
//! assert_eq!(response.results[0].entity.entity_id, "A");
//! assert_eq!(response.results[0].score, 1.0);
//!
//! let related = session.traverser().find_related("A", 2);
//! assert_eq!(related[0].entity.entity_id, "B");
//! ```

pub mod config;
pub mod memory;
