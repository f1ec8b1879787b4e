//! Entity store: loads and validates the JSON memory snapshot.
//!
//! [`EntityStore::load`] is the file entry point; [`EntityStore::from_value`] and
//! [`EntityStore::from_entities`] accept already-parsed input. Malformed records are
//! skipped and counted; only an unreadable or unparsable document is an error.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::memory::types::{non_empty, Entity, RawEdge, RawEntity, Relation, DEFAULT_RELATION_TYPE};

/// Fatal load-time failures.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("memory source not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read memory source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("memory source {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("memory source must be a JSON array or object, got {found}")]
    InvalidShape { found: &'static str },
}

/// Counters describing what the loader accepted and rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    /// Records that could not be turned into an entity.
    pub skipped_records: usize,
    /// Records whose id was already taken by an earlier record.
    pub duplicate_records: usize,
    /// Top-level edges whose source entity is not in the store.
    pub skipped_edges: usize,
}

/// Owns the loaded entity collection, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    positions: HashMap<String, usize>,
    report: LoadReport,
    source: Option<PathBuf>,
}

impl EntityStore {
    /// Read and parse a snapshot file.
    ///
    /// Files ending in `.jsonl` / `.ndjson` are read one record per line; anything
    /// else must be a single JSON document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let mut store = if is_json_lines(path) {
            Self::from_json_lines(&contents)
        } else {
            let value: Value = serde_json::from_str(&contents).map_err(|e| LoadError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
            Self::from_value(value)?
        };
        store.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            entities = store.len(),
            skipped = store.report.skipped_records,
            duplicates = store.report.duplicate_records,
            "memory source loaded"
        );
        Ok(store)
    }

    /// Build a store from an already-parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let mut store = Self::default();
        match value {
            Value::Array(records) => {
                for record in records {
                    store.push_record(record, None);
                }
            }
            Value::Object(mut map) => {
                if map.get("entities").is_some_and(|e| e.is_array() || e.is_object()) {
                    let edges = map.remove("relations");
                    match map.remove("entities") {
                        Some(Value::Array(records)) => {
                            for record in records {
                                store.push_record(record, None);
                            }
                        }
                        Some(Value::Object(keyed)) => store.push_keyed(keyed),
                        _ => {}
                    }
                    if let Some(Value::Array(edges)) = edges {
                        for edge in edges {
                            store.push_edge(edge);
                        }
                    }
                } else {
                    store.push_keyed(map);
                }
            }
            other => {
                return Err(LoadError::InvalidShape {
                    found: json_kind(&other),
                })
            }
        }
        Ok(store)
    }

    /// Build a store from validated entities. Later duplicates of an id are dropped.
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut store = Self::default();
        for entity in entities {
            store.insert(entity);
        }
        store
    }

    /// Parse JSON Lines. Each line is an entity record, or a knowledge-graph line
    /// tagged `"type": "entity"` / `"type": "relation"`. Edges are applied after
    /// all entities are read so that forward references resolve.
    fn from_json_lines(contents: &str) -> Self {
        let mut store = Self::default();
        let mut edges = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut record: Map<String, Value> = match serde_json::from_str(line) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    tracing::warn!(line = line_no + 1, "skipping unparsable memory line");
                    store.report.skipped_records += 1;
                    continue;
                }
            };

            let tag = record.get("type").and_then(Value::as_str).map(str::to_string);
            match tag.as_deref() {
                Some("relation") => {
                    record.remove("type");
                    edges.push(Value::Object(record));
                }
                Some("entity") => {
                    record.remove("type");
                    store.push_record(Value::Object(record), None);
                }
                _ => store.push_record(Value::Object(record), None),
            }
        }

        for edge in edges {
            store.push_edge(edge);
        }
        store
    }

    fn push_keyed(&mut self, map: Map<String, Value>) {
        for (key, record) in map {
            self.push_record(record, Some(&key));
        }
    }

    fn push_record(&mut self, record: Value, fallback_id: Option<&str>) {
        let entity = RawEntity::from_value(&record).and_then(|raw| raw.into_entity(fallback_id));

        match entity {
            Some(entity) => {
                self.insert(entity);
            }
            None => {
                tracing::debug!(key = fallback_id.unwrap_or(""), "skipping malformed memory record");
                self.report.skipped_records += 1;
            }
        }
    }

    fn push_edge(&mut self, edge: Value) {
        let Some(raw) = RawEdge::from_value(&edge) else {
            self.report.skipped_edges += 1;
            return;
        };
        let (Some(from), Some(to)) = (non_empty(raw.from), non_empty(raw.to)) else {
            self.report.skipped_edges += 1;
            return;
        };
        let relation = Relation {
            target_id: to,
            relation_type: non_empty(raw.relation_type)
                .unwrap_or_else(|| DEFAULT_RELATION_TYPE.to_string()),
        };

        match self.positions.get(&from) {
            Some(&pos) => {
                let relations = &mut self.entities[pos].relations;
                if !relations.contains(&relation) {
                    relations.push(relation);
                }
            }
            None => {
                tracing::debug!(from = %from, "skipping edge from unknown entity");
                self.report.skipped_edges += 1;
            }
        }
    }

    fn insert(&mut self, entity: Entity) {
        if self.positions.contains_key(&entity.entity_id) {
            tracing::warn!(id = %entity.entity_id, "duplicate entity id, keeping first record");
            self.report.duplicate_records += 1;
            return;
        }
        self.positions
            .insert(entity.entity_id.clone(), self.entities.len());
        self.entities.push(entity);
    }

    /// Look up an entity by id.
    pub fn get(&self, entity_id: &str) -> Option<&Entity> {
        self.positions.get(entity_id).map(|&i| &self.entities[i])
    }

    /// Insertion position of an entity, used for stable tie-breaking.
    pub fn position(&self, entity_id: &str) -> Option<usize> {
        self.positions.get(entity_id).copied()
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.positions.contains_key(entity_id)
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Path the store was loaded from, if it came from a file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn is_json_lines(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsonl") | Some("ndjson")
    )
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
