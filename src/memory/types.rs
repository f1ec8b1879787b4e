//! Core entity type definitions.
//!
//! Defines [`Entity`] (a loaded memory record), [`Relation`] (a typed edge to
//! another entity), and the lenient raw shapes used to parse records from the
//! JSON store before validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type bucket for records that declare no type.
pub const UNTYPED: &str = "unknown";

/// Relation type for edges that declare no type (e.g. a bare target id).
pub const DEFAULT_RELATION_TYPE: &str = "RELATED_TO";

/// A validated memory entity. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier within the store.
    pub entity_id: String,
    /// Short human-readable name. Indexed.
    pub name: String,
    /// Category tag (e.g. `"issue"`, `"solution"`, `"decision"`).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Free-text description. Indexed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status as recorded by the writer (e.g. `"active"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Ordered observations. Indexed.
    #[serde(default)]
    pub observations: Vec<String>,
    /// Outgoing relations in declaration order.
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Entity {
    /// Build a bare entity with only the required fields set.
    pub fn new(
        entity_id: impl Into<String>,
        name: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            name: name.into(),
            entity_type: entity_type.into(),
            description: None,
            status: None,
            observations: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observations.push(observation.into());
        self
    }

    pub fn with_relation(
        mut self,
        target_id: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> Self {
        self.relations.push(Relation {
            target_id: target_id.into(),
            relation_type: relation_type.into(),
        });
        self
    }

    /// Best short summary: the description, else the first observation.
    pub fn summary(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| self.observations.first().map(String::as_str))
            .unwrap_or("")
    }
}

/// A directed, typed edge from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// ID of the entity this relation points at.
    #[serde(alias = "targetId")]
    pub target_id: String,
    /// Relationship label (e.g. `"RESOLVED_BY"`, `"DEPENDS_ON"`).
    #[serde(alias = "relationType")]
    pub relation_type: String,
}

// ── Raw (pre-validation) shapes ───────────────────────────────────────────────
//
// Records are read field by field from the JSON object rather than derived,
// so a null, mistyped or repeated optional field only loses that field.

const ID_KEYS: &[&str] = &["entity_id", "id", "entityId"];
const TYPE_KEYS: &[&str] = &["type", "entityType", "entity_type"];
const TARGET_KEYS: &[&str] = &["target_id", "targetId", "target", "to"];
const RELATION_TYPE_KEYS: &[&str] = &["relation_type", "relationType", "type"];
const EDGE_FROM_KEYS: &[&str] = &["from", "source", "subject", "fromId"];
const EDGE_TO_KEYS: &[&str] = &["to", "target", "object", "toId"];
const EDGE_TYPE_KEYS: &[&str] = &["relation_type", "relationType", "type", "predicate"];

/// An entity record as it appears on disk. Every field is optional; the
/// store decides what is acceptable.
#[derive(Debug, Default)]
pub(crate) struct RawEntity {
    pub entity_id: Option<String>,
    pub name: Option<String>,
    pub entity_type: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub observations: Vec<String>,
    pub relations: Vec<RawRelation>,
}

/// A relation as it appears inside an entity record: either a bare target id
/// or an edge object.
#[derive(Debug)]
pub(crate) enum RawRelation {
    Target(String),
    Edge {
        target_id: Option<String>,
        relation_type: Option<String>,
    },
}

impl RawRelation {
    /// Read one element of a `relations` array. Anything that is neither a
    /// scalar nor an object is ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(edge) => Some(RawRelation::Edge {
                target_id: scalar_field(edge, TARGET_KEYS),
                relation_type: scalar_field(edge, RELATION_TYPE_KEYS),
            }),
            other => scalar_string(other).map(RawRelation::Target),
        }
    }

    /// Normalize into a [`Relation`]; `None` if no target is given.
    pub fn into_relation(self) -> Option<Relation> {
        match self {
            RawRelation::Target(target_id) => non_empty(Some(target_id)).map(|target_id| Relation {
                target_id,
                relation_type: DEFAULT_RELATION_TYPE.to_string(),
            }),
            RawRelation::Edge {
                target_id,
                relation_type,
            } => non_empty(target_id).map(|target_id| Relation {
                target_id,
                relation_type: non_empty(relation_type)
                    .unwrap_or_else(|| DEFAULT_RELATION_TYPE.to_string()),
            }),
        }
    }
}

/// A top-level graph edge (`{from, to, relationType}`), stored outside any
/// entity record.
#[derive(Debug, Default)]
pub(crate) struct RawEdge {
    pub from: Option<String>,
    pub to: Option<String>,
    pub relation_type: Option<String>,
}

impl RawEdge {
    /// `None` unless `value` is a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let edge = value.as_object()?;
        Some(Self {
            from: scalar_field(edge, EDGE_FROM_KEYS),
            to: scalar_field(edge, EDGE_TO_KEYS),
            relation_type: scalar_field(edge, EDGE_TYPE_KEYS),
        })
    }
}

impl RawEntity {
    /// Read a record; `None` unless `value` is a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;
        let relations = match record.get("relations") {
            Some(Value::Array(items)) => items.iter().filter_map(RawRelation::from_value).collect(),
            _ => Vec::new(),
        };
        Some(Self {
            entity_id: scalar_field(record, ID_KEYS),
            name: scalar_field(record, &["name"]),
            entity_type: scalar_field(record, TYPE_KEYS),
            description: scalar_field(record, &["description"]),
            status: scalar_field(record, &["status"]),
            observations: string_list(record.get("observations")),
            relations,
        })
    }

    /// Validate into an [`Entity`]. `fallback_id` is used when the record has
    /// no id of its own (e.g. the key of a map-shaped store).
    ///
    /// Returns `None` when neither an id nor a name can be determined.
    pub fn into_entity(self, fallback_id: Option<&str>) -> Option<Entity> {
        let id = non_empty(self.entity_id).or_else(|| non_empty(fallback_id.map(str::to_string)));
        let name = non_empty(self.name);

        let (entity_id, name) = match (id, name) {
            (Some(id), Some(name)) => (id, name),
            (Some(id), None) => (id.clone(), id),
            (None, Some(name)) => (name.clone(), name),
            (None, None) => return None,
        };

        Some(Entity {
            entity_id,
            name,
            entity_type: non_empty(self.entity_type).unwrap_or_else(|| UNTYPED.to_string()),
            description: self.description,
            status: self.status,
            observations: self.observations,
            relations: self
                .relations
                .into_iter()
                .filter_map(RawRelation::into_relation)
                .collect(),
        })
    }
}

/// First non-blank scalar among `keys`, in key order.
fn scalar_field(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| non_empty(record.get(*key).and_then(scalar_string)))
}

/// Strings as-is, numbers in their JSON spelling; everything else is unusable.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A list of strings, skipping unusable items. A lone string counts as one.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_entity_accepts_aliases() {
        let raw = RawEntity::from_value(&serde_json::json!({
            "id": "e1",
            "name": "Docker permission bug",
            "entityType": "issue",
            "observations": ["container cannot write volume"],
            "relations": [
                {"targetId": "e2", "relationType": "RESOLVED_BY"},
                {"target": "e3", "type": "SEE_ALSO"},
                "e4"
            ]
        }))
        .unwrap();

        let entity = raw.into_entity(None).unwrap();
        assert_eq!(entity.entity_id, "e1");
        assert_eq!(entity.entity_type, "issue");
        assert_eq!(entity.relations.len(), 3);
        assert_eq!(entity.relations[1].target_id, "e3");
        assert_eq!(entity.relations[1].relation_type, "SEE_ALSO");
        assert_eq!(entity.relations[2].relation_type, DEFAULT_RELATION_TYPE);
    }

    #[test]
    fn id_and_name_fill_each_other() {
        let only_name = RawEntity {
            name: Some("Fix file ownership".into()),
            ..Default::default()
        };
        let e = only_name.into_entity(None).unwrap();
        assert_eq!(e.entity_id, "Fix file ownership");
        assert_eq!(e.entity_type, UNTYPED);

        let keyed = RawEntity::default().into_entity(Some("k1")).unwrap();
        assert_eq!(keyed.entity_id, "k1");
        assert_eq!(keyed.name, "k1");

        assert!(RawEntity::default().into_entity(None).is_none());
        let blank = RawEntity {
            entity_id: Some("   ".into()),
            ..Default::default()
        };
        assert!(blank.into_entity(None).is_none());
    }

    #[test]
    fn relation_without_target_is_dropped() {
        let raw = RawEntity::from_value(&serde_json::json!({
            "entity_id": "a",
            "relations": [{"relationType": "ORPHAN"}, {"to": "b"}]
        }))
        .unwrap();
        let e = raw.into_entity(None).unwrap();
        assert_eq!(e.relations.len(), 1);
        assert_eq!(e.relations[0].target_id, "b");
    }

    #[test]
    fn summary_prefers_description() {
        let e = Entity::new("a", "A", "note").with_observation("first");
        assert_eq!(e.summary(), "first");
        let e = e.with_description("described");
        assert_eq!(e.summary(), "described");
    }
    #[test]
    fn null_lists_are_treated_as_missing() {
        let raw = RawEntity::from_value(&serde_json::json!({
            "entity_id": "a",
            "name": "Docker bug",
            "type": "issue",
            "description": null,
            "observations": null,
            "relations": null
        }))
        .unwrap();
        let e = raw.into_entity(None).unwrap();
        assert_eq!(e.entity_id, "a");
        assert!(e.observations.is_empty());
        assert!(e.relations.is_empty());
        assert!(e.description.is_none());
    }

    #[test]
    fn bad_relations_and_observations_are_dropped_one_by_one() {
        let raw = RawEntity::from_value(&serde_json::json!({
            "entity_id": "a",
            "observations": ["kept", {"nested": true}, null, "also kept"],
            "relations": [
                {"targetId": "b", "relationType": "RESOLVED_BY"},
                {"targetId": true},
                [1, 2],
                {"targetId": 7}
            ]
        }))
        .unwrap();
        let e = raw.into_entity(None).unwrap();
        assert_eq!(e.observations, vec!["kept", "also kept"]);
        let targets: Vec<&str> = e.relations.iter().map(|r| r.target_id.as_str()).collect();
        assert_eq!(targets, vec!["b", "7"]);
    }

    #[test]
    fn repeated_aliases_pick_the_first_usable_key() {
        let raw = RawEntity::from_value(&serde_json::json!({
            "id": "from-id",
            "entity_id": "from-entity-id",
            "type": "issue",
            "entityType": "bug",
            "name": "Twice named"
        }))
        .unwrap();
        let e = raw.into_entity(None).unwrap();
        assert_eq!(e.entity_id, "from-entity-id");
        assert_eq!(e.entity_type, "issue");

        let blank_first = RawEntity::from_value(&serde_json::json!({"entity_id": "  ", "id": "x"}))
            .unwrap()
            .into_entity(None)
            .unwrap();
        assert_eq!(blank_first.entity_id, "x");
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let e = RawEntity::from_value(&serde_json::json!({"id": 42, "name": "Answer"}))
            .unwrap()
            .into_entity(None)
            .unwrap();
        assert_eq!(e.entity_id, "42");

        assert!(RawEntity::from_value(&serde_json::json!("bare string")).is_none());
        assert!(RawEntity::from_value(&serde_json::json!({"id": false}))
            .unwrap()
            .into_entity(None)
            .is_none());
    }

    #[test]
    fn relation_serializes_snake_case_and_reads_camel_case() {
        let relation = Relation {
            target_id: "b".into(),
            relation_type: "RESOLVED_BY".into(),
        };
        let value = serde_json::to_value(&relation).unwrap();
        assert_eq!(value, serde_json::json!({"target_id": "b", "relation_type": "RESOLVED_BY"}));

        let back: Relation =
            serde_json::from_value(serde_json::json!({"targetId": "b", "relationType": "RESOLVED_BY"}))
                .unwrap();
        assert_eq!(back, relation);
    }
}
