#![allow(dead_code)]

use quickmem::memory::store::EntityStore;
use quickmem::memory::MemorySession;
use serde_json::{json, Value};

/// The two-entity issue/solution pair with a back-reference.
pub fn docker_pair() -> Value {
    json!([
        {
            "entity_id": "A",
            "name": "Docker permission bug",
            "type": "issue",
            "relations": [{"targetId": "B", "relationType": "RESOLVED_BY"}]
        },
        {
            "entity_id": "B",
            "name": "Fix file ownership",
            "type": "solution",
            "relations": [{"targetId": "A", "relationType": "RESOLVES"}]
        }
    ])
}

/// A larger snapshot resembling a tracker's development memory.
pub fn tracker_memory() -> Value {
    json!([
        {
            "entity_id": "issue-docker-perms",
            "name": "Docker permission bug",
            "type": "issue",
            "status": "resolved",
            "description": "Container cannot write to the mounted data volume",
            "observations": ["Seen after switching to rootless docker", "SQLite database opened read-only"],
            "relations": [
                {"targetId": "fix-chown", "relationType": "RESOLVED_BY"},
                {"targetId": "file-dockerfile", "relationType": "AFFECTS"}
            ]
        },
        {
            "entity_id": "fix-chown",
            "name": "Fix file ownership",
            "type": "solution",
            "description": "chown the data directory in the entrypoint before starting node",
            "relations": [
                {"targetId": "issue-docker-perms", "relationType": "RESOLVES"},
                {"targetId": "file-entrypoint", "relationType": "MODIFIES"}
            ]
        },
        {
            "entity_id": "file-dockerfile",
            "name": "Dockerfile",
            "type": "file",
            "observations": ["Multi-stage build", "Runs as node user"]
        },
        {
            "entity_id": "file-entrypoint",
            "name": "docker-entrypoint.sh",
            "type": "file",
            "relations": [{"targetId": "file-dockerfile", "relationType": "COPIED_BY"}]
        },
        {
            "entity_id": "decision-csv-rollover",
            "name": "Vulnerability rollover on CSV import",
            "type": "decision",
            "description": "Mark vulnerabilities missing from the newest import as resolved",
            "observations": ["Deduplicate by hostname and CVE"]
        },
        {
            "entity_id": "issue-csv-slow",
            "name": "Slow CSV import",
            "type": "issue",
            "description": "Large vulnerability imports block the event loop",
            "relations": [{"targetId": "decision-csv-rollover", "relationType": "RELATED_TO"}]
        }
    ])
}

pub fn session_from(value: Value) -> MemorySession {
    MemorySession::from_store(EntityStore::from_value(value).unwrap())
}
