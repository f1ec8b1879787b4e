mod helpers;

use helpers::{docker_pair, session_from, tracker_memory};
use quickmem::memory::store::EntityStore;
use quickmem::memory::types::Entity;
use quickmem::memory::MemorySession;
use std::collections::HashSet;

#[test]
fn cyclic_pair_yields_only_the_other_side() {
    let session = session_from(docker_pair());

    let related = session.traverser().find_related("A", 2);
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].entity.entity_id, "B");
    assert_eq!(related[0].depth, 1);

    let path: Vec<&str> = related[0].path.iter().map(|s| s.entity_id.as_str()).collect();
    assert_eq!(path, vec!["A", "B"]);
}

#[test]
fn traversal_never_repeats_and_terminates_on_dense_cycles() {
    // Every entity points at every other entity, including itself.
    let ids: Vec<String> = (0..12).map(|i| format!("n{i}")).collect();
    let store = EntityStore::from_entities(ids.iter().map(|id| {
        ids.iter().fold(Entity::new(id, format!("Node {id}"), "node"), |e, t| {
            e.with_relation(t, "LINKS")
        })
    }));
    let session = MemorySession::from_store(store);
    let traverser = session.traverser();

    for start in &ids {
        for max_depth in [0, 1, 2, 5, 50] {
            let related = traverser.find_related(start, max_depth);
            let mut seen = HashSet::new();
            for r in &related {
                assert!(seen.insert(r.entity.entity_id.as_str()), "repeat from {start}");
                assert_ne!(&r.entity.entity_id, start, "start must not be yielded");
                assert!(r.depth >= 1 && r.depth <= max_depth);
                assert_eq!(r.path.len(), r.depth + 1);
            }
            if max_depth == 0 {
                assert!(related.is_empty());
            } else {
                assert_eq!(related.len(), ids.len() - 1);
            }
        }
    }
}

#[test]
fn results_are_in_bfs_order() {
    let session = session_from(tracker_memory());

    let related = session.traverser().find_related("issue-docker-perms", 3);
    let order: Vec<(&str, usize)> = related
        .iter()
        .map(|r| (r.entity.entity_id.as_str(), r.depth))
        .collect();
    assert_eq!(
        order,
        vec![
            ("fix-chown", 1),
            ("file-dockerfile", 1),
            ("file-entrypoint", 2),
        ]
    );
    for pair in related.windows(2) {
        assert!(pair[0].depth <= pair[1].depth);
    }
}

#[test]
fn path_records_relation_types() {
    let session = session_from(tracker_memory());

    let related = session.traverser().find_related("issue-docker-perms", 2);
    let entrypoint = related
        .iter()
        .find(|r| r.entity.entity_id == "file-entrypoint")
        .unwrap();

    let steps: Vec<(&str, Option<&str>)> = entrypoint
        .path
        .iter()
        .map(|s| (s.name.as_str(), s.relation_type.as_deref()))
        .collect();
    assert_eq!(
        steps,
        vec![
            ("Docker permission bug", None),
            ("Fix file ownership", Some("RESOLVED_BY")),
            ("docker-entrypoint.sh", Some("MODIFIES")),
        ]
    );
}

#[test]
fn unknown_entity_yields_nothing() {
    let session = session_from(tracker_memory());
    assert!(session.traverser().find_related("does-not-exist", 3).is_empty());
    assert!(session
        .traverser()
        .try_find_related("does-not-exist", 3)
        .is_err());
}

#[test]
fn inspect_lists_back_references() {
    let session = session_from(tracker_memory());

    let response = session.inspect("file-dockerfile").unwrap();
    let sources: Vec<(&str, &str)> = response
        .incoming
        .iter()
        .map(|r| (r.source.entity_id.as_str(), r.relation_type))
        .collect();
    assert_eq!(
        sources,
        vec![
            ("issue-docker-perms", "AFFECTS"),
            ("file-entrypoint", "COPIED_BY"),
        ]
    );
    assert!(session.inspect("nope").is_none());
}
