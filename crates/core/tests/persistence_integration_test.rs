//! Integration tests for graph file persistence and export
//!
//! Fixtures live in `tests/test-fixtures/`; round trips write into a
//! temporary directory.

use std::collections::BTreeMap;
use std::path::Path;

use graph_manager_core::{Graph, GraphError, Neighbor};
use tempfile::TempDir;

/// Adjacency with every neighbor list sorted, for order-insensitive comparison
fn sorted_adjacency(graph: &Graph) -> BTreeMap<String, Vec<(String, Option<i64>)>> {
    graph
        .adjacency()
        .map(|(vertex, neighbors)| {
            let mut entries: Vec<_> = neighbors
                .iter()
                .map(|n| (n.target.clone(), n.weight))
                .collect();
            entries.sort();
            (vertex.to_string(), entries)
        })
        .collect()
}

#[test]
fn test_load_weighted_fixture() {
    let graph = Graph::from_file(Path::new("tests/test-fixtures/roads.txt")).unwrap();

    assert!(graph.is_directed());
    assert!(graph.is_weighted());
    assert_eq!(graph.vertices().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    assert_eq!(
        graph.neighbors("A").unwrap(),
        &[Neighbor::new("B", Some(4)), Neighbor::new("C", Some(2))]
    );
    assert_eq!(graph.out_degree("D").unwrap(), 0);
}

#[test]
fn test_load_appends_extension() {
    let graph = Graph::from_file(Path::new("tests/test-fixtures/path")).unwrap();

    assert!(!graph.is_directed());
    assert_eq!(graph.vertex_count(), 5);
}

#[test]
fn test_load_missing_file() {
    let err = Graph::from_file(Path::new("tests/test-fixtures/nowhere")).unwrap_err();

    match err {
        GraphError::FileNotFound(path) => assert!(path.ends_with("nowhere.txt")),
        other => panic!("Expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_load_malformed_file() {
    let err = Graph::from_file(Path::new("tests/test-fixtures/malformed.txt")).unwrap_err();
    assert!(matches!(err, GraphError::Format { line: 3, .. }));
}

#[test]
fn test_undirected_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let original = Graph::from_file(Path::new("tests/test-fixtures/path.txt")).unwrap();

    let written = original.save_to_file(&temp_dir.path().join("copy")).unwrap();
    assert!(written.ends_with("copy.txt"));

    let reloaded = Graph::from_file(&written).unwrap();

    assert_eq!(reloaded.is_directed(), original.is_directed());
    assert_eq!(reloaded.is_weighted(), original.is_weighted());
    assert_eq!(sorted_adjacency(&reloaded), sorted_adjacency(&original));
}

#[test]
fn test_weighted_undirected_round_trip_with_self_loop() {
    let temp_dir = TempDir::new().unwrap();
    let mut original = Graph::new(false, true);
    for v in ["P", "Q", "R", "S"] {
        original.add_vertex(v);
    }
    original.add_edge("P", "Q", Some(10)).unwrap();
    original.add_edge("R", "Q", Some(-3)).unwrap();
    original.add_edge("R", "R", Some(0)).unwrap();

    let written = original.save_to_file(&temp_dir.path().join("loops.txt")).unwrap();
    let reloaded = Graph::from_file(&written).unwrap();

    assert_eq!(sorted_adjacency(&reloaded), sorted_adjacency(&original));
    assert_eq!(reloaded.out_degree("S").unwrap(), 0);
}

#[test]
fn test_directed_round_trip_drops_reverse_pair() {
    let temp_dir = TempDir::new().unwrap();
    let original = Graph::from_file(Path::new("tests/test-fixtures/roads.txt")).unwrap();

    let written = original.save_to_file(&temp_dir.path().join("roads")).unwrap();
    let reloaded = Graph::from_file(&written).unwrap();

    // C -> A shares the unordered pair {A, C} with A -> C and is not written
    assert_eq!(original.out_degree("C").unwrap(), 1);
    assert_eq!(reloaded.out_degree("C").unwrap(), 0);
    assert_eq!(reloaded.neighbors("A"), original.neighbors("A"));
    assert_eq!(reloaded.neighbors("B"), original.neighbors("B"));
    assert!(reloaded.has_vertex("D"));
}

#[test]
fn test_save_rejects_unsavable_label_without_creating_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut graph = Graph::new(false, false);
    graph.add_vertex("New York");

    let err = graph
        .save_to_file(&temp_dir.path().join("cities"))
        .unwrap_err();

    assert!(matches!(err, GraphError::UnsavableVertex(_)));
    assert!(!temp_dir.path().join("cities.txt").exists());
}

#[test]
fn test_failed_load_keeps_existing_graph() {
    let mut graph = Graph::new(true, true);
    graph.add_vertex("Z");
    let before = graph.clone();

    let err = graph
        .load_from_file(Path::new("tests/test-fixtures/malformed.txt"))
        .unwrap_err();

    assert!(matches!(err, GraphError::Format { .. }));
    assert_eq!(graph, before);
}

#[test]
fn test_load_into_existing_graph_keeps_vertices() {
    let mut graph = Graph::new(true, true);
    graph.add_vertex("Z");

    graph
        .load_from_file(Path::new("tests/test-fixtures/path.txt"))
        .unwrap();

    assert!(!graph.is_directed());
    assert!(!graph.is_weighted());
    assert!(graph.has_vertex("Z"));
    assert_eq!(graph.out_degree("B").unwrap(), 2);
}

#[test]
fn test_json_export_shape() {
    let graph = Graph::from_file(Path::new("tests/test-fixtures/roads.txt")).unwrap();

    let json = serde_json::to_value(&graph).unwrap();

    assert_eq!(json["directed"], true);
    assert_eq!(json["weighted"], true);
    assert_eq!(json["adjacency"]["A"][1]["target"], "C");
    assert_eq!(json["adjacency"]["A"][1]["weight"], 2);
    assert_eq!(json["adjacency"]["D"], serde_json::json!([]));

    let keys: Vec<&String> = json["adjacency"].as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4);
}

#[test]
fn test_dot_export_of_fixture() {
    let graph = Graph::from_file(Path::new("tests/test-fixtures/path.txt")).unwrap();

    let dot = graph.to_dot();

    assert!(dot.starts_with("graph {"));
    assert_eq!(dot.matches(" -- ").count(), 3);
}
