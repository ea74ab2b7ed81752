//! Tests for document parsing and the graph index.
mod common;
use common::*;
use flowgen::prelude::*;
use serde_json::json;

#[test]
fn test_sample_document_accepts_editor_kind_names() {
    let doc = sample_flow();
    let kinds: Vec<NodeKind> = doc.nodes.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Start,
            NodeKind::SetVariable,
            NodeKind::If,
            NodeKind::SetVariable,
            NodeKind::HttpCall,
            NodeKind::Loop,
            NodeKind::SetVariable,
            NodeKind::End,
            NodeKind::End,
        ]
    );
    assert_eq!(doc.nodes[5].children, vec!["7".to_string()]);
}

#[test]
fn test_short_kind_names_and_condition_alias() {
    let doc = document(json!({
        "nodes": [
            { "id": "s", "type": "start" },
            { "id": "h", "type": "http-call" },
            { "id": "i", "type": "if" }
        ],
        "edges": [
            { "source": "s", "target": "i" },
            { "source": "i", "target": "h", "condition": true }
        ]
    }));
    assert_eq!(doc.nodes[1].kind, NodeKind::HttpCall);
    assert_eq!(doc.edges[1].condition, Some(true));
    assert_eq!(doc.edges[0].condition, None);
}

#[test]
fn test_unknown_kind_is_a_document_error() {
    let err = FlowDocument::from_json(r#"{"nodes":[{"id":"1","type":"switch-node"}],"edges":[]}"#)
        .unwrap_err();
    assert!(matches!(err, FlowError::Document(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_start_and_branch_lookup() {
    let graph = FlowGraph::new(sample_flow()).expect("Sample flow should index");

    assert_eq!(graph.start().unwrap().id, "1");
    assert_eq!(graph.next("1").unwrap().target, "2");
    assert_eq!(graph.branch("3", true).unwrap().target, "4");
    assert_eq!(graph.branch("3", false).unwrap().target, "9");
    // Both edges out of the conditional carry a flag.
    assert!(graph.next("3").is_none());
    assert!(graph.next("8").is_none());
    assert!(graph.branch("2", true).is_none());
}

#[test]
fn test_missing_node() {
    let graph = FlowGraph::new(sample_flow()).unwrap();
    let err = graph.node("42", "6").unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingNode {
            node_id: "42".to_string(),
            required_by: "6".to_string(),
        }
    );
}

#[test]
fn test_missing_start_without_start_node() {
    let graph = FlowGraph::new(document(json!({
        "nodes": [{ "id": "e", "type": "end", "properties": { "output": 1 } }],
        "edges": []
    })))
    .unwrap();
    assert_eq!(graph.start().unwrap_err(), GraphError::MissingStart { found: 0 });
}

#[test]
fn test_missing_start_with_two_start_nodes() {
    let graph = FlowGraph::new(document(json!({
        "nodes": [
            { "id": "s1", "type": "start" },
            { "id": "s2", "type": "start-node" }
        ],
        "edges": []
    })))
    .unwrap();
    assert_eq!(graph.start().unwrap_err(), GraphError::MissingStart { found: 2 });
}

#[test]
fn test_dangling_edge_is_rejected() {
    let err = FlowGraph::new(document(json!({
        "nodes": [{ "id": "s", "type": "start" }],
        "edges": [{ "source": "s", "target": "ghost" }]
    })))
    .unwrap_err();
    assert_eq!(
        err,
        GraphError::DanglingEdge {
            source_id: "s".to_string(),
            target_id: "ghost".to_string(),
            missing_id: "ghost".to_string(),
        }
    );
}

#[test]
fn test_duplicate_node_is_rejected() {
    let err = FlowGraph::new(document(json!({
        "nodes": [
            { "id": "s", "type": "start" },
            { "id": "s", "type": "end" }
        ]
    })))
    .unwrap_err();
    assert_eq!(err, GraphError::DuplicateNode("s".to_string()));
}

#[test]
fn test_first_unconditioned_edge_wins() {
    let graph = FlowGraph::new(document(json!({
        "nodes": [
            { "id": "s", "type": "start" },
            { "id": "a", "type": "end" },
            { "id": "b", "type": "end" }
        ],
        "edges": [
            { "source": "s", "target": "a" },
            { "source": "s", "target": "b" }
        ]
    })))
    .unwrap();
    assert_eq!(graph.next("s").unwrap().target, "a");
    assert_eq!(graph.edges_from("s").len(), 2);
}
