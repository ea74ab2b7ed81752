//! Common test utilities for building flow documents.
use flowgen::prelude::*;
use serde_json::{Value, json};

/// The editor export the compiler was first written against.
///
/// start -> name = "jack" -> if name === jack
///   true:  res = name -> GET orders -> for each order: price + 100 -> return orders
///   false: return "nothing"
#[allow(dead_code)]
pub const SAMPLE_FLOW_JSON: &str = include_str!("../data/sample_flow.json");

#[allow(dead_code)]
pub fn sample_flow() -> FlowDocument {
    FlowDocument::from_json(SAMPLE_FLOW_JSON).expect("Sample flow should parse")
}

/// Builds a document from inline JSON.
#[allow(dead_code)]
pub fn document(value: Value) -> FlowDocument {
    serde_json::from_value(value).expect("Test document should deserialize")
}

#[allow(dead_code)]
pub fn build_tree(doc: FlowDocument) -> Program {
    Compiler::builder(doc)
        .build()
        .build_tree()
        .expect("Failed to build tree")
}

#[allow(dead_code)]
pub fn compile(doc: FlowDocument) -> CompilationArtifacts {
    Compiler::builder(doc).build().compile().expect("Failed to compile")
}

/// `start -> set x = 1 -> end(return x)`
#[allow(dead_code)]
pub fn create_linear_flow() -> FlowDocument {
    document(json!({
        "nodes": [
            { "id": "s", "type": "start" },
            { "id": "a", "type": "set-variable", "properties": { "key": "x", "value": "1" } },
            { "id": "e", "type": "end", "properties": { "output": "$x" } }
        ],
        "edges": [
            { "source": "s", "target": "a" },
            { "source": "a", "target": "e" }
        ]
    }))
}

/// Names of the statements directly in `body`, in order.
#[allow(dead_code)]
pub fn kinds(body: &[Statement]) -> Vec<&'static str> {
    body.iter().map(Statement::kind_name).collect()
}

/// The left-hand identifier of an assignment statement.
#[allow(dead_code)]
pub fn assigned_name(stmt: &Statement) -> &str {
    match stmt {
        Statement::Expression {
            expression: Expression::Assignment { left, .. },
        } => match left.as_ref() {
            Expression::Identifier { name } => name,
            other => panic!("Expected identifier target, got {:?}", other),
        },
        other => panic!("Expected assignment statement, got {:?}", other),
    }
}
