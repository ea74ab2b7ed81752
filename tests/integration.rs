//! End-to-end tests that run the full pipeline from document text to source.
mod common;
use common::*;
use flowgen::prelude::*;

#[test]
fn test_sample_end_to_end() {
    let compiler = Compiler::new(SAMPLE_FLOW_JSON).expect("Failed to create compiler");
    let artifacts = compiler.compile().expect("Failed to compile sample flow");

    let program = &artifacts.program;
    assert_eq!(program.count(|s| matches!(s, Statement::If { .. })), 1);
    assert_eq!(program.count(|s| matches!(s, Statement::ForEach { .. })), 1);
    assert_eq!(program.count(|s| matches!(s, Statement::Return { .. })), 1);
    assert_eq!(
        program.count(|s| matches!(s, Statement::VariableDeclaration { .. })),
        1
    );

    // Every statement-producing node reachable from start shows up once: three
    // assignments, the conditional, the request and the loop, plus the return.
    let mut total = 0;
    program.walk(&mut |_| total += 1);
    assert_eq!(total, 7);

    assert!(artifacts.source.contains("return orders;"));
}

#[test]
fn test_compiler_from_file() {
    let document = FlowDocument::from_file("data/sample_flow.json").expect("Sample should load");
    let artifacts = Compiler::builder(document).build().compile().unwrap();
    assert_eq!(artifacts.source, compile(sample_flow()).source);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = FlowDocument::from_file("data/does_not_exist.json").unwrap_err();
    assert!(matches!(err, FlowError::Io { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn test_invalid_json_is_a_document_error() {
    let err = Compiler::new("{ not json").err().expect("Should fail");
    assert!(matches!(err, FlowError::Document(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_default_options() {
    let compiler = Compiler::new(SAMPLE_FLOW_JSON).unwrap();
    let options = compiler.options();
    assert_eq!(options.function_name, "flow");
    assert_eq!(options.http_client, "axios");
    assert_eq!(options.indent_width, 2);
    assert_eq!(options.conditional_placement, ConditionalPlacement::Nested);
}

#[test]
fn test_error_display() {
    let err = GraphError::MissingNode {
        node_id: "node_B".to_string(),
        required_by: "node_A".to_string(),
    };
    assert!(err.to_string().contains("node_B"));
    assert!(err.to_string().contains("node_A"));

    let err = FlowError::Expression {
        node_id: "3".to_string(),
        property: "expression".to_string(),
        source: ExpressionError::UnparsablePattern {
            input: "$".to_string(),
            reason: "the reference sigil is not followed by a name".to_string(),
        },
    };
    let message = err.to_string();
    assert!(message.contains("'expression'"));
    assert!(message.contains("node '3'"));

    let err = GraphError::MissingStart { found: 2 };
    assert!(err.to_string().contains("found 2") || err.to_string().contains("contains 2"));
}

#[test]
fn test_exit_codes_are_distinct() {
    let errors: Vec<FlowError> = vec![
        GraphError::MissingStart { found: 0 }.into(),
        GraphError::MissingNode {
            node_id: "a".into(),
            required_by: "b".into(),
        }
        .into(),
        GraphError::DanglingEdge {
            source_id: "a".into(),
            target_id: "b".into(),
            missing_id: "b".into(),
        }
        .into(),
        GraphError::CyclicGraph {
            node_id: "a".into(),
            entered_from: "b".into(),
        }
        .into(),
        GraphError::DuplicateNode("a".into()).into(),
        GraphError::MissingProperty {
            node_id: "a".into(),
            property: "key".into(),
        }
        .into(),
        RenderError::UnknownNodeKind { kind: "X".into() }.into(),
        RenderError::MalformedTree("x".into()).into(),
    ];
    let mut codes: Vec<i32> = errors.iter().map(FlowError::exit_code).collect();
    assert!(codes.iter().all(|&c| c != 0));
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}
