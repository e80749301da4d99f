//! Integration tests for constraint parsing and resolution

use layout_graph::layout::track_list;
use layout_graph::parser::{evaluate, to_postfix, PostfixToken};
use layout_graph::{
    parse_all, resolve_document, EngineConfig, EqualityConstraint, LayoutDocument, LayoutError,
    LayoutGraph, Orientation, ParseError, Rectangle, SizingPolicy,
};
use pretty_assertions::assert_eq;

use SizingPolicy::{FillSpace, Fixed};

fn rect(name: &str, left: f64, top: f64, width: f64, height: f64) -> Rectangle {
    Rectangle::new(name, left, top, width, height)
}

fn rendered(tokens: &[PostfixToken]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_sum_constraint_end_to_end() {
    let constraint = EqualityConstraint::parse("b.width = a.width + 50").unwrap();
    assert_eq!(rendered(constraint.postfix()), vec!["a.width", "50", "+"]);

    let graph = LayoutGraph::new(vec![
        rect("a", 0.0, 0.0, 200.0, 50.0),
        rect("b", 200.0, 0.0, 100.0, 50.0).with_policies(FillSpace, Fixed),
    ]);
    let resolution = graph.resolve(Orientation::Row, &[constraint]).unwrap();
    let b = resolution.rectangle("b").unwrap();
    assert_eq!(b.width, 250.0);
    assert_eq!(b.horizontal, Fixed);
}

#[test]
fn test_substituted_postfix_evaluates() {
    let substituted = [
        PostfixToken::Number(200.0),
        PostfixToken::Number(50.0),
        PostfixToken::Operator(layout_graph::parser::Operator::Add),
    ];
    assert_eq!(evaluate(&substituted), Ok(250.0));
}

#[test]
fn test_resolution_is_idempotent() {
    let graph = LayoutGraph::new(vec![
        rect("a", 0.0, 0.0, 100.0, 50.0),
        rect("b", 100.0, 0.0, 100.0, 50.0),
        rect("c", 200.0, 0.0, 100.0, 50.0),
    ]);
    let constraints = parse_all(&["a.width = b.width + c.width", "c.height = a.height"]).unwrap();

    let first = graph.resolve(Orientation::Row, &constraints).unwrap();
    let again = LayoutGraph::new(first.rectangles().cloned().collect())
        .resolve(Orientation::Row, &constraints)
        .unwrap();
    assert_eq!(again.configuration(), first.configuration());
}

#[test]
fn test_column_resolution_reflows_downwards() {
    let graph = LayoutGraph::new(vec![
        rect("top", 0.0, 0.0, 100.0, 30.0),
        rect("body", 0.0, 30.0, 100.0, 70.0).with_policies(Fixed, FillSpace),
    ]);
    let constraints = parse_all(&["top.height = body.height / 2"]).unwrap();
    let resolution = graph.resolve(Orientation::Column, &constraints).unwrap();

    let top = resolution.rectangle("top").unwrap();
    assert_eq!((top.height, top.vertical), (35.0, FillSpace));
    assert_eq!(resolution.rectangle("body").unwrap().top, 35.0);
}

#[test]
fn test_sizing_tokens_snapshot() {
    let graph = LayoutGraph::new(vec![
        rect("nav", 0.0, 0.0, 100.0, 50.0),
        rect("main", 100.0, 0.0, 100.0, 50.0).with_policies(FillSpace, Fixed),
        rect("aside", 200.0, 0.0, 100.0, 50.0).with_policies(FillSpace, Fixed),
    ]);
    let constraints = parse_all(&["aside.width = main.width * 3"]).unwrap();
    let resolution = graph.resolve(Orientation::Row, &constraints).unwrap();

    insta::assert_snapshot!(track_list(&resolution.sizing()[0]), @"100px calc(25% - 25px) calc(75% - 75px)");
}

#[test]
fn test_cycle_is_reported() {
    let graph = LayoutGraph::new(vec![
        rect("a", 0.0, 0.0, 100.0, 50.0),
        rect("b", 100.0, 0.0, 100.0, 50.0),
    ]);
    let constraints = parse_all(&["a.width = b.width", "b.width = a.width + 1"]).unwrap();
    let err = graph.resolve(Orientation::Row, &constraints).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"circular constraint dependency: b.width -> a.width -> b.width");
}

#[test]
fn test_conflicting_targets() {
    let graph = LayoutGraph::new(vec![rect("a", 0.0, 0.0, 100.0, 50.0)]);
    let constraints = parse_all(&["a.width = 10", "a.width = 20"]).unwrap();
    assert!(matches!(
        graph.resolve(Orientation::Row, &constraints),
        Err(LayoutError::ConflictingConstraints { .. })
    ));
}

#[test]
fn test_malformed_constraints_are_errors() {
    assert!(matches!(
        to_postfix("(1 + 2"),
        Err(ParseError::UnbalancedParenthesis { .. })
    ));
    assert!(matches!(to_postfix("1 +"), Err(ParseError::MissingOperand { .. })));
    assert!(matches!(to_postfix("   "), Err(ParseError::Empty { .. })));
    assert!(matches!(to_postfix("2 $ 3"), Err(ParseError::Syntax { .. })));
}

#[test]
fn test_parse_error_renders_with_source() {
    let err = EqualityConstraint::parse("a.width = b.width +").unwrap_err();
    let report = err.format("a.width=b.width+", "constraint");
    assert!(report.contains("missing an operand"));
    assert!(report.contains("a.width=b.width"));
}

#[test]
fn test_document_round_trip_through_resolution() {
    let doc = LayoutDocument::from_str(
        r#"{
            "layout": [
                {"name": "a", "width": 200, "height": 50, "left": 0, "top": 0,
                 "horizontal": "fixed", "vertical": "fixed"},
                {"name": "b", "width": 100, "height": 50, "left": 200, "top": 0,
                 "horizontal": "fill_space", "vertical": "fixed"}
            ],
            "constraints": ["b.width = a.width + 50"]
        }"#,
    )
    .unwrap();

    let resolved = resolve_document(&doc, Orientation::Row, &EngineConfig::default()).unwrap();
    assert_eq!(resolved.layout[1].width, 250.0);
    assert_eq!(resolved.layout[1].horizontal, Fixed);

    let json = resolved.to_json().unwrap();
    assert!(json.contains("\"FIXED\""));
    assert_eq!(LayoutDocument::from_str(&json).unwrap(), resolved);
}
