//! Integration tests for the DiagramBuilder API

use strata::{
    DiagramBuilder, StrataError,
    config::{AppConfig, LayoutConfig},
    export::OutputFormat,
};

const MLP: &str = r#"
    inputs = ["features"]
    outputs = ["scores"]

    [[layer]]
    name = "features"
    depth = 4

    [[layer]]
    name = "hidden"
    depth = 16
    from = "features"

    [[layer]]
    name = "scores"
    depth = 2
    from = "hidden"
"#;

#[test]
fn test_parse_simple_model() {
    let builder = DiagramBuilder::default();
    let result = builder.parse(MLP);
    assert!(result.is_ok(), "Should parse valid model: {:?}", result.err());

    let model = result.unwrap();
    assert_eq!(model.topology().len(), 3);
    assert_eq!(model.inputs().len(), 1);
    assert_eq!(model.outputs().len(), 1);
}

#[test]
fn test_layout_and_render_every_format() {
    let builder = DiagramBuilder::default();
    let model = builder.parse(MLP).expect("Failed to parse model");
    let graph = builder.layout(&model).expect("Failed to lay out model");

    let text = builder.render(&graph, OutputFormat::Text).unwrap();
    assert!(text.contains("hidden"));

    let json = builder.render(&graph, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["max_rank"], 2);

    let dot = builder.render(&graph, OutputFormat::Dot).unwrap();
    assert!(dot.contains("digraph"));
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::new(LayoutConfig::default().with_rank_interval(100.0));
    let builder = DiagramBuilder::new(config);

    let model = builder.parse(MLP).unwrap();
    let graph = builder.layout(&model).unwrap();

    let centers = graph.rank_centers();
    assert_eq!(centers.len(), 3);
    assert_eq!(centers[2].y() - centers[0].y(), 200.0);
}

#[test]
fn test_parse_invalid_toml_returns_declaration_error() {
    let builder = DiagramBuilder::default();
    let result = builder.parse("inputs = [\"a\"\noutputs = ");

    match result {
        Err(StrataError::Declaration { span, src, .. }) => {
            assert!(span.is_some());
            assert!(src.starts_with("inputs"));
        }
        other => panic!("Expected declaration error, got {other:?}"),
    }
}

#[test]
fn test_parse_unknown_reference_returns_graph_error() {
    let source = r#"
        inputs = ["a"]
        outputs = ["b"]

        [[layer]]
        name = "a"

        [[layer]]
        name = "b"
        from = "missing"
    "#;

    let builder = DiagramBuilder::default();
    assert!(matches!(
        builder.parse(source),
        Err(StrataError::Graph(strata::GraphError::UnknownLayer(_)))
    ));
}

#[test]
fn test_layout_rejects_cycle() {
    let source = r#"
        inputs = ["in"]
        outputs = ["out"]

        [[layer]]
        name = "in"

        [[layer]]
        name = "a"
        merge = ["in", "b"]

        [[layer]]
        name = "b"
        from = "a"

        [[layer]]
        name = "out"
        from = "b"
    "#;

    let builder = DiagramBuilder::default();
    let model = builder.parse(source).expect("Cycle is only detected at layout");
    assert!(matches!(
        builder.layout(&model),
        Err(StrataError::Graph(strata::GraphError::Cycle { .. }))
    ));
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder.parse(MLP).unwrap();
    let second = builder.parse(MLP).unwrap();

    let first = builder.layout(&first).unwrap();
    let second = builder.layout(&second).unwrap();
    assert_eq!(
        builder.render(&first, OutputFormat::Json).unwrap(),
        builder.render(&second, OutputFormat::Json).unwrap()
    );
}
