use pole_cli::drawing::{DrawingSnapshot, LayerContent, LAYER_KEY};
use pole_core::{LineSegment, PathVertex, Point, PoleError};
use pole_seq::PathSource;

fn snapshot() -> DrawingSnapshot {
    let mut drawing = DrawingSnapshot::default();
    drawing.layers.insert(
        "POSTE_MT".into(),
        LayerContent {
            blocks: vec![Point::new("A", 0.0, 0.0), Point::new("B", 10.0, 0.0)],
            ..LayerContent::default()
        },
    );
    drawing.layers.insert(
        "poste_bt".into(),
        LayerContent {
            blocks: vec![Point::new("C", 5.0, 0.0).with_attribute(LAYER_KEY, "custom")],
            ..LayerContent::default()
        },
    );
    drawing.layers.insert(
        "RUTA".into(),
        LayerContent {
            lines: vec![LineSegment::new(
                PathVertex::new(0.0, 0.0),
                PathVertex::new(10.0, 0.0),
            )],
            ..LayerContent::default()
        },
    );
    drawing.layers.insert(
        "EJE".into(),
        LayerContent {
            polylines: vec![vec![], vec![PathVertex::new(1.0, 1.0), PathVertex::new(2.0, 2.0)]],
            ..LayerContent::default()
        },
    );
    drawing
}

#[test]
fn pole_layers_match_prefix_case_insensitively() {
    let drawing = snapshot();
    assert_eq!(drawing.pole_layers("POSTE"), vec!["POSTE_MT", "poste_bt"]);
    assert_eq!(drawing.route_layers("poste"), vec!["EJE", "RUTA"]);
}

#[test]
fn poles_are_tagged_with_their_layer() {
    let poles = snapshot().poles("POSTE");
    let tags: Vec<(&str, Option<&str>)> = poles
        .iter()
        .map(|p| (p.id().as_str(), p.attribute(LAYER_KEY)))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("A", Some("POSTE_MT")),
            ("B", Some("POSTE_MT")),
            ("C", Some("custom")),
        ]
    );
}

#[test]
fn first_non_empty_polyline_is_the_route() {
    let source = snapshot().path_source(&[], "POSTE").unwrap();
    assert_eq!(
        source,
        Some(PathSource::Vertices(vec![
            PathVertex::new(1.0, 1.0),
            PathVertex::new(2.0, 2.0)
        ]))
    );
}

#[test]
fn explicit_line_layer_yields_segments() {
    let source = snapshot()
        .path_source(&["RUTA".to_string()], "POSTE")
        .unwrap();
    assert!(matches!(source, Some(PathSource::Segments(ref s)) if s.len() == 1));
}

#[test]
fn unknown_route_layer_is_a_configuration_error() {
    let err = snapshot()
        .path_source(&["NOPE".to_string()], "POSTE")
        .unwrap_err();
    assert!(matches!(err, PoleError::Configuration(_)));
    assert_eq!(err.info().code, "unknown-layer");
}

#[test]
fn snapshot_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.json");
    std::fs::write(&path, serde_json::to_vec(&snapshot()).unwrap()).unwrap();
    assert_eq!(DrawingSnapshot::load(&path).unwrap(), snapshot());

    let err = DrawingSnapshot::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, PoleError::Io(_)));
}

#[test]
fn sparse_snapshot_json_is_accepted() {
    let drawing: DrawingSnapshot = serde_json::from_str(
        r#"{"layers": {"POSTE": {"blocks": [{"id": "H1", "x": 1.0, "y": 2.0}]}}}"#,
    )
    .unwrap();
    assert_eq!(drawing.poles("POSTE").len(), 1);
    assert_eq!(drawing.path_source(&[], "POSTE").unwrap(), None);
}
