use pole_core::{EngineConfig, LineSegment, PathVertex, Point, SortStrategy, Warning};
use pole_seq::{sequence_points, PathSource, SequenceStatus};

fn ids(points: &[Point]) -> Vec<&str> {
    points.iter().map(|p| p.id().as_str()).collect()
}

fn poles() -> Vec<Point> {
    vec![
        Point::new("h1", 0.0, 0.0),
        Point::new("h3", 3.0, 0.0),
        Point::new("h2", 1.0, 0.0),
    ]
}

fn config(strategy: SortStrategy) -> EngineConfig {
    EngineConfig {
        sort_strategy: strategy,
        ..EngineConfig::default()
    }
}

#[test]
fn path_follow_without_source_falls_back_to_nearest_neighbour() {
    let outcome = sequence_points(poles(), None, &config(SortStrategy::PathFollow)).unwrap();
    assert_eq!(outcome.strategy, SortStrategy::NearestNeighbor);
    assert_eq!(ids(&outcome.sequence), ["h1", "h2", "h3"]);
    assert!(matches!(outcome.warnings[0], Warning::PathFallback { .. }));
}

#[test]
fn path_follow_with_empty_segments_falls_back() {
    let source = PathSource::Segments(Vec::new());
    let outcome =
        sequence_points(poles(), Some(&source), &config(SortStrategy::PathFollow)).unwrap();
    assert_eq!(outcome.strategy, SortStrategy::NearestNeighbor);
    assert_eq!(outcome.sequence.len(), 3);
}

#[test]
fn path_follow_uses_stitched_segments() {
    let source = PathSource::Segments(vec![
        LineSegment::new(PathVertex::new(3.0, 0.0), PathVertex::new(1.0, 0.0)),
        LineSegment::new(PathVertex::new(1.0, 0.0), PathVertex::new(0.0, 0.0)),
    ]);
    let cfg = EngineConfig {
        search_radius: 0.5,
        ..config(SortStrategy::PathFollow)
    };
    let outcome = sequence_points(poles(), Some(&source), &cfg).unwrap();
    assert_eq!(outcome.strategy, SortStrategy::PathFollow);
    assert_eq!(ids(&outcome.sequence), ["h3", "h2", "h1"]);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn duplicates_are_collapsed_before_sequencing() {
    let mut points = poles();
    points.push(Point::new("h1", 0.0, 0.0).with_attribute("name", "updated"));
    let outcome = sequence_points(points, None, &config(SortStrategy::X)).unwrap();
    assert_eq!(ids(&outcome.sequence), ["h1", "h2", "h3"]);
    assert_eq!(outcome.sequence[0].attribute("name"), Some("updated"));
    assert_eq!(outcome.warnings, vec![Warning::DuplicateIdsRemoved { count: 1 }]);
}

#[test]
fn ref_distance_without_reference_is_rejected() {
    let err = sequence_points(poles(), None, &config(SortStrategy::RefDistance)).unwrap_err();
    assert_eq!(err.info().code, "missing-reference-point");
}

#[test]
fn ref_distance_orders_from_reference() {
    let cfg = EngineConfig {
        reference_point: Some(PathVertex::new(4.0, 0.0)),
        ..config(SortStrategy::RefDistance)
    };
    let outcome = sequence_points(poles(), None, &cfg).unwrap();
    assert_eq!(ids(&outcome.sequence), ["h3", "h2", "h1"]);
}

#[test]
fn empty_input_is_not_an_error() {
    for strategy in [
        SortStrategy::X,
        SortStrategy::Y,
        SortStrategy::NearestNeighbor,
        SortStrategy::PathFollow,
    ] {
        let outcome = sequence_points(Vec::new(), None, &config(strategy)).unwrap();
        assert_eq!(outcome.status, SequenceStatus::Empty);
    }
}

#[test]
fn invalid_radius_fails_before_any_work() {
    let cfg = EngineConfig {
        search_radius: 0.0,
        ..config(SortStrategy::X)
    };
    assert_eq!(
        sequence_points(poles(), None, &cfg).unwrap_err().info().code,
        "invalid-radius"
    );
}
