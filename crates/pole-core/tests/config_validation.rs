use pole_core::{
    CapturePolicy, EngineConfig, LeftoverOrder, PathVertex, PoleError, SegmentMilestones,
    SortStrategy,
};

#[test]
fn defaults_match_the_numbering_tool() {
    let config = EngineConfig::default();
    assert_eq!(config.search_radius, 5.0);
    assert!(!config.strict_mode);
    assert_eq!(config.max_distance, None);
    assert_eq!(config.sort_strategy, SortStrategy::PathFollow);
    assert_eq!(config.leftover_order, LeftoverOrder::Input);
    assert_eq!(config.capture, CapturePolicy::WithinRadius);
    assert_eq!(config.segment_milestones, SegmentMilestones::Stitched);
    assert_eq!(config.layer_prefix, "POSTE");
    config.validate().unwrap();
}

#[test]
fn non_positive_radius_is_rejected() {
    for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let config = EngineConfig {
            search_radius: radius,
            ..EngineConfig::default()
        };
        match config.validate() {
            Err(PoleError::Configuration(info)) => assert_eq!(info.code, "invalid-radius"),
            other => panic!("unexpected result for {radius}: {other:?}"),
        }
    }
}

#[test]
fn ref_distance_requires_reference_point() {
    let mut config = EngineConfig {
        sort_strategy: SortStrategy::RefDistance,
        ..EngineConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert_eq!(err.info().code, "missing-reference-point");

    config.reference_point = Some(PathVertex::new(1.0, 2.0));
    config.validate().unwrap();
}

#[test]
fn negative_max_distance_is_rejected() {
    let config = EngineConfig {
        max_distance: Some(-0.5),
        ..EngineConfig::default()
    };
    assert_eq!(config.validate().unwrap_err().info().code, "invalid-max-distance");
}

#[test]
fn yaml_fills_missing_fields() {
    let config = EngineConfig::from_yaml_str(
        "search_radius: 12.5\nstrict_mode: true\nsort_strategy: ref_distance\nreference_point: {x: 3.0, y: 4.0}\n",
    )
    .unwrap();
    assert_eq!(config.search_radius, 12.5);
    assert!(config.strict_mode);
    assert_eq!(config.reference_point, Some(PathVertex::new(3.0, 4.0)));
    assert_eq!(config.association_radius, 5.0);

    let rendered = config.to_yaml_string().unwrap();
    let back = EngineConfig::from_yaml_str(&rendered).unwrap();
    assert_eq!(back, config);
}

#[test]
fn invalid_yaml_is_a_serde_error() {
    let err = EngineConfig::from_yaml_str("search_radius: [1, 2]").unwrap_err();
    assert!(matches!(err, PoleError::Serde(_)));
}

#[test]
fn strategy_names_parse() {
    assert_eq!("x".parse::<SortStrategy>().unwrap(), SortStrategy::X);
    assert_eq!(
        "nearest-neighbor".parse::<SortStrategy>().unwrap(),
        SortStrategy::NearestNeighbor
    );
    assert_eq!(
        "PATH_FOLLOW".parse::<SortStrategy>().unwrap(),
        SortStrategy::PathFollow
    );
    assert!("spiral".parse::<SortStrategy>().is_err());
}
