use pole_assoc::{fuse_associations, ProximityAssociator, SecondaryLayer};
use pole_core::rng::RngHandle;
use pole_core::{EngineConfig, SortStrategy};
use pole_report::serde::from_json_slice;
use pole_report::{
    annotate, export_table, AnnotationStyle, CellValue, ExportFormat, ReportAssembler,
};
use pole_seq::{
    scatter_along_path, sequence_fingerprint, sequence_points, shuffled_segments, straight_route,
    PathSource, SequenceStatus,
};
use std::collections::BTreeMap;

#[test]
fn scattered_layout_is_numbered_along_stitched_route() {
    let path = straight_route(12, 20.0).unwrap();
    let mut rng = RngHandle::from_seed(42);
    let poles = scatter_along_path(&path, 2, 1.5, &mut rng).unwrap();
    let source = PathSource::Segments(shuffled_segments(&path, &mut rng));

    let config = EngineConfig {
        search_radius: 4.0,
        strict_mode: true,
        ..EngineConfig::default()
    };
    let outcome = sequence_points(poles.clone(), Some(&source), &config).unwrap();

    assert_eq!(outcome.status, SequenceStatus::Complete);
    assert_eq!(outcome.sequence.len(), poles.len());
    assert_eq!(outcome.discarded_count(), 0);
    assert!(outcome.warnings.is_empty());
    // Poles sit within 1.5 of their milestone, so x only drops inside a group.
    let xs: Vec<f64> = outcome.sequence.iter().map(|p| p.x()).collect();
    assert!(xs.windows(2).all(|w| w[0] <= w[1] + 3.0));

    let again = sequence_points(poles, Some(&source), &config).unwrap();
    assert_eq!(
        sequence_fingerprint(&outcome.sequence),
        sequence_fingerprint(&again.sequence)
    );
}

#[test]
fn numbered_and_associated_poles_reach_the_report() {
    let path = straight_route(5, 30.0).unwrap();
    let mut rng = RngHandle::from_seed(3);
    let poles = scatter_along_path(&path, 1, 1.0, &mut rng).unwrap();
    let labels = poles
        .iter()
        .enumerate()
        .map(|(i, p)| {
            pole_core::Point::new(format!("m{i}"), p.x() + 0.5, p.y())
                .with_attribute("text", format!("H{i}"))
        })
        .collect();

    let config = EngineConfig {
        sort_strategy: SortStrategy::NearestNeighbor,
        max_distance: Some(2.0),
        ..EngineConfig::default()
    };
    let mut outcome = sequence_points(poles, None, &config).unwrap();
    let associations = ProximityAssociator::from_config(&config)
        .unwrap()
        .associate(&outcome.sequence, &[SecondaryLayer::text("MATERIAL", labels)])
        .unwrap();
    assert_eq!(associations.matched_anchors(), 5);
    assert_eq!(
        fuse_associations(&mut outcome.sequence, &associations.associations),
        5
    );

    let table = ReportAssembler::from_config(&config)
        .sequence_report(&outcome.sequence)
        .unwrap();
    assert_eq!(table.columns.last().map(String::as_str), Some("MATERIAL"));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.json");
    export_table(&table, ExportFormat::Json, &out).unwrap();
    let records: Vec<BTreeMap<String, CellValue>> =
        from_json_slice(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(records.len(), 5);
    assert!(records
        .iter()
        .all(|r| matches!(&r["MATERIAL"], CellValue::Text(t) if t.starts_with('H'))));

    let notes = annotate(&outcome.sequence, &AnnotationStyle::default());
    assert_eq!(notes.last().map(|n| n.number), Some(5));
}
