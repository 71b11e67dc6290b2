use pole_assoc::{
    associate_numbers, fuse_associations, merge_data_blocks, parse_integer_label,
    ProximityAssociator, SecondaryLayer,
};
use pole_core::{Point, PoleError};

fn text(id: &str, x: f64, y: f64, content: &str) -> Point {
    Point::new(id, x, y).with_attribute("text", content)
}

#[test]
fn integer_labels_parse_with_surrounding_whitespace() {
    assert_eq!(parse_integer_label("12"), Some(12));
    assert_eq!(parse_integer_label("  -3 "), Some(-3));
    assert_eq!(parse_integer_label("12a"), None);
    assert_eq!(parse_integer_label("1.5"), None);
    assert_eq!(parse_integer_label(""), None);
}

#[test]
fn numbers_are_sorted_and_bounded() {
    let poles = vec![
        Point::new("A", 0.0, 0.0),
        Point::new("B", 10.0, 0.0),
        Point::new("C", 20.0, 0.0),
        Point::new("D", 100.0, 0.0),
    ];
    let labels = SecondaryLayer::text(
        "NUM",
        vec![
            text("t3", 0.0, 1.0, "3"),
            text("t1", 10.0, 1.0, "1"),
            text("t2", 20.0, 1.0, "2"),
            text("tx", 10.0, 0.5, "N/A"),
        ],
    );
    let associator = ProximityAssociator::new(Some(5.0)).unwrap();
    let (numbers, warnings) = associate_numbers(&associator, &poles, &labels);

    let order: Vec<(i64, &str)> = numbers
        .iter()
        .map(|n| (n.number, n.anchor_id.as_str()))
        .collect();
    assert_eq!(order, vec![(1, "B"), (2, "C"), (3, "A")]);
    assert_eq!(numbers[0].x, 10.0);
    assert_eq!(numbers[0].distance, 1.0);
    assert_eq!(warnings.len(), 1);
}

#[test]
fn shared_numbers_keep_anchor_order() {
    let poles = vec![Point::new("A", 0.0, 0.0), Point::new("B", 2.0, 0.0)];
    let labels = SecondaryLayer::text("NUM", vec![text("t", 1.0, 0.0, "7")]);
    let (numbers, _) = associate_numbers(&ProximityAssociator::unbounded(), &poles, &labels);
    let ids: Vec<&str> = numbers.iter().map(|n| n.anchor_id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
}

#[test]
fn fusion_writes_layer_keys() {
    let mut poles = vec![Point::new("A", 0.0, 0.0), Point::new("B", 50.0, 0.0)];
    let layer = SecondaryLayer::text("MATERIAL", vec![text("m", 1.0, 0.0, "wood")]);
    let outcome = ProximityAssociator::new(Some(5.0))
        .unwrap()
        .associate(&poles, &[layer])
        .unwrap();

    let written = fuse_associations(&mut poles, &outcome.associations);
    assert_eq!(written, 1);
    assert_eq!(poles[0].attribute("MATERIAL"), Some("wood"));
    assert_eq!(poles[1].attribute("MATERIAL"), None);
    assert_eq!((poles[0].x(), poles[0].y()), (0.0, 0.0));
}

#[test]
fn data_blocks_copy_prefixed_attributes_only() {
    let mut poles = vec![
        Point::new("A", 0.0, 0.0).with_attribute("attr_owner", "old"),
        Point::new("B", 40.0, 0.0),
    ];
    let blocks = vec![
        Point::new("blk1", 3.0, 4.0)
            .with_attribute("Attr_Owner", "utility")
            .with_attribute("attr_owner", "city")
            .with_attribute("name", "DATA"),
        Point::new("blk2", 60.0, 0.0).with_attribute("attr_owner", "far"),
    ];

    let enriched = merge_data_blocks(&mut poles, &blocks, 5.0, "attr_").unwrap();
    assert_eq!(enriched, 1);
    assert_eq!(poles[0].attribute("attr_owner"), Some("city"));
    assert_eq!(poles[0].attribute("Attr_Owner"), Some("utility"));
    assert_eq!(poles[0].attribute("name"), None);
    assert_eq!((poles[0].x(), poles[0].y()), (0.0, 0.0));
    assert!(poles[1].attributes().is_empty());
}

#[test]
fn data_block_merge_rejects_bad_radius() {
    let err = merge_data_blocks(&mut [], &[], 0.0, "attr_").unwrap_err();
    assert!(matches!(err, PoleError::Configuration(_)));
}

#[test]
fn data_block_merge_without_blocks_is_a_no_op() {
    let mut poles = vec![Point::new("A", 0.0, 0.0)];
    assert_eq!(merge_data_blocks(&mut poles, &[], 5.0, "attr_").unwrap(), 0);
}
