use pole_assoc::{ProximityAssociator, SecondaryLayer};
use pole_core::{distance, Point};
use proptest::prelude::*;

fn points(prefix: &'static str) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 0..30).prop_map(move |coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (x, y))| {
                Point::new(format!("{prefix}{i}"), x, y).with_attribute("text", i.to_string())
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn matches_respect_threshold(
        anchors in points("a"),
        labels in points("l"),
        max in 0.0f64..30.0,
    ) {
        let layer = SecondaryLayer::text("L", labels.clone());
        let outcome = ProximityAssociator::new(Some(max)).unwrap().associate(&anchors, &[layer]).unwrap();
        prop_assert_eq!(outcome.associations.len(), anchors.len());
        for (anchor, association) in anchors.iter().zip(&outcome.associations) {
            prop_assert_eq!(anchor.id(), &association.anchor_id);
            if let Some(hit) = association.matches.get("L") {
                let label = labels.iter().find(|l| l.id() == &hit.point_id).unwrap();
                prop_assert!(distance(anchor, label) <= max);
                prop_assert_eq!(distance(anchor, label), hit.distance);
            }
        }
    }

    #[test]
    fn matched_label_is_a_minimum(anchors in points("a"), labels in points("l")) {
        let layer = SecondaryLayer::text("L", labels.clone());
        let outcome = ProximityAssociator::unbounded().associate(&anchors, &[layer]).unwrap();
        for (anchor, association) in anchors.iter().zip(&outcome.associations) {
            match association.matches.get("L") {
                Some(hit) => {
                    prop_assert!(labels.iter().all(|l| distance(anchor, l) >= hit.distance));
                }
                None => {
                    prop_assert!(labels.is_empty());
                }
            }
        }
    }
}
