#![deny(missing_docs)]

//! Nearest-distance association between poles and the labels or data blocks
//! drawn around them.

mod associate;
mod fuse;
mod labels;
mod numbers;

pub use associate::{Association, AssociationOutcome, LayerMatch, ProximityAssociator};
pub use fuse::{fuse_associations, merge_data_blocks};
pub use labels::{parse_integer_label, Candidate, LabelKind, SecondaryLayer, TEXT_KEY};
pub use numbers::{associate_numbers, NumberAssignment};
