#![deny(missing_docs)]

//! Deterministic pole sequencing: path extraction, radius capture along a
//! route and the simple total-order strategies.

mod dedup;
mod engine;
mod generators;
mod hash;
mod path;
mod pool;
mod route;

pub use dedup::dedupe_by_id;
pub use engine::sequence_points;
pub use generators::{random_layout, scatter_along_path, shuffled_segments, straight_route};
pub use hash::sequence_fingerprint;
pub use path::{
    extract_path, segment_midpoints, stitch_segments, PathExtraction, PathSource,
    STITCH_TOLERANCE,
};
pub use pool::{Pool, PoolSequencer, SequenceOutcome, SequenceStatus};
pub use route::{
    nearest_neighbor_route, route_links, sort_by_reference, sort_by_x, sort_by_y,
};
