use pole_core::Point;
use sha2::{Digest, Sha256};

/// Canonical fingerprint of a numbering order.
///
/// Hashes the ordered point ids with length prefixes, so two sequences share
/// a fingerprint only when they number the same points in the same order.
pub fn sequence_fingerprint(points: &[Point]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((points.len() as u64).to_le_bytes());
    for point in points {
        let id = point.id().as_str().as_bytes();
        hasher.update((id.len() as u64).to_le_bytes());
        hasher.update(id);
    }
    format!("{:x}", hasher.finalize())
}
