//! Assets that round-trip through the principal.

use std::collections::BTreeSet;

use super::Buckets;
use crate::types::AssetId;

/// Assets with a positive total in both the outgoing and incoming bucket.
pub type CircularSet = BTreeSet<AssetId>;

pub fn detect(buckets: &Buckets) -> CircularSet {
    buckets
        .outgoing
        .assets()
        .filter(|asset| buckets.incoming.contains(asset))
        .cloned()
        .collect()
}
