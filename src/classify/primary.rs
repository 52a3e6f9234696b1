//! Primary sent/received asset selection.
//!
//! Resolution order, each step only for directions still unresolved:
//!
//! 1. Swap pattern: the first transfer out of the principal whose recipient
//!    pays the principal back in a different asset. Resolves both directions.
//! 2. First outgoing / last incoming transfer, skipping circular assets.
//! 3. Bucket totals: native first for the outgoing side, then the largest
//!    non-circular total, then the first asset in bucket order.

use std::collections::HashMap;

use fastnum::UD128;
use itertools::Itertools;

use super::{Buckets, CircularSet, aggregate::AggregateBucket};
use crate::{
    Network,
    types::{AssetAmount, AssetId, AssetTransfer},
};

/// A counted transfer with its asset in canonical form.
type Moving<'a> = (AssetId, &'a AssetTransfer);

/// Selects `(primary_outgoing, primary_incoming)` from the [`counted`]
/// transfers and the buckets built from them.
///
/// Assets are reported in the canonical form the buckets are keyed by.
///
/// [`counted`]: super::aggregate::counted
pub fn select(
    principal: &str,
    counted: &[(usize, &AssetTransfer)],
    buckets: &Buckets,
    circular: &CircularSet,
    network: &Network,
) -> (Option<AssetAmount>, Option<AssetAmount>) {
    let moving: Vec<Moving> = counted
        .iter()
        .filter(|(_, t)| t.amount > UD128::ZERO)
        .map(|&(_, t)| (t.asset.canonical(network), t))
        .collect();

    if let Some((sent, received)) = swap_pattern(principal, &moving) {
        return (Some(summary(sent)), Some(summary(received)));
    }

    let outgoing = moving
        .iter()
        .find(|(asset, t)| t.is_sent_by(principal) && !circular.contains(asset))
        .map(summary)
        .or_else(|| by_total(&buckets.outgoing, circular, true));

    let incoming = moving
        .iter()
        .rev()
        .find(|(asset, t)| t.is_received_by(principal) && !circular.contains(asset))
        .map(summary)
        .or_else(|| by_total(&buckets.incoming, circular, false));

    (outgoing, incoming)
}

fn swap_pattern<'m, 'a>(
    principal: &str,
    moving: &'m [Moving<'a>],
) -> Option<(&'m Moving<'a>, &'m Moving<'a>)> {
    let received_by_sender: HashMap<&str, Vec<&Moving>> = moving
        .iter()
        .filter(|(_, t)| t.is_received_by(principal))
        .map(|m| (m.1.from.as_str(), m))
        .into_group_map();

    moving
        .iter()
        .filter(|(_, t)| t.is_sent_by(principal))
        .find_map(|sent| {
            received_by_sender
                .get(sent.1.to.as_str())?
                .iter()
                .find(|received| received.0 != sent.0)
                .map(|received| (sent, *received))
        })
}

fn by_total(
    bucket: &AggregateBucket,
    circular: &CircularSet,
    prefer_native: bool,
) -> Option<AssetAmount> {
    if prefer_native && !circular.contains(&AssetId::Native) {
        if let Some(amount) = bucket.get(&AssetId::Native) {
            return Some(AssetAmount::new(AssetId::Native, amount));
        }
    }

    bucket
        .iter()
        .filter(|e| !circular.contains(&e.asset))
        .reduce(|best, e| if e.amount > best.amount { e } else { best })
        .or_else(|| bucket.iter().next())
        .cloned()
}

fn summary((asset, transfer): &Moving) -> AssetAmount {
    AssetAmount::new(asset.clone(), transfer.amount)
}
