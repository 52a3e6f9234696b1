//! Per-asset sent/received totals of the principal.

use std::collections::{HashMap, HashSet};

use fastnum::UD128;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    Network,
    types::{AssetAmount, AssetId, AssetTransfer},
};

/// Insertion-ordered per-asset totals.
///
/// Only positive totals are stored, so presence of a key means the asset
/// actually moved in this direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateBucket {
    entries: Vec<AssetAmount>,
    /// Reverse index: asset -> position in `entries`.
    index: HashMap<AssetId, usize>,
}

impl AggregateBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total for the asset, if it moved.
    pub fn get(&self, asset: &AssetId) -> Option<UD128> {
        self.index.get(asset).map(|&i| self.entries[i].amount)
    }

    pub fn contains(&self, asset: &AssetId) -> bool {
        self.index.contains_key(asset)
    }

    /// Entries in the order assets were first seen.
    pub fn iter(&self) -> impl Iterator<Item = &AssetAmount> {
        self.entries.iter()
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetId> {
        self.entries.iter().map(|e| &e.asset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all assets.
    pub fn total(&self) -> UD128 {
        self.entries
            .iter()
            .fold(UD128::ZERO, |total, e| total + e.amount)
    }

    pub(crate) fn add(&mut self, asset: &AssetId, amount: UD128) {
        if amount == UD128::ZERO {
            return;
        }
        match self.index.get(asset) {
            Some(&i) => self.entries[i].amount += amount,
            None => {
                self.index.insert(asset.clone(), self.entries.len());
                self.entries.push(AssetAmount::new(asset.clone(), amount));
            }
        }
    }
}

impl Serialize for AggregateBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.asset, &entry.amount.to_string())?;
        }
        map.end()
    }
}

/// Outgoing and incoming buckets of one transaction.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Buckets {
    /// Sent by the principal.
    pub outgoing: AggregateBucket,

    /// Received by the principal.
    pub incoming: AggregateBucket,
}

/// The transfers of `transfers` that count toward the buckets of
/// `principal`, in list order.
///
/// A transfer counts when it touches the principal, moves a positive amount
/// and its `(from, to, asset)` key was not already counted in the same
/// direction. The network's wrapped-native mint is keyed as the native asset,
/// so a native move that the provider also reports as a wrapped token
/// transfer counts once. Zero amounts never take a key.
pub fn counted<'a>(
    principal: &str,
    transfers: &[(usize, &'a AssetTransfer)],
    network: &Network,
) -> Vec<(usize, &'a AssetTransfer)> {
    let mut seen_outgoing = HashSet::new();
    let mut seen_incoming = HashSet::new();

    transfers
        .iter()
        .copied()
        .filter(|&(_, transfer)| {
            if transfer.amount == UD128::ZERO {
                return false;
            }
            let key = (
                transfer.from.as_str(),
                transfer.to.as_str(),
                transfer.asset.canonical(network),
            );
            let sent = transfer.is_sent_by(principal) && seen_outgoing.insert(key.clone());
            let received = transfer.is_received_by(principal) && seen_incoming.insert(key);
            sent | received
        })
        .collect()
}

/// Buckets already [`counted`] transfers by canonical asset and direction.
pub fn bucket(principal: &str, counted: &[(usize, &AssetTransfer)], network: &Network) -> Buckets {
    let mut buckets = Buckets::default();
    for (_, transfer) in counted {
        let asset = transfer.asset.canonical(network);
        if transfer.is_sent_by(principal) {
            buckets.outgoing.add(&asset, transfer.amount);
        }
        if transfer.is_received_by(principal) {
            buckets.incoming.add(&asset, transfer.amount);
        }
    }
    buckets
}

/// Buckets the transfers touching `principal`, see [`counted`].
pub fn aggregate<'a>(
    principal: &str,
    transfers: impl IntoIterator<Item = &'a AssetTransfer>,
    network: &Network,
) -> Buckets {
    let indexed: Vec<_> = transfers.into_iter().enumerate().collect();
    bucket(principal, &counted(principal, &indexed, network), network)
}
