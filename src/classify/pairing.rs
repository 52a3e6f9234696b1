//! Greedy swap leg reconstruction.
//!
//! Every transfer out of the principal is paired with the first other
//! unused transfer of a different asset that either lands on the principal
//! or leaves the account the outgoing transfer went to. First match wins and
//! is never revisited, so the result depends on list order; this is a
//! heuristic, not an optimal matching.

use tracing::trace;

use super::SwapPair;
use crate::types::AssetTransfer;

/// Pairs transfers of `candidates`, `(index, transfer)` in list order with
/// fees already removed.
pub fn match_pairs(principal: &str, candidates: &[(usize, &AssetTransfer)]) -> Vec<SwapPair> {
    let mut used = vec![false; candidates.len()];
    let mut pairs = Vec::new();

    for i in 0..candidates.len() {
        let (out_index, out) = candidates[i];
        if used[i] || !out.is_sent_by(principal) {
            continue;
        }

        let found = (0..candidates.len()).find(|&j| {
            let (_, leg) = candidates[j];
            j != i
                && !used[j]
                && leg.asset != out.asset
                && (leg.is_received_by(principal) || leg.from == out.to)
        });
        let Some(j) = found else {
            continue;
        };

        let (in_index, leg) = candidates[j];
        used[i] = true;
        used[j] = true;

        let intermediary = if leg.is_received_by(principal) {
            leg.from.clone()
        } else {
            leg.to.clone()
        };
        trace!(out_index, in_index, %intermediary, "Swap legs paired");

        pairs.push(SwapPair {
            signer: principal.to_string(),
            asset_a: out.asset.clone(),
            amount_a: out.amount,
            asset_b: leg.asset.clone(),
            amount_b: leg.amount,
            intermediary,
            out_index,
            in_index,
        });
    }

    pairs
}
