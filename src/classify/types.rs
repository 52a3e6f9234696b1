//! Classification output structures.

use std::fmt;

use fastnum::UD128;
use serde::Serialize;

use super::{Buckets, CircularSet, aggregate::AggregateBucket};
use crate::types::{AccountId, AssetAmount, AssetId, AssetTransfer, TransactionContext};

/// Two transfers of different assets reconstructed as one swap.
#[derive(Clone, PartialEq, Eq, derive_more::Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapPair {
    /// Principal that initiated the swap.
    pub signer: AccountId,

    /// Asset given by the signer.
    pub asset_a: AssetId,

    #[debug("{amount_a}")]
    #[serde(serialize_with = "crate::num::serialize_decimal")]
    pub amount_a: UD128,

    /// Asset taken in exchange.
    pub asset_b: AssetId,

    #[debug("{amount_b}")]
    #[serde(serialize_with = "crate::num::serialize_decimal")]
    pub amount_b: UD128,

    /// Counterparty of the second leg: its sender when it lands on the
    /// signer, its recipient otherwise.
    pub intermediary: AccountId,

    /// Index of the outgoing leg in the normalized transfer list.
    pub out_index: usize,

    /// Index of the second leg in the normalized transfer list.
    pub in_index: usize,
}

/// Transfer identified as a fee by the active strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeeTransfer {
    /// Index in the normalized transfer list.
    pub index: usize,

    pub transfer: AssetTransfer,
}

/// Prefill for repeating a trade: spend `input_amount` of `input_asset` to
/// buy `output_asset`.
#[derive(Clone, PartialEq, Eq, derive_more::Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatTrade {
    pub input_asset: AssetId,

    #[debug("{input_amount}")]
    #[serde(serialize_with = "crate::num::serialize_decimal")]
    pub input_amount: UD128,

    pub output_asset: AssetId,
}

/// Compact one-line view of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferSummary {
    pub sent: Option<AssetAmount>,
    pub received: Option<AssetAmount>,
}

impl fmt::Display for TransferSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.sent, &self.received) {
            (Some(sent), Some(received)) => write!(f, "sent {sent}, received {received}"),
            (Some(sent), None) => write!(f, "sent {sent}"),
            (None, Some(received)) => write!(f, "received {received}"),
            (None, None) => write!(f, "no asset movement"),
        }
    }
}

/// Semantic view of one transaction.
///
/// Built fresh by [`super::Classifier::classify`] and never updated.
#[derive(Clone, derive_more::Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTransaction {
    signature: String,
    slot: u64,
    timestamp: u64,
    principal: AccountId,

    #[debug("{network_fee}")]
    #[serde(serialize_with = "crate::num::serialize_decimal")]
    network_fee: UD128,

    transfers: Vec<AssetTransfer>,
    outgoing: AggregateBucket,
    incoming: AggregateBucket,
    circular: CircularSet,
    fee_transfers: Vec<FeeTransfer>,
    swap_pairs: Vec<SwapPair>,
    primary_outgoing: Option<AssetAmount>,
    primary_incoming: Option<AssetAmount>,
}

impl ProcessedTransaction {
    pub(crate) fn new(
        ctx: &TransactionContext,
        buckets: Buckets,
        circular: CircularSet,
        fee_transfers: Vec<FeeTransfer>,
        swap_pairs: Vec<SwapPair>,
        primary_outgoing: Option<AssetAmount>,
        primary_incoming: Option<AssetAmount>,
    ) -> Self {
        Self {
            signature: ctx.signature().to_string(),
            slot: ctx.slot(),
            timestamp: ctx.timestamp(),
            principal: ctx.principal().to_string(),
            network_fee: ctx.network_fee(),
            transfers: ctx.transfers().to_vec(),
            outgoing: buckets.outgoing,
            incoming: buckets.incoming,
            circular,
            fee_transfers,
            swap_pairs,
            primary_outgoing,
            primary_incoming,
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn slot(&self) -> u64 {
        self.slot
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Network fee paid by the principal, in native decimal units.
    pub fn network_fee(&self) -> UD128 {
        self.network_fee
    }

    /// Normalized transfers, including fees.
    pub fn transfers(&self) -> &[AssetTransfer] {
        &self.transfers
    }

    /// Totals sent by the principal.
    pub fn outgoing(&self) -> &AggregateBucket {
        &self.outgoing
    }

    /// Totals received by the principal.
    pub fn incoming(&self) -> &AggregateBucket {
        &self.incoming
    }

    pub fn circular(&self) -> &CircularSet {
        &self.circular
    }

    pub fn is_circular(&self, asset: &AssetId) -> bool {
        self.circular.contains(asset)
    }

    pub fn fee_transfers(&self) -> &[FeeTransfer] {
        &self.fee_transfers
    }

    pub fn swap_pairs(&self) -> &[SwapPair] {
        &self.swap_pairs
    }

    pub fn primary_outgoing(&self) -> Option<&AssetAmount> {
        self.primary_outgoing.as_ref()
    }

    pub fn primary_incoming(&self) -> Option<&AssetAmount> {
        self.primary_incoming.as_ref()
    }

    /// True if at least one swap pair was reconstructed.
    pub fn is_swap(&self) -> bool {
        !self.swap_pairs.is_empty()
    }

    pub fn summary(&self) -> TransferSummary {
        TransferSummary {
            sent: self.primary_outgoing.clone(),
            received: self.primary_incoming.clone(),
        }
    }

    /// Trade prefill when the transaction sent one asset and received a
    /// different one.
    pub fn repeat_trade(&self) -> Option<RepeatTrade> {
        let sent = self.primary_outgoing.as_ref()?;
        let received = self.primary_incoming.as_ref()?;
        (sent.asset != received.asset).then(|| RepeatTrade {
            input_asset: sent.asset.clone(),
            input_amount: sent.amount,
            output_asset: received.asset.clone(),
        })
    }
}
