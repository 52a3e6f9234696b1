//! Semantic classification of a transaction's transfers.
//!
//! [`Classifier::classify`] runs the full pipeline over one
//! [`TransactionContext`]:
//!
//! - [`normalize`] - provider native/token records into [`AssetTransfer`]s
//! - [`fee`] - fee detection with an injected [`FeeClassifier`] strategy
//! - [`aggregate`] - per-asset sent/received buckets of the principal
//! - [`circular`] - assets moving both out of and back into the principal
//! - [`pairing`] - greedy reconstruction of swap legs
//! - [`primary`] - the single sent/received pair that summarizes the transaction
//!
//! Every step is pure and synchronous, the result is a fresh
//! [`ProcessedTransaction`] per call.
//!
//! # Example
//!
//! ```ignore
//! use tx_semantics::{Network, classify::{Classifier, FeeStrategy}, types::raw};
//!
//! let classifier = Classifier::new(Network::solana(), FeeStrategy::Sweep);
//! for tx in raw::decode_history(&json)? {
//!     let processed = classifier.classify_raw(&tx);
//!     println!("{}: {}", processed.signature(), processed.summary());
//! }
//! ```

pub mod aggregate;
pub mod circular;
pub mod fee;
pub mod normalize;
pub mod pairing;
pub mod primary;
mod types;


pub use aggregate::{AggregateBucket, Buckets};
pub use circular::CircularSet;
pub use fee::{
    FeeAllowlist, FeeClassifier, FeeDisposition, FeeStrategy, FeeStrategyKind, SweepFees,
};
pub use types::{FeeTransfer, ProcessedTransaction, RepeatTrade, SwapPair, TransferSummary};

use rayon::prelude::*;
use tracing::debug;

use crate::{
    Network,
    config::ClassifierConfig,
    types::{AssetTransfer, TransactionContext, raw::RawTransaction},
};

/// Transfer classifier for one network with a chosen fee strategy.
///
/// Holds configuration only, so a single instance can classify any number
/// of transactions, concurrently if needed.
#[derive(Clone, Debug)]
pub struct Classifier<F = FeeStrategy> {
    network: Network,
    fees: F,
}

impl Default for Classifier<FeeStrategy> {
    /// Solana with sweep fee detection.
    fn default() -> Self {
        Self::new(Network::default(), FeeStrategy::default())
    }
}

impl Classifier<FeeStrategy> {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.network.clone(), config.fee_strategy.clone())
    }
}

impl<F: FeeClassifier> Classifier<F> {
    pub fn new(network: Network, fees: F) -> Self {
        Self { network, fees }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn fees(&self) -> &F {
        &self.fees
    }

    /// Normalizes a provider record and classifies it.
    pub fn classify_raw(&self, raw: &RawTransaction) -> ProcessedTransaction {
        self.classify(&TransactionContext::from_raw(raw, &self.network))
    }

    /// Classifies a transaction.
    ///
    /// Never fails: empty or degenerate input yields empty buckets and no
    /// primary assets.
    pub fn classify(&self, ctx: &TransactionContext) -> ProcessedTransaction {
        let principal = ctx.principal();
        let transfers = ctx.transfers();

        let mut fee_indices = self.fees.fee_indices(principal, transfers);
        fee_indices.sort_unstable();
        fee_indices.dedup();
        let disposition = self.fees.disposition();

        let is_fee = |index: &usize| fee_indices.binary_search(index).is_ok();
        let indexed = || transfers.iter().enumerate();

        // Excluded fees vanish from every downstream step, marked fees only
        // from pairing.
        let retained: Vec<(usize, &AssetTransfer)> = match disposition {
            FeeDisposition::Exclude => indexed().filter(|(i, _)| !is_fee(i)).collect(),
            FeeDisposition::Mark => indexed().collect(),
        };
        let pairable: Vec<(usize, &AssetTransfer)> =
            indexed().filter(|(i, _)| !is_fee(i)).collect();

        // Buckets and primary selection share one deduplicated list.
        let counted = aggregate::counted(principal, &retained, &self.network);
        let buckets = aggregate::bucket(principal, &counted, &self.network);
        let circular = circular::detect(&buckets);
        let swap_pairs = pairing::match_pairs(principal, &pairable);
        let (primary_outgoing, primary_incoming) =
            primary::select(principal, &counted, &buckets, &circular, &self.network);

        let fee_transfers = fee_indices
            .iter()
            .filter_map(|&index| {
                transfers.get(index).map(|transfer| FeeTransfer {
                    index,
                    transfer: transfer.clone(),
                })
            })
            .collect::<Vec<_>>();

        debug!(
            signature = ctx.signature(),
            %principal,
            transfers = transfers.len(),
            fees = fee_transfers.len(),
            swap_pairs = swap_pairs.len(),
            circular = circular.len(),
            sent = ?primary_outgoing,
            received = ?primary_incoming,
            "Transaction classified"
        );

        ProcessedTransaction::new(
            ctx,
            buckets,
            circular,
            fee_transfers,
            swap_pairs,
            primary_outgoing,
            primary_incoming,
        )
    }

    /// Classifies provider records in parallel, preserving input order.
    pub fn classify_batch(&self, raws: &[RawTransaction]) -> Vec<ProcessedTransaction>
    where
        F: Sync,
    {
        raws.par_iter().map(|raw| self.classify_raw(raw)).collect()
    }
}
