//! Test fixtures.
//!
//! [`TransactionBuilder`] assembles a [`TransactionContext`] from decimal
//! transfers without going through provider JSON, for unit testing the
//! classifier.
//!
//! [`RawTransactionBuilder`] assembles provider records, with native amounts
//! in smallest units, for testing decoding and the feed.
//!

use fastnum::UD128;

use crate::types::{
    AccountId, AssetTransfer, TransactionContext,
    raw::{RawNativeTransfer, RawTokenTransfer, RawTransaction},
};

/// Builder for classifier input.
///
/// # Example
///
/// ```ignore
/// use tx_semantics::testing::TransactionBuilder;
/// use fastnum::udec128;
///
/// let ctx = TransactionBuilder::new("P")
///     .token("USDC", "P", "DEX", udec128!(10))
///     .native("DEX", "P", udec128!(1))
///     .signature("sig1")
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    principal: AccountId,
    transfers: Vec<AssetTransfer>,
    signature: String,
    slot: u64,
    timestamp: u64,
    network_fee: UD128,
}

impl TransactionBuilder {
    /// Create a builder for a transaction signed by `principal`.
    pub fn new(principal: impl Into<AccountId>) -> Self {
        Self {
            principal: principal.into(),
            transfers: Vec::new(),
            signature: String::new(),
            slot: 0,
            timestamp: 0,
            network_fee: UD128::ZERO,
        }
    }

    /// Append a native transfer, amount in decimal units.
    pub fn native(self, from: &str, to: &str, amount: UD128) -> Self {
        self.transfer(AssetTransfer::native(from, to, amount))
    }

    /// Append a token transfer.
    pub fn token(self, mint: &str, from: &str, to: &str, amount: UD128) -> Self {
        self.transfer(AssetTransfer::token(mint, from, to, amount))
    }

    pub fn transfer(mut self, transfer: AssetTransfer) -> Self {
        self.transfers.push(transfer);
        self
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.signature = signature.to_string();
        self
    }

    pub fn slot(mut self, slot: u64) -> Self {
        self.slot = slot;
        self
    }

    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn network_fee(mut self, fee: UD128) -> Self {
        self.network_fee = fee;
        self
    }

    pub fn build(self) -> TransactionContext {
        TransactionContext::new(self.principal, self.transfers)
            .with_metadata(self.signature, self.slot, self.timestamp)
            .with_network_fee(self.network_fee)
    }
}

/// Builder for provider records.
#[derive(Clone, Debug, Default)]
pub struct RawTransactionBuilder {
    raw: RawTransaction,
}

impl RawTransactionBuilder {
    pub fn new(fee_payer: &str, signature: &str) -> Self {
        Self {
            raw: RawTransaction {
                fee_payer: fee_payer.to_string(),
                signature: signature.to_string(),
                ..Default::default()
            },
        }
    }

    /// Set the network fee, in native smallest units.
    pub fn fee(mut self, units: u64) -> Self {
        self.raw.fee = units;
        self
    }

    /// Append a native transfer, amount in smallest units.
    pub fn native(mut self, from: &str, to: &str, units: u64) -> Self {
        self.raw
            .native_transfers
            .get_or_insert_with(Vec::new)
            .push(RawNativeTransfer {
                from_user_account: Some(from.to_string()),
                to_user_account: Some(to.to_string()),
                amount: units,
            });
        self
    }

    /// Append a token transfer, amount in decimal units.
    pub fn token(mut self, mint: &str, from: &str, to: &str, amount: UD128) -> Self {
        self.raw
            .token_transfers
            .get_or_insert_with(Vec::new)
            .push(RawTokenTransfer {
                from_user_account: Some(from.to_string()),
                to_user_account: Some(to.to_string()),
                mint: Some(mint.to_string()),
                token_amount: amount,
            });
        self
    }

    pub fn build(self) -> RawTransaction {
        self.raw
    }
}
