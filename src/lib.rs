//! Transaction transfer semantics.
//!
//! # Overview
//!
//! Reconstructs the meaning of the raw asset movements attached to a single
//! transaction: which transfers form a swap, which are fees, which assets
//! round-trip back to the signer, and which sent/received pair best
//! summarizes the transaction.
//!
//! Decode provider records with [`types::raw::RawTransaction`], turn them into
//! a [`types::TransactionContext`], then run [`classify::Classifier::classify`]
//! to get an immutable [`classify::ProcessedTransaction`].
//!
//! Classification is pure and synchronous. Use
//! [`classify::Classifier::classify_batch`] to classify many transactions in
//! parallel, or [`feed::start`] to classify a channel of transactions on a
//! background task.
//!
//! # Limitations/follow-ups
//!
//! * Pairing is a greedy first-match heuristic, not an optimal matching.
//!
//! * Token amounts are taken as already scaled to decimal units by the
//!   provider, no token metadata is consulted.
//!
//! # Testing
//!
//! [`testing`] module provides [`testing::TransactionBuilder`] to assemble
//! transaction contexts without going through provider JSON.

pub mod classify;
pub mod config;
pub mod error;
pub mod feed;
pub mod num;
pub mod testing;
pub mod types;

/// Wrapped SOL mint, reported by providers next to the native transfer it wraps.
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Decimals of the native SOL asset (lamports per SOL = 10^9).
pub const SOL_DECIMALS: u8 = 9;

/// Network the transactions were recorded on.
#[derive(Clone, Debug)]
pub struct Network {
    native_decimals: u8,
    wrapped_native_mint: Option<String>,
}

impl Network {
    pub fn solana() -> Self {
        Self {
            native_decimals: SOL_DECIMALS,
            wrapped_native_mint: Some(WRAPPED_SOL_MINT.to_string()),
        }
    }

    pub fn custom(native_decimals: u8, wrapped_native_mint: Option<String>) -> Self {
        Self {
            native_decimals,
            wrapped_native_mint,
        }
    }

    /// Fixed scale of the native asset smallest unit.
    pub fn native_decimals(&self) -> u8 {
        self.native_decimals
    }

    /// Token mint that represents the wrapped native asset, if any.
    pub fn wrapped_native_mint(&self) -> Option<&str> {
        self.wrapped_native_mint.as_deref()
    }

    /// Converter for native smallest units.
    pub fn native_converter(&self) -> num::Converter {
        num::Converter::new(self.native_decimals)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::solana()
    }
}
