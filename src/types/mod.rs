pub mod raw;

use std::fmt;

use fastnum::UD128;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Network, classify::normalize};

/// Account address (base58 on Solana).
pub type AccountId = String;

/// Asset moved by a transfer.
///
/// The native network currency is a reserved sentinel rather than a mint
/// address; every other asset is identified by its token mint.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Debug, derive_more::Display)]
pub enum AssetId {
    #[debug("native")]
    #[display("native")]
    Native,

    #[debug("{_0}")]
    #[display("{_0}")]
    Token(String),
}

impl AssetId {
    /// Textual form of the native sentinel.
    pub const NATIVE: &'static str = "native";

    pub fn token(mint: impl Into<String>) -> Self {
        Self::Token(mint.into())
    }

    /// Maps the network's wrapped-native mint onto [`AssetId::Native`].
    pub(crate) fn canonical(&self, network: &Network) -> AssetId {
        match (self, network.wrapped_native_mint()) {
            (Self::Token(mint), Some(wrapped)) if mint == wrapped => Self::Native,
            _ => self.clone(),
        }
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        if value == Self::NATIVE {
            Self::Native
        } else {
            Self::Token(value.to_string())
        }
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(String::deserialize(deserializer)?.as_str()))
    }
}

/// Origin of a normalized transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Native,
    Token,
}

/// Single asset movement in uniform shape.
#[derive(Clone, PartialEq, Eq, derive_more::Debug, Serialize)]
pub struct AssetTransfer {
    pub asset: AssetId,

    /// Amount in decimal units of the asset.
    #[debug("{amount}")]
    #[serde(serialize_with = "crate::num::serialize_decimal")]
    pub amount: UD128,

    pub from: AccountId,

    pub to: AccountId,

    pub kind: TransferKind,
}

impl AssetTransfer {
    pub fn native(from: impl Into<AccountId>, to: impl Into<AccountId>, amount: UD128) -> Self {
        Self {
            asset: AssetId::Native,
            amount,
            from: from.into(),
            to: to.into(),
            kind: TransferKind::Native,
        }
    }

    pub fn token(
        mint: impl Into<String>,
        from: impl Into<AccountId>,
        to: impl Into<AccountId>,
        amount: UD128,
    ) -> Self {
        Self {
            asset: AssetId::token(mint),
            amount,
            from: from.into(),
            to: to.into(),
            kind: TransferKind::Token,
        }
    }

    pub fn is_sent_by(&self, account: &str) -> bool {
        self.from == account
    }

    pub fn is_received_by(&self, account: &str) -> bool {
        self.to == account
    }
}

/// Asset with an amount, used for per-direction summaries.
#[derive(Clone, PartialEq, Eq, derive_more::Debug, Serialize)]
pub struct AssetAmount {
    pub asset: AssetId,

    #[debug("{amount}")]
    #[serde(serialize_with = "crate::num::serialize_decimal")]
    pub amount: UD128,
}

impl AssetAmount {
    pub fn new(asset: AssetId, amount: UD128) -> Self {
        Self { asset, amount }
    }
}

impl fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.asset)
    }
}

/// Everything the classifier needs to know about one transaction.
#[derive(Clone, derive_more::Debug)]
pub struct TransactionContext {
    signature: String,
    slot: u64,
    timestamp: u64,
    principal: AccountId,
    #[debug("{network_fee}")]
    network_fee: UD128,
    transfers: Vec<AssetTransfer>,
}

impl TransactionContext {
    pub fn new(principal: impl Into<AccountId>, transfers: Vec<AssetTransfer>) -> Self {
        Self {
            signature: String::new(),
            slot: 0,
            timestamp: 0,
            principal: principal.into(),
            network_fee: UD128::ZERO,
            transfers,
        }
    }

    /// Builds the context from a decoded provider record, normalizing its
    /// native and token transfers.
    pub fn from_raw(raw: &raw::RawTransaction, network: &Network) -> Self {
        Self {
            signature: raw.signature.clone(),
            slot: raw.slot,
            timestamp: raw.timestamp,
            principal: raw.fee_payer.clone(),
            network_fee: network.native_converter().from_units(raw.fee),
            transfers: normalize::normalize(raw, network),
        }
    }

    /// Sets transaction signature, slot and block timestamp.
    pub fn with_metadata(mut self, signature: impl Into<String>, slot: u64, timestamp: u64) -> Self {
        self.signature = signature.into();
        self.slot = slot;
        self.timestamp = timestamp;
        self
    }

    /// Sets the network fee in native decimal units.
    pub fn with_network_fee(mut self, network_fee: UD128) -> Self {
        self.network_fee = network_fee;
        self
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn slot(&self) -> u64 {
        self.slot
    }

    /// Block time, unix seconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Fee payer the sent/received perspective is measured from.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn network_fee(&self) -> UD128 {
        self.network_fee
    }

    pub fn transfers(&self) -> &[AssetTransfer] {
        &self.transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_text_form() {
        assert_eq!(AssetId::from("native"), AssetId::Native);
        assert_eq!(AssetId::from("USDC"), AssetId::token("USDC"));
        assert_eq!(AssetId::Native.to_string(), "native");
        assert_eq!(AssetId::token("USDC").to_string(), "USDC");
        assert_eq!(
            serde_json::to_string(&AssetId::token("mint1")).unwrap(),
            "\"mint1\""
        );
    }

    #[test]
    fn test_asset_id_canonical() {
        let network = Network::solana();
        assert_eq!(
            AssetId::token(crate::WRAPPED_SOL_MINT).canonical(&network),
            AssetId::Native
        );
        assert_eq!(AssetId::token("USDC").canonical(&network), AssetId::token("USDC"));

        let bare = Network::custom(9, None);
        assert_eq!(
            AssetId::token(crate::WRAPPED_SOL_MINT).canonical(&bare),
            AssetId::token(crate::WRAPPED_SOL_MINT)
        );
    }
}
