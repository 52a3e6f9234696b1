//! Transaction-history provider records, as delivered.
//!
//! Only the fields the classifier consumes are modelled. Missing arrays,
//! missing accounts and malformed amounts never fail decoding: amounts are
//! coerced to zero and the rest defaults to empty.

use fastnum::UD128;
use serde::Deserialize;

use crate::{error::Result, num};

/// Enriched transaction record from the history provider.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default)]
    pub fee_payer: String,

    /// Network fee in native smallest units.
    #[serde(default, deserialize_with = "num::deserialize_units")]
    pub fee: u64,

    #[serde(default)]
    pub signature: String,

    #[serde(default, deserialize_with = "num::deserialize_units")]
    pub slot: u64,

    /// Block time, unix seconds.
    #[serde(default, deserialize_with = "num::deserialize_units")]
    pub timestamp: u64,

    /// Provider's own transaction label, e.g. `SWAP` or `TRANSFER`.
    #[serde(default, rename = "type")]
    pub tx_type: Option<String>,

    #[serde(default)]
    pub native_transfers: Option<Vec<RawNativeTransfer>>,

    #[serde(default)]
    pub token_transfers: Option<Vec<RawTokenTransfer>>,
}

/// Native currency movement, amount in smallest units.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNativeTransfer {
    #[serde(default)]
    pub from_user_account: Option<String>,

    #[serde(default)]
    pub to_user_account: Option<String>,

    #[serde(default, deserialize_with = "num::deserialize_units")]
    pub amount: u64,
}

/// Token movement, amount already scaled to decimal units by the provider.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenTransfer {
    #[serde(default)]
    pub from_user_account: Option<String>,

    #[serde(default)]
    pub to_user_account: Option<String>,

    #[serde(default)]
    pub mint: Option<String>,

    #[serde(default, deserialize_with = "num::deserialize_decimal")]
    pub token_amount: UD128,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawTransaction>),
    One(Box<RawTransaction>),
}

impl RawTransaction {
    /// Decodes a single provider record.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn native_transfers(&self) -> &[RawNativeTransfer] {
        self.native_transfers.as_deref().unwrap_or_default()
    }

    pub fn token_transfers(&self) -> &[RawTokenTransfer] {
        self.token_transfers.as_deref().unwrap_or_default()
    }
}

/// Decodes a provider history payload, either a single record or an array.
pub fn decode_history(json: &str) -> Result<Vec<RawTransaction>> {
    Ok(match serde_json::from_str(json)? {
        OneOrMany::Many(txs) => txs,
        OneOrMany::One(tx) => vec![*tx],
    })
}

#[cfg(test)]
mod tests {
    use fastnum::udec128;

    use super::*;

    const SWAP: &str = r#"{
        "description": "",
        "type": "SWAP",
        "source": "JUPITER",
        "fee": 5000,
        "feePayer": "Principal111",
        "signature": "sig1",
        "slot": 250000000,
        "timestamp": 1700000000,
        "nativeTransfers": [
            { "fromUserAccount": "Pool111", "toUserAccount": "Principal111", "amount": 1000000000 }
        ],
        "tokenTransfers": [
            {
                "fromUserAccount": "Principal111",
                "toUserAccount": "Pool111",
                "fromTokenAccount": "ata1",
                "toTokenAccount": "ata2",
                "tokenAmount": 10,
                "mint": "USDC111",
                "tokenStandard": "Fungible"
            }
        ]
    }"#;

    #[test]
    fn test_decode_record() {
        let tx = RawTransaction::from_json(SWAP).unwrap();
        assert_eq!(tx.fee_payer, "Principal111");
        assert_eq!(tx.fee, 5000);
        assert_eq!(tx.slot, 250000000);
        assert_eq!(tx.timestamp, 1700000000);
        assert_eq!(tx.tx_type.as_deref(), Some("SWAP"));
        assert_eq!(tx.native_transfers().len(), 1);
        assert_eq!(tx.native_transfers()[0].amount, 1_000_000_000);
        assert_eq!(tx.token_transfers()[0].token_amount, udec128!(10));
        assert_eq!(tx.token_transfers()[0].mint.as_deref(), Some("USDC111"));
    }

    #[test]
    fn test_decode_missing_and_null_arrays() {
        let tx = RawTransaction::from_json(r#"{"feePayer": "A", "nativeTransfers": null}"#).unwrap();
        assert!(tx.native_transfers().is_empty());
        assert!(tx.token_transfers().is_empty());
        assert_eq!(tx.fee, 0);
    }

    #[test]
    fn test_decode_malformed_amount() {
        let tx = RawTransaction::from_json(
            r#"{"feePayer": "A", "tokenTransfers": [{"fromUserAccount": "A", "toUserAccount": "B", "mint": "M", "tokenAmount": "n/a"}]}"#,
        )
        .unwrap();
        assert_eq!(tx.token_transfers()[0].token_amount, UD128::ZERO);
    }

    #[test]
    fn test_decode_history_one_or_many() {
        assert_eq!(decode_history(SWAP).unwrap().len(), 1);
        let many = format!("[{SWAP}, {SWAP}]");
        assert_eq!(decode_history(&many).unwrap().len(), 2);
        assert!(decode_history("42").is_err());
    }
}
