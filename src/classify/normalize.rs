//! Provider records into uniform [`AssetTransfer`]s.

use tracing::trace;

use crate::{
    Network,
    types::{AssetTransfer, raw::RawTransaction},
};

/// Normalizes native transfers, then token transfers, each in provider order.
///
/// Zero amounts are kept. Token records without a mint are skipped.
pub fn normalize(raw: &RawTransaction, network: &Network) -> Vec<AssetTransfer> {
    let converter = network.native_converter();
    let mut transfers =
        Vec::with_capacity(raw.native_transfers().len() + raw.token_transfers().len());

    for native in raw.native_transfers() {
        transfers.push(AssetTransfer::native(
            native.from_user_account.clone().unwrap_or_default(),
            native.to_user_account.clone().unwrap_or_default(),
            converter.from_units(native.amount),
        ));
    }

    for (index, token) in raw.token_transfers().iter().enumerate() {
        let Some(mint) = token.mint.as_deref().map(str::trim).filter(|m| !m.is_empty()) else {
            trace!(signature = %raw.signature, index, "Skipping token transfer without mint");
            continue;
        };
        transfers.push(AssetTransfer::token(
            mint,
            token.from_user_account.clone().unwrap_or_default(),
            token.to_user_account.clone().unwrap_or_default(),
            token.token_amount,
        ));
    }

    transfers
}

#[cfg(test)]
mod tests {
    use fastnum::{UD128, udec128};

    use super::*;
    use crate::types::{
        AssetId, TransferKind,
        raw::{RawNativeTransfer, RawTokenTransfer},
    };

    fn native(from: &str, to: &str, amount: u64) -> RawNativeTransfer {
        RawNativeTransfer {
            from_user_account: Some(from.to_string()),
            to_user_account: Some(to.to_string()),
            amount,
        }
    }

    fn token(mint: Option<&str>, from: &str, to: &str, amount: UD128) -> RawTokenTransfer {
        RawTokenTransfer {
            from_user_account: Some(from.to_string()),
            to_user_account: Some(to.to_string()),
            mint: mint.map(str::to_string),
            token_amount: amount,
        }
    }

    #[test]
    fn test_normalize_native_then_token() {
        let raw = RawTransaction {
            fee_payer: "P".to_string(),
            native_transfers: Some(vec![native("DEX", "P", 1_500_000_000)]),
            token_transfers: Some(vec![token(Some("USDC"), "P", "DEX", udec128!(10))]),
            ..Default::default()
        };

        let transfers = normalize(&raw, &Network::solana());
        assert_eq!(transfers.len(), 2);

        assert_eq!(transfers[0].asset, AssetId::Native);
        assert_eq!(transfers[0].kind, TransferKind::Native);
        assert_eq!(transfers[0].amount, udec128!(1.5));
        assert_eq!(transfers[0].from, "DEX");
        assert_eq!(transfers[0].to, "P");

        assert_eq!(transfers[1].asset, AssetId::token("USDC"));
        assert_eq!(transfers[1].kind, TransferKind::Token);
        assert_eq!(transfers[1].amount, udec128!(10));
    }

    #[test]
    fn test_normalize_keeps_zero_and_skips_missing_mint() {
        let raw = RawTransaction {
            native_transfers: Some(vec![native("P", "X", 0)]),
            token_transfers: Some(vec![
                token(None, "P", "X", udec128!(1)),
                token(Some("  "), "P", "X", udec128!(1)),
                token(Some("M"), "P", "X", UD128::ZERO),
            ]),
            ..Default::default()
        };

        let transfers = normalize(&raw, &Network::solana());
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].amount, UD128::ZERO);
        assert_eq!(transfers[1].asset, AssetId::token("M"));
    }

    #[test]
    fn test_normalize_custom_native_scale() {
        let raw = RawTransaction {
            native_transfers: Some(vec![native("P", "X", 1234)]),
            ..Default::default()
        };

        let transfers = normalize(&raw, &Network::custom(2, None));
        assert_eq!(transfers[0].amount, udec128!(12.34));
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(&RawTransaction::default(), &Network::solana()).is_empty());
    }
}
