use fastnum::udec128;
use tx_semantics::{
    Network, WRAPPED_SOL_MINT,
    classify::{Classifier, FeeAllowlist, FeeStrategy, ProcessedTransaction},
    types::{AssetAmount, AssetId, raw},
};

const HISTORY: &str = include_str!("fixtures/history.json");
const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn classify(classifier: &Classifier) -> Vec<ProcessedTransaction> {
    let history = raw::decode_history(HISTORY).unwrap();
    classifier.classify_batch(&history)
}

fn by_signature<'a>(txs: &'a [ProcessedTransaction], signature: &str) -> &'a ProcessedTransaction {
    txs.iter()
        .find(|tx| tx.signature() == signature)
        .unwrap_or_else(|| panic!("{signature} classified"))
}

#[test]
fn test_history_keeps_provider_order() {
    let txs = classify(&Classifier::default());
    let signatures: Vec<_> = txs.iter().map(|tx| tx.signature()).collect();
    assert_eq!(
        signatures,
        vec![
            "swapWrappedSol",
            "plainTransfer",
            "emptyTransfers",
            "swapWithPlatformFee"
        ]
    );
}

/// Native SOL reported both as a native transfer and as a wrapped SOL token
/// transfer counts once.
#[test]
fn test_wrapped_sol_swap() {
    let txs = classify(&Classifier::default());
    let tx = by_signature(&txs, "swapWrappedSol");

    assert_eq!(tx.principal(), "Principal111");
    assert_eq!(tx.slot(), 250000001);
    assert_eq!(tx.timestamp(), 1700000001);
    assert_eq!(tx.network_fee(), udec128!(0.000005));
    assert_eq!(tx.transfers().len(), 3);

    assert_eq!(tx.outgoing().len(), 1);
    assert_eq!(tx.outgoing().get(&AssetId::Native), Some(udec128!(2)));
    assert!(!tx.outgoing().contains(&AssetId::token(WRAPPED_SOL_MINT)));
    assert_eq!(tx.incoming().get(&AssetId::token(USDC)), Some(udec128!(300.5)));

    assert_eq!(tx.swap_pairs().len(), 1);
    assert_eq!(tx.swap_pairs()[0].intermediary, "Pool111");
    assert_eq!(
        tx.primary_outgoing(),
        Some(&AssetAmount::new(AssetId::Native, udec128!(2)))
    );
    assert_eq!(
        tx.primary_incoming(),
        Some(&AssetAmount::new(AssetId::token(USDC), udec128!(300.5)))
    );
    assert_eq!(tx.summary().to_string(), format!("sent 2 native, received 300.5 {USDC}"));
}

#[test]
fn test_plain_transfer() {
    let txs = classify(&Classifier::default());
    let tx = by_signature(&txs, "plainTransfer");

    assert!(!tx.is_swap());
    assert_eq!(tx.fee_transfers().len(), 1);
    assert_eq!(tx.summary().to_string(), "sent 0.15 native");
    assert_eq!(tx.repeat_trade(), None);
}

#[test]
fn test_empty_record() {
    let txs = classify(&Classifier::default());
    let tx = by_signature(&txs, "emptyTransfers");

    assert!(tx.transfers().is_empty());
    assert_eq!(tx.network_fee(), udec128!(0.000005));
    assert_eq!(tx.primary_outgoing(), None);
    assert_eq!(tx.primary_incoming(), None);
}

#[test]
fn test_platform_fee_under_both_strategies() {
    let swept = classify(&Classifier::default());
    let tx = by_signature(&swept, "swapWithPlatformFee");

    // Token transfer without a mint is dropped.
    assert_eq!(tx.transfers().len(), 3);
    assert_eq!(tx.fee_transfers().len(), 1);
    assert_eq!(tx.fee_transfers()[0].transfer.to, "FeeVault111");
    assert_eq!(tx.outgoing().get(&AssetId::Native), Some(udec128!(0.001)));
    assert!(tx.is_circular(&AssetId::Native));

    let repeat = tx.repeat_trade().expect("repeat trade");
    assert_eq!(repeat.input_asset, AssetId::token("BonkMint111"));
    assert_eq!(repeat.input_amount, udec128!(75));
    assert_eq!(repeat.output_asset, AssetId::Native);

    let allowlist = Classifier::new(
        Network::solana(),
        FeeStrategy::Allowlist(FeeAllowlist::new(AssetId::Native, ["FeeVault111"])),
    );
    let listed = classify(&allowlist);
    let tx = by_signature(&listed, "swapWithPlatformFee");

    assert_eq!(tx.fee_transfers().len(), 1);
    assert_eq!(tx.outgoing().get(&AssetId::Native), None);
    assert!(tx.circular().is_empty());
    assert_eq!(tx.swap_pairs().len(), 1);
    assert_eq!(
        tx.primary_incoming(),
        Some(&AssetAmount::new(AssetId::Native, udec128!(0.5)))
    );
}

#[test]
fn test_json_output_contract() {
    let txs = classify(&Classifier::default());
    let value = serde_json::to_value(by_signature(&txs, "swapWrappedSol")).unwrap();

    assert_eq!(value["signature"], "swapWrappedSol");
    assert_eq!(value["networkFee"], "0.000005");
    assert_eq!(value["outgoing"]["native"], "2");
    assert_eq!(value["incoming"][USDC], "300.5");
    assert_eq!(value["primaryOutgoing"]["asset"], "native");
    assert_eq!(value["primaryIncoming"]["amount"], "300.5");
    assert_eq!(value["swapPairs"][0]["assetA"], "native");
    assert_eq!(value["transfers"][0]["kind"], "native");
}
