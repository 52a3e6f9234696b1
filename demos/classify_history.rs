//! Example: Stream a provider history file through the classification feed.
//!
//! Run with: cargo run --example classify_history -- history.json

use tokio::sync::mpsc;
use tx_semantics::{classify::Classifier, config::EnvConfig, feed, types::raw};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: classify_history <history.json>")?;

    let config = EnvConfig::from_env()?.to_classifier_config()?;
    let history = raw::decode_history(&tokio::fs::read_to_string(&path).await?)?;
    println!("Classifying {} transaction(s) from {}\n", history.len(), path);

    let (tx, source) = mpsc::channel(16);
    let (mut rx, handle) = feed::start(Classifier::from_config(&config), source);

    tokio::spawn(async move {
        for raw in history {
            if tx.send(raw).await.is_err() {
                break;
            }
        }
    });

    while let Some(processed) = rx.recv().await {
        println!("{} {}", processed.signature(), processed.summary());
        for pair in processed.swap_pairs() {
            println!(
                "  swap {} {} -> {} {} via {}",
                pair.amount_a, pair.asset_a, pair.amount_b, pair.asset_b, pair.intermediary
            );
        }
        for fee in processed.fee_transfers() {
            println!(
                "  fee {} {} -> {}",
                fee.transfer.amount, fee.transfer.asset, fee.transfer.to
            );
        }
        if let Some(repeat) = processed.repeat_trade() {
            println!(
                "  repeat: spend {} {} for {}",
                repeat.input_amount, repeat.input_asset, repeat.output_asset
            );
        }
    }

    println!("\n{} transaction(s) classified", handle.await?);
    Ok(())
}
