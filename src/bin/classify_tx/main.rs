//! Classifies provider transaction records and prints what each one did.
//!
//! Reads a provider JSON payload (a single record or an array) from a file
//! or stdin and prints one summary line per transaction, or the full
//! classification as JSON.

mod config;

use std::process::exit;

use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tx_semantics::{
    classify::{Classifier, ProcessedTransaction},
    error::Result,
    types::raw,
};

use config::{CliConfig, OutputMode};

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Parse environment configuration
    let env_config = match tx_semantics::config::EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    // Parse CLI arguments
    let cli_config = CliConfig::parse();

    // Convert to classifier config
    let classifier_config = match cli_config.apply(env_config).to_classifier_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            exit(1);
        }
    };

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!(
        fee_strategy = %classifier_config.fee_strategy.kind(),
        native_decimals = classifier_config.network.native_decimals(),
        "Classifier configured"
    );

    let classifier = Classifier::from_config(&classifier_config);

    if let Err(e) = run(&cli_config, &classifier).await {
        error!(%e, "Classification failed");
        exit(1);
    }
}

async fn run(cli: &CliConfig, classifier: &Classifier) -> Result<()> {
    let payload = match cli.input_path() {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut payload = String::new();
            tokio::io::stdin().read_to_string(&mut payload).await?;
            payload
        }
    };

    let raws = raw::decode_history(&payload)?;
    info!(transactions = raws.len(), "Provider payload decoded");

    // CPU-bound, runs on the rayon pool
    let processed = tokio::task::block_in_place(|| classifier.classify_batch(&raws));

    match cli.output {
        OutputMode::Summary => processed.iter().for_each(print_summary),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&processed)?),
    }

    Ok(())
}

fn print_summary(tx: &ProcessedTransaction) {
    let signature = if tx.signature().is_empty() {
        "<unsigned>"
    } else {
        tx.signature()
    };
    println!(
        "{} {} (swaps: {}, fees: {}, network fee: {} native)",
        signature,
        tx.summary(),
        tx.swap_pairs().len(),
        tx.fee_transfers().len(),
        tx.network_fee(),
    );
}
