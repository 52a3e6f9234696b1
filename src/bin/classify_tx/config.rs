//! Configuration for the classify_tx binary.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): fee strategy, network
//! - CLI arguments: input, output mode, and overrides of the environment

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tx_semantics::{classify::FeeStrategyKind, config::EnvConfig};

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One summary line per transaction
    #[default]
    Summary,
    /// Classified transactions as a JSON array
    Json,
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "classify_tx")]
#[command(about = "Classify the transfers of provider transaction records")]
pub struct CliConfig {
    /// Provider JSON file (single record or array), stdin if omitted or "-"
    pub input: Option<PathBuf>,

    /// Output mode: summary or json
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputMode,

    /// Fee strategy (sweep or allowlist), overrides TXS_FEE_STRATEGY
    #[arg(long)]
    pub fee_strategy: Option<FeeStrategyKind>,

    /// Fee asset mint or "native", overrides TXS_FEE_ASSET
    #[arg(long)]
    pub fee_asset: Option<String>,

    /// Fee-collection accounts (comma-separated), overrides TXS_FEE_ACCOUNTS
    #[arg(long, value_delimiter = ',')]
    pub fee_accounts: Vec<String>,
}

impl CliConfig {
    /// Input path, `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }

    /// Applies CLI overrides on top of the environment configuration.
    pub fn apply(&self, mut env: EnvConfig) -> EnvConfig {
        if let Some(kind) = self.fee_strategy {
            env.fee_strategy = kind;
        }
        if let Some(asset) = &self.fee_asset {
            env.fee_asset = Some(asset.clone());
        }
        if !self.fee_accounts.is_empty() {
            env.fee_accounts = self.fee_accounts.clone();
        }
        env
    }
}
