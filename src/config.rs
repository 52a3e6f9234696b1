//! Classifier configuration.
//!
//! [`ClassifierConfig`] is the validated, pure configuration the classifier
//! is built from. [`EnvConfig`] loads its raw form from `TXS_`-prefixed
//! environment variables:
//!
//! - `TXS_FEE_STRATEGY` - `sweep` (default) or `allowlist`
//! - `TXS_FEE_ASSET` - fee asset mint, or `native` (default)
//! - `TXS_FEE_ACCOUNTS` - comma separated fee-collection accounts
//! - `TXS_NATIVE_DECIMALS` - native asset decimals (default 9)
//! - `TXS_WRAPPED_NATIVE_MINT` - wrapped native mint, empty to disable

use crate::{
    Network, SOL_DECIMALS, WRAPPED_SOL_MINT,
    classify::{FeeAllowlist, FeeStrategy, FeeStrategyKind},
    types::AssetId,
};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TXS_";

/// Largest native scale a `u64` smallest-unit amount can use.
pub const MAX_NATIVE_DECIMALS: u8 = 18;

/// Validated classifier configuration.
#[derive(Clone, Debug, Default)]
pub struct ClassifierConfig {
    pub network: Network,
    pub fee_strategy: FeeStrategy,
}

/// Environment configuration.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct EnvConfig {
    /// Fee detection strategy
    #[serde(default)]
    pub fee_strategy: FeeStrategyKind,

    /// Fee asset for the allowlist strategy (default: native)
    pub fee_asset: Option<String>,

    /// Fee-collection accounts for the allowlist strategy
    #[serde(default)]
    pub fee_accounts: Vec<String>,

    /// Native asset decimals (default: 9)
    pub native_decimals: Option<u8>,

    /// Wrapped native mint (default: wrapped SOL)
    pub wrapped_native_mint: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    /// Validate and convert into the pure classifier configuration.
    pub fn to_classifier_config(&self) -> Result<ClassifierConfig, ConfigError> {
        let native_decimals = self.native_decimals.unwrap_or(SOL_DECIMALS);
        if native_decimals > MAX_NATIVE_DECIMALS {
            return Err(ConfigError::InvalidNativeDecimals(native_decimals));
        }

        let wrapped_native_mint = match self.wrapped_native_mint.as_deref().map(str::trim) {
            None => Some(WRAPPED_SOL_MINT.to_string()),
            Some("") => None,
            Some(mint) => Some(mint.to_string()),
        };

        let fee_strategy = match self.fee_strategy {
            FeeStrategyKind::Sweep => FeeStrategy::Sweep,
            FeeStrategyKind::Allowlist => {
                let accounts: Vec<&str> = self
                    .fee_accounts
                    .iter()
                    .map(|a| a.trim())
                    .filter(|a| !a.is_empty())
                    .collect();
                if accounts.is_empty() {
                    return Err(ConfigError::EmptyFeeAccounts);
                }

                let fee_asset = self
                    .fee_asset
                    .as_deref()
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map_or(AssetId::Native, AssetId::from);

                FeeStrategy::Allowlist(FeeAllowlist::new(fee_asset, accounts))
            }
        };

        Ok(ClassifierConfig {
            network: Network::custom(native_decimals, wrapped_native_mint),
            fee_strategy,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown fee strategy '{0}', expected 'sweep' or 'allowlist'")]
    UnknownFeeStrategy(String),

    #[error("allowlist fee strategy requires at least one fee account")]
    EmptyFeeAccounts,

    #[error("native decimals {0} exceed the maximum of {MAX_NATIVE_DECIMALS}")]
    InvalidNativeDecimals(u8),
}
