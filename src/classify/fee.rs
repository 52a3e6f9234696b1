//! Fee detection strategies.
//!
//! The two built-in strategies classify different transfers as fees and
//! are deliberately not reconciled, callers pick one by name:
//!
//! * [`SweepFees`] - one-directional transfers out of the principal to an
//!   account that never pays the principal back. Marked only.
//! * [`FeeAllowlist`] - transfers of a configured fee asset to known
//!   fee-collection accounts. Excluded from everything downstream.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::Deserialize;

use crate::{
    config::ConfigError,
    types::{AccountId, AssetId, AssetTransfer},
};

/// How detected fees affect the rest of classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeDisposition {
    /// Kept out of swap pairing only, still aggregated and eligible as
    /// primary asset.
    Mark,

    /// Removed before aggregation, pairing and primary selection.
    Exclude,
}

/// Pluggable fee detection.
pub trait FeeClassifier {
    /// Indices into `transfers` of the transfers that are fees.
    fn fee_indices(&self, principal: &str, transfers: &[AssetTransfer]) -> Vec<usize>;

    fn disposition(&self) -> FeeDisposition;
}

/// Sweep detection: a transfer out of the principal is a fee when its
/// recipient sends nothing back to the principal in the same transaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepFees;

impl FeeClassifier for SweepFees {
    fn fee_indices(&self, principal: &str, transfers: &[AssetTransfer]) -> Vec<usize> {
        let pays_back: HashSet<&str> = transfers
            .iter()
            .filter(|t| t.is_received_by(principal))
            .map(|t| t.from.as_str())
            .collect();

        transfers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_sent_by(principal) && !pays_back.contains(t.to.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    fn disposition(&self) -> FeeDisposition {
        FeeDisposition::Mark
    }
}

/// Allowlist detection: a transfer is a fee when it moves the fee asset to
/// one of the known fee-collection accounts.
#[derive(Clone, Debug)]
pub struct FeeAllowlist {
    fee_asset: AssetId,
    accounts: HashSet<AccountId>,
}

impl FeeAllowlist {
    pub fn new<I, A>(fee_asset: AssetId, accounts: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AccountId>,
    {
        Self {
            fee_asset,
            accounts: accounts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fee_asset(&self) -> &AssetId {
        &self.fee_asset
    }

    pub fn accounts(&self) -> &HashSet<AccountId> {
        &self.accounts
    }

    pub fn is_fee(&self, transfer: &AssetTransfer) -> bool {
        transfer.asset == self.fee_asset && self.accounts.contains(&transfer.to)
    }
}

impl FeeClassifier for FeeAllowlist {
    fn fee_indices(&self, _principal: &str, transfers: &[AssetTransfer]) -> Vec<usize> {
        transfers
            .iter()
            .enumerate()
            .filter(|(_, t)| self.is_fee(t))
            .map(|(i, _)| i)
            .collect()
    }

    fn disposition(&self) -> FeeDisposition {
        FeeDisposition::Exclude
    }
}

/// Named fee strategy selected by configuration.
#[derive(Clone, Debug, Default)]
pub enum FeeStrategy {
    #[default]
    Sweep,
    Allowlist(FeeAllowlist),
}

impl FeeStrategy {
    pub fn kind(&self) -> FeeStrategyKind {
        match self {
            Self::Sweep => FeeStrategyKind::Sweep,
            Self::Allowlist(_) => FeeStrategyKind::Allowlist,
        }
    }
}

impl FeeClassifier for FeeStrategy {
    fn fee_indices(&self, principal: &str, transfers: &[AssetTransfer]) -> Vec<usize> {
        match self {
            Self::Sweep => SweepFees.fee_indices(principal, transfers),
            Self::Allowlist(allowlist) => allowlist.fee_indices(principal, transfers),
        }
    }

    fn disposition(&self) -> FeeDisposition {
        match self {
            Self::Sweep => SweepFees.disposition(),
            Self::Allowlist(allowlist) => allowlist.disposition(),
        }
    }
}

/// Name of a fee strategy, as used in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStrategyKind {
    #[default]
    Sweep,
    Allowlist,
}

impl FromStr for FeeStrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sweep" => Ok(Self::Sweep),
            "allowlist" => Ok(Self::Allowlist),
            other => Err(ConfigError::UnknownFeeStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for FeeStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sweep => write!(f, "sweep"),
            Self::Allowlist => write!(f, "allowlist"),
        }
    }
}
