//! Errors at the crate boundary.
//!
//! Classification itself is total and never fails; these errors come from
//! decoding provider payloads, loading configuration and I/O in the
//! binaries.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("environment configuration error: {0}")]
    EnvConfig(#[from] envy::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
