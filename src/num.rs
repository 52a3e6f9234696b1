use fastnum::{
    UD128, bint,
    decimal::{Context, RoundingMode},
};
use serde::{Deserialize, Deserializer, Serializer};
use tracing::warn;

/// Smallest-unit integer to decimal converter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    /// Scales integer smallest units down to decimal units, exactly, with
    /// trailing zeros dropped.
    pub fn from_units(&self, value: u64) -> UD128 {
        let unscaled = bint::UInt::<2>::from_le_slice(&value.to_le_bytes())
            .expect("Converter: u64 -> UInt::<2>");
        UD128::from_parts(
            unscaled,
            -self.decimals,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
        .reduce()
    }
}

/// Parses a decimal amount, zero for anything that is not a finite
/// non-negative decimal.
pub fn parse_decimal(s: &str) -> UD128 {
    match UD128::from_str(s.trim(), Context::default()) {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!(amount = s, "Malformed decimal amount, counting as zero");
            UD128::ZERO
        }
    }
}

/// Parses an integer smallest-unit amount, zero if malformed.
pub fn parse_units(s: &str) -> u64 {
    s.trim().parse().unwrap_or_else(|_| {
        warn!(amount = s, "Malformed integer amount, counting as zero");
        0
    })
}

/// Lenient decimal field: accepts JSON numbers and numeric strings,
/// coerces everything else (including `null`) to zero.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<UD128, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(serde_json::Value::String(s)) => parse_decimal(&s),
        None | Some(serde_json::Value::Null) => UD128::ZERO,
        Some(other) => {
            warn!(amount = %other, "Non-numeric decimal amount, counting as zero");
            UD128::ZERO
        }
    })
}

/// Lenient smallest-unit field, see [`deserialize_decimal`].
pub fn deserialize_units<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => match n.as_u64() {
            Some(units) => units,
            None => parse_units(&n.to_string()),
        },
        Some(serde_json::Value::String(s)) => parse_units(&s),
        None | Some(serde_json::Value::Null) => 0,
        Some(other) => {
            warn!(amount = %other, "Non-numeric integer amount, counting as zero");
            0
        }
    })
}

/// Renders a decimal as a string to keep full precision in JSON.
pub fn serialize_decimal<S>(value: &UD128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}
