//! Fixed-point creature weight.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use pokeworld_core::{DomainError, DomainResult, ValueObject};

/// Creature weight with exactly one fractional digit, stored as tenths.
///
/// At most four significant digits, so the representable range is
/// `0.0 ..= 999.9`. Accepts JSON numbers or numeric strings on input and
/// serializes as a one-decimal string (`"59.0"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Weight(i32);

impl Weight {
    pub const MAX_TENTHS: i32 = 9999;

    pub fn from_tenths(tenths: i32) -> DomainResult<Self> {
        if !(0..=Self::MAX_TENTHS).contains(&tenths) {
            return Err(DomainError::validation(
                "weight must be between 0.0 and 999.9",
            ));
        }
        Ok(Self(tenths))
    }

    pub fn parse(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("weight must be a number"));
        }
        let scaled = value * 10.0;
        let tenths = scaled.round();
        if (scaled - tenths).abs() > 1e-6 {
            return Err(DomainError::validation(
                "weight supports at most one decimal place",
            ));
        }
        if !(0.0..=Self::MAX_TENTHS as f64).contains(&tenths) {
            return Err(DomainError::validation(
                "weight must be between 0.0 and 999.9",
            ));
        }
        Ok(Self(tenths as i32))
    }

    pub fn tenths(&self) -> i32 {
        self.0
    }
}

impl ValueObject for Weight {}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl FromStr for Weight {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::validation("weight must be a number"))?;
        Self::parse(value)
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Clients send weight as a bare number or a numeric string; both decode.
#[derive(Deserialize)]
#[serde(untagged)]
enum WeightRepr {
    Num(f64),
    Str(String),
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match WeightRepr::deserialize(deserializer)? {
            WeightRepr::Num(value) => Self::parse(value),
            WeightRepr::Str(raw) => raw.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
