//! Monetary amounts.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when a fare amount can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount: {0:?}")]
pub struct InvalidAmount(pub String);

/// A fare in rupees.
///
/// Whole amounts serialize as JSON integers (`150`), others as decimals
/// (`150.5`), matching how the fare tables publish them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Wrap a finite value.
    pub fn new(value: f64) -> Result<Self, InvalidAmount> {
        if value.is_finite() {
            Ok(Amount(value))
        } else {
            Err(InvalidAmount(value.to_string()))
        }
    }

    /// Parse an amount from text such as `"150"` or `" 87.50 "`.
    pub fn parse(s: &str) -> Result<Self, InvalidAmount> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(|v| Amount::new(v).ok())
            .ok_or_else(|| InvalidAmount(s.to_string()))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Absolute difference between two anchor amounts.
    pub fn abs_diff(self, other: Amount) -> Amount {
        Amount((self.0 - other.0).abs())
    }

    /// Format with exactly two decimal places, e.g. `"150.00"`.
    pub fn to_fixed_2(self) -> String {
        format!("{:.2}", self.0)
    }

    fn as_whole(self) -> Option<i64> {
        let whole = self.0 as i64;
        (whole as f64 == self.0).then_some(whole)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_whole() {
            Some(whole) => write!(f, "{whole}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_whole() {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}
