//! A single portfolio position.

use serde::{Deserialize, Serialize};

/// Absolute tolerance used when comparing portfolio weight sums.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub weight: f64,
    pub shares: u64,
}

impl Holding {
    pub fn new(symbol: &str, weight: f64, shares: u64) -> Self {
        Holding {
            symbol: normalize_symbol(symbol),
            weight,
            shares,
        }
    }
}

/// Trim and uppercase a ticker symbol. Idempotent.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
