//! Pending add-holding input, validated before it reaches the registry.

use super::error::{InputError, PortviewError};
use super::registry::HoldingRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldingInput {
    pub symbol: String,
    pub shares: String,
}

impl HoldingInput {
    pub fn new(symbol: &str, shares: &str) -> Self {
        HoldingInput {
            symbol: symbol.to_string(),
            shares: shares.to_string(),
        }
    }

    pub fn clear(&mut self) {
        self.symbol.clear();
        self.shares.clear();
    }

    /// Add the pending holding to `registry`, clearing the input on success.
    ///
    /// Malformed input is rejected before the registry is touched. On an
    /// allocation failure the input is kept so the user can amend it.
    pub fn submit(&mut self, registry: &mut HoldingRegistry) -> Result<(), PortviewError> {
        if self.symbol.trim().is_empty() {
            return Err(InputError::EmptySymbol.into());
        }
        let shares = parse_shares(&self.shares)?;
        registry.add_holding(&self.symbol, shares)?;
        self.clear();
        Ok(())
    }
}

/// Parse a share count typed by the user.
pub fn parse_shares(text: &str) -> Result<u64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyShares);
    }
    trimmed.parse::<u64>().map_err(|_| InputError::InvalidShares {
        input: text.to_string(),
    })
}
