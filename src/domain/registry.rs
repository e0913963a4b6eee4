//! Holding registry: the ordered set of holdings and its weight-sum invariant.
//!
//! Whenever the registry is non-empty its weights sum to 1 within
//! [`WEIGHT_TOLERANCE`], except after a remove that leaves only zero-weight
//! holdings (see [`Removal::Degenerate`]). Every mutation builds the next
//! holding vector first and swaps it in whole, so a failed operation leaves
//! the registry exactly as it was.

use std::collections::HashSet;

use super::allocation::{renormalize, residual};
use super::error::AllocationError;
use super::holding::{normalize_symbol, Holding, WEIGHT_TOLERANCE};

/// Outcome of [`HoldingRegistry::remove_holding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// No holding had that symbol; nothing changed.
    NotFound,
    /// The last holding was removed.
    Emptied,
    /// Remaining weights were rescaled to sum to 1.
    Renormalized,
    /// Only zero-weight holdings remain, so weights were left at 0.
    Degenerate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingRegistry {
    holdings: Vec<Holding>,
}

impl HoldingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from seed holdings, e.g. from config.
    ///
    /// Symbols are normalized and must be unique. Weights must lie in `[0, 1]`
    /// and, for a non-empty seed, sum to 1 within [`WEIGHT_TOLERANCE`].
    pub fn from_holdings(seed: Vec<Holding>) -> Result<Self, AllocationError> {
        Self::build(seed, false)
    }

    /// Rebuild a registry from previously saved holdings.
    ///
    /// Accepts everything [`from_holdings`](Self::from_holdings) does, plus the
    /// all-zero state a remove can leave behind ([`Removal::Degenerate`]).
    pub fn restore(saved: Vec<Holding>) -> Result<Self, AllocationError> {
        Self::build(saved, true)
    }

    fn build(input: Vec<Holding>, allow_degenerate: bool) -> Result<Self, AllocationError> {
        let mut seen = HashSet::new();
        let mut holdings = Vec::with_capacity(input.len());

        for h in input {
            let symbol = normalize_symbol(&h.symbol);
            if symbol.is_empty() {
                return Err(AllocationError::InvalidHolding {
                    symbol,
                    reason: "symbol is empty".into(),
                });
            }
            if !h.weight.is_finite() || !(0.0..=1.0).contains(&h.weight) {
                return Err(AllocationError::InvalidHolding {
                    symbol,
                    reason: format!("weight {} outside [0, 1]", h.weight),
                });
            }
            if !seen.insert(symbol.clone()) {
                return Err(AllocationError::DuplicateSymbol { symbol });
            }
            holdings.push(Holding {
                symbol,
                weight: h.weight,
                shares: h.shares,
            });
        }

        let registry = Self { holdings };
        if registry.is_empty() || (allow_degenerate && registry.is_degenerate()) {
            return Ok(registry);
        }

        let total = registry.total_weight();
        if total > 1.0 + WEIGHT_TOLERANCE {
            return Err(AllocationError::OverAllocated { total });
        }
        if total < 1.0 - WEIGHT_TOLERANCE {
            return Err(AllocationError::UnderAllocated { total });
        }
        Ok(registry)
    }

    /// Append a holding that absorbs the residual weight.
    ///
    /// Existing weights are never touched by an add. Fails with
    /// [`AllocationError::NoCapacity`] when the residual is not positive.
    pub fn add_holding(&mut self, symbol: &str, shares: u64) -> Result<(), AllocationError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(AllocationError::InvalidHolding {
                symbol,
                reason: "symbol is empty".into(),
            });
        }

        let remaining = self.residual_weight();
        if remaining <= 0.0 {
            return Err(AllocationError::NoCapacity {
                residual: remaining,
            });
        }
        if self.contains(&symbol) {
            return Err(AllocationError::DuplicateSymbol { symbol });
        }

        self.holdings.push(Holding {
            symbol,
            weight: remaining,
            shares,
        });
        Ok(())
    }

    /// Remove the holding with `symbol` and rescale the rest to sum to 1.
    pub fn remove_holding(&mut self, symbol: &str) -> Removal {
        let symbol = normalize_symbol(symbol);
        if !self.contains(&symbol) {
            return Removal::NotFound;
        }

        let remaining: Vec<&Holding> = self
            .holdings
            .iter()
            .filter(|h| h.symbol != symbol)
            .collect();

        if remaining.is_empty() {
            self.holdings = Vec::new();
            return Removal::Emptied;
        }

        let weights: Vec<f64> = remaining.iter().map(|h| h.weight).collect();
        let degenerate = weights.iter().sum::<f64>() == 0.0;
        let next: Vec<Holding> = remaining
            .into_iter()
            .zip(renormalize(&weights))
            .map(|(h, weight)| Holding {
                weight,
                ..h.clone()
            })
            .collect();

        self.holdings = next;
        if degenerate {
            Removal::Degenerate
        } else {
            Removal::Renormalized
        }
    }

    /// Holdings in insertion order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        let symbol = normalize_symbol(symbol);
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }

    pub fn residual_weight(&self) -> f64 {
        let weights: Vec<f64> = self.holdings.iter().map(|h| h.weight).collect();
        residual(&weights)
    }

    /// Non-empty with every weight at zero.
    pub fn is_degenerate(&self) -> bool {
        !self.holdings.is_empty() && self.holdings.iter().all(|h| h.weight == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn registry(seed: &[(&str, f64, u64)]) -> HoldingRegistry {
        HoldingRegistry::from_holdings(
            seed.iter()
                .map(|&(s, w, n)| Holding::new(s, w, n))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn new_registry_is_empty() {
        let reg = HoldingRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert_abs_diff_eq!(reg.total_weight(), 0.0);
        assert_abs_diff_eq!(reg.residual_weight(), 1.0);
        assert!(!reg.is_degenerate());
    }

    #[test]
    fn add_to_empty_takes_full_weight() {
        let mut reg = HoldingRegistry::new();
        reg.add_holding("aapl", 10).unwrap();

        assert_eq!(reg.len(), 1);
        let h = &reg.holdings()[0];
        assert_eq!(h.symbol, "AAPL");
        assert_eq!(h.shares, 10);
        assert_abs_diff_eq!(h.weight, 1.0);
    }

    /// `[CASH 0.0]`, reached by removing the only weighted holding.
    fn degenerate() -> HoldingRegistry {
        let mut reg = registry(&[("AAPL", 1.0, 10), ("CASH", 0.0, 0)]);
        assert_eq!(reg.remove_holding("AAPL"), Removal::Degenerate);
        reg
    }

    #[test]
    fn add_absorbs_residual_without_touching_existing() {
        let mut reg = degenerate();
        reg.add_holding("AMZN", 30).unwrap();

        let weights: Vec<f64> = reg.holdings().iter().map(|h| h.weight).collect();
        assert_eq!(weights, vec![0.0, 1.0]);
        assert_abs_diff_eq!(reg.total_weight(), 1.0);
    }

    #[test]
    fn add_when_fully_allocated_is_rejected() {
        let mut reg = registry(&[("AAPL", 1.0, 10)]);
        let before = reg.clone();

        let err = reg.add_holding("NVDA", 5).unwrap_err();
        assert!(matches!(err, AllocationError::NoCapacity { .. }));
        assert_eq!(reg, before);
    }

    #[test]
    fn add_duplicate_symbol_is_rejected() {
        let mut reg = degenerate();
        let before = reg.clone();

        let err = reg.add_holding("cash", 5).unwrap_err();
        assert_eq!(
            err,
            AllocationError::DuplicateSymbol {
                symbol: "CASH".into()
            }
        );
        assert_eq!(reg, before);
    }

    #[test]
    fn add_existing_symbol_when_full_reports_no_capacity() {
        let mut reg = registry(&[("AAPL", 1.0, 10)]);
        assert!(matches!(
            reg.add_holding("AAPL", 5),
            Err(AllocationError::NoCapacity { .. })
        ));
    }

    #[test]
    fn add_empty_symbol_is_rejected() {
        let mut reg = HoldingRegistry::new();
        assert!(matches!(
            reg.add_holding("   ", 5),
            Err(AllocationError::InvalidHolding { .. })
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn add_normalizes_symbol_identically() {
        let mut lower = HoldingRegistry::new();
        lower.add_holding("aapl", 10).unwrap();
        let mut upper = HoldingRegistry::new();
        upper.add_holding("AAPL", 10).unwrap();

        assert_eq!(lower.holdings(), upper.holdings());
    }

    #[test]
    fn remove_renormalizes_remaining() {
        let mut reg = registry(&[("AAPL", 0.5, 10), ("MSFT", 0.5, 10)]);
        assert_eq!(reg.remove_holding("AAPL"), Removal::Renormalized);

        assert_eq!(reg.holdings(), &[Holding::new("MSFT", 1.0, 10)]);
    }

    #[test]
    fn remove_keeps_order_and_proportions() {
        let mut reg = registry(&[
            ("AAPL", 0.2, 150),
            ("NVDA", 0.15, 80),
            ("MSFT", 0.2, 120),
            ("GOOG", 0.1, 50),
            ("AMZN", 0.15, 70),
            ("META", 0.2, 200),
        ]);
        reg.remove_holding("MSFT");

        let symbols: Vec<&str> = reg.holdings().iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "NVDA", "GOOG", "AMZN", "META"]);
        assert_abs_diff_eq!(reg.total_weight(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(reg.get("AAPL").unwrap().weight, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(reg.get("GOOG").unwrap().weight, 0.125, epsilon = 1e-12);
    }

    #[test]
    fn remove_last_holding_empties_registry() {
        let mut reg = registry(&[("AAPL", 1.0, 10)]);
        assert_eq!(reg.remove_holding("AAPL"), Removal::Emptied);
        assert!(reg.is_empty());
        assert_abs_diff_eq!(reg.total_weight(), 0.0);
    }

    #[test]
    fn remove_unknown_symbol_is_noop() {
        let mut reg = registry(&[("AAPL", 0.6, 10), ("MSFT", 0.4, 10)]);
        let before = reg.clone();

        assert_eq!(reg.remove_holding("TSLA"), Removal::NotFound);
        assert_eq!(reg, before);
    }

    #[test]
    fn remove_normalizes_argument() {
        let mut reg = registry(&[("AAPL", 0.5, 10), ("MSFT", 0.5, 10)]);
        assert_eq!(reg.remove_holding("aapl"), Removal::Renormalized);
        assert!(!reg.contains("AAPL"));
    }

    #[test]
    fn remove_leaving_zero_weights_is_degenerate() {
        let mut reg = registry(&[("AAPL", 1.0, 10), ("CASH", 0.0, 0), ("BOND", 0.0, 0)]);
        assert_eq!(reg.remove_holding("AAPL"), Removal::Degenerate);

        assert_eq!(reg.len(), 2);
        assert!(reg.holdings().iter().all(|h| h.weight == 0.0));
        assert!(reg.is_degenerate());
    }

    #[test]
    fn degenerate_registry_accepts_new_holding() {
        let mut reg = degenerate();
        reg.add_holding("AAPL", 10).unwrap();
        assert_abs_diff_eq!(reg.get("AAPL").unwrap().weight, 1.0);
        assert!(!reg.is_degenerate());
    }

    #[test]
    fn add_then_remove_restores_distribution() {
        let mut reg = degenerate();
        let before = reg.clone();

        reg.add_holding("X", 1).unwrap();
        reg.remove_holding("X");
        assert_eq!(reg, before);

        let mut empty = HoldingRegistry::new();
        empty.add_holding("X", 1).unwrap();
        empty.remove_holding("X");
        assert!(empty.is_empty());
    }

    #[test]
    fn from_holdings_rejects_duplicates() {
        let result = HoldingRegistry::from_holdings(vec![
            Holding::new("AAPL", 0.5, 1),
            Holding::new("aapl", 0.5, 1),
        ]);
        assert!(matches!(
            result,
            Err(AllocationError::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn from_holdings_rejects_over_allocation() {
        let result = HoldingRegistry::from_holdings(vec![
            Holding::new("AAPL", 0.7, 1),
            Holding::new("MSFT", 0.5, 1),
        ]);
        assert!(matches!(result, Err(AllocationError::OverAllocated { .. })));
    }

    #[test]
    fn from_holdings_rejects_under_allocation() {
        let result = HoldingRegistry::from_holdings(vec![
            Holding::new("AAPL", 0.20, 150),
            Holding::new("NVDA", 0.15, 80),
        ]);
        match result {
            Err(AllocationError::UnderAllocated { total }) => {
                assert_abs_diff_eq!(total, 0.35, epsilon = 1e-12)
            }
            other => panic!("expected UnderAllocated, got {other:?}"),
        }
    }

    #[test]
    fn from_holdings_rejects_all_zero_seed() {
        let result = HoldingRegistry::from_holdings(vec![Holding::new("CASH", 0.0, 0)]);
        assert!(matches!(
            result,
            Err(AllocationError::UnderAllocated { .. })
        ));
    }

    #[test]
    fn from_holdings_accepts_empty_seed() {
        assert!(HoldingRegistry::from_holdings(vec![]).unwrap().is_empty());
    }

    #[test]
    fn restore_accepts_saved_degenerate_state() {
        let saved = degenerate().holdings().to_vec();
        let reg = HoldingRegistry::restore(saved).unwrap();
        assert!(reg.is_degenerate());
    }

    #[test]
    fn restore_still_rejects_partial_allocation() {
        let result = HoldingRegistry::restore(vec![
            Holding::new("AAPL", 0.6, 10),
            Holding::new("CASH", 0.0, 0),
        ]);
        assert!(matches!(
            result,
            Err(AllocationError::UnderAllocated { .. })
        ));
    }

    #[test]
    fn from_holdings_rejects_out_of_range_weight() {
        for weight in [-0.1, 1.5, f64::NAN] {
            let result = HoldingRegistry::from_holdings(vec![Holding::new("AAPL", weight, 1)]);
            assert!(
                matches!(result, Err(AllocationError::InvalidHolding { .. })),
                "weight {weight} should be rejected"
            );
        }
    }

    #[test]
    fn from_holdings_allows_drift_within_tolerance() {
        let third = 1.0 / 3.0 + 1e-12;
        let reg = HoldingRegistry::from_holdings(vec![
            Holding::new("A", third, 1),
            Holding::new("B", third, 1),
            Holding::new("C", third, 1),
        ]);
        assert!(reg.is_ok());
    }
}
