//! Weight allocation rules.
//!
//! - Residual: the weight still unallocated, `1 - sum(weights)`
//! - Renormalize: scale every weight by `1 / sum(weights)` so the set sums to 1
//!
//! Both are only reachable through [`HoldingRegistry`](super::registry::HoldingRegistry).

pub(crate) fn residual(weights: &[f64]) -> f64 {
    1.0 - weights.iter().sum::<f64>()
}

/// Returns a new weight vector summing to 1. Empty input, or input summing to
/// zero, is returned unchanged.
pub(crate) fn renormalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total == 0.0 {
        return weights.to_vec();
    }
    weights.iter().map(|w| w / total).collect()
}
