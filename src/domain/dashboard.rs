//! Rendering-ready dashboard state.
//!
//! [`Dashboard`] owns the registry, the pending input and the latest analytics
//! snapshot. [`DashboardView`] is what a presenter draws.

use super::analytics::{AnalyticsSnapshot, PerformancePoint, RiskMetrics};
use super::error::PortviewError;
use super::input::HoldingInput;
use super::registry::{HoldingRegistry, Removal};
use super::signal::{classify, Alert, Classification, TechnicalSignal};

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow {
    pub symbol: String,
    pub weight: f64,
    pub shares: u64,
    pub signal: TechnicalSignal,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub rows: Vec<HoldingRow>,
    pub alerts: Vec<Alert>,
    pub risk: RiskMetrics,
    pub performance: Vec<PerformancePoint>,
}

impl DashboardView {
    pub fn build(registry: &HoldingRegistry, snapshot: &AnalyticsSnapshot) -> Self {
        let rows: Vec<HoldingRow> = registry
            .holdings()
            .iter()
            .map(|h| {
                let signal = *snapshot.signal(&h.symbol);
                HoldingRow {
                    symbol: h.symbol.clone(),
                    weight: h.weight,
                    shares: h.shares,
                    signal,
                    classification: classify(&signal),
                }
            })
            .collect();

        let alerts = rows
            .iter()
            .filter_map(|row| {
                row.classification.alert.map(|kind| Alert {
                    symbol: row.symbol.clone(),
                    kind,
                    rsi: row.signal.rsi,
                })
            })
            .collect();

        DashboardView {
            rows,
            alerts,
            risk: snapshot.risk,
            performance: snapshot.performance.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub registry: HoldingRegistry,
    pub input: HoldingInput,
    snapshot: AnalyticsSnapshot,
}

impl Dashboard {
    pub fn new(registry: HoldingRegistry, snapshot: AnalyticsSnapshot) -> Self {
        Dashboard {
            registry,
            input: HoldingInput::default(),
            snapshot,
        }
    }

    /// Submit the pending input as a new holding.
    pub fn add_holding(&mut self) -> Result<(), PortviewError> {
        self.input.submit(&mut self.registry)
    }

    pub fn remove_holding(&mut self, symbol: &str) -> Removal {
        self.registry.remove_holding(symbol)
    }

    /// Replace the analytics in full. Holdings are untouched.
    pub fn apply_snapshot(&mut self, snapshot: AnalyticsSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &AnalyticsSnapshot {
        &self.snapshot
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::build(&self.registry, &self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::Holding;
    use crate::domain::signal::{AlertKind, Trend};
    use std::collections::HashMap;

    fn sig(rsi: f64, trend: Trend) -> TechnicalSignal {
        TechnicalSignal {
            rsi,
            macd: 0.5,
            signal: 0.4,
            trend,
        }
    }

    fn sample_dashboard() -> Dashboard {
        let registry = HoldingRegistry::from_holdings(vec![
            Holding::new("AAPL", 0.4, 150),
            Holding::new("MSFT", 0.3, 120),
            Holding::new("GOOG", 0.3, 50),
        ])
        .unwrap();

        let mut signals = HashMap::new();
        signals.insert("AAPL".to_string(), sig(65.0, Trend::Bullish));
        signals.insert("MSFT".to_string(), sig(72.0, Trend::Neutral));
        signals.insert("TSLA".to_string(), sig(20.0, Trend::Bearish));

        let snapshot = AnalyticsSnapshot::new(
            signals,
            RiskMetrics {
                beta: 1.15,
                volatility: 0.22,
                sharpe_ratio: 2.11,
                value_at_risk: 0.15,
            },
            vec![PerformancePoint {
                date: "2024-01".into(),
                value: 100.0,
                benchmark: 100.0,
            }],
        )
        .unwrap();

        Dashboard::new(registry, snapshot)
    }

    #[test]
    fn view_has_row_per_holding_in_order() {
        let view = sample_dashboard().view();
        let symbols: Vec<&str> = view.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "GOOG"]);
        assert_eq!(view.rows[0].classification.trend, Trend::Bullish);
    }

    #[test]
    fn view_substitutes_neutral_for_missing_signal() {
        let view = sample_dashboard().view();
        let goog = &view.rows[2];
        assert_eq!(goog.signal, TechnicalSignal::NEUTRAL);
        assert_eq!(goog.classification.alert, None);
    }

    #[test]
    fn view_alerts_only_for_held_symbols() {
        let view = sample_dashboard().view();
        assert_eq!(view.alerts.len(), 1);
        assert_eq!(view.alerts[0].symbol, "MSFT");
        assert_eq!(view.alerts[0].kind, AlertKind::Overbought);
    }

    #[test]
    fn view_passes_through_risk_and_performance() {
        let view = sample_dashboard().view();
        assert!((view.risk.beta - 1.15).abs() < f64::EPSILON);
        assert_eq!(view.performance.len(), 1);
    }

    #[test]
    fn apply_snapshot_leaves_holdings_untouched() {
        let mut dashboard = sample_dashboard();
        let before = dashboard.registry.clone();

        dashboard.apply_snapshot(AnalyticsSnapshot::default());

        assert_eq!(dashboard.registry, before);
        assert!(dashboard.snapshot().signals.is_empty());
        assert!(dashboard.view().alerts.is_empty());
    }

    #[test]
    fn add_and_remove_through_dashboard() {
        let mut dashboard = sample_dashboard();
        assert_eq!(dashboard.remove_holding("GOOG"), Removal::Renormalized);

        dashboard.input = HoldingInput::new("tsla", "10");
        assert!(dashboard.add_holding().is_err());
        assert_eq!(dashboard.input.symbol, "tsla");

        dashboard.remove_holding("AAPL");
        dashboard.remove_holding("MSFT");
        dashboard.add_holding().unwrap();
        assert_eq!(dashboard.input, HoldingInput::default());

        let view = dashboard.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.alerts[0].kind, AlertKind::Oversold);
    }
}
