//! Built-in sample analytics, used when no external provider is configured.

use std::collections::HashMap;

use crate::domain::analytics::{PerformancePoint, RiskMetrics};
use crate::domain::error::PortviewError;
use crate::domain::holding::Holding;
use crate::domain::signal::{TechnicalSignal, Trend};
use crate::ports::analytics_port::AnalyticsPort;

const SIGNALS: [(&str, f64, f64, f64, Trend); 6] = [
    ("AAPL", 65.0, 2.3, 1.8, Trend::Bullish),
    ("NVDA", 60.0, 1.5, 1.2, Trend::Bullish),
    ("MSFT", 72.0, 1.2, 1.5, Trend::Neutral),
    ("GOOG", 45.0, -0.5, -0.2, Trend::Bearish),
    ("AMZN", 58.0, 0.8, 0.6, Trend::Bullish),
    ("META", 50.0, 0.3, 0.4, Trend::Neutral),
];

const PERFORMANCE: [(&str, f64, f64); 7] = [
    ("2024-01", 100.0, 100.0),
    ("2024-02", 105.0, 103.0),
    ("2024-03", 103.0, 102.0),
    ("2024-04", 108.0, 105.0),
    ("2024-05", 112.0, 107.0),
    ("2024-06", 110.0, 106.0),
    ("2024-07", 115.0, 108.0),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAnalytics;

impl FixtureAnalytics {
    /// Sample holdings matching the fixture signals.
    pub fn sample_holdings() -> Vec<Holding> {
        vec![
            Holding::new("AAPL", 0.20, 150),
            Holding::new("NVDA", 0.15, 80),
            Holding::new("MSFT", 0.20, 120),
            Holding::new("GOOG", 0.10, 50),
            Holding::new("AMZN", 0.15, 70),
            Holding::new("META", 0.20, 200),
        ]
    }
}

impl AnalyticsPort for FixtureAnalytics {
    fn fetch_signals(&self) -> Result<HashMap<String, TechnicalSignal>, PortviewError> {
        Ok(SIGNALS
            .iter()
            .map(|&(symbol, rsi, macd, signal, trend)| {
                (
                    symbol.to_string(),
                    TechnicalSignal {
                        rsi,
                        macd,
                        signal,
                        trend,
                    },
                )
            })
            .collect())
    }

    fn fetch_risk_metrics(&self) -> Result<RiskMetrics, PortviewError> {
        Ok(RiskMetrics {
            beta: 1.15,
            volatility: 0.22,
            sharpe_ratio: 2.11,
            value_at_risk: 0.15,
        })
    }

    fn fetch_performance(&self) -> Result<Vec<PerformancePoint>, PortviewError> {
        Ok(PERFORMANCE
            .iter()
            .map(|&(date, value, benchmark)| PerformancePoint {
                date: date.to_string(),
                value,
                benchmark,
            })
            .collect())
    }
}
