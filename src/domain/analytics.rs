//! Externally supplied analytics: risk metrics, performance series and
//! per-symbol technical signals, bundled as a snapshot that is replaced whole.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::PortviewError;
use super::holding::normalize_symbol;
use super::signal::{signal_for, TechnicalSignal};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub beta: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub value_at_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: String,
    pub value: f64,
    pub benchmark: f64,
}

impl PerformancePoint {
    pub fn excess(&self) -> f64 {
        self.value - self.benchmark
    }

    /// Period start for the label. `YYYY-MM` is taken as the first of the month.
    pub fn period_start(&self) -> Option<NaiveDate> {
        parse_period(&self.date)
    }
}

pub fn parse_period(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    NaiveDate::parse_from_str(label, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d"))
        .ok()
}

/// Check that every label parses and dates strictly increase.
pub fn validate_performance(points: &[PerformancePoint]) -> Result<(), PortviewError> {
    let mut prev: Option<NaiveDate> = None;
    for point in points {
        let date = point.period_start().ok_or_else(|| PortviewError::Analytics {
            reason: format!(
                "invalid performance date {:?} (expected YYYY-MM or YYYY-MM-DD)",
                point.date
            ),
        })?;
        if prev.is_some_and(|p| date <= p) {
            return Err(PortviewError::Analytics {
                reason: format!("performance dates out of order at {}", point.date),
            });
        }
        prev = Some(date);
    }
    Ok(())
}

fn require_finite(what: &str, value: f64) -> Result<(), PortviewError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PortviewError::Analytics {
            reason: format!("{what} is not a finite number: {value}"),
        })
    }
}

/// Check that every value is finite and RSI lies in `[0, 100]`.
pub fn validate_values(
    signals: &HashMap<String, TechnicalSignal>,
    risk: &RiskMetrics,
    performance: &[PerformancePoint],
) -> Result<(), PortviewError> {
    for (symbol, s) in signals {
        require_finite(&format!("{symbol} MACD"), s.macd)?;
        require_finite(&format!("{symbol} signal line"), s.signal)?;
        if !(0.0..=100.0).contains(&s.rsi) {
            return Err(PortviewError::Analytics {
                reason: format!("RSI for {symbol} out of range: {}", s.rsi),
            });
        }
    }

    require_finite("beta", risk.beta)?;
    require_finite("volatility", risk.volatility)?;
    require_finite("Sharpe ratio", risk.sharpe_ratio)?;
    require_finite("value at risk", risk.value_at_risk)?;

    for p in performance {
        require_finite(&format!("{} value", p.date), p.value)?;
        require_finite(&format!("{} benchmark", p.date), p.benchmark)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsSnapshot {
    pub signals: HashMap<String, TechnicalSignal>,
    pub risk: RiskMetrics,
    pub performance: Vec<PerformancePoint>,
}

impl AnalyticsSnapshot {
    /// Assemble a snapshot, normalizing signal keys and validating every value.
    pub fn new(
        signals: HashMap<String, TechnicalSignal>,
        risk: RiskMetrics,
        performance: Vec<PerformancePoint>,
    ) -> Result<Self, PortviewError> {
        validate_values(&signals, &risk, &performance)?;
        validate_performance(&performance)?;
        let signals = signals
            .into_iter()
            .map(|(symbol, signal)| (normalize_symbol(&symbol), signal))
            .collect();
        Ok(Self {
            signals,
            risk,
            performance,
        })
    }

    /// Signal for `symbol`, or [`TechnicalSignal::NEUTRAL`] when none was supplied.
    pub fn signal(&self, symbol: &str) -> &TechnicalSignal {
        signal_for(&self.signals, symbol)
    }
}
