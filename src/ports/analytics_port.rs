//! Analytics provider port trait.

use std::collections::HashMap;

use crate::domain::analytics::{AnalyticsSnapshot, PerformancePoint, RiskMetrics};
use crate::domain::error::PortviewError;
use crate::domain::signal::TechnicalSignal;

/// Source of technical signals, risk metrics and the performance series.
///
/// How the values are produced (polling, push, static fixture) is up to the
/// implementation; the domain only consumes the shapes below.
pub trait AnalyticsPort {
    fn fetch_signals(&self) -> Result<HashMap<String, TechnicalSignal>, PortviewError>;

    fn fetch_risk_metrics(&self) -> Result<RiskMetrics, PortviewError>;

    fn fetch_performance(&self) -> Result<Vec<PerformancePoint>, PortviewError>;

    /// Fetch everything and assemble a validated snapshot.
    fn snapshot(&self) -> Result<AnalyticsSnapshot, PortviewError> {
        AnalyticsSnapshot::new(
            self.fetch_signals()?,
            self.fetch_risk_metrics()?,
            self.fetch_performance()?,
        )
    }
}
