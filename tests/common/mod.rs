#![allow(dead_code)]

use portview::domain::analytics::{PerformancePoint, RiskMetrics};
use portview::domain::error::PortviewError;
use portview::domain::holding::Holding;
use portview::domain::registry::HoldingRegistry;
use portview::domain::signal::{TechnicalSignal, Trend};
use portview::ports::analytics_port::AnalyticsPort;
use portview::ports::holding_store_port::HoldingStorePort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockAnalytics {
    pub signals: HashMap<String, TechnicalSignal>,
    pub risk: RiskMetrics,
    pub performance: Vec<PerformancePoint>,
    pub error: Option<String>,
}

impl MockAnalytics {
    pub fn new() -> Self {
        Self {
            signals: HashMap::new(),
            risk: sample_risk(),
            performance: Vec::new(),
            error: None,
        }
    }

    pub fn with_signal(mut self, symbol: &str, rsi: f64, trend: Trend) -> Self {
        self.signals.insert(symbol.to_string(), signal(rsi, trend));
        self
    }

    pub fn with_point(mut self, date: &str, value: f64, benchmark: f64) -> Self {
        self.performance.push(PerformancePoint {
            date: date.to_string(),
            value,
            benchmark,
        });
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }

    fn check(&self) -> Result<(), PortviewError> {
        match &self.error {
            Some(reason) => Err(PortviewError::Analytics {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl AnalyticsPort for MockAnalytics {
    fn fetch_signals(&self) -> Result<HashMap<String, TechnicalSignal>, PortviewError> {
        self.check()?;
        Ok(self.signals.clone())
    }

    fn fetch_risk_metrics(&self) -> Result<RiskMetrics, PortviewError> {
        self.check()?;
        Ok(self.risk)
    }

    fn fetch_performance(&self) -> Result<Vec<PerformancePoint>, PortviewError> {
        self.check()?;
        Ok(self.performance.clone())
    }
}

/// In-memory holding store that records every save.
pub struct MockHoldingStore {
    pub stored: RefCell<Option<Vec<Holding>>>,
    pub saves: RefCell<usize>,
}

impl MockHoldingStore {
    pub fn empty() -> Self {
        Self {
            stored: RefCell::new(None),
            saves: RefCell::new(0),
        }
    }

    pub fn with_holdings(holdings: Vec<Holding>) -> Self {
        Self {
            stored: RefCell::new(Some(holdings)),
            saves: RefCell::new(0),
        }
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.stored.borrow().clone().unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl HoldingStorePort for MockHoldingStore {
    fn load(&self) -> Result<Option<Vec<Holding>>, PortviewError> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, holdings: &[Holding]) -> Result<(), PortviewError> {
        *self.stored.borrow_mut() = Some(holdings.to_vec());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

pub fn signal(rsi: f64, trend: Trend) -> TechnicalSignal {
    TechnicalSignal {
        rsi,
        macd: 0.8,
        signal: 0.6,
        trend,
    }
}

pub fn sample_risk() -> RiskMetrics {
    RiskMetrics {
        beta: 1.15,
        volatility: 0.22,
        sharpe_ratio: 2.11,
        value_at_risk: 0.15,
    }
}

pub fn registry(seed: &[(&str, f64, u64)]) -> HoldingRegistry {
    HoldingRegistry::from_holdings(holdings(seed)).unwrap()
}

pub fn holdings(seed: &[(&str, f64, u64)]) -> Vec<Holding> {
    seed.iter()
        .map(|&(symbol, weight, shares)| Holding::new(symbol, weight, shares))
        .collect()
}

pub fn weights(registry: &HoldingRegistry) -> Vec<f64> {
    registry.holdings().iter().map(|h| h.weight).collect()
}
