//! CSV directory analytics adapter.
//!
//! Reads three files from a base directory:
//! - `signals.csv`: `symbol,rsi,macd,signal,trend`
//! - `risk.csv`: `beta,volatility,sharpe_ratio,value_at_risk` (one row)
//! - `performance.csv`: `date,value,benchmark`

use crate::domain::analytics::{PerformancePoint, RiskMetrics};
use crate::domain::error::PortviewError;
use crate::domain::holding::normalize_symbol;
use crate::domain::signal::{TechnicalSignal, Trend};
use crate::ports::analytics_port::AnalyticsPort;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub const SIGNALS_FILE: &str = "signals.csv";
pub const RISK_FILE: &str = "risk.csv";
pub const PERFORMANCE_FILE: &str = "performance.csv";

#[derive(Debug, Deserialize)]
struct SignalRecord {
    symbol: String,
    rsi: f64,
    macd: f64,
    signal: f64,
    trend: String,
}

pub struct CsvAnalyticsAdapter {
    base_path: PathBuf,
}

impl CsvAnalyticsAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn read_records<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Vec<T>, PortviewError> {
        let path = self.base_path.join(file);
        let content = fs::read_to_string(&path).map_err(|e| PortviewError::Analytics {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        rdr.deserialize()
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| PortviewError::Analytics {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })
    }
}

impl AnalyticsPort for CsvAnalyticsAdapter {
    fn fetch_signals(&self) -> Result<HashMap<String, TechnicalSignal>, PortviewError> {
        let records: Vec<SignalRecord> = self.read_records(SIGNALS_FILE)?;
        let mut signals = HashMap::with_capacity(records.len());

        for record in records {
            let symbol = normalize_symbol(&record.symbol);
            if !(0.0..=100.0).contains(&record.rsi) {
                return Err(PortviewError::Analytics {
                    reason: format!("RSI for {} out of range: {}", symbol, record.rsi),
                });
            }
            let trend: Trend = record
                .trend
                .parse()
                .map_err(|e| PortviewError::Analytics {
                    reason: format!("{}: {}", symbol, e),
                })?;

            let signal = TechnicalSignal {
                rsi: record.rsi,
                macd: record.macd,
                signal: record.signal,
                trend,
            };
            if signals.insert(symbol.clone(), signal).is_some() {
                return Err(PortviewError::Analytics {
                    reason: format!("duplicate signal for {}", symbol),
                });
            }
        }

        Ok(signals)
    }

    fn fetch_risk_metrics(&self) -> Result<RiskMetrics, PortviewError> {
        let mut rows: Vec<RiskMetrics> = self.read_records(RISK_FILE)?;
        if rows.len() != 1 {
            return Err(PortviewError::Analytics {
                reason: format!("{} must contain exactly one row, found {}", RISK_FILE, rows.len()),
            });
        }
        Ok(rows.remove(0))
    }

    fn fetch_performance(&self) -> Result<Vec<PerformancePoint>, PortviewError> {
        self.read_records(PERFORMANCE_FILE)
    }
}
