//! Resolved runtime configuration.

use std::path::PathBuf;

use super::holding::Holding;

pub const DEFAULT_DECIMALS: usize = 1;
pub const MAX_DECIMALS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsSource {
    /// Built-in sample analytics.
    Fixture,
    /// `signals.csv`, `risk.csv` and `performance.csv` under a directory.
    Csv { data_dir: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Decimal places for percentages.
    pub decimals: usize,
    pub show_performance: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            decimals: DEFAULT_DECIMALS,
            show_performance: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioConfig {
    pub holdings_path: PathBuf,
    /// Holdings used when the store has none yet.
    pub seed: Vec<Holding>,
    pub analytics: AnalyticsSource,
    pub display: DisplayOptions,
}
