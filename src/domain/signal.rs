//! Technical signal classification.
//!
//! Signals are supplied externally per symbol. Classification passes the trend
//! label through and raises an alert when RSI leaves the `[30, 70]` band:
//! - `rsi > 70`: overbought (destructive severity)
//! - `rsi < 30`: oversold (informational severity)
//!
//! The band edges themselves do not alert.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::holding::normalize_symbol;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    #[default]
    Neutral,
    Bearish,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Neutral => write!(f, "neutral"),
            Trend::Bearish => write!(f, "bearish"),
        }
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bullish" => Ok(Trend::Bullish),
            "neutral" => Ok(Trend::Neutral),
            "bearish" => Ok(Trend::Bearish),
            other => Err(format!("unknown trend {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSignal {
    pub rsi: f64,
    pub macd: f64,
    pub signal: f64,
    pub trend: Trend,
}

impl TechnicalSignal {
    /// Stand-in used when no analytics are available for a symbol.
    pub const NEUTRAL: TechnicalSignal = TechnicalSignal {
        rsi: 50.0,
        macd: 0.0,
        signal: 0.0,
        trend: Trend::Neutral,
    };

    /// MACD line minus signal line.
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }
}

impl Default for TechnicalSignal {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Overbought,
    Oversold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Destructive,
    Informational,
}

impl AlertKind {
    pub fn severity(&self) -> Severity {
        match self {
            AlertKind::Overbought => Severity::Destructive,
            AlertKind::Oversold => Severity::Informational,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Overbought => write!(f, "overbought"),
            AlertKind::Oversold => write!(f, "oversold"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub trend: Trend,
    pub alert: Option<AlertKind>,
}

pub fn classify(signal: &TechnicalSignal) -> Classification {
    let alert = if signal.rsi > RSI_OVERBOUGHT {
        Some(AlertKind::Overbought)
    } else if signal.rsi < RSI_OVERSOLD {
        Some(AlertKind::Oversold)
    } else {
        None
    };
    Classification {
        trend: signal.trend,
        alert,
    }
}

/// Look up `symbol`'s signal, falling back to [`TechnicalSignal::NEUTRAL`].
pub fn signal_for<'a>(
    signals: &'a HashMap<String, TechnicalSignal>,
    symbol: &str,
) -> &'a TechnicalSignal {
    signals
        .get(&normalize_symbol(symbol))
        .unwrap_or(&TechnicalSignal::NEUTRAL)
}

/// An RSI alert surfaced for one holding.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub symbol: String,
    pub kind: AlertKind,
    pub rsi: f64,
}

impl Alert {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} RSI Alert: RSI is {} at {}",
            self.symbol, self.kind, self.rsi
        )
    }
}
