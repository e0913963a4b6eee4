//! Configuration validation.
//!
//! Validates all config fields before any command runs.

use crate::domain::error::PortviewError;
use crate::domain::holding::Holding;
use crate::domain::input::parse_shares;
use crate::domain::registry::HoldingRegistry;
use crate::domain::portfolio_config::{DEFAULT_DECIMALS, MAX_DECIMALS};
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), PortviewError> {
    validate_holdings_path(config)?;
    validate_seed(config)?;
    validate_analytics(config)?;
    validate_display(config)?;
    Ok(())
}

fn validate_holdings_path(config: &dyn ConfigPort) -> Result<(), PortviewError> {
    match config.get_non_empty("portfolio", "holdings_path") {
        Some(_) => Ok(()),
        None => Err(PortviewError::ConfigMissing {
            section: "portfolio".to_string(),
            key: "holdings_path".to_string(),
        }),
    }
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), PortviewError> {
    let Some(seed) = config.get_string("portfolio", "seed") else {
        return Ok(());
    };
    let holdings = parse_seed(&seed)?;
    HoldingRegistry::from_holdings(holdings).map_err(|e| PortviewError::ConfigInvalid {
        section: "portfolio".to_string(),
        key: "seed".to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn validate_analytics(config: &dyn ConfigPort) -> Result<(), PortviewError> {
    let source = config
        .get_string("analytics", "source")
        .unwrap_or_else(|| "fixture".to_string());

    match source.trim().to_lowercase().as_str() {
        "fixture" => Ok(()),
        "csv" => match config.get_non_empty("analytics", "data_dir") {
            Some(_) => Ok(()),
            None => Err(PortviewError::ConfigMissing {
                section: "analytics".to_string(),
                key: "data_dir".to_string(),
            }),
        },
        other => Err(PortviewError::ConfigInvalid {
            section: "analytics".to_string(),
            key: "source".to_string(),
            reason: format!("unknown source {other:?}, expected fixture or csv"),
        }),
    }
}

fn validate_display(config: &dyn ConfigPort) -> Result<(), PortviewError> {
    parse_decimals(config)?;
    Ok(())
}

/// `[display] decimals`, defaulting when unset. Non-numeric values are rejected.
pub fn parse_decimals(config: &dyn ConfigPort) -> Result<usize, PortviewError> {
    let Some(raw) = config.get_non_empty("display", "decimals") else {
        return Ok(DEFAULT_DECIMALS);
    };
    match raw.parse::<usize>() {
        Ok(decimals) if decimals <= MAX_DECIMALS => Ok(decimals),
        _ => Err(PortviewError::ConfigInvalid {
            section: "display".to_string(),
            key: "decimals".to_string(),
            reason: format!("expected an integer between 0 and {MAX_DECIMALS}, got {raw:?}"),
        }),
    }
}

/// Parse `SYMBOL:WEIGHT:SHARES` entries separated by commas.
pub fn parse_seed(value: &str) -> Result<Vec<Holding>, PortviewError> {
    let invalid = |reason: String| PortviewError::ConfigInvalid {
        section: "portfolio".to_string(),
        key: "seed".to_string(),
        reason,
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
            let [symbol, weight, shares] = parts.as_slice() else {
                return Err(invalid(format!(
                    "expected SYMBOL:WEIGHT:SHARES, got {entry:?}"
                )));
            };
            let weight: f64 = weight
                .parse()
                .map_err(|_| invalid(format!("invalid weight in {entry:?}")))?;
            let shares = parse_shares(shares).map_err(|e| invalid(format!("{entry}: {e}")))?;
            Ok(Holding::new(symbol, weight, shares))
        })
        .collect()
}
