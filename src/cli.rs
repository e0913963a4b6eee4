//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_analytics_adapter::CsvAnalyticsAdapter;
use crate::adapters::csv_holding_store::CsvHoldingStore;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fixture_adapter::FixtureAnalytics;
use crate::domain::analytics::AnalyticsSnapshot;
use crate::domain::config_validation::{parse_decimals, parse_seed, validate_config};
use crate::domain::dashboard::{Dashboard, DashboardView};
use crate::domain::error::PortviewError;
use crate::domain::holding::{normalize_symbol, Holding};
use crate::domain::input::HoldingInput;
use crate::domain::portfolio_config::{AnalyticsSource, DisplayOptions, PortfolioConfig};
use crate::domain::registry::{HoldingRegistry, Removal};
use crate::domain::signal::Severity;
use crate::ports::analytics_port::AnalyticsPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::holding_store_port::HoldingStorePort;

#[derive(Parser, Debug)]
#[command(name = "portview", about = "Portfolio holdings and signal dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show holdings, signals, alerts, risk and performance
    Show {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Add a holding that takes the unallocated weight
    Add {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        shares: String,
    },
    /// Remove a holding and rebalance the rest
    Remove {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: String,
    },
    /// Show classified signals and RSI alerts only
    Signals {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// One user action against the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Show,
    Add { symbol: String, shares: String },
    Remove { symbol: String },
    Signals,
}

pub fn run(cli: Cli) -> ExitCode {
    let (config, action) = match cli.command {
        Command::Show { config } => (config, Action::Show),
        Command::Add {
            config,
            symbol,
            shares,
        } => (config, Action::Add { symbol, shares }),
        Command::Remove { config, symbol } => (config, Action::Remove { symbol }),
        Command::Signals { config } => (config, Action::Signals),
        Command::Validate { config } => return run_validate(&config),
    };
    run_command(&config, &action)
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PortviewError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_portfolio_config(adapter: &dyn ConfigPort) -> Result<PortfolioConfig, PortviewError> {
    let holdings_path = adapter
        .get_non_empty("portfolio", "holdings_path")
        .ok_or_else(|| PortviewError::ConfigMissing {
            section: "portfolio".into(),
            key: "holdings_path".into(),
        })?;

    let source = adapter
        .get_non_empty("analytics", "source")
        .unwrap_or_else(|| "fixture".to_string())
        .to_lowercase();
    let analytics = match source.as_str() {
        "fixture" => AnalyticsSource::Fixture,
        "csv" => {
            let data_dir = adapter.get_non_empty("analytics", "data_dir").ok_or_else(|| {
                PortviewError::ConfigMissing {
                    section: "analytics".into(),
                    key: "data_dir".into(),
                }
            })?;
            AnalyticsSource::Csv {
                data_dir: PathBuf::from(data_dir),
            }
        }
        other => {
            return Err(PortviewError::ConfigInvalid {
                section: "analytics".into(),
                key: "source".into(),
                reason: format!("unknown source {other:?}, expected fixture or csv"),
            });
        }
    };

    // The fixture source comes with its own sample portfolio.
    let seed = match adapter.get_string("portfolio", "seed") {
        Some(s) => parse_seed(&s)?,
        None if analytics == AnalyticsSource::Fixture => FixtureAnalytics::sample_holdings(),
        None => Vec::new(),
    };

    let display = DisplayOptions {
        decimals: parse_decimals(adapter)?,
        show_performance: adapter.get_bool("display", "show_performance", true),
    };

    Ok(PortfolioConfig {
        holdings_path: PathBuf::from(holdings_path),
        seed,
        analytics,
        display,
    })
}

pub fn analytics_port(source: &AnalyticsSource) -> Box<dyn AnalyticsPort> {
    match source {
        AnalyticsSource::Fixture => Box::new(FixtureAnalytics),
        AnalyticsSource::Csv { data_dir } => Box::new(CsvAnalyticsAdapter::new(data_dir.clone())),
    }
}

/// Stored holdings, or the configured seed when nothing has been saved yet.
pub fn load_registry(
    store: &dyn HoldingStorePort,
    seed: &[Holding],
) -> Result<HoldingRegistry, PortviewError> {
    let registry = match store.load()? {
        Some(saved) => HoldingRegistry::restore(saved)?,
        None => {
            eprintln!("No saved holdings, starting from {} seed holdings", seed.len());
            HoldingRegistry::from_holdings(seed.to_vec())?
        }
    };
    Ok(registry)
}

fn run_command(config_path: &Path, action: &Action) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let config = match build_portfolio_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 2: Wire ports and run
    let store = CsvHoldingStore::new(config.holdings_path.clone());
    let analytics = analytics_port(&config.analytics);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run_action(
        action,
        &store,
        analytics.as_ref(),
        &config.seed,
        config.display,
        &mut out,
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Apply one action: load holdings, fetch analytics, mutate, persist, render.
///
/// Analytics failures abort read-only actions but only warn on add/remove,
/// since the holdings do not depend on them.
pub fn run_action(
    action: &Action,
    store: &dyn HoldingStorePort,
    analytics: &dyn AnalyticsPort,
    seed: &[Holding],
    display: DisplayOptions,
    out: &mut dyn Write,
) -> Result<(), PortviewError> {
    let registry = load_registry(store, seed)?;

    let snapshot = match (analytics.snapshot(), action) {
        (Ok(s), _) => s,
        (Err(e), Action::Add { .. } | Action::Remove { .. }) => {
            eprintln!("warning: analytics unavailable ({e}), showing neutral signals");
            AnalyticsSnapshot::default()
        }
        (Err(e), _) => return Err(e),
    };

    let mut dashboard = Dashboard::new(registry, snapshot);

    match action {
        Action::Show => {}
        Action::Signals => {
            render_signals(&dashboard.view(), out)?;
            return Ok(());
        }
        Action::Add { symbol, shares } => {
            dashboard.input = HoldingInput::new(symbol, shares);
            dashboard.add_holding()?;
            store.save(dashboard.registry.holdings())?;
            if let Some(added) = dashboard.registry.holdings().last() {
                eprintln!(
                    "Added {} ({} shares, weight {})",
                    added.symbol,
                    added.shares,
                    percent(added.weight, display.decimals)
                );
            }
        }
        Action::Remove { symbol } => {
            let symbol = normalize_symbol(symbol);
            match dashboard.remove_holding(&symbol) {
                Removal::NotFound => {
                    eprintln!("warning: no holding {symbol}, nothing removed");
                }
                Removal::Emptied => {
                    store.save(dashboard.registry.holdings())?;
                    eprintln!("Removed {symbol}, portfolio is now empty");
                }
                Removal::Renormalized => {
                    store.save(dashboard.registry.holdings())?;
                    eprintln!(
                        "Removed {symbol}, rebalanced {} holdings",
                        dashboard.registry.len()
                    );
                }
                Removal::Degenerate => {
                    store.save(dashboard.registry.holdings())?;
                    eprintln!("warning: removed {symbol}, remaining holdings all have zero weight");
                }
            }
        }
    }

    render_dashboard(&dashboard.view(), display, out)?;
    Ok(())
}

fn percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

pub fn render_dashboard(
    view: &DashboardView,
    display: DisplayOptions,
    out: &mut dyn Write,
) -> io::Result<()> {
    let d = display.decimals;

    writeln!(out, "=== Holdings ===")?;
    if view.rows.is_empty() {
        writeln!(out, "  (no holdings)")?;
    }
    for row in &view.rows {
        writeln!(
            out,
            "  {:<8} {:>9} {:>8} shares  RSI {:>5.1}  MACD {:>6.2}  Signal {:>6.2}  {}",
            row.symbol,
            percent(row.weight, d),
            row.shares,
            row.signal.rsi,
            row.signal.macd,
            row.signal.signal,
            row.classification.trend,
        )?;
    }

    writeln!(out, "\n=== Risk Metrics ===")?;
    writeln!(out, "  Beta:            {:.2}", view.risk.beta)?;
    writeln!(out, "  Volatility:      {}", percent(view.risk.volatility, d))?;
    writeln!(out, "  Sharpe Ratio:    {:.2}", view.risk.sharpe_ratio)?;
    writeln!(out, "  Value at Risk:   {}", percent(view.risk.value_at_risk, d))?;

    if display.show_performance && !view.performance.is_empty() {
        writeln!(out, "\n=== Performance ===")?;
        for p in &view.performance {
            let sign = if p.excess() >= 0.0 { "+" } else { "" };
            writeln!(
                out,
                "  {:<10} {:>8.2}  benchmark {:>8.2}  ({}{:.2})",
                p.date,
                p.value,
                p.benchmark,
                sign,
                p.excess()
            )?;
        }
    }

    render_alerts(view, out)
}

pub fn render_signals(view: &DashboardView, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "=== Technical Signals ===")?;
    for row in &view.rows {
        writeln!(
            out,
            "  {:<8} RSI {:>5.1}  MACD {:>6.2}  Signal {:>6.2}  Hist {:>6.2}  {}",
            row.symbol,
            row.signal.rsi,
            row.signal.macd,
            row.signal.signal,
            row.signal.histogram(),
            row.classification.trend,
        )?;
    }
    render_alerts(view, out)
}

fn render_alerts(view: &DashboardView, out: &mut dyn Write) -> io::Result<()> {
    if view.alerts.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n=== Alerts ===")?;
    for alert in &view.alerts {
        let tag = match alert.severity() {
            Severity::Destructive => "!!",
            Severity::Informational => "--",
        };
        writeln!(out, "  {tag} {alert}")?;
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    match build_portfolio_config(&adapter) {
        Ok(config) => {
            eprintln!("  holdings: {}", config.holdings_path.display());
            eprintln!("  seed:     {} holdings", config.seed.len());
            match &config.analytics {
                AnalyticsSource::Fixture => eprintln!("  analytics: built-in fixture"),
                AnalyticsSource::Csv { data_dir } => {
                    eprintln!("  analytics: csv ({})", data_dir.display())
                }
            }
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
