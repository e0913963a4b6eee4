//! Concrete adapter implementations for ports.

pub mod csv_analytics_adapter;
pub mod csv_holding_store;
pub mod file_config_adapter;
pub mod fixture_adapter;
