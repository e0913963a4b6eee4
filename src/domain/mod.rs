//! Core domain types and logic.

pub mod holding;
pub mod allocation;
pub mod registry;
pub mod input;
pub mod signal;
pub mod analytics;
pub mod dashboard;
pub mod portfolio_config;
pub mod config_validation;
pub mod error;
