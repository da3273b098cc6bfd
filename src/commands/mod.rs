//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - estimate: Price a scenario and print the breakdown
//! - export: Write the report document as JSON
//! - rates: List the loaded rate card
//! - init: Write a default scenario
//! - check: Validate pricing and scenario
//! - config: Configuration display

pub mod check;
pub mod config;
pub mod estimate;
pub mod export;
pub mod init;
pub mod rates;

use anyhow::{Context, Result};
use cloud_cost_calculator::config::Config;
use cloud_cost_calculator::pricing::{load_rate_card, RateCard};
use cloud_cost_calculator::scenario::Scenario;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::error;

/// Load the rate card from the configured pricing sources
pub(crate) fn rate_card(cfg: &Config) -> Result<RateCard> {
    eprintln!("{}", "Loading rate card...".yellow());
    let card = load_rate_card(&cfg.pricing.rate_card, &cfg.pricing.storage).inspect_err(|e| {
        if e.is_pricing_load_error() {
            error!(kind = e.kind(), "Pricing data unavailable, nothing was computed");
        }
    })?;
    Ok(card)
}

/// Explicit scenario path, else the configured one
pub(crate) fn scenario_path(cfg: &Config, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| cfg.scenario.path.clone())
}

pub(crate) fn load_scenario(path: &Path) -> Result<Scenario> {
    if !path.exists() {
        anyhow::bail!(
            "Scenario file {} not found; run `init` to create one",
            path.display()
        );
    }
    Scenario::load(path).with_context(|| format!("Failed to load scenario {}", path.display()))
}
