use anyhow::{Context, Result};
use cloud_cost_calculator::config::Config;
use cloud_cost_calculator::estimate::estimate;
use cloud_cost_calculator::report::Report;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Execute the export command
///
/// Writes every report sheet, the summary and the rate-card fingerprint as
/// one JSON document
pub fn execute(cfg: &Config, scenario: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let card = super::rate_card(cfg)?;
    let path = super::scenario_path(cfg, scenario);
    let mut scenario = super::load_scenario(&path)?;

    let estimate = estimate(&mut scenario, &card);
    let report = Report::build(&scenario, &estimate, &card.fingerprint);
    let document = report.to_json_pretty()?;

    match output {
        Some(output) => {
            std::fs::write(&output, document)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            eprintln!(
                "{}",
                format!("✓ Report written to {}", output.display()).green()
            );
            info!(sheets = report.sheets.len(), "Exported report to {}", output.display());
        }
        None => {
            println!("{}", document);
            info!(sheets = report.sheets.len(), "Exported report to stdout");
        }
    }

    Ok(())
}
