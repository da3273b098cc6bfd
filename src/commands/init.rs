use anyhow::Result;
use cloud_cost_calculator::config::Config;
use cloud_cost_calculator::scenario::Scenario;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Execute the init command
///
/// Writes a default scenario whose instance labels point at the first
/// matching rows of the loaded rate card
pub fn execute(cfg: &Config, output: Option<PathBuf>, force: bool) -> Result<()> {
    let path = super::scenario_path(cfg, output);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    let card = super::rate_card(cfg)?;
    let scenario = Scenario::default_for(&card);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    scenario.save(&path)?;

    println!(
        "{}",
        format!("✓ Default scenario written to {}", path.display()).green()
    );
    println!("  Tiers: {}", scenario.tiers.len());
    println!("  Storage zones: {}", scenario.storage.direct.len());
    println!("  SQL warehouses: {}", scenario.warehouses.len());
    println!("  Development clusters: {}", scenario.dev_compute.len());

    info!("Scenario initialized at {}", path.display());
    Ok(())
}
