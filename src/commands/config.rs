use anyhow::Result;
use cloud_cost_calculator::config::Config;
use colored::Colorize;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after file and environment overrides
pub fn show(cfg: &Config) -> Result<()> {
    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}
