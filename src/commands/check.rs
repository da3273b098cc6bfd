use anyhow::Result;
use cloud_cost_calculator::config::Config;
use cloud_cost_calculator::estimate::estimate;
use cloud_cost_calculator::scenario::Scenario;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Execute the check command
///
/// Loads the rate card and the scenario and reports every reference that
/// would be priced at zero. Unresolved references are warnings, not errors.
pub fn execute(cfg: &Config, scenario: Option<PathBuf>) -> Result<()> {
    let card = super::rate_card(cfg)?;
    println!("{}", "✓ Rate card is valid".green());
    println!("  Jobs rows: {}", card.jobs.len());
    println!("  SQL rows: {}", card.sql.len());
    println!("  Development rows: {}", card.dev.len());
    println!("  Storage classes: {}", card.storage.len());
    println!();

    let path = super::scenario_path(cfg, scenario);
    let mut scenario = super::load_scenario(&path)?;
    println!("{}", format!("✓ Scenario {} parsed", path.display()).green());
    println!(
        "  Jobs: {} across {} enabled tier(s)",
        scenario.active_tiers().map(|t| t.jobs.len()).sum::<usize>(),
        scenario.active_tiers().count()
    );
    println!("  SQL warehouses: {}", scenario.warehouses.len());
    println!("  Development clusters: {}", scenario.dev_compute.len());
    println!();

    let mut issues = tier_mismatches(&scenario);
    issues.extend(estimate(&mut scenario, &card).unresolved());

    if issues.is_empty() {
        println!("{}", "✓ All references resolve".green());
    } else {
        println!("{}", format!("⚠ {} issue(s) found:", issues.len()).yellow().bold());
        for issue in &issues {
            println!("  - {}", issue);
            warn!("{}", issue);
        }
    }

    info!(issues = issues.len(), "Scenario check complete");
    Ok(())
}

/// Jobs running on a compute type their tier does not normally use
fn tier_mismatches(scenario: &Scenario) -> Vec<String> {
    scenario
        .active_tiers()
        .flat_map(|tier| {
            tier.jobs
                .iter()
                .filter(|job| !job.compute_type.known().is_some_and(|ct| tier.tier.allows(ct)))
                .map(move |job| {
                    format!(
                        "{} / {}: compute type '{}' is not used in this tier",
                        tier.tier, job.name, job.compute_type
                    )
                })
        })
        .collect()
}
