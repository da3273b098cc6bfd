use crate::cli::OutputFormat;
use anyhow::Result;
use cloud_cost_calculator::config::Config;
use cloud_cost_calculator::estimate::{estimate, Estimate};
use cloud_cost_calculator::report::{format_usd, Report};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Execute the estimate command
pub fn execute(cfg: &Config, scenario: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let card = super::rate_card(cfg)?;
    let path = super::scenario_path(cfg, scenario);
    let mut scenario = super::load_scenario(&path)?;

    info!("Estimating costs for {}", path.display());
    let estimate = estimate(&mut scenario, &card);
    let report = Report::build(&scenario, &estimate, &card.fingerprint);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&estimate)?),
        OutputFormat::Table => print_tables(&report, &estimate),
    }

    info!("Estimate displayed successfully");
    Ok(())
}

fn print_tables(report: &Report, estimate: &Estimate) {
    for sheet in &report.sheets {
        println!("{}", sheet.name.replace('_', " ").bold());
        if sheet.is_empty() {
            println!("  (none)\n");
            continue;
        }
        println!("{}\n", sheet.to_table());
    }

    let summary = &estimate.summary;
    println!("{}", "Cost Distribution:".bold());
    if summary.distribution.is_empty() {
        println!("  No costs yet");
    }
    for share in &summary.distribution {
        println!(
            "  {:<22} {:>16} {:>6.1}%",
            share.category.label(),
            format_usd(share.monthly_cost),
            share.percent
        );
    }
    println!();

    println!(
        "{} {}",
        "Total Monthly Cost:".green().bold(),
        format_usd(summary.grand_total).green().bold()
    );
    println!(
        "  Development (separate): {}",
        format_usd(summary.dev_total).cyan()
    );
    println!(
        "  12-month compute projection: {}",
        format_usd(summary.compute_projection_12mo)
    );
    println!(
        "  12-month storage projection: {}",
        format_usd(summary.storage_projection_12mo)
    );
    println!(
        "  12-month total projection:   {}",
        format_usd(summary.total_projection_12mo)
    );
    println!("  SQL warehouse DBUs / month:  {:.2}", summary.warehouse_dbus);

    let unresolved = estimate.unresolved();
    if !unresolved.is_empty() {
        println!();
        println!(
            "{}",
            format!("⚠ {} reference(s) priced at zero (run `check`)", unresolved.len()).yellow()
        );
    }
    println!("\nRate card: {}", report.rate_card_fingerprint.dimmed());
}
