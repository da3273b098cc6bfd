use anyhow::Result;
use cloud_cost_calculator::config::Config;
use cloud_cost_calculator::pricing::{ComputeType, RateCard};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::info;

/// Execute the rates command
pub fn execute(cfg: &Config, compute_type: Option<String>) -> Result<()> {
    let filter = compute_type
        .map(|name| name.parse::<ComputeType>().map_err(anyhow::Error::msg))
        .transpose()?;

    let card = super::rate_card(cfg)?;

    for wanted in ComputeType::ALL {
        if filter.is_some_and(|f| f != wanted) {
            continue;
        }
        print_compute_type(&card, wanted);
    }

    if filter.is_none() {
        print_storage(&card);
    }

    println!("Rate card: {}", card.fingerprint.dimmed());
    info!("Rate card displayed successfully");
    Ok(())
}

fn print_compute_type(card: &RateCard, compute_type: ComputeType) {
    let index = card.index_for(compute_type.category());
    let labels = index.labels_for(compute_type);
    println!("{} ({})", compute_type.as_str().bold(), labels.len());
    if labels.is_empty() {
        println!("  No rows loaded\n");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("LABEL").fg(Color::Cyan),
            Cell::new("DBU/HOUR").fg(Color::Cyan),
            Cell::new("RATE/HOUR").fg(Color::Cyan),
            Cell::new("ON-DEMAND/HOUR").fg(Color::Cyan),
        ]);

    for (label, entry) in labels.iter().zip(index.entries_for(compute_type)) {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(entry.dbu_per_hour).set_alignment(CellAlignment::Right),
            Cell::new(format!("${:.4}", entry.rate_per_hour)).set_alignment(CellAlignment::Right),
            Cell::new(format!("${:.4}", entry.on_demand_hourly)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}\n", table);
}

fn print_storage(card: &RateCard) {
    println!("{} ({})", "S3 Storage".bold(), card.storage.len());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("STORAGE CLASS").fg(Color::Cyan),
            Cell::new("RATE/GB-MONTH").fg(Color::Cyan),
        ]);

    for class in card.storage.classes() {
        let rate = card.storage.rate_per_gb(*class).unwrap_or(0.0);
        table.add_row(vec![
            Cell::new(class.as_str()),
            Cell::new(format!("${:.5}", rate)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}\n", table);
}
