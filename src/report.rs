//! Tabular report of an estimate.
//!
//! The report mirrors a spreadsheet export: one sheet per cost category with
//! a fixed column order, plus a summary sheet. Sheets render either as JSON
//! rows keyed by column header or as terminal tables.

use crate::cost::storage::estimate_table_gb;
use crate::cost::{CostCategory, CostSummary};
use crate::error::AppError;
use crate::estimate::Estimate;
use crate::scenario::{Scenario, StorageMode};
use chrono::{SecondsFormat, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;

pub const JOBS_COLUMNS: [&str; 12] = [
    "Tier",
    "Name",
    "Runtime Hours",
    "Runs per Month",
    "Compute Type",
    "Instance",
    "worker_Nodes",
    "Photon Enabled",
    "Spot Instance",
    "Calculated DBU",
    "Calculated DBX Cost ($)",
    "Calculated EC2 Cost ($)",
];

pub const DIRECT_STORAGE_COLUMNS: [&str; 8] = [
    "Zone",
    "Storage Class",
    "Storage Amount",
    "Unit",
    "Monthly Growth %",
    "Monthly Cost ($)",
    "Quarterly Cost ($)",
    "Half-Yearly Cost ($)",
];

pub const TABLE_STORAGE_COLUMNS: [&str; 6] =
    ["Zone", "Table Name", "Records", "Columns", "Tables", "Estimated GB"];

pub const WAREHOUSE_COLUMNS: [&str; 9] = [
    "Name",
    "Type",
    "Size",
    "DBUs per Hour",
    "Hourly Rate ($)",
    "Nodes",
    "Hours per Day",
    "Days per Month",
    "Monthly Cost ($)",
];

pub const DEV_COLUMNS: [&str; 6] = [
    "Driver Type",
    "Worker Type",
    "Nodes",
    "Hours per Month",
    "Months",
    "DBX Cost ($)",
];

pub const SUMMARY_COLUMNS: [&str; 2] = ["Category", "Monthly Cost ($)"];

/// One cell of a sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Money(f64),
    Count(u32),
    Flag(bool),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Money(_) | Self::Count(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Money(n) => f.write_str(&format_usd(*n)),
            Self::Count(n) => write!(f, "{}", n),
            Self::Flag(b) => f.write_str(if *b { "Yes" } else { "No" }),
        }
    }
}

/// A named table with a fixed column order
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<CellValue>>,
}

struct Record<'a> {
    columns: &'a [&'static str],
    cells: &'a [CellValue],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

impl Serialize for Sheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let records: Vec<Record<'_>> = self
            .rows
            .iter()
            .map(|cells| Record {
                columns: self.columns,
                cells,
            })
            .collect();

        let mut state = serializer.serialize_struct("Sheet", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("columns", self.columns)?;
        state.serialize_field("rows", &records)?;
        state.end()
    }
}

impl Sheet {
    fn new(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            name,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a terminal table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                self.columns
                    .iter()
                    .map(|column| Cell::new(column).fg(Color::Cyan)),
            );

        for row in &self.rows {
            table.add_row(row.iter().map(|cell| {
                let rendered = Cell::new(cell.to_string());
                if cell.is_numeric() {
                    rendered.set_alignment(CellAlignment::Right)
                } else {
                    rendered
                }
            }));
        }
        table
    }
}

/// Every sheet of an estimate plus provenance
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub rate_card_fingerprint: String,
    pub storage_mode: StorageMode,
    pub sheets: Vec<Sheet>,
    pub summary: CostSummary,
}

impl Report {
    pub fn build(scenario: &Scenario, estimate: &Estimate, fingerprint: &str) -> Self {
        let storage_sheet = match scenario.storage.mode {
            StorageMode::Direct => direct_storage_sheet(scenario, estimate),
            StorageMode::TableBased => table_storage_sheet(scenario),
        };

        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            rate_card_fingerprint: fingerprint.to_string(),
            storage_mode: scenario.storage.mode,
            sheets: vec![
                jobs_sheet(estimate),
                storage_sheet,
                warehouse_sheet(estimate),
                dev_sheet(estimate),
                summary_sheet(&estimate.summary),
            ],
            summary: estimate.summary.clone(),
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn jobs_sheet(estimate: &Estimate) -> Sheet {
    let mut sheet = Sheet::new("Databricks_Jobs", &JOBS_COLUMNS);
    for tier in &estimate.tiers {
        for job in &tier.costs.jobs {
            sheet.rows.push(vec![
                CellValue::text(tier.tier.as_str()),
                CellValue::text(&job.name),
                CellValue::Number(job.runtime_hours),
                CellValue::Number(job.runs_per_month),
                CellValue::text(job.compute_type.to_string()),
                CellValue::text(&job.instance_label),
                CellValue::Count(job.node_count),
                CellValue::Flag(job.photon_enabled),
                CellValue::Flag(job.spot_enabled),
                CellValue::Number(job.dbu_cost),
                CellValue::Money(job.platform_cost),
                CellValue::Money(job.infra_cost),
            ]);
        }
    }
    sheet
}

fn direct_storage_sheet(scenario: &Scenario, estimate: &Estimate) -> Sheet {
    let mut sheet = Sheet::new("S3_Direct_Storage", &DIRECT_STORAGE_COLUMNS);
    for (zone, cost) in scenario.storage.direct.iter().zip(&estimate.storage.zones) {
        sheet.rows.push(vec![
            CellValue::text(&zone.zone),
            CellValue::text(zone.storage_class.to_string()),
            CellValue::Number(zone.amount),
            CellValue::text(zone.unit.as_str()),
            CellValue::Number(zone.monthly_growth_percent),
            CellValue::Money(cost.monthly_cost),
            CellValue::Money(cost.quarterly_cost.unwrap_or(0.0)),
            CellValue::Money(cost.half_yearly_cost.unwrap_or(0.0)),
        ]);
    }
    sheet
}

fn table_storage_sheet(scenario: &Scenario) -> Sheet {
    let mut sheet = Sheet::new("S3_Table_Based_Storage", &TABLE_STORAGE_COLUMNS);
    for zone in &scenario.storage.table_based {
        for table in &zone.tables {
            sheet.rows.push(vec![
                CellValue::text(&zone.zone),
                CellValue::text(&table.table_name),
                CellValue::Number(table.record_count),
                CellValue::Number(table.column_count),
                CellValue::Number(table.table_multiplier),
                CellValue::Number(estimate_table_gb(std::slice::from_ref(table))),
            ]);
        }
    }
    sheet
}

fn warehouse_sheet(estimate: &Estimate) -> Sheet {
    let mut sheet = Sheet::new("SQL_Warehouses", &WAREHOUSE_COLUMNS);
    for warehouse in &estimate.warehouses.warehouses {
        sheet.rows.push(vec![
            CellValue::text(&warehouse.name),
            CellValue::text(warehouse.compute_type.to_string()),
            CellValue::text(warehouse.size.as_deref().unwrap_or("N/A")),
            CellValue::Number(warehouse.dbu_per_hour),
            CellValue::Money(warehouse.rate_per_hour),
            CellValue::Count(warehouse.node_count),
            CellValue::Number(warehouse.hours_per_day),
            CellValue::Number(warehouse.days_per_month),
            CellValue::Money(warehouse.monthly_cost),
        ]);
    }
    sheet
}

fn dev_sheet(estimate: &Estimate) -> Sheet {
    let mut sheet = Sheet::new("Development_Cost", &DEV_COLUMNS);
    for record in &estimate.dev.records {
        sheet.rows.push(vec![
            CellValue::text(&record.driver_instance_label),
            CellValue::text(&record.worker_instance_label),
            CellValue::Count(record.node_count),
            CellValue::Number(record.hours_per_month),
            CellValue::Number(record.months),
            CellValue::Money(record.cost),
        ]);
    }
    sheet
}

fn summary_sheet(summary: &CostSummary) -> Sheet {
    let mut sheet = Sheet::new("Summary", &SUMMARY_COLUMNS);
    for category in CostCategory::ALL {
        sheet.rows.push(vec![
            CellValue::text(category.label()),
            CellValue::Money(summary.category_total(category)),
        ]);
    }
    sheet.rows.push(vec![
        CellValue::text("Total"),
        CellValue::Money(summary.grand_total),
    ]);
    sheet.rows.push(vec![
        CellValue::text("Development (not in total)"),
        CellValue::Money(summary.dev_total),
    ]);
    sheet
}

/// `1234.5` -> `"$1,234.50"`
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, dollars, cents % 100)
}

/// Up to four decimals, trailing zeros trimmed
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.4}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
