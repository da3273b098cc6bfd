use crate::cost::dev::DevCostSummary;
use crate::cost::jobs::TierCost;
use crate::cost::projection::{cumulative_projection, percent_to_rate, YEAR_MONTHS};
use crate::cost::storage::StorageCostSummary;
use crate::cost::warehouse::WarehouseCostSummary;
use serde::Serialize;

/// Categories that make up the grand total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Databricks,
    Storage,
    SqlWarehouse,
}

impl CostCategory {
    pub const ALL: [CostCategory; 3] = [Self::Databricks, Self::Storage, Self::SqlWarehouse];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Databricks => "Databricks & Compute",
            Self::Storage => "S3 Storage",
            Self::SqlWarehouse => "SQL Warehouse",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: CostCategory,
    pub monthly_cost: f64,
    /// Share of the grand total, 0-100
    pub percent: f64,
}

/// Monthly totals across all categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub databricks_total: f64,
    pub storage_total: f64,
    pub warehouse_total: f64,
    pub grand_total: f64,
    pub warehouse_dbus: f64,
    /// Reported on its own; not part of the grand total
    pub dev_total: f64,
    pub compute_projection_12mo: f64,
    pub storage_projection_12mo: f64,
    pub total_projection_12mo: f64,
    /// Non-zero categories only
    pub distribution: Vec<CategoryShare>,
}

impl CostSummary {
    pub fn category_total(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Databricks => self.databricks_total,
            CostCategory::Storage => self.storage_total,
            CostCategory::SqlWarehouse => self.warehouse_total,
        }
    }
}

pub fn aggregate(
    tiers: &[TierCost],
    storage: &StorageCostSummary,
    warehouses: &WarehouseCostSummary,
    dev: &DevCostSummary,
    compute_growth_percent: f64,
) -> CostSummary {
    let databricks_total: f64 = tiers.iter().map(|t| t.costs.monthly_total()).sum();
    let storage_total = storage.total_monthly_cost;
    let warehouse_total = warehouses.total_cost;
    let grand_total = databricks_total + storage_total + warehouse_total;

    let compute_projection_12mo = cumulative_projection(
        databricks_total,
        percent_to_rate(compute_growth_percent),
        YEAR_MONTHS,
    );
    let total_projection_12mo = compute_projection_12mo
        + warehouse_total * YEAR_MONTHS as f64
        + storage.total_12mo_projection;

    let mut summary = CostSummary {
        databricks_total,
        storage_total,
        warehouse_total,
        grand_total,
        warehouse_dbus: warehouses.total_dbus,
        dev_total: dev.total_cost,
        compute_projection_12mo,
        storage_projection_12mo: storage.total_12mo_projection,
        total_projection_12mo,
        distribution: Vec::new(),
    };

    summary.distribution = CostCategory::ALL
        .iter()
        .map(|category| (*category, summary.category_total(*category)))
        .filter(|(_, cost)| *cost > 0.0)
        .map(|(category, monthly_cost)| CategoryShare {
            category,
            monthly_cost,
            percent: monthly_cost / grand_total * 100.0,
        })
        .collect();

    summary
}
