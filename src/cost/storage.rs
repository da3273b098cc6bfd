use crate::cost::projection::{
    cumulative_projection, percent_to_rate, HALF_YEAR_MONTHS, QUARTER_MONTHS, YEAR_MONTHS,
};
use crate::pricing::{Named, StorageClass, StoragePricing};
use crate::scenario::{DirectZone, StorageConfig, StorageMode, StorageUnit, TableShape, TableZone};
use serde::Serialize;
use tracing::{debug, warn};

/// Assumed size of one table cell
pub const KB_PER_CELL: f64 = 1.0;
pub const GB_PER_TB: f64 = 1024.0;
const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Priced storage zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCost {
    pub zone: String,
    pub storage_class: Named<StorageClass>,
    pub storage_gb: f64,
    pub monthly_cost: f64,
    /// Direct mode only
    pub quarterly_cost: Option<f64>,
    /// Direct mode only
    pub half_yearly_cost: Option<f64>,
    /// Direct mode extends the quarterly and half-yearly compounding to twelve
    /// months; table-based mode is `monthly × 12`.
    pub projected_12mo: f64,
    /// False when the storage class has no price
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageCostSummary {
    pub mode: StorageMode,
    pub zones: Vec<ZoneCost>,
    pub total_monthly_cost: f64,
    pub total_12mo_projection: f64,
}

impl StorageCostSummary {
    fn empty(mode: StorageMode) -> Self {
        Self {
            mode,
            zones: Vec::new(),
            total_monthly_cost: 0.0,
            total_12mo_projection: 0.0,
        }
    }

    fn push(&mut self, zone: ZoneCost) {
        self.total_monthly_cost += zone.monthly_cost;
        self.total_12mo_projection += zone.projected_12mo;
        self.zones.push(zone);
    }
}

pub fn storage_gb(amount: f64, unit: StorageUnit) -> f64 {
    match unit {
        StorageUnit::Gb => amount,
        StorageUnit::Tb => amount * GB_PER_TB,
    }
}

/// Estimated size in GB of a set of table shapes
pub fn estimate_table_gb(tables: &[TableShape]) -> f64 {
    tables
        .iter()
        .map(|t| t.record_count * t.column_count * KB_PER_CELL / KB_PER_GB * t.table_multiplier)
        .sum()
}

fn class_rate(pricing: &StoragePricing, class: &Named<StorageClass>, zone: &str) -> Option<f64> {
    let rate = class.known().and_then(|class| pricing.rate_per_gb(class));
    if rate.is_none() {
        warn!(zone = %zone, storage_class = %class, "Unpriced storage class, pricing at zero");
    }
    rate
}

/// Price one direct zone and write its quarterly and half-yearly
/// projections back onto it.
pub fn price_direct_zone(zone: &mut DirectZone, pricing: &StoragePricing) -> ZoneCost {
    let rate = class_rate(pricing, &zone.storage_class, &zone.zone);
    let storage_gb = storage_gb(zone.amount, zone.unit);
    let monthly_cost = storage_gb * rate.unwrap_or(0.0);
    let growth = percent_to_rate(zone.monthly_growth_percent);

    zone.quarterly_cost = cumulative_projection(monthly_cost, growth, QUARTER_MONTHS);
    zone.half_yearly_cost = cumulative_projection(monthly_cost, growth, HALF_YEAR_MONTHS);

    ZoneCost {
        zone: zone.zone.clone(),
        storage_class: zone.storage_class.clone(),
        storage_gb,
        monthly_cost,
        quarterly_cost: Some(zone.quarterly_cost),
        half_yearly_cost: Some(zone.half_yearly_cost),
        projected_12mo: cumulative_projection(monthly_cost, growth, YEAR_MONTHS),
        resolved: rate.is_some(),
    }
}

/// Price one table-based zone at the `Standard` rate; no compounding
pub fn price_table_zone(zone: &TableZone, pricing: &StoragePricing) -> ZoneCost {
    let standard = Named::Known(StorageClass::Standard);
    let rate = class_rate(pricing, &standard, &zone.zone);
    let storage_gb = estimate_table_gb(&zone.tables);
    let monthly_cost = storage_gb * rate.unwrap_or(0.0);

    ZoneCost {
        zone: zone.zone.clone(),
        storage_class: standard,
        storage_gb,
        monthly_cost,
        quarterly_cost: None,
        half_yearly_cost: None,
        projected_12mo: monthly_cost * YEAR_MONTHS as f64,
        resolved: rate.is_some(),
    }
}

/// Price the zones of the active storage mode
pub fn compute_storage_cost(config: &mut StorageConfig, pricing: &StoragePricing) -> StorageCostSummary {
    let mut summary = StorageCostSummary::empty(config.mode);
    match config.mode {
        StorageMode::Direct => {
            for zone in config.direct.iter_mut() {
                summary.push(price_direct_zone(zone, pricing));
            }
        }
        StorageMode::TableBased => {
            for zone in &config.table_based {
                summary.push(price_table_zone(zone, pricing));
            }
        }
    }
    debug!(
        mode = ?summary.mode,
        zones = summary.zones.len(),
        monthly = summary.total_monthly_cost,
        "Priced storage"
    );
    summary
}
