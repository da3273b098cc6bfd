//! Declarative description of the workloads being priced.
//!
//! A scenario is what the user edits: job lists per tier, storage zones,
//! SQL warehouses and development clusters. It is read from TOML, and a
//! default one can be generated from the rate card.

use crate::error::AppError;
use crate::numeric;
use crate::pricing::{ComputeType, Named, RateCard, StorageClass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// Workload stage with its own job list and allowed compute types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "L0 / Raw")]
    Raw,
    #[serde(rename = "L1 / Curated")]
    Curated,
    #[serde(rename = "L2 / Data Product")]
    DataProduct,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Raw, Tier::Curated, Tier::DataProduct];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Raw => "L0 / Raw",
            Tier::Curated => "L1 / Curated",
            Tier::DataProduct => "L2 / Data Product",
        }
    }

    /// Compute types a job in this tier may run on, preferred first
    pub fn allowed_compute_types(&self) -> &'static [ComputeType] {
        match self {
            Tier::Raw | Tier::Curated => &[
                ComputeType::DltAdvancedComputePhoton,
                ComputeType::DltAdvancedCompute,
            ],
            Tier::DataProduct => &[ComputeType::JobsCompute, ComputeType::JobsComputePhoton],
        }
    }

    pub fn allows(&self, compute_type: ComputeType) -> bool {
        self.allowed_compute_types().contains(&compute_type)
    }

    /// Pipeline tiers default to Photon on spot capacity
    pub fn photon_and_spot_by_default(&self) -> bool {
        matches!(self, Tier::Raw | Tier::Curated)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub name: String,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub runtime_hours: f64,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub runs_per_month: f64,
    pub compute_type: Named<ComputeType>,
    #[serde(default)]
    pub instance_label: String,
    /// Worker nodes; the driver is billed on top
    #[serde(default = "default_node_count", deserialize_with = "numeric::count")]
    pub node_count: u32,
    #[serde(default, deserialize_with = "numeric::flag")]
    pub photon_enabled: bool,
    #[serde(default, deserialize_with = "numeric::flag")]
    pub spot_enabled: bool,
}

/// Jobs of one tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierJobs {
    pub tier: Tier,
    #[serde(default = "default_true", deserialize_with = "numeric::flag_or_true")]
    pub enabled: bool,
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// Capacity entered directly per zone
    #[default]
    Direct,
    /// Capacity estimated from table shapes
    TableBased,
}

/// Capacity unit of a direct zone; anything but "TB" reads as GB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageUnit {
    #[default]
    Gb,
    Tb,
}

impl StorageUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageUnit::Gb => "GB",
            StorageUnit::Tb => "TB",
        }
    }
}

impl From<String> for StorageUnit {
    fn from(unit: String) -> Self {
        match unit.trim().to_ascii_uppercase().as_str() {
            "TB" => StorageUnit::Tb,
            "GB" | "" => StorageUnit::Gb,
            other => {
                warn!(unit = other, "Unknown storage unit, reading as GB");
                StorageUnit::Gb
            }
        }
    }
}

impl From<StorageUnit> for String {
    fn from(unit: StorageUnit) -> Self {
        unit.as_str().to_string()
    }
}

/// Direct-mode storage zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectZone {
    pub zone: String,
    pub storage_class: Named<StorageClass>,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub amount: f64,
    #[serde(default)]
    pub unit: StorageUnit,
    #[serde(default, deserialize_with = "numeric::percent")]
    pub monthly_growth_percent: f64,
    /// Cumulative 3-month cost, refreshed by every storage calculation
    #[serde(skip)]
    pub quarterly_cost: f64,
    /// Cumulative 6-month cost, refreshed by every storage calculation
    #[serde(skip)]
    pub half_yearly_cost: f64,
}

/// Shape of one (group of) table(s) in table-based mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableShape {
    pub table_name: String,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub record_count: f64,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub column_count: f64,
    /// Number of physical tables with this shape
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub table_multiplier: f64,
}

/// Table-based storage zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableZone {
    pub zone: String,
    #[serde(default)]
    pub tables: Vec<TableShape>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub mode: StorageMode,
    #[serde(default)]
    pub direct: Vec<DirectZone>,
    #[serde(default)]
    pub table_based: Vec<TableZone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseConfig {
    pub id: String,
    pub name: String,
    pub compute_type: Named<ComputeType>,
    #[serde(default)]
    pub instance_label: String,
    #[serde(default = "default_node_count", deserialize_with = "numeric::count")]
    pub node_count: u32,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub hours_per_day: f64,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub days_per_month: f64,
    #[serde(default = "default_true", deserialize_with = "numeric::flag_or_true")]
    pub auto_suspend: bool,
    #[serde(default = "default_suspend_after", deserialize_with = "numeric::count")]
    pub suspend_after_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevComputeRecord {
    #[serde(default)]
    pub driver_instance_label: String,
    #[serde(default)]
    pub worker_instance_label: String,
    #[serde(default = "default_node_count", deserialize_with = "numeric::count")]
    pub node_count: u32,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub hours_per_month: f64,
    #[serde(default, deserialize_with = "numeric::non_negative")]
    pub months: f64,
    /// Filled in by the development cost calculator
    #[serde(skip)]
    pub cost: f64,
}

/// Complete set of workloads to price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Monthly growth applied to the compute projection
    #[serde(default, deserialize_with = "numeric::percent")]
    pub compute_monthly_growth_percent: f64,
    #[serde(default)]
    pub tiers: Vec<TierJobs>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub warehouses: Vec<WarehouseConfig>,
    #[serde(default)]
    pub dev_compute: Vec<DevComputeRecord>,
}

fn default_true() -> bool {
    true
}

fn default_node_count() -> u32 {
    1
}

fn default_suspend_after() -> u32 {
    10
}

const MAX_HOURS_PER_DAY: f64 = 24.0;
const MAX_DAYS_PER_MONTH: f64 = 31.0;

const DIRECT_ZONES: [&str; 4] = ["Landing Zone", "L0 / Raw", "L1 / Curated", "L2 / Data Product"];

const TABLE_ZONES: [(&str, &str); 4] = [
    ("Source System Table", "Source_system_Table_1"),
    ("L0 / Raw", "Bronze_Table_1"),
    ("L1 / Curated", "Silver_Table_1"),
    ("L2 / Data Product", "Gold_Table_1"),
];

impl Scenario {
    /// Starting scenario: one idle job per tier, the standard zones, one
    /// business-hours warehouse and one development cluster, all pointing at
    /// the first matching rate-card rows.
    pub fn default_for(card: &RateCard) -> Self {
        let tiers = Tier::ALL
            .iter()
            .map(|tier| {
                let compute_type = tier
                    .allowed_compute_types()
                    .iter()
                    .copied()
                    .find(|ct| !card.jobs.labels_for(*ct).is_empty())
                    .unwrap_or(tier.allowed_compute_types()[0]);
                let instance_label = card
                    .jobs
                    .default_label(compute_type)
                    .unwrap_or_default()
                    .to_string();
                let flags = tier.photon_and_spot_by_default();

                TierJobs {
                    tier: *tier,
                    enabled: true,
                    jobs: vec![JobRecord {
                        name: format!("{} Job 1", tier.as_str().replace(" / ", " ")),
                        runtime_hours: 0.0,
                        runs_per_month: 0.0,
                        compute_type: compute_type.into(),
                        instance_label,
                        node_count: 1,
                        photon_enabled: flags,
                        spot_enabled: flags,
                    }],
                }
            })
            .collect();

        let storage_class = card.storage.default_class();
        let storage = StorageConfig {
            mode: StorageMode::Direct,
            direct: DIRECT_ZONES
                .iter()
                .map(|zone| DirectZone {
                    zone: zone.to_string(),
                    storage_class: storage_class.into(),
                    amount: 0.0,
                    unit: StorageUnit::Gb,
                    monthly_growth_percent: 0.0,
                    quarterly_cost: 0.0,
                    half_yearly_cost: 0.0,
                })
                .collect(),
            table_based: TABLE_ZONES
                .iter()
                .map(|(zone, table)| TableZone {
                    zone: zone.to_string(),
                    tables: vec![TableShape {
                        table_name: table.to_string(),
                        record_count: 0.0,
                        column_count: 0.0,
                        table_multiplier: 0.0,
                    }],
                })
                .collect(),
        };

        let warehouse_type = card
            .sql
            .compute_types()
            .next()
            .unwrap_or(ComputeType::SqlProCompute);
        let warehouses = vec![WarehouseConfig {
            id: "warehouse_0".to_string(),
            name: "Primary BI Warehouse".to_string(),
            compute_type: warehouse_type.into(),
            instance_label: card
                .sql
                .default_label(warehouse_type)
                .unwrap_or_default()
                .to_string(),
            node_count: 1,
            hours_per_day: 8.0,
            days_per_month: 22.0,
            auto_suspend: true,
            suspend_after_minutes: 10,
        }];

        let dev_label = card
            .dev
            .default_label(ComputeType::AllPurposeCompute)
            .unwrap_or_default()
            .to_string();
        let dev_compute = vec![DevComputeRecord {
            driver_instance_label: dev_label.clone(),
            worker_instance_label: dev_label,
            node_count: 1,
            hours_per_month: 0.0,
            months: 0.0,
            cost: 0.0,
        }];

        Self {
            compute_monthly_growth_percent: 0.0,
            tiers,
            storage,
            warehouses,
            dev_compute,
        }
    }

    /// Parse a scenario from TOML and normalize out-of-range values
    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        let mut scenario: Scenario = toml::from_str(content)?;
        scenario.normalize();
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        info!("Loading scenario from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::ScenarioError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::ScenarioError(msg) => {
                AppError::ScenarioError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self).map_err(|e| AppError::ScenarioError(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        std::fs::write(path, self.to_toml_string()?)?;
        info!("Saved scenario to: {}", path.display());
        Ok(())
    }

    /// Clamp calendar quantities to what a day and a month can hold.
    /// Returns the number of values adjusted.
    pub fn normalize(&mut self) -> usize {
        let mut adjusted = 0;
        for warehouse in &mut self.warehouses {
            if warehouse.hours_per_day > MAX_HOURS_PER_DAY {
                warn!(warehouse = %warehouse.name, hours_per_day = warehouse.hours_per_day, "Clamping hours per day to 24");
                warehouse.hours_per_day = MAX_HOURS_PER_DAY;
                adjusted += 1;
            }
            if warehouse.days_per_month > MAX_DAYS_PER_MONTH {
                warn!(warehouse = %warehouse.name, days_per_month = warehouse.days_per_month, "Clamping days per month to 31");
                warehouse.days_per_month = MAX_DAYS_PER_MONTH;
                adjusted += 1;
            }
        }
        adjusted
    }

    /// Tiers whose jobs count toward the totals
    pub fn active_tiers(&self) -> impl Iterator<Item = &TierJobs> {
        self.tiers.iter().filter(|t| t.enabled)
    }
}
