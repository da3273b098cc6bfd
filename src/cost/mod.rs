//! Cost calculators.
//!
//! Each calculator prices one category of the scenario against the rate
//! card; [`summary::aggregate`] folds their totals together. Unresolved
//! rate-card references are priced at zero and logged, never raised.

pub mod dev;
pub mod jobs;
pub mod projection;
pub mod storage;
pub mod summary;
pub mod warehouse;

pub use dev::{compute_dev_cost, dev_cluster_cost, DevCost, DevCostSummary};
pub use jobs::{compute_job_cost, compute_job_costs, compute_tier_costs, JobCost, JobCostSummary, TierCost};
pub use projection::cumulative_projection;
pub use storage::{compute_storage_cost, StorageCostSummary, ZoneCost, KB_PER_CELL};
pub use summary::{aggregate, CategoryShare, CostCategory, CostSummary};
pub use warehouse::{compute_warehouse_cost, WarehouseCost, WarehouseCostSummary};
