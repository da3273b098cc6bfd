use crate::cost::{
    aggregate, compute_dev_cost, compute_storage_cost, compute_tier_costs, compute_warehouse_cost,
    CostSummary, DevCostSummary, StorageCostSummary, TierCost, WarehouseCostSummary,
};
use crate::pricing::RateCard;
use crate::scenario::Scenario;
use serde::Serialize;
use tracing::info;

/// Result of pricing a whole scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub tiers: Vec<TierCost>,
    pub storage: StorageCostSummary,
    pub warehouses: WarehouseCostSummary,
    pub dev: DevCostSummary,
    pub summary: CostSummary,
}

/// Run every calculator over the scenario.
///
/// Storage projections and development costs are written back onto the
/// scenario, so a saved scenario reflects the last estimate.
pub fn estimate(scenario: &mut Scenario, card: &RateCard) -> Estimate {
    let tiers = compute_tier_costs(&scenario.tiers, &card.jobs);
    let storage = compute_storage_cost(&mut scenario.storage, &card.storage);
    let warehouses = compute_warehouse_cost(&scenario.warehouses, &card.sql);
    let dev = compute_dev_cost(&mut scenario.dev_compute, &card.dev);
    let summary = aggregate(
        &tiers,
        &storage,
        &warehouses,
        &dev,
        scenario.compute_monthly_growth_percent,
    );

    info!(
        grand_total = summary.grand_total,
        dev_total = summary.dev_total,
        "Estimate complete"
    );

    Estimate {
        tiers,
        storage,
        warehouses,
        dev,
        summary,
    }
}

impl Estimate {
    /// Human-readable description of every rate-card reference that did
    /// not resolve
    pub fn unresolved(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for tier in &self.tiers {
            for job in tier.costs.jobs.iter().filter(|j| !j.is_resolved()) {
                issues.push(match job.compute_type.known() {
                    Some(_) => format!(
                        "{} / {}: unknown instance '{}'",
                        tier.tier, job.name, job.instance_label
                    ),
                    None => format!(
                        "{} / {}: unknown compute type '{}'",
                        tier.tier, job.name, job.compute_type
                    ),
                });
            }
        }
        for zone in self.storage.zones.iter().filter(|z| !z.resolved) {
            issues.push(format!(
                "storage {}: no price for class '{}'",
                zone.zone, zone.storage_class
            ));
        }
        for warehouse in self.warehouses.warehouses.iter().filter(|w| w.size.is_none()) {
            issues.push(match warehouse.compute_type.known() {
                Some(_) => format!(
                    "warehouse {}: unknown {} size '{}'",
                    warehouse.name, warehouse.compute_type, warehouse.instance_label
                ),
                None => format!(
                    "warehouse {}: unknown compute type '{}'",
                    warehouse.name, warehouse.compute_type
                ),
            });
        }
        for (i, record) in self.dev.records.iter().enumerate().filter(|(_, r)| !r.resolved) {
            issues.push(format!(
                "development cluster {}: unknown instance '{}' / '{}'",
                i + 1,
                record.driver_instance_label,
                record.worker_instance_label
            ));
        }
        issues
    }
}
