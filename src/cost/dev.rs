use crate::pricing::RateCardIndex;
use crate::scenario::DevComputeRecord;
use serde::Serialize;
use tracing::{debug, warn};

/// Priced development cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevCost {
    pub driver_instance_label: String,
    pub worker_instance_label: String,
    pub driver_rate: f64,
    pub worker_rate: f64,
    pub node_count: u32,
    pub hours_per_month: f64,
    pub months: f64,
    pub cost: f64,
    pub resolved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DevCostSummary {
    pub records: Vec<DevCost>,
    pub total_cost: f64,
}

/// `(driver_rate × nodes + 1) × hours × months + (worker_rate × nodes + 1) × hours × months`
///
/// The `+ 1` is a flat unit added to each side, not an extra node.
pub fn dev_cluster_cost(
    driver_rate: f64,
    worker_rate: f64,
    node_count: u32,
    hours_per_month: f64,
    months: f64,
) -> f64 {
    let nodes = node_count as f64;
    (driver_rate * nodes + 1.0) * hours_per_month * months
        + (worker_rate * nodes + 1.0) * hours_per_month * months
}

fn label_rate(index: &RateCardIndex, label: &str) -> Option<f64> {
    index.lookup(label).entry().map(|entry| entry.rate_per_hour)
}

/// Price every development record, storing each cost on its record
pub fn compute_dev_cost(records: &mut [DevComputeRecord], dev_index: &RateCardIndex) -> DevCostSummary {
    let mut summary = DevCostSummary::default();
    for record in records.iter_mut() {
        let driver = label_rate(dev_index, &record.driver_instance_label);
        let worker = label_rate(dev_index, &record.worker_instance_label);
        if driver.is_none() || worker.is_none() {
            warn!(
                driver = %record.driver_instance_label,
                worker = %record.worker_instance_label,
                "Unresolved development instance, pricing at zero"
            );
        }
        let (driver_rate, worker_rate) = (driver.unwrap_or(0.0), worker.unwrap_or(0.0));

        record.cost = dev_cluster_cost(
            driver_rate,
            worker_rate,
            record.node_count,
            record.hours_per_month,
            record.months,
        );
        summary.total_cost += record.cost;
        summary.records.push(DevCost {
            driver_instance_label: record.driver_instance_label.clone(),
            worker_instance_label: record.worker_instance_label.clone(),
            driver_rate,
            worker_rate,
            node_count: record.node_count,
            hours_per_month: record.hours_per_month,
            months: record.months,
            cost: record.cost,
            resolved: driver.is_some() && worker.is_some(),
        });
    }
    debug!(records = summary.records.len(), cost = summary.total_cost, "Priced development compute");
    summary
}
