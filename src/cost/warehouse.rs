use crate::pricing::{ComputeType, Lookup, Named, RateCardIndex};
use crate::scenario::WarehouseConfig;
use serde::Serialize;
use tracing::{debug, warn};

/// Priced SQL warehouse row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseCost {
    pub id: String,
    pub name: String,
    pub compute_type: Named<ComputeType>,
    pub instance_label: String,
    /// Resolved warehouse size, `None` when the label is unknown
    pub size: Option<String>,
    pub dbu_per_hour: f64,
    pub rate_per_hour: f64,
    pub node_count: u32,
    pub hours_per_day: f64,
    pub days_per_month: f64,
    /// Has hours, days and nodes; inactive warehouses cost nothing
    pub active: bool,
    pub monthly_cost: f64,
    pub dbus: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WarehouseCostSummary {
    pub warehouses: Vec<WarehouseCost>,
    pub total_cost: f64,
    pub total_dbus: f64,
}

pub fn is_active(warehouse: &WarehouseConfig) -> bool {
    warehouse.hours_per_day > 0.0 && warehouse.days_per_month > 0.0 && warehouse.node_count > 0
}

pub fn price_warehouse(warehouse: &WarehouseConfig, sql_index: &RateCardIndex) -> WarehouseCost {
    let lookup = match warehouse.compute_type.known() {
        Some(compute_type) => sql_index.lookup_typed(compute_type, &warehouse.instance_label),
        None => Lookup::Unresolved,
    };
    if !lookup.is_resolved() {
        warn!(
            warehouse = %warehouse.name,
            compute_type = %warehouse.compute_type,
            instance_label = %warehouse.instance_label,
            "Unresolved warehouse size, pricing at zero"
        );
    }
    let rates = lookup.rates();
    let active = is_active(warehouse);

    let usage = if active {
        warehouse.hours_per_day * warehouse.days_per_month * warehouse.node_count as f64
    } else {
        0.0
    };

    WarehouseCost {
        id: warehouse.id.clone(),
        name: warehouse.name.clone(),
        compute_type: warehouse.compute_type.clone(),
        instance_label: warehouse.instance_label.clone(),
        size: lookup.entry().map(|entry| entry.instance_id.clone()),
        dbu_per_hour: rates.dbu_per_hour,
        rate_per_hour: rates.rate_per_hour,
        node_count: warehouse.node_count,
        hours_per_day: warehouse.hours_per_day,
        days_per_month: warehouse.days_per_month,
        active,
        monthly_cost: rates.rate_per_hour * usage,
        dbus: rates.dbu_per_hour * usage,
    }
}

pub fn compute_warehouse_cost(
    warehouses: &[WarehouseConfig],
    sql_index: &RateCardIndex,
) -> WarehouseCostSummary {
    let mut summary = WarehouseCostSummary::default();
    for warehouse in warehouses {
        let cost = price_warehouse(warehouse, sql_index);
        summary.total_cost += cost.monthly_cost;
        summary.total_dbus += cost.dbus;
        summary.warehouses.push(cost);
    }
    debug!(
        warehouses = summary.warehouses.len(),
        cost = summary.total_cost,
        dbus = summary.total_dbus,
        "Priced SQL warehouses"
    );
    summary
}
