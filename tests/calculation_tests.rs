/// End-to-end checks of the cost formulas through the public API
use cloud_cost_calculator::cost::{
    aggregate, compute_dev_cost, compute_job_costs, compute_storage_cost, compute_warehouse_cost,
    cumulative_projection,
};
use cloud_cost_calculator::estimate::estimate;
use cloud_cost_calculator::pricing::{
    ComputeType, RateCard, RateCardEntry, StorageClass, StoragePricing,
};
use cloud_cost_calculator::scenario::{
    DevComputeRecord, DirectZone, JobRecord, Scenario, StorageConfig, StorageMode, StorageUnit,
    TableShape, TableZone, WarehouseConfig,
};

fn entry(compute_type: ComputeType, instance: &str, dbu: f64, rate: f64, on_demand: f64) -> RateCardEntry {
    RateCardEntry {
        instance_id: instance.to_string(),
        compute_type,
        vcpu: 4.0,
        memory_gb: 16.0,
        dbu_per_hour: dbu,
        rate_per_hour: rate,
        on_demand_hourly: on_demand,
    }
}

fn rate_card() -> RateCard {
    RateCard::new(
        vec![
            entry(ComputeType::JobsCompute, "m5.xlarge", 1.5, 4.0, 0.5),
            entry(ComputeType::DltAdvancedCompute, "m5.xlarge", 1.0, 0.36, 0.5),
            entry(ComputeType::SqlProCompute, "Small", 12.0, 6.6, 0.0),
            entry(ComputeType::AllPurposeCompute, "m5.2xlarge", 1.37, 2.0, 0.384),
        ],
        StoragePricing::new(vec![
            (StorageClass::Standard, 0.023),
            (StorageClass::StandardIa, 0.0125),
        ]),
    )
}

fn job(label: &str) -> JobRecord {
    JobRecord {
        name: "orders_ingest".to_string(),
        runtime_hours: 2.0,
        runs_per_month: 10.0,
        compute_type: ComputeType::JobsCompute.into(),
        instance_label: label.to_string(),
        node_count: 3,
        photon_enabled: false,
        spot_enabled: true,
    }
}

fn direct_zone(amount: f64, unit: StorageUnit) -> DirectZone {
    DirectZone {
        zone: "Landing Zone".to_string(),
        storage_class: StorageClass::Standard.into(),
        amount,
        unit,
        monthly_growth_percent: 0.0,
        quarterly_cost: 0.0,
        half_yearly_cost: 0.0,
    }
}

#[test]
fn test_empty_collections_cost_nothing() {
    let card = rate_card();

    let jobs = compute_job_costs(&[], &card.jobs);
    let mut storage_config = StorageConfig::default();
    let storage = compute_storage_cost(&mut storage_config, &card.storage);
    let warehouses = compute_warehouse_cost(&[], &card.sql);
    let dev = compute_dev_cost(&mut [], &card.dev);

    assert_eq!(jobs.total_platform_cost, 0.0);
    assert_eq!(jobs.total_infra_cost, 0.0);
    assert_eq!(jobs.total_dbu_cost, 0.0);
    assert_eq!(storage.total_monthly_cost, 0.0);
    assert_eq!(storage.total_12mo_projection, 0.0);
    assert_eq!(warehouses.total_cost, 0.0);
    assert_eq!(warehouses.total_dbus, 0.0);
    assert_eq!(dev.total_cost, 0.0);

    let summary = aggregate(&[], &storage, &warehouses, &dev, 0.0);
    assert_eq!(summary.grand_total, 0.0);
    assert!(summary.distribution.is_empty());
}

#[test]
fn test_job_formula_pinned() {
    let card = rate_card();
    let summary = compute_job_costs(&[job("m5.xlarge | 4 CPUs | 16GB")], &card.jobs);
    let cost = &summary.jobs[0];

    // (3 workers + 1 driver) × 2 h × 10 runs
    assert_eq!(cost.effective_units, 80.0);
    assert_eq!(cost.dbu_cost, 120.0);
    assert_eq!(cost.platform_cost, 320.0);
    // on-demand hourly × nodes, independent of runtime and runs
    assert_eq!(cost.infra_cost, 2.0);
}

#[test]
fn test_unknown_instance_is_free_not_an_error() {
    let card = rate_card();
    let summary = compute_job_costs(&[job("z9.metal | 96 CPUs | 768GB")], &card.jobs);

    assert_eq!(summary.jobs.len(), 1);
    assert!(!summary.jobs[0].is_resolved());
    assert_eq!(summary.total_platform_cost, 0.0);
    assert_eq!(summary.total_infra_cost, 0.0);
    assert_eq!(summary.total_dbu_cost, 0.0);
}

#[test]
fn test_two_terabytes_cost_the_same_as_2048_gigabytes() {
    let card = rate_card();
    let mut tb = StorageConfig {
        mode: StorageMode::Direct,
        direct: vec![direct_zone(2.0, StorageUnit::Tb)],
        table_based: Vec::new(),
    };
    let mut gb = StorageConfig {
        mode: StorageMode::Direct,
        direct: vec![direct_zone(2048.0, StorageUnit::Gb)],
        table_based: Vec::new(),
    };

    let tb_cost = compute_storage_cost(&mut tb, &card.storage);
    let gb_cost = compute_storage_cost(&mut gb, &card.storage);
    assert_eq!(tb_cost.total_monthly_cost, gb_cost.total_monthly_cost);
    assert_eq!(tb_cost.zones[0].storage_gb, 2048.0);
}

#[test]
fn test_quarterly_projection() {
    assert!((cumulative_projection(100.0, 0.10, 3) - 331.0).abs() < 1e-9);
    assert_eq!(cumulative_projection(100.0, 0.0, 3), 300.0);
}

#[test]
fn test_table_based_estimate() {
    let card = rate_card();
    let mut config = StorageConfig {
        mode: StorageMode::TableBased,
        direct: Vec::new(),
        table_based: vec![TableZone {
            zone: "L0 / Raw".to_string(),
            tables: vec![TableShape {
                table_name: "Bronze_Table_1".to_string(),
                record_count: 1_000_000.0,
                column_count: 10.0,
                table_multiplier: 2.0,
            }],
        }],
    };

    let storage = compute_storage_cost(&mut config, &card.storage);
    let zone = &storage.zones[0];

    // 1e6 × 10 KB / 1024² per table, two tables
    let expected_gb = 1_000_000.0 * 10.0 / (1024.0 * 1024.0) * 2.0;
    assert!((zone.storage_gb - expected_gb).abs() < 1e-9);
    assert!((zone.storage_gb - 19.0735).abs() < 1e-3);
    assert!((zone.monthly_cost - expected_gb * 0.023).abs() < 1e-9);
    // table-based projections do not compound
    assert_eq!(storage.total_12mo_projection, storage.total_monthly_cost * 12.0);
}

#[test]
fn test_idle_warehouse_costs_nothing() {
    let card = rate_card();
    let warehouse = WarehouseConfig {
        id: "warehouse_0".to_string(),
        name: "Primary BI Warehouse".to_string(),
        compute_type: ComputeType::SqlProCompute.into(),
        instance_label: "Small - 12/hr - $6.6/hr".to_string(),
        node_count: 2,
        hours_per_day: 0.0,
        days_per_month: 22.0,
        auto_suspend: true,
        suspend_after_minutes: 10,
    };

    let summary = compute_warehouse_cost(&[warehouse], &card.sql);
    assert_eq!(summary.total_cost, 0.0);
    assert_eq!(summary.total_dbus, 0.0);
}

#[test]
fn test_grand_total_is_sum_of_categories() {
    let card = rate_card();
    let mut scenario = Scenario::default_for(&card);
    scenario.tiers[2].jobs = vec![job("m5.xlarge")];
    scenario.storage.direct[0] = direct_zone(1.0, StorageUnit::Tb);
    scenario.dev_compute[0].hours_per_month = 40.0;
    scenario.dev_compute[0].months = 1.0;

    let estimate = estimate(&mut scenario, &card);
    let summary = &estimate.summary;

    assert!(summary.databricks_total > 0.0);
    assert!(summary.storage_total > 0.0);
    assert!(summary.warehouse_total > 0.0);
    assert!(
        (summary.grand_total
            - (summary.databricks_total + summary.storage_total + summary.warehouse_total))
            .abs()
            < 1e-9
    );
    // development cost stays out of the grand total
    assert!(summary.dev_total > 0.0);
    let shares: f64 = summary.distribution.iter().map(|s| s.percent).sum();
    assert!((shares - 100.0).abs() < 1e-9);
}

#[test]
fn test_dev_formula_pinned() {
    let card = rate_card();
    let mut records = vec![DevComputeRecord {
        driver_instance_label: "m5.2xlarge | 1.37 DBUs | 2/hr".to_string(),
        worker_instance_label: "m5.2xlarge".to_string(),
        node_count: 3,
        hours_per_month: 10.0,
        months: 2.0,
        cost: 0.0,
    }];

    let summary = compute_dev_cost(&mut records, &card.dev);
    // 2 × (2.0 × 3 + 1) × 10 × 2
    assert_eq!(records[0].cost, 280.0);
    assert_eq!(summary.total_cost, 280.0);

    let mut unknown = vec![DevComputeRecord {
        driver_instance_label: "x1.32xlarge".to_string(),
        worker_instance_label: "x1.32xlarge".to_string(),
        node_count: 3,
        hours_per_month: 10.0,
        months: 2.0,
        cost: 0.0,
    }];
    let summary = compute_dev_cost(&mut unknown, &card.dev);
    assert_eq!(summary.total_cost, 2.0 * 10.0 * 2.0);
}

#[test]
fn test_dev_cost_not_in_grand_total() {
    let card = rate_card();
    let mut scenario = Scenario::default();
    scenario.dev_compute.push(DevComputeRecord {
        driver_instance_label: "m5.2xlarge".to_string(),
        worker_instance_label: "m5.2xlarge".to_string(),
        node_count: 1,
        hours_per_month: 10.0,
        months: 1.0,
        cost: 0.0,
    });

    let estimate = estimate(&mut scenario, &card);
    assert_eq!(estimate.summary.dev_total, 60.0);
    assert_eq!(estimate.summary.grand_total, 0.0);
    assert!(estimate.summary.distribution.is_empty());
}
