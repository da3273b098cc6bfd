//! CLI integration tests using assert_cmd.
//!
//! Each test runs the binary inside a temporary directory with a config file
//! pointing at the bundled pricing sources.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CUSTOM_SCENARIO: &str = r#"
compute_monthly_growth_percent = 2

[[tiers]]
tier = "L2 / Data Product"

[[tiers.jobs]]
name = "daily_agg"
runtime_hours = 1.5
runs_per_month = 30
compute_type = "DLT Advanced Compute"
instance_label = "m5.xlarge | 4 CPUs | 16GB"
node_count = 2

[storage]
mode = "direct"

[[storage.direct]]
zone = "Landing Zone"
storage_class = "Standard"
amount = 5
unit = "TB"

[[warehouses]]
id = "w1"
name = "Finance BI"
compute_type = "SQL Compute"
instance_label = "Gigantic - 1/hr - $1/hr"
hours_per_day = 10
days_per_month = 20
"#;

#[allow(deprecated)]
fn calculator(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cloud-cost-calculator").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("COSTCALC_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn pricing_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("pricing").join(name)
}

/// Temp dir holding a config.toml that points at the bundled pricing
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let config = format!(
        "[logging]\nlevel = \"warn\"\n\n[pricing]\nrate_card = {}\nstorage = {}\n",
        toml::Value::String(pricing_path("rate_card.json").display().to_string()),
        toml::Value::String(pricing_path("s3_storage.json").display().to_string()),
    );
    fs::write(dir.path().join("config.toml"), config).unwrap();
    dir
}

fn initialized_workspace() -> TempDir {
    let dir = workspace();
    calculator(&dir).arg("init").assert().success();
    dir
}

// --- Help and arg validation ---

#[test]
fn help_shows_all_subcommands() {
    let dir = workspace();
    calculator(&dir).arg("--help").assert().success().stdout(
        predicate::str::contains("estimate")
            .and(predicate::str::contains("export"))
            .and(predicate::str::contains("rates"))
            .and(predicate::str::contains("init"))
            .and(predicate::str::contains("check"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn version_needs_no_config() {
    let dir = tempfile::tempdir().unwrap();
    calculator(&dir)
        .args(["--config", "does-not-parse.toml", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_format_rejected() {
    let dir = workspace();
    calculator(&dir)
        .args(["estimate", "--format", "xlsx"])
        .assert()
        .failure();
}

// --- init ---

#[test]
fn init_writes_default_scenario() {
    let dir = initialized_workspace();
    let scenario = fs::read_to_string(dir.path().join("scenario.toml")).unwrap();
    assert!(scenario.contains("Primary BI Warehouse"));
    assert!(scenario.contains("L0 / Raw"));
    assert!(scenario.contains("Landing Zone"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = initialized_workspace();
    calculator(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    calculator(&dir).args(["init", "--force"]).assert().success();
}

// --- estimate / export ---

#[test]
fn estimate_prints_tables() {
    let dir = initialized_workspace();
    calculator(&dir).arg("estimate").assert().success().stdout(
        predicate::str::contains("Databricks Jobs")
            .and(predicate::str::contains("SQL Warehouses"))
            .and(predicate::str::contains("Total Monthly Cost"))
            .and(predicate::str::contains("Primary BI Warehouse")),
    );
}

#[test]
fn default_command_is_estimate() {
    let dir = initialized_workspace();
    calculator(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Monthly Cost"));
}

#[test]
fn estimate_json_is_machine_readable() {
    let dir = workspace();
    fs::write(dir.path().join("custom.toml"), CUSTOM_SCENARIO).unwrap();

    let output = calculator(&dir)
        .args(["estimate", "--scenario", "custom.toml", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let summary = &json["summary"];
    let grand = summary["grand_total"].as_f64().unwrap();
    let parts = summary["databricks_total"].as_f64().unwrap()
        + summary["storage_total"].as_f64().unwrap()
        + summary["warehouse_total"].as_f64().unwrap();
    assert!((grand - parts).abs() < 1e-6);
    // 5 TB of Standard storage at $0.023/GB
    assert!((summary["storage_total"].as_f64().unwrap() - 5.0 * 1024.0 * 0.023).abs() < 1e-6);
    // unknown warehouse size prices at zero
    assert_eq!(summary["warehouse_total"].as_f64().unwrap(), 0.0);
}

#[test]
fn export_writes_report_document() {
    let dir = initialized_workspace();
    calculator(&dir)
        .args(["export", "--output", "report.json"])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    let names: Vec<&str> = report["sheets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|sheet| sheet["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Databricks_Jobs",
            "S3_Direct_Storage",
            "SQL_Warehouses",
            "Development_Cost",
            "Summary"
        ]
    );
    assert_eq!(report["rate_card_fingerprint"].as_str().unwrap().len(), 64);
}

#[test]
fn missing_scenario_points_to_init() {
    let dir = workspace();
    calculator(&dir)
        .arg("estimate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("init"));
}

#[test]
fn missing_pricing_is_fatal() {
    let dir = initialized_workspace();
    calculator(&dir)
        .env("COSTCALC_PRICING__STORAGE", "nowhere/s3_storage.json")
        .arg("estimate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read pricing source"));
}

// --- check / rates / config ---

#[test]
fn check_lists_unresolved_references() {
    let dir = workspace();
    fs::write(dir.path().join("custom.toml"), CUSTOM_SCENARIO).unwrap();

    calculator(&dir)
        .args(["check", "-s", "custom.toml"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2 issue(s) found")
                .and(predicate::str::contains("not used in this tier"))
                .and(predicate::str::contains("Gigantic")),
        );
}

#[test]
fn unrecognized_names_still_estimate() {
    let dir = workspace();
    let scenario = r#"
[[storage.direct]]
zone = "Archive"
storage_class = "Deep Tape"
amount = 3
unit = "TB"

[[warehouses]]
id = "w1"
name = "Ad hoc"
compute_type = "Serverless SQL"
instance_label = "Small"
hours_per_day = 4
days_per_month = 20
"#;
    fs::write(dir.path().join("odd.toml"), scenario).unwrap();

    let output = calculator(&dir)
        .args(["estimate", "-s", "odd.toml", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["grand_total"].as_f64().unwrap(), 0.0);
    assert_eq!(json["storage"]["zones"][0]["storage_class"], "Deep Tape");

    calculator(&dir)
        .args(["check", "-s", "odd.toml"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2 issue(s) found")
                .and(predicate::str::contains("'Deep Tape'"))
                .and(predicate::str::contains("unknown compute type 'Serverless SQL'")),
        );
}

#[test]
fn check_passes_default_scenario() {
    let dir = initialized_workspace();
    calculator(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All references resolve"));
}

#[test]
fn rates_filters_by_compute_type() {
    let dir = workspace();
    calculator(&dir)
        .args(["rates", "--compute-type", "SQL Pro Compute"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Small - 12/hr - $6.6/hr")
                .and(predicate::str::contains("Jobs Compute").not()),
        );
}

#[test]
fn rates_rejects_unknown_compute_type() {
    let dir = workspace();
    calculator(&dir)
        .args(["rates", "-t", "Serverless"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown compute type"));
}

#[test]
fn config_show_applies_env_overrides() {
    let dir = workspace();
    calculator(&dir)
        .env("COSTCALC_SCENARIO__PATH", "plans/q4.toml")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("plans/q4.toml")
                .and(predicate::str::contains("rate_card.json")),
        );
}

#[test]
fn invalid_log_level_rejected() {
    let dir = workspace();
    fs::write(dir.path().join("bad.toml"), "[logging]\nlevel = \"loud\"\n").unwrap();
    calculator(&dir)
        .args(["--config", "bad.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}
