/// Loading pricing sources from disk
use cloud_cost_calculator::error::AppError;
use cloud_cost_calculator::pricing::{load_rate_card, ComputeType, StorageClass};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const COMPUTE_ROWS: &str = r#"[
  {"Compute type": "Jobs Compute", "Instance": "m5.xlarge", "vCPU": 4, "Memory (GB)": 16,
   "DBU/hour": 0.69, "Rate/hour": 0.1035, "onDemandLinuxHr": 0.192},
  {"Compute type": "DLT Advanced Compute", "Instance": "m5.xlarge", "vCPU": 4, "Memory (GB)": 16,
   "DBU/hour": 0.69, "Rate/hour": 0.2484, "onDemandLinuxHr": 0.192},
  {"Compute type": "SQL Pro Compute", "Instance": "Small", "vCPU": null, "Memory (GB)": null,
   "DBU/hour": 12, "Rate/hour": 6.6, "onDemandLinuxHr": 0},
  {"Compute type": "All-Purpose Compute", "Instance": "m5.xlarge", "vCPU": 4, "Memory (GB)": 16,
   "DBU/hour": 0.69, "Rate/hour": 0.3795, "onDemandLinuxHr": 0.192},
  {"Compute type": "Model Serving", "Instance": "gpu-small", "vCPU": 8, "Memory (GB)": 32,
   "DBU/hour": 10, "Rate/hour": 0.7, "onDemandLinuxHr": 1.2}
]"#;

const STORAGE_ROWS: &str = r#"[
  {"S3_storage": "S3 Standard", "Rate/GB": 0.023},
  {"S3_storage": "S3 Glacier Deep Archive", "Rate/GB": "0.00099"}
]"#;

fn write_sources(dir: &TempDir, compute: &str, storage: &str) -> (PathBuf, PathBuf) {
    let compute_path = dir.path().join("rate_card.json");
    let storage_path = dir.path().join("s3_storage.json");
    fs::write(&compute_path, compute).unwrap();
    fs::write(&storage_path, storage).unwrap();
    (compute_path, storage_path)
}

#[test]
fn test_load_valid_sources() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let (compute, storage) = write_sources(&dir, COMPUTE_ROWS, STORAGE_ROWS);

    let card = load_rate_card(&compute, &storage)?;

    // Model Serving is not a priced compute type
    assert_eq!(card.jobs.len(), 2);
    assert_eq!(card.sql.len(), 1);
    assert_eq!(card.dev.len(), 1);
    assert_eq!(card.storage.rate_per_gb(StorageClass::Standard), Some(0.023));
    assert_eq!(card.storage.rate_per_gb(StorageClass::GlacierDeepArchive), Some(0.00099));
    assert_eq!(card.fingerprint.len(), 64);

    assert_eq!(
        card.sql.labels_for(ComputeType::SqlProCompute),
        &["Small - 12/hr - $6.6/hr".to_string()]
    );
    assert_eq!(
        card.dev.default_label(ComputeType::AllPurposeCompute),
        Some("m5.xlarge | 0.69 DBUs | 0.3795/hr")
    );
    Ok(())
}

#[test]
fn test_fingerprint_tracks_content() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let (compute, storage) = write_sources(&dir, COMPUTE_ROWS, STORAGE_ROWS);
    let first = load_rate_card(&compute, &storage)?.fingerprint;
    assert_eq!(load_rate_card(&compute, &storage)?.fingerprint, first);

    fs::write(&storage, STORAGE_ROWS.replace("0.023", "0.021"))?;
    assert_ne!(load_rate_card(&compute, &storage)?.fingerprint, first);
    Ok(())
}

#[test]
fn test_missing_source_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let (compute, _) = write_sources(&dir, COMPUTE_ROWS, STORAGE_ROWS);

    let err = load_rate_card(&compute, Path::new("/nonexistent/s3_storage.json")).unwrap_err();
    assert!(matches!(err, AppError::PricingUnreadable { .. }));
    assert!(err.is_pricing_load_error());
}

#[test]
fn test_malformed_document_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let (compute, storage) = write_sources(&dir, "{ not json", STORAGE_ROWS);

    let err = load_rate_card(&compute, &storage).unwrap_err();
    assert_eq!(err.kind(), "pricing_invalid");
    assert!(err.to_string().contains("rate_card.json"));
}

#[test]
fn test_missing_column_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let compute = COMPUTE_ROWS.replace(r#", "onDemandLinuxHr": 0.192}"#, "}");
    let (compute, storage) = write_sources(&dir, &compute, STORAGE_ROWS);

    let err = load_rate_card(&compute, &storage).unwrap_err();
    assert_eq!(err.kind(), "pricing_invalid");
    assert!(err.to_string().contains("onDemandLinuxHr"));
}

#[test]
fn test_empty_category_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let jobs_only = r#"[
      {"Compute type": "Jobs Compute", "Instance": "m5.xlarge", "vCPU": 4, "Memory (GB)": 16,
       "DBU/hour": 0.69, "Rate/hour": 0.1035, "onDemandLinuxHr": 0.192}
    ]"#;
    let (compute, storage) = write_sources(&dir, jobs_only, STORAGE_ROWS);

    let err = load_rate_card(&compute, &storage).unwrap_err();
    assert_eq!(err.kind(), "empty_pricing");
    assert!(err.to_string().contains("empty or invalid"));
}

#[test]
fn test_empty_storage_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (compute, storage) = write_sources(&dir, COMPUTE_ROWS, "[]");

    let err = load_rate_card(&compute, &storage).unwrap_err();
    assert!(matches!(err, AppError::EmptyPricing { category: "storage", .. }));
}

#[test]
fn test_bundled_pricing_loads() -> anyhow::Result<()> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let card = load_rate_card(
        &root.join("pricing/rate_card.json"),
        &root.join("pricing/s3_storage.json"),
    )?;

    for compute_type in ComputeType::ALL {
        let index = card.index_for(compute_type.category());
        assert!(
            !index.labels_for(compute_type).is_empty(),
            "no rows for {}",
            compute_type
        );
    }
    assert_eq!(card.storage.classes().len(), StorageClass::ALL.len());
    Ok(())
}
