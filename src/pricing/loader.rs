use crate::error::AppError;
use crate::numeric;
use crate::pricing::index::StoragePricing;
use crate::pricing::models::{ComputeType, RateCardEntry, StorageClass};
use crate::pricing::rate_card::RateCard;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, info};

/// One row of the compute pricing sheet, keyed by the sheet's column names.
/// Every column must be present; blank or non-numeric prices read as 0.
#[derive(Debug, Deserialize)]
pub struct ComputePriceRow {
    #[serde(rename = "Compute type")]
    pub compute_type: String,
    #[serde(rename = "Instance")]
    pub instance: String,
    #[serde(rename = "vCPU", deserialize_with = "numeric::non_negative")]
    pub vcpu: f64,
    #[serde(rename = "Memory (GB)", deserialize_with = "numeric::non_negative")]
    pub memory_gb: f64,
    #[serde(rename = "DBU/hour", deserialize_with = "numeric::non_negative")]
    pub dbu_per_hour: f64,
    #[serde(rename = "Rate/hour", deserialize_with = "numeric::non_negative")]
    pub rate_per_hour: f64,
    #[serde(rename = "onDemandLinuxHr", deserialize_with = "numeric::non_negative")]
    pub on_demand_hourly: f64,
}

/// One row of the storage pricing sheet
#[derive(Debug, Deserialize)]
pub struct StoragePriceRow {
    #[serde(rename = "S3_storage")]
    pub storage_class: String,
    #[serde(rename = "Rate/GB", deserialize_with = "numeric::non_negative")]
    pub rate_per_gb: f64,
}

/// Parse compute pricing JSON, keeping only rows with a recognised compute type
pub fn parse_rate_card_json(json: &str) -> Result<Vec<RateCardEntry>, serde_json::Error> {
    let rows: Vec<ComputePriceRow> = serde_json::from_str(json)?;
    let total = rows.len();

    let entries: Vec<RateCardEntry> = rows
        .into_iter()
        .filter_map(|row| {
            let instance_id = row.instance.trim().to_string();
            if instance_id.is_empty() {
                debug!("Skipping pricing row without an instance");
                return None;
            }
            match row.compute_type.parse::<ComputeType>() {
                Ok(compute_type) => Some(RateCardEntry {
                    instance_id,
                    compute_type,
                    vcpu: row.vcpu,
                    memory_gb: row.memory_gb,
                    dbu_per_hour: row.dbu_per_hour,
                    rate_per_hour: row.rate_per_hour,
                    on_demand_hourly: row.on_demand_hourly,
                }),
                Err(_) => {
                    debug!(compute_type = %row.compute_type, instance = %instance_id, "Skipping pricing row");
                    None
                }
            }
        })
        .collect();

    info!("Parsed {} of {} compute pricing rows", entries.len(), total);
    Ok(entries)
}

/// Parse storage pricing JSON, keeping only recognised storage classes
pub fn parse_storage_pricing_json(json: &str) -> Result<StoragePricing, serde_json::Error> {
    let rows: Vec<StoragePriceRow> = serde_json::from_str(json)?;
    let total = rows.len();

    let mut pricing = StoragePricing::default();
    for row in rows {
        match row.storage_class.parse::<StorageClass>() {
            Ok(class) => pricing.insert(class, row.rate_per_gb),
            Err(_) => debug!(storage_class = %row.storage_class, "Skipping storage pricing row"),
        }
    }

    info!("Parsed {} of {} storage pricing rows", pricing.len(), total);
    Ok(pricing)
}

fn read_source(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::PricingUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Load both pricing sources and build the rate card.
///
/// Any failure here is fatal: a rate card that is missing, malformed, or has
/// no rows for one of the categories cannot price anything.
pub fn load_rate_card(compute_path: &Path, storage_path: &Path) -> Result<RateCard, AppError> {
    info!("Loading rate card from: {}", compute_path.display());
    let compute_json = read_source(compute_path)?;
    let entries = parse_rate_card_json(&compute_json).map_err(|e| AppError::PricingInvalid {
        path: compute_path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!("Loading storage pricing from: {}", storage_path.display());
    let storage_json = read_source(storage_path)?;
    let storage = parse_storage_pricing_json(&storage_json).map_err(|e| AppError::PricingInvalid {
        path: storage_path.to_path_buf(),
        message: e.to_string(),
    })?;

    if storage.is_empty() {
        return Err(AppError::EmptyPricing {
            path: storage_path.to_path_buf(),
            category: "storage",
        });
    }

    let fingerprint = calculate_hash(&format!("{}\n{}", compute_json, storage_json));
    let card = RateCard::new(entries, storage).with_fingerprint(fingerprint);

    if let Some(category) = card.missing_category() {
        return Err(AppError::EmptyPricing {
            path: compute_path.to_path_buf(),
            category: category.label(),
        });
    }

    info!(
        jobs = card.jobs.len(),
        sql = card.sql.len(),
        dev = card.dev.len(),
        storage_classes = card.storage.len(),
        "Rate card loaded"
    );
    Ok(card)
}

/// Calculate SHA256 hash of content
pub fn calculate_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
