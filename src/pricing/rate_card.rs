use crate::pricing::index::{build_index, LabelStyle, RateCardIndex, StoragePricing};
use crate::pricing::models::{ComputeCategory, RateCardEntry};

/// Everything priced by one load of the pricing sources.
///
/// Built once and passed by reference to every calculator.
#[derive(Debug, Clone)]
pub struct RateCard {
    /// Jobs and pipelines (DLT / Jobs Compute)
    pub jobs: RateCardIndex,
    /// SQL warehouses, nested by compute type
    pub sql: RateCardIndex,
    /// All-purpose development clusters
    pub dev: RateCardIndex,
    pub storage: StoragePricing,
    /// SHA-256 of the pricing sources, for reports
    pub fingerprint: String,
}

impl RateCard {
    /// Partition compute rows by category and index each partition
    pub fn new(entries: Vec<RateCardEntry>, storage: StoragePricing) -> Self {
        let mut jobs = Vec::new();
        let mut sql = Vec::new();
        let mut dev = Vec::new();
        for entry in entries {
            match entry.compute_type.category() {
                ComputeCategory::Jobs => jobs.push(entry),
                ComputeCategory::SqlWarehouse => sql.push(entry),
                ComputeCategory::Development => dev.push(entry),
            }
        }

        Self {
            jobs: build_index(jobs, LabelStyle::Hardware),
            sql: build_index(sql, LabelStyle::Warehouse),
            dev: build_index(dev, LabelStyle::Development),
            storage,
            fingerprint: String::new(),
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = fingerprint.into();
        self
    }

    pub fn index_for(&self, category: ComputeCategory) -> &RateCardIndex {
        match category {
            ComputeCategory::Jobs => &self.jobs,
            ComputeCategory::SqlWarehouse => &self.sql,
            ComputeCategory::Development => &self.dev,
        }
    }

    /// First compute category with no rows, if any
    pub fn missing_category(&self) -> Option<ComputeCategory> {
        [
            ComputeCategory::Jobs,
            ComputeCategory::SqlWarehouse,
            ComputeCategory::Development,
        ]
        .into_iter()
        .find(|category| self.index_for(*category).is_empty())
    }
}
