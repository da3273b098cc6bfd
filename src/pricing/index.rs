use crate::pricing::models::{ComputeType, Lookup, RateCardEntry, StorageClass};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// How display labels are rendered for an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// `"{instance} | {vCPU} CPUs | {memory}GB"` (jobs and pipelines)
    Hardware,
    /// `"{instance} - {dbu}/hr - ${rate}/hr"` (SQL warehouses)
    Warehouse,
    /// `"{instance} | {dbu} DBUs | {rate}/hr"` (development clusters)
    Development,
}

impl LabelStyle {
    pub fn label_for(&self, entry: &RateCardEntry) -> String {
        match self {
            Self::Hardware => format!(
                "{} | {} CPUs | {}GB",
                entry.instance_id, entry.vcpu, entry.memory_gb
            ),
            Self::Warehouse => format!(
                "{} - {}/hr - ${}/hr",
                entry.instance_id, entry.dbu_per_hour, entry.rate_per_hour
            ),
            Self::Development => format!(
                "{} | {} DBUs | {}/hr",
                entry.instance_id, entry.dbu_per_hour, entry.rate_per_hour
            ),
        }
    }
}

/// Read-only lookup structures over one partition of the rate card
#[derive(Debug, Clone)]
pub struct RateCardIndex {
    /// (compute type, instance) -> row
    entries: HashMap<(ComputeType, String), RateCardEntry>,
    /// instance -> row; when an instance is listed under several compute
    /// types the last row loaded wins
    by_instance: HashMap<String, RateCardEntry>,
    /// display label -> instance
    labels: HashMap<String, String>,
    /// labels per compute type, in load order
    labels_by_type: BTreeMap<ComputeType, Vec<String>>,
}

/// Build an index from pricing rows
pub fn build_index<I>(rows: I, style: LabelStyle) -> RateCardIndex
where
    I: IntoIterator<Item = RateCardEntry>,
{
    let mut index = RateCardIndex {
        entries: HashMap::new(),
        by_instance: HashMap::new(),
        labels: HashMap::new(),
        labels_by_type: BTreeMap::new(),
    };

    for entry in rows {
        let label = style.label_for(&entry);
        let type_labels = index.labels_by_type.entry(entry.compute_type).or_default();
        if !type_labels.contains(&label) {
            type_labels.push(label.clone());
        }
        index.labels.insert(label, entry.instance_id.clone());
        index.by_instance.insert(entry.instance_id.clone(), entry.clone());
        index
            .entries
            .insert((entry.compute_type, entry.instance_id.clone()), entry);
    }

    debug!(
        rows = index.entries.len(),
        compute_types = index.labels_by_type.len(),
        "Built rate card index"
    );
    index
}

impl RateCardIndex {
    /// Number of distinct (compute type, instance) rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compute types present in this index
    pub fn compute_types(&self) -> impl Iterator<Item = ComputeType> + '_ {
        self.labels_by_type.keys().copied()
    }

    /// Display labels offered for a compute type, in load order
    pub fn labels_for(&self, compute_type: ComputeType) -> &[String] {
        self.labels_by_type
            .get(&compute_type)
            .map(|labels| labels.as_slice())
            .unwrap_or(&[])
    }

    /// First label offered for a compute type; used for scenario defaults
    pub fn default_label(&self, compute_type: ComputeType) -> Option<&str> {
        self.labels_for(compute_type).first().map(|s| s.as_str())
    }

    /// Rows for a compute type, in load order
    pub fn entries_for(&self, compute_type: ComputeType) -> Vec<&RateCardEntry> {
        self.labels_for(compute_type)
            .iter()
            .filter_map(|label| self.labels.get(label))
            .filter_map(|instance| self.entries.get(&(compute_type, instance.clone())))
            .collect()
    }

    pub fn get(&self, compute_type: ComputeType, instance_id: &str) -> Option<&RateCardEntry> {
        self.entries.get(&(compute_type, instance_id.to_string()))
    }

    /// Resolve a display label to its instance id.
    ///
    /// Accepts the exact label or a bare instance id. A label whose embedded
    /// hardware or prices no longer match the card does not resolve.
    pub fn instance_for_label(&self, label: &str) -> Option<&str> {
        let label = label.trim();
        if let Some(instance) = self.labels.get(label) {
            return Some(instance.as_str());
        }
        self.by_instance
            .get_key_value(label)
            .map(|(instance, _)| instance.as_str())
    }

    /// label -> instance -> row, ignoring compute type
    pub fn lookup(&self, label: &str) -> Lookup<'_> {
        match self
            .instance_for_label(label)
            .and_then(|instance| self.by_instance.get(instance))
        {
            Some(entry) => Lookup::Found(entry),
            None => Lookup::Unresolved,
        }
    }

    /// (compute type, label) -> row through the nested map
    pub fn lookup_typed(&self, compute_type: ComputeType, label: &str) -> Lookup<'_> {
        match self
            .instance_for_label(label)
            .and_then(|instance| self.get(compute_type, instance))
        {
            Some(entry) => Lookup::Found(entry),
            None => Lookup::Unresolved,
        }
    }
}

/// Per-GB monthly prices by storage class
#[derive(Debug, Clone, Default)]
pub struct StoragePricing {
    rates: HashMap<StorageClass, f64>,
    order: Vec<StorageClass>,
}

impl StoragePricing {
    pub fn new<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (StorageClass, f64)>,
    {
        let mut pricing = Self::default();
        for (class, rate) in rows {
            pricing.insert(class, rate);
        }
        pricing
    }

    pub fn insert(&mut self, class: StorageClass, rate_per_gb: f64) {
        if self.rates.insert(class, rate_per_gb).is_none() {
            self.order.push(class);
        }
    }

    pub fn rate_per_gb(&self, class: StorageClass) -> Option<f64> {
        self.rates.get(&class).copied()
    }

    /// Classes in load order
    pub fn classes(&self) -> &[StorageClass] {
        &self.order
    }

    /// First class loaded, falling back to `Standard`
    pub fn default_class(&self) -> StorageClass {
        self.order.first().copied().unwrap_or(StorageClass::Standard)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
