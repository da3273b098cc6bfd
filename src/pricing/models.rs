use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Billing category a compute type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeCategory {
    Jobs,
    SqlWarehouse,
    Development,
}

impl ComputeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::SqlWarehouse => "SQL warehouse",
            Self::Development => "development",
        }
    }
}

/// Compute types recognised in the rate card.
///
/// Rows with any other compute type are dropped at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComputeType {
    #[serde(rename = "DLT Advanced Compute")]
    DltAdvancedCompute,
    #[serde(rename = "DLT Advanced Compute Photon")]
    DltAdvancedComputePhoton,
    #[serde(rename = "Jobs Compute")]
    JobsCompute,
    #[serde(rename = "Jobs Compute Photon")]
    JobsComputePhoton,
    #[serde(rename = "SQL Compute")]
    SqlCompute,
    #[serde(rename = "SQL Pro Compute")]
    SqlProCompute,
    #[serde(rename = "All-Purpose Compute")]
    AllPurposeCompute,
}

impl ComputeType {
    pub const ALL: [ComputeType; 7] = [
        Self::DltAdvancedCompute,
        Self::DltAdvancedComputePhoton,
        Self::JobsCompute,
        Self::JobsComputePhoton,
        Self::SqlCompute,
        Self::SqlProCompute,
        Self::AllPurposeCompute,
    ];

    /// Name as it appears in the pricing sheet
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DltAdvancedCompute => "DLT Advanced Compute",
            Self::DltAdvancedComputePhoton => "DLT Advanced Compute Photon",
            Self::JobsCompute => "Jobs Compute",
            Self::JobsComputePhoton => "Jobs Compute Photon",
            Self::SqlCompute => "SQL Compute",
            Self::SqlProCompute => "SQL Pro Compute",
            Self::AllPurposeCompute => "All-Purpose Compute",
        }
    }

    pub fn category(&self) -> ComputeCategory {
        match self {
            Self::DltAdvancedCompute
            | Self::DltAdvancedComputePhoton
            | Self::JobsCompute
            | Self::JobsComputePhoton => ComputeCategory::Jobs,
            Self::SqlCompute | Self::SqlProCompute => ComputeCategory::SqlWarehouse,
            Self::AllPurposeCompute => ComputeCategory::Development,
        }
    }
}

impl fmt::Display for ComputeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComputeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|ct| ct.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown compute type '{}'", wanted))
    }
}

/// S3 storage classes that can carry a per-GB price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StorageClass {
    Standard,
    IntelligentTiering,
    StandardIa,
    OneZoneIa,
    GlacierInstantRetrieval,
    GlacierFlexibleRetrieval,
    GlacierDeepArchive,
    ExpressOneZone,
}

impl StorageClass {
    pub const ALL: [StorageClass; 8] = [
        Self::Standard,
        Self::IntelligentTiering,
        Self::StandardIa,
        Self::OneZoneIa,
        Self::GlacierInstantRetrieval,
        Self::GlacierFlexibleRetrieval,
        Self::GlacierDeepArchive,
        Self::ExpressOneZone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::IntelligentTiering => "Intelligent-Tiering",
            Self::StandardIa => "Standard-IA",
            Self::OneZoneIa => "One Zone-IA",
            Self::GlacierInstantRetrieval => "Glacier Instant Retrieval",
            Self::GlacierFlexibleRetrieval => "Glacier Flexible Retrieval",
            Self::GlacierDeepArchive => "Glacier Deep Archive",
            Self::ExpressOneZone => "Express One Zone",
        }
    }
}

/// Case, whitespace, hyphens, underscores and a leading "S3" don't matter:
/// "s3 standard-ia" and "Standard IA" name the same class.
fn normalize_class_name(s: &str) -> String {
    let squashed: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match squashed.strip_prefix("s3") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => squashed,
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_class_name(s);
        Self::ALL
            .iter()
            .copied()
            .find(|class| normalize_class_name(class.as_str()) == wanted)
            .ok_or_else(|| format!("unknown storage class '{}'", s.trim()))
    }
}

impl TryFrom<String> for StorageClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StorageClass> for String {
    fn from(class: StorageClass) -> Self {
        class.as_str().to_string()
    }
}

/// A compute type or storage class as written in a scenario.
///
/// Names parse leniently through `FromStr`. Anything unrecognised is kept
/// verbatim and never matches a pricing row, so it is priced at zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Named<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: Copy> Named<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            Named::Known(value) => Some(*value),
            Named::Unrecognized(_) => None,
        }
    }
}

impl<T: FromStr> Named<T> {
    pub fn parse(name: &str) -> Self {
        match name.parse() {
            Ok(value) => Named::Known(value),
            Err(_) => Named::Unrecognized(name.trim().to_string()),
        }
    }
}

impl<T> From<T> for Named<T> {
    fn from(value: T) -> Self {
        Named::Known(value)
    }
}

impl<T: PartialEq> PartialEq<T> for Named<T> {
    fn eq(&self, other: &T) -> bool {
        matches!(self, Named::Known(value) if value == other)
    }
}

impl<T: fmt::Display> fmt::Display for Named<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Named::Known(value) => fmt::Display::fmt(value, f),
            Named::Unrecognized(name) => f.write_str(name),
        }
    }
}

impl<T: fmt::Display> Serialize for Named<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawName {
    Text(String),
    Int(i64),
    Float(f64),
    Other(serde::de::IgnoredAny),
}

impl<'de, T: FromStr> Deserialize<'de> for Named<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = match RawName::deserialize(deserializer)? {
            RawName::Text(s) => s,
            RawName::Int(v) => v.to_string(),
            RawName::Float(v) => v.to_string(),
            RawName::Other(_) => String::new(),
        };
        Ok(Self::parse(&name))
    }
}

/// One pricing row of the compute rate card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateCardEntry {
    pub instance_id: String,
    pub compute_type: ComputeType,
    pub vcpu: f64,
    pub memory_gb: f64,
    pub dbu_per_hour: f64,
    pub rate_per_hour: f64,
    pub on_demand_hourly: f64,
}

impl RateCardEntry {
    pub fn rates(&self) -> Rates {
        Rates {
            dbu_per_hour: self.dbu_per_hour,
            rate_per_hour: self.rate_per_hour,
            on_demand_hourly: self.on_demand_hourly,
        }
    }
}

/// Hourly prices used by the calculators
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rates {
    pub dbu_per_hour: f64,
    pub rate_per_hour: f64,
    pub on_demand_hourly: f64,
}

impl Rates {
    pub const ZERO: Rates = Rates {
        dbu_per_hour: 0.0,
        rate_per_hour: 0.0,
        on_demand_hourly: 0.0,
    };
}

/// Outcome of a rate-card lookup.
///
/// Callers that only need numbers use [`Lookup::rates`], which prices an
/// unresolved reference at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a RateCardEntry),
    Unresolved,
}

impl<'a> Lookup<'a> {
    pub fn rates(&self) -> Rates {
        match self {
            Lookup::Found(entry) => entry.rates(),
            Lookup::Unresolved => Rates::ZERO,
        }
    }

    pub fn entry(&self) -> Option<&'a RateCardEntry> {
        match self {
            Lookup::Found(entry) => Some(entry),
            Lookup::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn or_else(self, fallback: impl FnOnce() -> Lookup<'a>) -> Lookup<'a> {
        match self {
            Lookup::Found(_) => self,
            Lookup::Unresolved => fallback(),
        }
    }
}
