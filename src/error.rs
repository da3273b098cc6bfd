use std::path::PathBuf;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pricing source could not be read at all
    #[error("Failed to read pricing source {path}: {source}")]
    PricingUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pricing source was read but is malformed or lacks required columns
    #[error("Invalid pricing source {path}: {message}")]
    PricingInvalid { path: PathBuf, message: String },

    /// Pricing source has no rows for a required category
    #[error("Pricing source {path} has no {category} rows; the data is empty or invalid")]
    EmptyPricing {
        path: PathBuf,
        category: &'static str,
    },

    /// Scenario file error
    #[error("Scenario error: {0}")]
    ScenarioError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Stable machine-readable name, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "config_error",
            Self::PricingUnreadable { .. } => "pricing_unreadable",
            Self::PricingInvalid { .. } => "pricing_invalid",
            Self::EmptyPricing { .. } => "empty_pricing",
            Self::ScenarioError(_) => "scenario_error",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }

    /// Whether the error happened while loading pricing data.
    /// These halt every command before any computation.
    pub fn is_pricing_load_error(&self) -> bool {
        matches!(
            self,
            Self::PricingUnreadable { .. } | Self::PricingInvalid { .. } | Self::EmptyPricing { .. }
        )
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::ScenarioError(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
