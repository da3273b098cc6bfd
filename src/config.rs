use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub pricing: PricingConfig,
    pub scenario: ScenarioConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Pricing source locations
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Compute rate card (JSON rows)
    pub rate_card: PathBuf,
    /// Storage price table (JSON rows)
    pub storage: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScenarioConfig {
    /// Scenario used when a command is not given one
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Text,
            },
            pricing: PricingConfig {
                rate_card: PathBuf::from("pricing/rate_card.json"),
                storage: PathBuf::from("pricing/s3_storage.json"),
            },
            scenario: ScenarioConfig {
                path: PathBuf::from("scenario.toml"),
            },
        }
    }
}

/// Load configuration: built-in defaults, then the TOML file at `path` if it
/// exists, then `COSTCALC_*` environment variables (`__` separates levels,
/// e.g. `COSTCALC_PRICING__RATE_CARD`).
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    let defaults = Config::default();

    let config = config::Config::builder()
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.format", "text")?
        .set_default("pricing.rate_card", path_str(&defaults.pricing.rate_card))?
        .set_default("pricing.storage", path_str(&defaults.pricing.storage))?
        .set_default("scenario.path", path_str(&defaults.scenario.path))?
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("COSTCALC")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn validate_config(cfg: &Config) -> Result<(), AppError> {
    let level = cfg.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(AppError::ConfigError(format!(
            "Invalid log level '{}', expected one of: {}",
            cfg.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    let paths = [
        ("pricing.rate_card", &cfg.pricing.rate_card),
        ("pricing.storage", &cfg.pricing.storage),
        ("scenario.path", &cfg.scenario.path),
    ];
    for (key, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(AppError::ConfigError(format!("{} cannot be empty", key)));
        }
    }

    Ok(())
}
