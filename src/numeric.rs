//! Lenient numeric input handling.
//!
//! Values coming from pricing sheets and hand-edited scenario files are not
//! trusted to be well-formed. Anything that is not a number (or a string that
//! parses as one) becomes `0.0`, and cost-bearing quantities never go negative.
//! Switches accept the usual yes/no spellings.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawNumber {
    fn into_f64(self) -> f64 {
        let value = match self {
            RawNumber::Int(v) => v as f64,
            RawNumber::Float(v) => v,
            RawNumber::Text(s) => parse_text(&s),
            RawNumber::Other(_) => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

fn parse_text(s: &str) -> f64 {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Clamp to `[0, +inf)`, mapping NaN and infinities to zero.
pub fn non_negative_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Deserialize any value as a non-negative `f64`.
pub fn non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawNumber::deserialize(deserializer)?;
    Ok(non_negative_value(raw.into_f64()))
}

/// Deserialize any value as a whole, non-negative count (fractions truncate).
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawNumber::deserialize(deserializer)?;
    let value = non_negative_value(raw.into_f64()).trunc();
    Ok(value.min(u32::MAX as f64) as u32)
}

/// Deserialize any value as a percentage in `[0, 100]`.
pub fn percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawNumber::deserialize(deserializer)?;
    Ok(non_negative_value(raw.into_f64()).min(100.0))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawFlag {
    fn into_bool(self) -> Option<bool> {
        match self {
            RawFlag::Bool(v) => Some(v),
            RawFlag::Int(v) => Some(v != 0),
            RawFlag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "on" | "1" => Some(true),
                "false" | "no" | "n" | "off" | "0" => Some(false),
                _ => None,
            },
            RawFlag::Other(_) => None,
        }
    }
}

/// Deserialize a yes/no switch; unreadable values are `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawFlag::deserialize(deserializer)?.into_bool().unwrap_or(false))
}

/// Like [`flag`], for switches that are on unless clearly turned off.
pub fn flag_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawFlag::deserialize(deserializer)?.into_bool().unwrap_or(true))
}
