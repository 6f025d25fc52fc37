use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uvg_core::NetworkError;

/// Current conditions for a searched place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub suburb: String,
    pub temperature_c: f64,
    pub uv_index: f64,
    pub description: String,
}

/// One point of the historical skin-cancer rate series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancerRatePoint {
    #[serde(deserialize_with = "lenient_i32")]
    pub year: i32,
    #[serde(deserialize_with = "lenient_f64")]
    pub rate: f64,
    pub gender: String,
}

/// One slice of the rate-by-gender breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderRatePoint {
    pub name: String,
    pub value: f64,
}

impl GenderRatePoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Gateway records use either numeric or string ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A recommended protection product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionItem {
    pub record_id: RecordId,
    pub item_name: String,
    pub img_link: String,
}

/// Gateway request errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("HTTP client error: {0}")]
    Client(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) if n.fract() == 0.0 => Ok(n as i32),
        NumberOrText::Number(n) => Err(serde::de::Error::custom(format!(
            "expected a whole year, got {}",
            n
        ))),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
