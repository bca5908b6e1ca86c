use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod selectors;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use selectors::{load_selectors, Selectors};

/// A geographic point. Degrees, WGS84.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Postal-style address fields for a location. Empty string means the field
/// was absent from the source markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub country: String,
    pub state: String,
    pub city: String,
}

/// One location extracted from the host markup.
///
/// Produced fresh on every extraction pass and never mutated afterwards.
/// `id` is the natural key for marker reconciliation; it may be empty when
/// the source item carries no id field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub title: String,
    pub image_url: String,
    /// `None` when the source field was absent, empty, or unparsable.
    /// Never a partial value — both halves parse or neither does.
    pub coordinate: Option<Coordinate>,
    pub is_premium: bool,
    pub address: Address,
}

impl LocationRecord {
    /// Whether this record qualifies for marker rendering: a non-empty id
    /// and a present coordinate.
    #[must_use]
    pub fn is_markable(&self) -> bool {
        !self.id.is_empty() && self.coordinate.is_some()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read selectors file {path}: {source}")]
    SelectorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse selectors file: {0}")]
    SelectorsFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, coordinate: Option<Coordinate>) -> LocationRecord {
        LocationRecord {
            id: id.to_string(),
            title: "Terminal One".to_string(),
            image_url: String::new(),
            coordinate,
            is_premium: false,
            address: Address::default(),
        }
    }

    #[test]
    fn markable_requires_id_and_coordinate() {
        let c = Coordinate { lat: 1.0, lng: 2.0 };
        assert!(record("a", Some(c)).is_markable());
        assert!(!record("", Some(c)).is_markable());
        assert!(!record("a", None).is_markable());
    }

    #[test]
    fn record_serializes_absent_coordinate_as_null() {
        let json = serde_json::to_value(record("a", None)).unwrap();
        assert!(json["coordinate"].is_null());
    }
}
