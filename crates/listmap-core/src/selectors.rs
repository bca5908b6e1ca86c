//! The host markup contract: which classes and attributes address the list
//! container, its items, and the data fields inside each item.
//!
//! Loaded from a YAML file so a deployment can match whatever class names
//! the host page uses; every field has a built-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Class of the element wrapping the whole location list. Structural
    /// changes inside this element trigger re-extraction.
    pub container_class: String,
    /// Class of one list item.
    pub item_class: String,
    /// Class of the sub-element whose text is the location title.
    pub title_class: String,
    /// Class of the sub-element whose `src` attribute is the image URL.
    pub image_class: String,
    /// Attribute whose value names a data field (`latlong`, `id`, `premium`,
    /// `country`, `state`, `city`).
    pub field_attr: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            container_class: "map-list".to_string(),
            item_class: "map-list-item".to_string(),
            title_class: "location-title".to_string(),
            image_class: "location-image".to_string(),
            field_attr: "data-map-field".to_string(),
        }
    }
}

/// Load selectors from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains an
/// empty selector.
pub fn load_selectors(path: &Path) -> Result<Selectors, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SelectorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let selectors: Selectors = serde_yaml::from_str(&content)?;
    validate_selectors(&selectors)?;

    Ok(selectors)
}

fn validate_selectors(selectors: &Selectors) -> Result<(), ConfigError> {
    let fields = [
        ("container_class", &selectors.container_class),
        ("item_class", &selectors.item_class),
        ("title_class", &selectors.title_class),
        ("image_class", &selectors.image_class),
        ("field_attr", &selectors.field_attr),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "selector '{name}' must be non-empty"
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "selector '{name}' must be a single class/attribute name, got '{value}'"
            )));
        }
    }
    Ok(())
}
