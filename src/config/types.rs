//! Site configuration types.
//!
//! This module contains the strongly-typed structures deserialized from a
//! site's `config.yaml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Product;

/// Location of the measurement station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMetadata {
    /// Human-readable station name.
    pub name: String,
    /// Latitude in degrees north.
    pub latitude: f64,
    /// Longitude in degrees east.
    pub longitude: f64,
    /// Altitude above mean sea level in metres.
    pub altitude: f64,
}

/// A named retrieval configuration and the coefficient files it is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationEntry {
    /// Configuration name, unique within a product.
    pub name: String,
    /// Coefficient file names, relative to the coefficient directory.
    pub files: Vec<String>,
}

/// The contents of `<root>/<site>/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// The site identifier.
    pub site: String,
    /// Optional station location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<StationMetadata>,
    /// Directory holding the coefficient files, relative to the site directory.
    #[serde(default = "default_coefficients_dir")]
    pub coefficients_dir: String,
    /// Configurations per product.
    pub retrieval_coefficients: BTreeMap<Product, Vec<ConfigurationEntry>>,
}

fn default_coefficients_dir() -> String {
    "coefficients".to_string()
}

impl SiteConfig {
    /// Returns a description of the first structural problem, if any.
    pub(crate) fn problem(&self) -> Option<String> {
        for (product, entries) in &self.retrieval_coefficients {
            if entries.is_empty() {
                return Some(format!("product '{}' lists no configurations", product));
            }
            for (i, entry) in entries.iter().enumerate() {
                if entry.files.is_empty() {
                    return Some(format!(
                        "configuration '{}' of product '{}' lists no files",
                        entry.name, product
                    ));
                }
                if entries[..i].iter().any(|e| e.name == entry.name) {
                    return Some(format!(
                        "configuration '{}' of product '{}' is defined twice",
                        entry.name, product
                    ));
                }
            }
        }
        None
    }
}
