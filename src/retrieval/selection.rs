//! Configuration subset selection.

use serde::{Deserialize, Serialize};

use crate::error::{CoeffError, CoeffResult};
use crate::models::{CoefficientBundle, StoredConfiguration};

/// Largest difference, in degrees, at which two elevation angles are the same.
pub const ELEVATION_TOLERANCE_DEG: f32 = 0.1;

/// Restricts which configurations of a bundle are returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientSelection {
    /// Keep the named configurations, in bundle order.
    Configurations(Vec<String>),
    /// Keep configurations retrieving at this elevation angle (degrees).
    ElevationAngle(f32),
}

/// Applies an optional selection to a bundle.
///
/// `None` keeps every configuration. Fails with `ConfigurationNotFound` when
/// a requested name does not exist or nothing is left to return.
pub fn select<'a>(
    bundle: &'a CoefficientBundle,
    selection: Option<&CoefficientSelection>,
) -> CoeffResult<Vec<&'a StoredConfiguration>> {
    let not_found = |detail: String| CoeffError::ConfigurationNotFound {
        site: bundle.site.clone(),
        detail,
    };

    let selected: Vec<&StoredConfiguration> = match selection {
        None => bundle.configurations.iter().collect(),
        Some(CoefficientSelection::Configurations(names)) => {
            if let Some(missing) = names
                .iter()
                .find(|n| !bundle.configurations.iter().any(|c| &c.name == *n))
            {
                return Err(not_found(format!(
                    "configuration '{}' of product '{}' does not exist",
                    missing, bundle.product
                )));
            }
            bundle
                .configurations
                .iter()
                .filter(|c| names.contains(&c.name))
                .collect()
        }
        Some(CoefficientSelection::ElevationAngle(angle)) => bundle
            .configurations
            .iter()
            .filter(|c| c.covers_elevation(*angle, ELEVATION_TOLERANCE_DEG))
            .collect(),
    };

    if selected.is_empty() {
        return Err(not_found(format!(
            "no configuration of product '{}' matches the selection",
            bundle.product
        )));
    }
    Ok(selected)
}
