//! Raw coefficient bundles as handed over by a coefficient source.

use super::coefficient_file::CoefficientFile;
use super::product::Product;

/// A parsed coefficient file together with the name it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredNetwork {
    /// File name or other identifier used in error messages.
    pub source_name: String,
    /// The parsed coefficients.
    pub file: CoefficientFile,
}

/// One named configuration of a product, made of one or more networks.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredConfiguration {
    /// The configuration name from the site configuration.
    pub name: String,
    /// Networks in configured order.
    pub networks: Vec<StoredNetwork>,
}

/// Every stored configuration for one (site, product) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientBundle {
    /// The site the bundle belongs to.
    pub site: String,
    /// The product the bundle retrieves.
    pub product: Product,
    /// Configurations in configured order.
    pub configurations: Vec<StoredConfiguration>,
}

impl StoredConfiguration {
    /// Whether any network of this configuration observes at `angle` degrees.
    pub fn covers_elevation(&self, angle: f32, tolerance: f32) -> bool {
        self.networks
            .iter()
            .flat_map(|n| n.file.elevation_angles.iter())
            .any(|ag| (ag - angle).abs() <= tolerance)
    }
}
