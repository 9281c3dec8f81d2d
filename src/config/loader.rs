//! Site configuration loading.
//!
//! This module provides the [`SiteConfigLoader`] type for reading a site's
//! configuration and the coefficient files it references.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CoeffError, CoeffResult};
use crate::models::{
    CoefficientBundle, CoefficientFile, Product, StoredConfiguration, StoredNetwork,
};

use super::types::{ConfigurationEntry, SiteConfig};

/// Environment variable naming the site configuration root.
pub const SITE_CONFIG_ENV: &str = "MWR_SITE_CONFIG";

/// Root used when [`SITE_CONFIG_ENV`] is unset.
pub const DEFAULT_SITE_CONFIG_ROOT: &str = "site_config";

/// Returns the site configuration root from the environment.
pub fn default_root() -> PathBuf {
    env::var_os(SITE_CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_CONFIG_ROOT))
}

/// Loads and provides access to one site's configuration.
///
/// # Directory Structure
///
/// ```text
/// site_config/hyytiala/
/// ├── config.yaml          # Products and their configurations
/// └── coefficients/
///     ├── lwp_90.yaml      # One file per network
///     └── tpt.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use mwr_coeff::config::SiteConfigLoader;
/// use mwr_coeff::models::Product;
///
/// let loader = SiteConfigLoader::load("./site_config", "hyytiala")?;
/// let bundle = loader.load_bundle(Product::Lwp)?;
/// println!("{} configurations", bundle.configurations.len());
/// # Ok::<(), mwr_coeff::error::CoeffError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SiteConfigLoader {
    site_dir: PathBuf,
    config: SiteConfig,
}

impl SiteConfigLoader {
    /// Loads `<root>/<site>/config.yaml`.
    ///
    /// # Returns
    ///
    /// Returns a `SiteConfigLoader` on success, or an error if:
    /// - The site identifier is empty or not a plain directory name
    ///   (`ConfigurationNotFound`)
    /// - The configuration file is missing (`ConfigurationNotFound`)
    /// - The file is not valid YAML, is structurally inconsistent, or names a
    ///   different site than its directory (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(root: P, site: &str) -> CoeffResult<Self> {
        if site.is_empty() || site.contains(['/', '\\']) || site.starts_with('.') {
            return Err(CoeffError::ConfigurationNotFound {
                site: site.to_string(),
                detail: "invalid site identifier".to_string(),
            });
        }

        let site_dir = root.as_ref().join(site);
        let config_path = site_dir.join("config.yaml");
        let config = Self::load_yaml::<SiteConfig>(&config_path, site)?;

        if config.site != site {
            return Err(CoeffError::ConfigParseError {
                path: config_path.display().to_string(),
                message: format!("site '{}' does not match directory '{}'", config.site, site),
            });
        }
        if let Some(problem) = config.problem() {
            return Err(CoeffError::ConfigParseError {
                path: config_path.display().to_string(),
                message: problem,
            });
        }

        debug!(
            site = site,
            path = %config_path.display(),
            products = config.retrieval_coefficients.len(),
            "Loaded site configuration"
        );
        Ok(Self { site_dir, config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path, site: &str) -> CoeffResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| CoeffError::ConfigurationNotFound {
            site: site.to_string(),
            detail: format!("missing file {}", path_str),
        })?;

        serde_yaml::from_str(&content).map_err(|e| CoeffError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the parsed site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Returns the site identifier.
    pub fn site(&self) -> &str {
        &self.config.site
    }

    /// Returns the products this site has coefficients for.
    pub fn products(&self) -> Vec<Product> {
        self.config.retrieval_coefficients.keys().copied().collect()
    }

    /// Returns the configurations listed for a product.
    ///
    /// Returns `ConfigurationNotFound` if the site has no entry for the product.
    pub fn configurations(&self, product: Product) -> CoeffResult<&[ConfigurationEntry]> {
        self.config
            .retrieval_coefficients
            .get(&product)
            .map(Vec::as_slice)
            .ok_or_else(|| CoeffError::ConfigurationNotFound {
                site: self.config.site.clone(),
                detail: format!("product '{}' is not configured", product),
            })
    }

    /// Reads every coefficient file of a product.
    ///
    /// # Returns
    ///
    /// Returns the bundle, or an error if:
    /// - The product is not configured or a listed file is missing
    ///   (`ConfigurationNotFound`)
    /// - A coefficient file cannot be parsed (`CorruptBundle`)
    pub fn load_bundle(&self, product: Product) -> CoeffResult<CoefficientBundle> {
        let coefficients_dir = self.site_dir.join(&self.config.coefficients_dir);

        let configurations = self
            .configurations(product)?
            .iter()
            .map(|entry| -> CoeffResult<StoredConfiguration> {
                let networks = entry
                    .files
                    .iter()
                    .map(|name| self.load_network(&coefficients_dir, name))
                    .collect::<CoeffResult<Vec<_>>>()?;
                Ok(StoredConfiguration {
                    name: entry.name.clone(),
                    networks,
                })
            })
            .collect::<CoeffResult<Vec<_>>>()?;

        debug!(
            site = %self.config.site,
            product = %product,
            configurations = configurations.len(),
            "Loaded coefficient bundle"
        );
        Ok(CoefficientBundle {
            site: self.config.site.clone(),
            product,
            configurations,
        })
    }

    /// Reads a single coefficient file.
    fn load_network(&self, dir: &Path, name: &str) -> CoeffResult<StoredNetwork> {
        let path = dir.join(name);
        let content = fs::read_to_string(&path).map_err(|_| CoeffError::ConfigurationNotFound {
            site: self.config.site.clone(),
            detail: format!("missing coefficient file {}", path.display()),
        })?;

        let file: CoefficientFile = serde_yaml::from_str(&content)
            .map_err(|e| CoeffError::corrupt(name, e.to_string()))?;

        Ok(StoredNetwork {
            source_name: name.to_string(),
            file,
        })
    }
}
