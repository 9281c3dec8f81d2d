//! Site configuration loading.
//!
//! This module loads a site's `config.yaml`, which maps each retrieval
//! product to named configurations and their coefficient files.
//!
//! # Example
//!
//! ```no_run
//! use mwr_coeff::config::SiteConfigLoader;
//!
//! let loader = SiteConfigLoader::load("./site_config", "hyytiala").unwrap();
//! println!("Products: {:?}", loader.products());
//! ```

mod loader;
mod types;

pub use loader::{DEFAULT_SITE_CONFIG_ROOT, SITE_CONFIG_ENV, SiteConfigLoader, default_root};
pub use types::{ConfigurationEntry, SiteConfig, StationMetadata};
