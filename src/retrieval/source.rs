//! Coefficient storage.

use std::path::{Path, PathBuf};

use crate::config::SiteConfigLoader;
use crate::error::CoeffResult;
use crate::models::{CoefficientBundle, Product};

/// Provides the stored coefficients of a (site, product) pair.
///
/// Implementations must treat their storage as read-only so that loads can
/// run concurrently.
pub trait CoefficientSource {
    /// Loads every configuration of `product` at `site`.
    ///
    /// Fails with `ConfigurationNotFound` when the site or product is not
    /// available, and with `CorruptBundle` when stored data cannot be read.
    fn load(&self, site: &str, product: Product) -> CoeffResult<CoefficientBundle>;
}

/// Reads site configurations and coefficient files below a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads a site's configuration.
    pub fn site(&self, site: &str) -> CoeffResult<SiteConfigLoader> {
        SiteConfigLoader::load(&self.root, site)
    }
}

impl CoefficientSource for DirectorySource {
    fn load(&self, site: &str, product: Product) -> CoeffResult<CoefficientBundle> {
        self.site(site)?.load_bundle(product)
    }
}

impl<S: CoefficientSource + ?Sized> CoefficientSource for &S {
    fn load(&self, site: &str, product: Product) -> CoeffResult<CoefficientBundle> {
        (**self).load(site, product)
    }
}
