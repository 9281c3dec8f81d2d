//! The coefficient loader entry points.

use std::path::Path;

use tracing::debug;

use crate::config::default_root;
use crate::error::CoeffResult;
use crate::models::{Product, RetrievalCoefficients};

use super::assemble::assemble;
use super::selection::{CoefficientSelection, select};
use super::source::{CoefficientSource, DirectorySource};

/// Resolves (site, product, frequencies) into retrieval coefficients.
///
/// The loader keeps no state besides its source, so repeated calls with the
/// same arguments return identical results and concurrent calls are safe.
///
/// # Example
///
/// ```no_run
/// use mwr_coeff::retrieval::CoefficientLoader;
///
/// let loader = CoefficientLoader::new("./site_config");
/// let freq = [22.24, 23.04, 23.84, 25.44, 26.24, 27.84, 31.4];
/// let coefficients = loader.get_mvr_coeff("hyytiala", "lwp", &freq, None)?;
/// println!("W1 shape: {:?}", coefficients[0].w1.shape());
/// # Ok::<(), mwr_coeff::error::CoeffError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CoefficientLoader<S = DirectorySource> {
    source: S,
}

impl CoefficientLoader<DirectorySource> {
    /// Creates a loader reading site configurations below `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_source(DirectorySource::new(root))
    }

    /// Creates a loader rooted at `$MWR_SITE_CONFIG`, or `./site_config`.
    pub fn from_env() -> Self {
        Self::new(default_root())
    }
}

impl<S: CoefficientSource> CoefficientLoader<S> {
    /// Creates a loader over an arbitrary coefficient source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads the coefficients of every selected configuration.
    ///
    /// # Arguments
    ///
    /// * `site` - Site identifier, e.g. "hyytiala"
    /// * `product` - Product key: "lwp", "iwv", "tpt", "tpb" or "hpt"
    /// * `frequencies` - The caller's channel frequencies in GHz
    /// * `selection` - Optional configuration subset; `None` returns all
    ///
    /// # Returns
    ///
    /// One record per configuration, in configured order, or an error if:
    /// - The product key is unknown (`UnknownProduct`)
    /// - The site, product or a selected configuration is missing
    ///   (`ConfigurationNotFound`)
    /// - Stored frequencies cannot be paired with `frequencies`
    ///   (`FrequencyMismatch`)
    /// - Stored coefficients are inconsistent (`CorruptBundle`)
    pub fn get_mvr_coeff(
        &self,
        site: &str,
        product: &str,
        frequencies: &[f64],
        selection: Option<&CoefficientSelection>,
    ) -> CoeffResult<Vec<RetrievalCoefficients>> {
        let product: Product = product.parse()?;
        self.load_product(site, product, frequencies, selection)
    }

    /// Like [`get_mvr_coeff`](Self::get_mvr_coeff) with an already parsed product.
    pub fn load_product(
        &self,
        site: &str,
        product: Product,
        frequencies: &[f64],
        selection: Option<&CoefficientSelection>,
    ) -> CoeffResult<Vec<RetrievalCoefficients>> {
        let bundle = self.source.load(site, product)?;
        let coefficients = select(&bundle, selection)?
            .into_iter()
            .map(|configuration| assemble(site, product, configuration, frequencies))
            .collect::<CoeffResult<Vec<_>>>()?;

        debug!(
            site = site,
            product = %product,
            configurations = coefficients.len(),
            "Assembled retrieval coefficients"
        );
        Ok(coefficients)
    }
}

/// Loads retrieval coefficients from the site configuration root named by
/// `$MWR_SITE_CONFIG` (default `./site_config`).
///
/// See [`CoefficientLoader::get_mvr_coeff`].
pub fn get_mvr_coeff(
    site: &str,
    product: &str,
    frequencies: &[f64],
    selection: Option<&CoefficientSelection>,
) -> CoeffResult<Vec<RetrievalCoefficients>> {
    CoefficientLoader::from_env().get_mvr_coeff(site, product, frequencies, selection)
}
