//! Error types for coefficient loading.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while resolving a site, a product and
//! a frequency set into retrieval coefficients.

use thiserror::Error;

/// The main error type for coefficient loading.
///
/// Every failure is terminal for the call: coefficient data is static, so
/// retrying with the same arguments yields the same error.
///
/// # Example
///
/// ```
/// use mwr_coeff::error::CoeffError;
///
/// let error = CoeffError::UnknownProduct {
///     product: "xyz".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown retrieval product: xyz");
/// ```
#[derive(Debug, Error)]
pub enum CoeffError {
    /// The site, product or configuration could not be resolved.
    #[error("Configuration not found for site '{site}': {detail}")]
    ConfigurationNotFound {
        /// The site identifier that was requested.
        site: String,
        /// What was missing (file path, product or configuration name).
        detail: String,
    },

    /// A site configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The product key is not one of the supported retrieval products.
    #[error("Unknown retrieval product: {product}")]
    UnknownProduct {
        /// The product key as supplied by the caller.
        product: String,
    },

    /// The supplied frequencies cannot be reconciled with the stored ones.
    #[error("Frequency mismatch for {site}/{product} ({configuration}): {message}")]
    FrequencyMismatch {
        /// The site identifier.
        site: String,
        /// The product key.
        product: String,
        /// The configuration whose frequencies did not match.
        configuration: String,
        /// Which frequency could not be matched and why.
        message: String,
    },

    /// A stored coefficient file is missing data or is internally inconsistent.
    #[error("Corrupt coefficient bundle '{source_name}': {message}")]
    CorruptBundle {
        /// The coefficient file or configuration at fault.
        source_name: String,
        /// A description of the inconsistency.
        message: String,
    },
}

impl CoeffError {
    pub(crate) fn corrupt(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        CoeffError::CorruptBundle {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return CoeffError.
pub type CoeffResult<T> = Result<T, CoeffError>;
