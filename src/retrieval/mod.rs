//! Retrieval coefficient loading.
//!
//! This module resolves a site, a product and the caller's frequencies into
//! typed coefficient records: it loads the stored bundle, applies an
//! optional configuration selection, pairs stored and supplied frequencies,
//! and stacks each configuration's networks according to the product layout.

mod assemble;
mod frequency;
mod loader;
mod selection;
mod source;

#[cfg(test)]
mod test_support;

pub use assemble::assemble;
pub use frequency::{FREQUENCY_TOLERANCE_GHZ, FrequencyMap};
pub use loader::{CoefficientLoader, get_mvr_coeff};
pub use selection::{CoefficientSelection, ELEVATION_TOLERANCE_DEG, select};
pub use source::{CoefficientSource, DirectorySource};
