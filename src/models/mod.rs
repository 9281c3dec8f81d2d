//! Core data models for coefficient loading.
//!
//! This module contains the stored and assembled forms of retrieval
//! coefficients and the product catalog.

mod bundle;
mod coefficient_file;
mod coefficients;
mod field;
mod product;

pub use bundle::{CoefficientBundle, StoredConfiguration, StoredNetwork};
pub use coefficient_file::{CoefficientFile, NetworkDims};
pub use coefficients::{FIELD_NAMES, RetrievalCoefficients, RetrievalHeader};
pub use field::{FieldSummary, FieldValue};
pub use product::{Product, RetrievalLayout};
