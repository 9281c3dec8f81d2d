//! Request types for the coefficient API.

use serde::{Deserialize, Serialize};

use crate::retrieval::CoefficientSelection;

/// Body of `POST /coefficients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientRequest {
    /// Site identifier.
    pub site: String,
    /// Product key.
    pub product: String,
    /// The caller's channel frequencies in GHz.
    pub frequencies: Vec<f64>,
    /// Optional configuration subset.
    #[serde(default)]
    pub selection: Option<CoefficientSelection>,
    /// Include flattened array values in the response.
    #[serde(default)]
    pub include_values: bool,
}
