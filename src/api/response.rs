//! Response types for the coefficient API.
//!
//! This module defines the success bodies, the error response structure,
//! and the mapping from [`CoeffError`] to HTTP status codes.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::StationMetadata;
use crate::error::CoeffError;
use crate::models::{FieldValue, Product, RetrievalCoefficients};

/// A single field in a coefficient response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldResponse {
    /// A numeric field with its summary.
    Array {
        /// The array shape.
        shape: Vec<usize>,
        /// First element.
        first: f64,
        /// Last element.
        last: f64,
        /// Mean of all elements.
        mean: f64,
        /// Flattened row-major values, when requested.
        #[serde(skip_serializing_if = "Option::is_none")]
        values: Option<Vec<f32>>,
    },
    /// A text field.
    Text {
        /// The text value.
        text: String,
    },
}

/// One configuration in a coefficient response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationResponse {
    /// Configuration name.
    pub name: String,
    /// Caller positions of the `FR` frequencies.
    pub channel_index: Vec<usize>,
    /// Caller positions of the `FR_BL` frequencies.
    pub scan_channel_index: Vec<usize>,
    /// Fields by name.
    pub fields: BTreeMap<String, FieldResponse>,
}

/// Body of a successful `POST /coefficients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientResponse {
    /// Site identifier.
    pub site: String,
    /// Product key.
    pub product: Product,
    /// One entry per configuration.
    pub configurations: Vec<ConfigurationResponse>,
}

/// Configurations of one product in a products listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Product key.
    pub product: Product,
    /// Configuration names, in configured order.
    pub configurations: Vec<String>,
}

/// Body of a successful `GET /sites/{site}/products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    /// Site identifier.
    pub site: String,
    /// Station location, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<StationMetadata>,
    /// Configured products.
    pub products: Vec<ProductEntry>,
}

impl ConfigurationResponse {
    /// Builds the response entry of one record.
    pub fn from_coefficients(coefficients: &RetrievalCoefficients, include_values: bool) -> Self {
        let fields = coefficients
            .fields()
            .into_iter()
            .filter_map(|(name, value)| {
                let field = match &value {
                    FieldValue::Text(text) => FieldResponse::Text { text: text.clone() },
                    FieldValue::Array(array) => {
                        let summary = value.summary()?;
                        FieldResponse::Array {
                            shape: summary.shape,
                            first: summary.first,
                            last: summary.last,
                            mean: summary.mean,
                            values: include_values.then(|| array.iter().copied().collect()),
                        }
                    }
                };
                Some((name.to_string(), field))
            })
            .collect();

        Self {
            name: coefficients.configuration.clone(),
            channel_index: coefficients.channel_index.clone(),
            scan_channel_index: coefficients.scan_channel_index.clone(),
            fields,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an internal error response.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<CoeffError> for ApiErrorResponse {
    fn from(error: CoeffError) -> Self {
        let message = error.to_string();
        match error {
            CoeffError::ConfigurationNotFound { detail, .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details("CONFIGURATION_NOT_FOUND", message, detail),
            },
            CoeffError::ConfigParseError { path, .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}", path),
                ),
            },
            CoeffError::UnknownProduct { product } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNKNOWN_PRODUCT",
                    message,
                    format!(
                        "'{}' is not one of: {}",
                        product,
                        Product::ALL.map(|p| p.key()).join(", ")
                    ),
                ),
            },
            CoeffError::FrequencyMismatch { message: reason, .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details("FREQUENCY_MISMATCH", message, reason),
            },
            CoeffError::CorruptBundle { source_name, .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CORRUPT_BUNDLE",
                    message,
                    format!("Stored coefficients in '{}' are inconsistent", source_name),
                ),
            },
        }
    }
}
