//! Field values of an assembled coefficient record.

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

/// A single named field: either a pass-through string or a numeric array.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A text field, exempt from numeric checks.
    Text(String),
    /// A numeric array of rank 1, 2 or 3.
    Array(ArrayD<f32>),
}

/// First element, last element and mean of a numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// The array shape.
    pub shape: Vec<usize>,
    /// The element at index `[0, 0, ...]`.
    pub first: f64,
    /// The element at index `[-1, -1, ...]`.
    pub last: f64,
    /// The arithmetic mean of all elements.
    pub mean: f64,
}

impl FieldValue {
    /// Returns the array if this is a numeric field.
    pub fn as_array(&self) -> Option<&ArrayD<f32>> {
        match self {
            FieldValue::Array(a) => Some(a),
            FieldValue::Text(_) => None,
        }
    }

    /// Returns the text if this is a string field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Array(_) => None,
        }
    }

    /// The array shape, or `None` for text fields.
    pub fn shape(&self) -> Option<&[usize]> {
        self.as_array().map(|a| a.shape())
    }

    /// Summarises a numeric field. Text fields and empty arrays have no summary.
    pub fn summary(&self) -> Option<FieldSummary> {
        let array = self.as_array()?;
        let first = *array.iter().next()?;
        let last = *array.iter().last()?;
        let sum: f64 = array.iter().map(|&v| f64::from(v)).sum();
        Some(FieldSummary {
            shape: array.shape().to_vec(),
            first: f64::from(first),
            last: f64::from(last),
            mean: sum / array.len() as f64,
        })
    }
}
