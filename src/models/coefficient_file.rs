//! The stored form of a single retrieval network.
//!
//! A coefficient file describes one two-layer feed-forward network. Keys
//! follow the short upper-case names used throughout radiometer
//! processing (`FR`, `AG`, `W1`, ...); normalisation vectors keep their
//! descriptive names.

use serde::{Deserialize, Serialize};

use crate::error::{CoeffError, CoeffResult};

use super::product::RetrievalLayout;

/// One network's coefficients as read from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientFile {
    /// Diurnal-cycle flag.
    #[serde(rename = "DY")]
    pub dy: i32,
    /// Surface-pressure input flag.
    #[serde(rename = "PS")]
    pub ps: i32,
    /// Brightness-temperature offset correction flag.
    #[serde(rename = "DB")]
    pub db: i32,
    /// Retrieval parameter code; not all products carry one.
    #[serde(rename = "RP", default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<i32>,
    /// Retrieval type (2 = neural network).
    #[serde(rename = "RT")]
    pub rt: i32,
    /// Coefficient format version.
    #[serde(rename = "VN")]
    pub vn: i32,
    /// Network dimensions; the first entry is the hidden-unit count.
    #[serde(rename = "ND")]
    pub nd: Vec<u32>,
    /// Network frequencies in GHz.
    #[serde(rename = "FR")]
    pub frequencies: Vec<f32>,
    /// Scan frequencies in GHz, defaulting to `FR`.
    #[serde(rename = "FR_BL", default, skip_serializing_if = "Option::is_none")]
    pub scan_frequencies: Option<Vec<f32>>,
    /// Elevation angles in degrees covered by this network.
    #[serde(rename = "AG")]
    pub elevation_angles: Vec<f32>,
    /// Profile height grid in metres.
    #[serde(rename = "AL", default, skip_serializing_if = "Option::is_none")]
    pub altitudes: Option<Vec<f32>>,
    /// Assumed brightness-temperature noise level.
    #[serde(rename = "NP")]
    pub noise: f32,
    /// Offsets subtracted from each input feature.
    pub input_offset: Vec<f32>,
    /// Scales applied to each input feature.
    pub input_scale: Vec<f32>,
    /// Offsets added to each retrieved output.
    pub output_offset: Vec<f32>,
    /// Scales applied to each retrieved output.
    pub output_scale: Vec<f32>,
    /// Input-to-hidden weights; one row per input plus a trailing bias row.
    #[serde(rename = "W1")]
    pub w1: Vec<Vec<f32>>,
    /// Hidden-to-output weights; one row per output, trailing bias column.
    #[serde(rename = "W2")]
    pub w2: Vec<Vec<f32>>,
    /// Retrieval uncertainty per output.
    #[serde(rename = "RM")]
    pub rm: Vec<f32>,
}

/// Sizes of a validated network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkDims {
    /// Number of input features, bias excluded.
    pub inputs: usize,
    /// Number of hidden units, bias excluded.
    pub hidden: usize,
    /// Number of retrieved outputs.
    pub outputs: usize,
}

impl CoefficientFile {
    /// The frequencies the scan inputs are built from.
    pub fn scan_frequencies(&self) -> &[f32] {
        self.scan_frequencies.as_deref().unwrap_or(&self.frequencies)
    }

    /// Checks internal consistency for the given layout and returns the
    /// network sizes.
    ///
    /// # Errors
    ///
    /// Returns `CorruptBundle` naming `source_name` when a vector is empty,
    /// a weight matrix is ragged, or any two dimensions disagree.
    pub fn validate(&self, source_name: &str, layout: RetrievalLayout) -> CoeffResult<NetworkDims> {
        let fail = |message: String| Err(CoeffError::corrupt(source_name, message));

        if self.nd.len() != 2 {
            return fail(format!("ND must hold 2 values, found {}", self.nd.len()));
        }
        let hidden = self.nd[0] as usize;
        if hidden == 0 {
            return fail("ND declares zero hidden units".to_string());
        }
        if self.frequencies.is_empty() {
            return fail("FR is empty".to_string());
        }
        if self.scan_frequencies().is_empty() {
            return fail("FR_BL is empty".to_string());
        }
        if self.elevation_angles.is_empty() {
            return fail("AG is empty".to_string());
        }

        let inputs = self.input_offset.len();
        if inputs == 0 {
            return fail("input_offset is empty".to_string());
        }
        if self.input_scale.len() != inputs {
            return fail(format!(
                "input_scale has {} values, input_offset has {}",
                self.input_scale.len(),
                inputs
            ));
        }

        let outputs = self.output_offset.len();
        if outputs == 0 {
            return fail("output_offset is empty".to_string());
        }
        if self.output_scale.len() != outputs {
            return fail(format!(
                "output_scale has {} values, output_offset has {}",
                self.output_scale.len(),
                outputs
            ));
        }
        if self.rm.len() != outputs {
            return fail(format!("RM has {} values, expected {}", self.rm.len(), outputs));
        }

        let (w1_rows, w1_cols) = matrix_dims(&self.w1, "W1", source_name)?;
        if w1_rows != inputs + 1 || w1_cols != hidden {
            return fail(format!(
                "W1 is {}x{}, expected {}x{}",
                w1_rows,
                w1_cols,
                inputs + 1,
                hidden
            ));
        }
        let (w2_rows, w2_cols) = matrix_dims(&self.w2, "W2", source_name)?;
        if w2_rows != outputs || w2_cols != hidden + 1 {
            return fail(format!(
                "W2 is {}x{}, expected {}x{}",
                w2_rows,
                w2_cols,
                outputs,
                hidden + 1
            ));
        }

        let frequency_inputs = match layout {
            RetrievalLayout::ElevationStack | RetrievalLayout::ZenithProfile => {
                if self.elevation_angles.len() != 1 {
                    return fail(format!(
                        "AG must hold a single angle, found {}",
                        self.elevation_angles.len()
                    ));
                }
                self.frequencies.len()
            }
            RetrievalLayout::ScanProfile => {
                self.scan_frequencies().len() * self.elevation_angles.len()
            }
        };
        if inputs < frequency_inputs {
            return fail(format!(
                "{} inputs cannot hold {} frequency features",
                inputs, frequency_inputs
            ));
        }

        if layout == RetrievalLayout::ElevationStack && outputs != 1 {
            return fail(format!("expected a single output, found {}", outputs));
        }
        if layout.is_profile() {
            match &self.altitudes {
                Some(al) if al.len() == outputs => {}
                Some(al) => {
                    return fail(format!(
                        "AL has {} levels, network has {} outputs",
                        al.len(),
                        outputs
                    ));
                }
                None => return fail("AL is required for profile retrievals".to_string()),
            }
        }

        Ok(NetworkDims {
            inputs,
            hidden,
            outputs,
        })
    }
}

/// Returns (rows, columns) of a non-empty rectangular matrix.
fn matrix_dims(matrix: &[Vec<f32>], name: &str, source_name: &str) -> CoeffResult<(usize, usize)> {
    let cols = matrix.first().map(Vec::len).unwrap_or(0);
    if matrix.is_empty() || cols == 0 {
        return Err(CoeffError::corrupt(source_name, format!("{} is empty", name)));
    }
    if let Some(row) = matrix.iter().position(|r| r.len() != cols) {
        return Err(CoeffError::corrupt(
            source_name,
            format!("{} is ragged at row {}", name, row),
        ));
    }
    Ok((matrix.len(), cols))
}
