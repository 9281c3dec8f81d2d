//! Assembled retrieval coefficients.
//!
//! [`RetrievalCoefficients`] is the typed record returned for one
//! configuration. The shapes of its array fields depend on the product's
//! [`RetrievalLayout`]; [`RetrievalCoefficients::fields`] exposes the
//! record as a name-to-value mapping using the conventional field names.

use ndarray::{Array1, ArrayD, IxDyn};

use super::field::FieldValue;
use super::product::{Product, RetrievalLayout};

/// Every field name exposed by [`RetrievalCoefficients::fields`], in order.
pub const FIELD_NAMES: [&str; 22] = [
    "configuration",
    "DY",
    "PS",
    "DB",
    "RP",
    "RT",
    "VN",
    "ND",
    "FR",
    "FR_BL",
    "AG",
    "AL",
    "NP",
    "input_offset",
    "input_scale",
    "output_offset",
    "output_scale",
    "W1",
    "W2",
    "RM",
    "retrieval_elevation_angles",
    "retrieval_frequencies",
];

/// Integer setup flags shared by every network of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalHeader {
    /// Diurnal-cycle flag.
    pub dy: i32,
    /// Surface-pressure input flag.
    pub ps: i32,
    /// Brightness-temperature offset correction flag.
    pub db: i32,
    /// Retrieval parameter code, if the product defines one.
    pub rp: Option<i32>,
    /// Retrieval type.
    pub rt: i32,
    /// Coefficient format version.
    pub vn: i32,
    /// Network dimensions; `nd[0]` is the hidden-unit count.
    pub nd: [u32; 2],
}

/// Coefficients of one retrieval configuration, ready for use.
///
/// Frequency-indexed fields are ordered like the caller's frequency array;
/// `channel_index[k]` is the position in that array of the `k`-th network
/// frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalCoefficients {
    /// The configuration name.
    pub configuration: String,
    /// The retrieved product.
    pub product: Product,
    /// The layout the arrays are stacked in.
    pub layout: RetrievalLayout,
    /// Integer setup flags.
    pub header: RetrievalHeader,
    /// Network frequencies (`FR`) in GHz.
    pub frequencies: Array1<f32>,
    /// Scan frequencies (`FR_BL`) in GHz.
    pub scan_frequencies: Array1<f32>,
    /// Elevation angles (`AG`) in degrees.
    pub elevation_angles: Array1<f32>,
    /// Profile heights (`AL`) in metres, for profile products.
    pub altitudes: Option<Array1<f32>>,
    /// Noise level (`NP`).
    pub noise: ArrayD<f32>,
    /// Input offsets.
    pub input_offset: ArrayD<f32>,
    /// Input scales.
    pub input_scale: ArrayD<f32>,
    /// Output offsets.
    pub output_offset: ArrayD<f32>,
    /// Output scales.
    pub output_scale: ArrayD<f32>,
    /// Input-to-hidden weights.
    pub w1: ArrayD<f32>,
    /// Hidden-to-output weights.
    pub w2: ArrayD<f32>,
    /// Retrieval uncertainty (`RM`).
    pub rm: ArrayD<f32>,
    /// Caller positions of the `FR` frequencies.
    pub channel_index: Vec<usize>,
    /// Caller positions of the `FR_BL` frequencies.
    pub scan_channel_index: Vec<usize>,
}

impl RetrievalCoefficients {
    /// Number of hidden units of the network(s).
    pub fn hidden_units(&self) -> usize {
        self.header.nd[0] as usize
    }

    /// Number of input features, bias excluded.
    pub fn input_count(&self) -> usize {
        self.w1.shape()[0] - 1
    }

    /// Looks up a single field by name.
    ///
    /// Product-optional fields (`RP`, and `AL` for column products) are
    /// reported as a one-element zero array when the product does not
    /// define them.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "configuration" => FieldValue::Text(self.configuration.clone()),
            "DY" => scalar(self.header.dy as f32),
            "PS" => scalar(self.header.ps as f32),
            "DB" => scalar(self.header.db as f32),
            "RP" => scalar(self.header.rp.unwrap_or(0) as f32),
            "RT" => scalar(self.header.rt as f32),
            "VN" => scalar(self.header.vn as f32),
            "ND" => vector(&Array1::from(
                self.header.nd.iter().map(|&n| n as f32).collect::<Vec<_>>(),
            )),
            "FR" | "retrieval_frequencies" => vector(&self.frequencies),
            "FR_BL" => vector(&self.scan_frequencies),
            "AG" | "retrieval_elevation_angles" => vector(&self.elevation_angles),
            "AL" => match &self.altitudes {
                Some(al) => vector(al),
                None => scalar(0.0),
            },
            "NP" => FieldValue::Array(self.noise.clone()),
            "input_offset" => FieldValue::Array(self.input_offset.clone()),
            "input_scale" => FieldValue::Array(self.input_scale.clone()),
            "output_offset" => FieldValue::Array(self.output_offset.clone()),
            "output_scale" => FieldValue::Array(self.output_scale.clone()),
            "W1" => FieldValue::Array(self.w1.clone()),
            "W2" => FieldValue::Array(self.w2.clone()),
            "RM" => FieldValue::Array(self.rm.clone()),
            _ => return None,
        };
        Some(value)
    }

    /// Returns every field in [`FIELD_NAMES`] order.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        FIELD_NAMES
            .iter()
            .filter_map(|&name| self.field(name).map(|v| (name, v)))
            .collect()
    }
}

fn scalar(value: f32) -> FieldValue {
    FieldValue::Array(ArrayD::from_elem(IxDyn(&[1]), value))
}

fn vector(values: &Array1<f32>) -> FieldValue {
    FieldValue::Array(values.clone().into_dyn())
}
