//! Assembly of stored networks into typed coefficient records.
//!
//! Every configuration is validated, reconciled against the caller's
//! frequencies, and stacked according to its product's layout.

use ndarray::{Array1, ArrayD, Dimension, IxDyn};

use crate::error::{CoeffError, CoeffResult};
use crate::models::{
    CoefficientFile, NetworkDims, Product, RetrievalCoefficients, RetrievalHeader,
    RetrievalLayout, StoredConfiguration,
};

use super::frequency::FrequencyMap;

/// Builds the coefficient record of one configuration.
///
/// # Errors
///
/// - `CorruptBundle` if a network is inconsistent, the configuration has
///   the wrong number of networks for its layout, or its networks disagree
///   on frequencies, flags or sizes
/// - `FrequencyMismatch` if `FR` or `FR_BL` cannot be paired with `frequencies`
pub fn assemble(
    site: &str,
    product: Product,
    configuration: &StoredConfiguration,
    frequencies: &[f64],
) -> CoeffResult<RetrievalCoefficients> {
    let layout = product.layout();
    let corrupt = |message: String| CoeffError::corrupt(configuration.name.as_str(), message);

    let first = match configuration.networks.first() {
        Some(network) => &network.file,
        None => return Err(corrupt("configuration has no networks".to_string())),
    };
    if layout != RetrievalLayout::ElevationStack && configuration.networks.len() != 1 {
        return Err(corrupt(format!(
            "{} retrievals expect exactly one coefficient file, found {}",
            product,
            configuration.networks.len()
        )));
    }

    let mut dims: Option<NetworkDims> = None;
    for network in &configuration.networks {
        let network_dims = network.file.validate(&network.source_name, layout)?;
        if let Some(expected) = dims {
            if network_dims != expected {
                return Err(CoeffError::corrupt(
                    network.source_name.as_str(),
                    format!("network size {:?} differs from {:?}", network_dims, expected),
                ));
            }
            if let Some(field) = shared_field_mismatch(first, &network.file) {
                return Err(CoeffError::corrupt(
                    network.source_name.as_str(),
                    format!("{} differs from the first network of the configuration", field),
                ));
            }
        }
        dims = Some(network_dims);
    }
    let dims = dims.ok_or_else(|| corrupt("configuration has no networks".to_string()))?;

    let mismatch = |message: String| CoeffError::FrequencyMismatch {
        site: site.to_string(),
        product: product.to_string(),
        configuration: configuration.name.clone(),
        message,
    };
    let fr_map = FrequencyMap::build(&first.frequencies, frequencies).map_err(mismatch)?;
    let bl_map = FrequencyMap::build(first.scan_frequencies(), frequencies).map_err(mismatch)?;

    let input_perm = match layout {
        RetrievalLayout::ElevationStack | RetrievalLayout::ZenithProfile => {
            fr_map.input_permutation(dims.inputs)
        }
        RetrievalLayout::ScanProfile => {
            bl_map.block_permutation(first.elevation_angles.len(), dims.inputs)
        }
    };
    // W1 keeps its bias row last.
    let row_perm: Vec<usize> = input_perm.iter().copied().chain([dims.inputs]).collect();

    let files: Vec<&CoefficientFile> = configuration.networks.iter().map(|n| &n.file).collect();
    let n = files.len();
    let (i, h, o) = (dims.inputs, dims.hidden, dims.outputs);

    let arrays = match layout {
        RetrievalLayout::ElevationStack => Arrays {
            elevation_angles: files.iter().map(|f| f.elevation_angles[0]).collect(),
            noise: build(&[n, 1], |x| files[x[0]].noise),
            input_offset: build(&[n, i], |x| files[x[0]].input_offset[input_perm[x[1]]]),
            input_scale: build(&[n, i], |x| files[x[0]].input_scale[input_perm[x[1]]]),
            output_offset: build(&[n, 1], |x| files[x[0]].output_offset[0]),
            output_scale: build(&[n, 1], |x| files[x[0]].output_scale[0]),
            w1: build(&[i + 1, h, n], |x| files[x[2]].w1[row_perm[x[0]]][x[1]]),
            w2: build(&[n, h + 1], |x| files[x[0]].w2[0][x[1]]),
            rm: build(&[n, 1], |x| files[x[0]].rm[0]),
        },
        RetrievalLayout::ZenithProfile => Arrays {
            elevation_angles: Array1::from(first.elevation_angles.clone()),
            noise: build(&[1], |_| first.noise),
            input_offset: build(&[1, i], |x| first.input_offset[input_perm[x[1]]]),
            input_scale: build(&[1, i], |x| first.input_scale[input_perm[x[1]]]),
            output_offset: build(&[1, o], |x| first.output_offset[x[1]]),
            output_scale: build(&[1, o], |x| first.output_scale[x[1]]),
            w1: build(&[i + 1, h, 1], |x| first.w1[row_perm[x[0]]][x[1]]),
            w2: build(&[o, h + 1, 1], |x| first.w2[x[0]][x[1]]),
            rm: build(&[o, 1], |x| first.rm[x[0]]),
        },
        RetrievalLayout::ScanProfile => Arrays {
            elevation_angles: Array1::from(first.elevation_angles.clone()),
            noise: build(&[1], |_| first.noise),
            input_offset: build(&[i], |x| first.input_offset[input_perm[x[0]]]),
            input_scale: build(&[i], |x| first.input_scale[input_perm[x[0]]]),
            output_offset: build(&[o], |x| first.output_offset[x[0]]),
            output_scale: build(&[o], |x| first.output_scale[x[0]]),
            w1: build(&[i + 1, h], |x| first.w1[row_perm[x[0]]][x[1]]),
            w2: build(&[o, h + 1], |x| first.w2[x[0]][x[1]]),
            rm: build(&[o, 1], |x| first.rm[x[0]]),
        },
    };

    let coefficients = RetrievalCoefficients {
        configuration: configuration.name.clone(),
        product,
        layout,
        header: RetrievalHeader {
            dy: first.dy,
            ps: first.ps,
            db: first.db,
            rp: first.rp,
            rt: first.rt,
            vn: first.vn,
            nd: [first.nd[0], first.nd[1]],
        },
        frequencies: Array1::from(fr_map.reorder(&first.frequencies)),
        scan_frequencies: Array1::from(bl_map.reorder(first.scan_frequencies())),
        elevation_angles: arrays.elevation_angles,
        altitudes: if layout.is_profile() {
            first.altitudes.clone().map(Array1::from)
        } else {
            None
        },
        noise: arrays.noise,
        input_offset: arrays.input_offset,
        input_scale: arrays.input_scale,
        output_offset: arrays.output_offset,
        output_scale: arrays.output_scale,
        w1: arrays.w1,
        w2: arrays.w2,
        rm: arrays.rm,
        channel_index: fr_map.channel_index().to_vec(),
        scan_channel_index: bl_map.channel_index().to_vec(),
    };

    if let Some((name, ndim)) = coefficients
        .fields()
        .iter()
        .filter_map(|(name, value)| value.shape().map(|s| (*name, s.len())))
        .find(|(_, ndim)| !(1..=3).contains(ndim))
    {
        return Err(corrupt(format!("{} has unsupported rank {}", name, ndim)));
    }

    Ok(coefficients)
}

/// Layout-dependent arrays of a record.
struct Arrays {
    elevation_angles: Array1<f32>,
    noise: ArrayD<f32>,
    input_offset: ArrayD<f32>,
    input_scale: ArrayD<f32>,
    output_offset: ArrayD<f32>,
    output_scale: ArrayD<f32>,
    w1: ArrayD<f32>,
    w2: ArrayD<f32>,
    rm: ArrayD<f32>,
}

fn build(shape: &[usize], value: impl Fn(&[usize]) -> f32) -> ArrayD<f32> {
    ArrayD::from_shape_fn(IxDyn(shape), |index: IxDyn| value(index.slice()))
}

/// Names the first field that must be identical across stacked networks.
fn shared_field_mismatch(a: &CoefficientFile, b: &CoefficientFile) -> Option<&'static str> {
    if a.frequencies != b.frequencies {
        Some("FR")
    } else if a.scan_frequencies() != b.scan_frequencies() {
        Some("FR_BL")
    } else if a.nd != b.nd {
        Some("ND")
    } else if (a.dy, a.ps, a.db, a.rp, a.rt, a.vn) != (b.dy, b.ps, b.db, b.rp, b.rt, b.vn) {
        Some("retrieval flags")
    } else {
        None
    }
}
