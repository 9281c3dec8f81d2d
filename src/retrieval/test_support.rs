//! Synthetic coefficient builders shared by the retrieval unit tests.

use crate::models::{
    CoefficientBundle, CoefficientFile, Product, StoredConfiguration, StoredNetwork,
};

pub(crate) const FREQUENCIES: [f32; 4] = [23.04, 31.4, 51.26, 58.0];

/// A network whose values encode their position: `W1[r][h] = seed + 100 r + h`,
/// `W2[o][h] = seed + 10 o + h`, `input_offset[i] = seed + i`.
pub(crate) fn network(
    angles: &[f32],
    frequencies: &[f32],
    inputs: usize,
    hidden: usize,
    outputs: usize,
    seed: f32,
) -> CoefficientFile {
    CoefficientFile {
        dy: 1,
        ps: 1,
        db: 1,
        rp: if outputs > 1 { Some(4) } else { None },
        rt: 2,
        vn: 110,
        nd: vec![hidden as u32, 4],
        frequencies: frequencies.to_vec(),
        scan_frequencies: None,
        elevation_angles: angles.to_vec(),
        altitudes: (outputs > 1).then(|| (0..outputs).map(|o| 100.0 * o as f32).collect()),
        noise: 0.026,
        input_offset: (0..inputs).map(|i| seed + i as f32).collect(),
        input_scale: (0..inputs).map(|i| 1.0 / (1.0 + i as f32)).collect(),
        output_offset: (0..outputs).map(|o| seed + 0.5 * o as f32).collect(),
        output_scale: vec![2.0; outputs],
        w1: (0..=inputs)
            .map(|r| (0..hidden).map(|h| seed + 100.0 * r as f32 + h as f32).collect())
            .collect(),
        w2: (0..outputs)
            .map(|o| (0..=hidden).map(|h| seed + 10.0 * o as f32 + h as f32).collect())
            .collect(),
        rm: (0..outputs).map(|o| 0.01 * (o + 1) as f32).collect(),
    }
}

pub(crate) fn bundle(
    product: Product,
    configurations: Vec<(&str, Vec<CoefficientFile>)>,
) -> CoefficientBundle {
    CoefficientBundle {
        site: "testsite".to_string(),
        product,
        configurations: configurations
            .into_iter()
            .map(|(name, files)| StoredConfiguration {
                name: name.to_string(),
                networks: files
                    .into_iter()
                    .enumerate()
                    .map(|(i, file)| StoredNetwork {
                        source_name: format!("{}_{}.yaml", name, i),
                        file,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// An elevation stack of single-output networks, one per angle.
pub(crate) fn column_bundle(product: Product, angles: &[f32]) -> CoefficientBundle {
    let files = angles
        .iter()
        .enumerate()
        .map(|(k, &ag)| network(&[ag], &FREQUENCIES, 6, 3, 1, k as f32))
        .collect();
    bundle(product, vec![("column", files)])
}
