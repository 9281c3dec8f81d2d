//! Integration tests for coefficient loading.
//!
//! A synthetic site tree is written to a temporary directory with the same
//! layout and array sizes as an operational station:
//! - 13 network frequencies plus 3 auxiliary inputs
//! - 19-angle elevation stacks for `lwp` and `iwv`
//! - 93-level zenith profiles for `tpt` and `hpt`
//! - a 10-angle boundary-layer scan profile for `tpb`
//!
//! The suite covers shapes and reference values per product, frequency
//! reordering, configuration selection, error cases and the HTTP API.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use mwr_coeff::api::{AppState, create_router};
use mwr_coeff::config::{ConfigurationEntry, SiteConfig, StationMetadata};
use mwr_coeff::error::CoeffError;
use mwr_coeff::models::{CoefficientFile, FieldValue, Product, RetrievalCoefficients};
use mwr_coeff::retrieval::{CoefficientLoader, CoefficientSelection};

// =============================================================================
// Test Helpers
// =============================================================================

const FREQ: [f64; 14] = [
    22.24, 23.04, 23.84, 25.44, 26.24, 27.84, 31.4, 51.26, 52.28, 53.86, 54.94, 56.66, 57.3, 58.0,
];
const SITE: &str = "hyytiala";

const ELEVATION_ANGLES: [f32; 19] = [
    90.0, 84.0, 60.0, 42.0, 30.0, 26.6, 25.0, 24.0, 23.0, 22.0, 21.0, 19.2, 14.4, 11.4, 8.4, 6.6,
    5.4, 4.8, 4.2,
];
const SCAN_ANGLES: [f32; 10] = [90.0, 30.0, 19.2, 14.4, 11.4, 8.4, 6.6, 5.4, 4.8, 4.2];
const LWP_SEEDS: [f32; 5] = [-107.37779, -30.645275, -76.23844, 0.9421638, -27.80052];

const AUX_INPUTS: usize = 3;
const LEVELS: usize = 93;
const LAST_INPUT_OFFSET: f32 = -5.1742048e-05;

fn stored_frequencies() -> Vec<f32> {
    FREQ[1..].iter().map(|&f| f as f32).collect()
}

fn altitudes() -> Vec<f32> {
    (0..LEVELS)
        .map(|k| {
            let x = k as f32 / (LEVELS - 1) as f32;
            10000.0 * x * x
        })
        .collect()
}

fn network(
    rp: Option<i32>,
    angles: &[f32],
    inputs: usize,
    hidden: usize,
    outputs: usize,
    seed: f32,
) -> CoefficientFile {
    let mut input_offset: Vec<f32> = (0..inputs).map(|i| 61.404 - 0.5 * i as f32).collect();
    input_offset[inputs - 1] = LAST_INPUT_OFFSET;

    CoefficientFile {
        dy: 1,
        ps: 1,
        db: 1,
        rp,
        rt: 2,
        vn: 110,
        nd: vec![hidden as u32, 4],
        frequencies: stored_frequencies(),
        scan_frequencies: None,
        elevation_angles: angles.to_vec(),
        altitudes: (outputs > 1).then(altitudes),
        noise: 0.026,
        input_offset,
        input_scale: (0..inputs).map(|i| 0.0188 + 0.001 * i as f32).collect(),
        output_offset: (0..outputs).map(|o| seed.abs() + o as f32).collect(),
        output_scale: vec![1.5; outputs],
        w1: (0..=inputs)
            .map(|r| {
                (0..hidden)
                    .map(|h| {
                        if r == 0 && h == 0 {
                            seed
                        } else {
                            (r as f32 - h as f32) * 0.01
                        }
                    })
                    .collect()
            })
            .collect(),
        w2: (0..outputs)
            .map(|o| (0..=hidden).map(|h| 0.1 * o as f32 - 0.05 * h as f32).collect())
            .collect(),
        rm: (0..outputs).map(|o| 0.004 + 0.001 * o as f32).collect(),
    }
}

fn write_yaml<T: serde::Serialize>(path: &Path, value: &T) {
    fs::write(path, serde_yaml::to_string(value).unwrap()).unwrap();
}

/// Writes the synthetic station and returns the root directory.
fn create_site() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let site_dir = root.path().join(SITE);
    let coeff_dir = site_dir.join("coefficients");
    fs::create_dir_all(&coeff_dir).unwrap();

    let inputs = stored_frequencies().len() + AUX_INPUTS;
    let mut retrieval_coefficients = BTreeMap::new();

    for (product, rp) in [(Product::Lwp, None), (Product::Iwv, Some(1))] {
        let mut files = Vec::new();
        for (k, &angle) in ELEVATION_ANGLES.iter().enumerate() {
            let seed = LWP_SEEDS.get(k).copied().unwrap_or(-(k as f32));
            let name = format!("{}_{:02}.yaml", product, k);
            write_yaml(&coeff_dir.join(&name), &network(rp, &[angle], inputs, 9, 1, seed));
            files.push(name);
        }
        retrieval_coefficients.insert(
            product,
            vec![
                ConfigurationEntry {
                    name: product.to_string(),
                    files: files.clone(),
                },
                ConfigurationEntry {
                    name: format!("{}_zenith", product),
                    files: files[..1].to_vec(),
                },
            ],
        );
    }

    for (product, rp, hidden) in [(Product::Tpt, 4, 12), (Product::Hpt, 3, 9)] {
        let name = format!("{}.yaml", product);
        write_yaml(
            &coeff_dir.join(&name),
            &network(Some(rp), &[90.0], inputs, hidden, LEVELS, -60.52742),
        );
        retrieval_coefficients.insert(
            product,
            vec![ConfigurationEntry {
                name: product.to_string(),
                files: vec![name],
            }],
        );
    }

    let scan_inputs = stored_frequencies().len() * SCAN_ANGLES.len() + AUX_INPUTS;
    write_yaml(
        &coeff_dir.join("tpb.yaml"),
        &network(Some(5), &SCAN_ANGLES, scan_inputs, 15, LEVELS, -149.74174),
    );
    retrieval_coefficients.insert(
        Product::Tpb,
        vec![ConfigurationEntry {
            name: "tpb".to_string(),
            files: vec!["tpb.yaml".to_string()],
        }],
    );

    let config = SiteConfig {
        site: SITE.to_string(),
        station: Some(StationMetadata {
            name: "Hyytiälä".to_string(),
            latitude: 61.844,
            longitude: 24.287,
            altitude: 150.0,
        }),
        coefficients_dir: "coefficients".to_string(),
        retrieval_coefficients,
    };
    write_yaml(&site_dir.join("config.yaml"), &config);
    root
}

fn load(root: &TempDir, product: &str, frequencies: &[f64]) -> Vec<RetrievalCoefficients> {
    CoefficientLoader::new(root.path())
        .get_mvr_coeff(SITE, product, frequencies, None)
        .unwrap()
}

fn mean(values: &[f32]) -> f64 {
    values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
}

/// Asserts the first element, last element, mean and shape of a numeric field.
fn check(name: &str, value: &FieldValue, first: f64, last: f64, mean: f64, shape: &[usize]) {
    let summary = value
        .summary()
        .unwrap_or_else(|| panic!("{} is not a numeric field", name));
    assert!(
        (1..=3).contains(&summary.shape.len()),
        "{} has rank {}",
        name,
        summary.shape.len()
    );
    assert_eq!(summary.shape, shape, "shape of {}", name);
    assert_abs_diff_eq!(summary.first, first, epsilon = 1.5e-4);
    assert_abs_diff_eq!(summary.last, last, epsilon = 1.5e-4);
    assert_abs_diff_eq!(summary.mean, mean, epsilon = 1.5e-4);
}

/// Reference (first, last, mean) for the setup fields of every product.
fn setup_references(product: Product) -> Vec<(&'static str, (f64, f64, f64), Vec<usize>)> {
    let fr = mean(&stored_frequencies());
    let al = altitudes();
    let column_angles = (90.0, 4.2, 27.473684);
    let zenith = (90.0, 90.0, 90.0);
    let no_levels = (0.0, 0.0, 0.0);
    let levels = (0.0, 10000.0, mean(&al));
    let (rp, nd, ag, ag_shape, al_ref, al_shape) = match product {
        Product::Lwp => (0.0, (9.0, 4.0, 6.5), column_angles, 19, no_levels, 1),
        Product::Iwv => (1.0, (9.0, 4.0, 6.5), column_angles, 19, no_levels, 1),
        Product::Tpt => (4.0, (12.0, 4.0, 8.0), zenith, 1, levels, 93),
        Product::Hpt => (3.0, (9.0, 4.0, 6.5), zenith, 1, levels, 93),
        Product::Tpb => (5.0, (15.0, 4.0, 9.5), (90.0, 4.2, 19.44), 10, levels, 93),
    };
    vec![
        ("DY", (1.0, 1.0, 1.0), vec![1]),
        ("PS", (1.0, 1.0, 1.0), vec![1]),
        ("DB", (1.0, 1.0, 1.0), vec![1]),
        ("RP", (rp, rp, rp), vec![1]),
        ("RT", (2.0, 2.0, 2.0), vec![1]),
        ("VN", (110.0, 110.0, 110.0), vec![1]),
        ("ND", nd, vec![2]),
        ("FR", (23.04, 58.0, fr), vec![13]),
        ("FR_BL", (23.04, 58.0, fr), vec![13]),
        ("retrieval_frequencies", (23.04, 58.0, fr), vec![13]),
        ("AG", ag, vec![ag_shape]),
        ("retrieval_elevation_angles", ag, vec![ag_shape]),
        ("AL", al_ref, vec![al_shape]),
    ]
}

/// Expected shapes of the normalisation and network fields.
fn network_shapes(product: Product) -> Vec<(&'static str, Vec<usize>)> {
    match product {
        Product::Lwp | Product::Iwv => vec![
            ("NP", vec![19, 1]),
            ("input_offset", vec![19, 16]),
            ("input_scale", vec![19, 16]),
            ("output_offset", vec![19, 1]),
            ("output_scale", vec![19, 1]),
            ("W1", vec![17, 9, 19]),
            ("W2", vec![19, 10]),
            ("RM", vec![19, 1]),
        ],
        Product::Tpt => vec![
            ("NP", vec![1]),
            ("input_offset", vec![1, 16]),
            ("input_scale", vec![1, 16]),
            ("output_offset", vec![1, 93]),
            ("output_scale", vec![1, 93]),
            ("W1", vec![17, 12, 1]),
            ("W2", vec![93, 13, 1]),
            ("RM", vec![93, 1]),
        ],
        Product::Hpt => vec![
            ("NP", vec![1]),
            ("input_offset", vec![1, 16]),
            ("input_scale", vec![1, 16]),
            ("output_offset", vec![1, 93]),
            ("output_scale", vec![1, 93]),
            ("W1", vec![17, 9, 1]),
            ("W2", vec![93, 10, 1]),
            ("RM", vec![93, 1]),
        ],
        Product::Tpb => vec![
            ("NP", vec![1]),
            ("input_offset", vec![133]),
            ("input_scale", vec![133]),
            ("output_offset", vec![93]),
            ("output_scale", vec![93]),
            ("W1", vec![134, 15]),
            ("W2", vec![93, 16]),
            ("RM", vec![93, 1]),
        ],
    }
}

fn create_router_for_test(root: &TempDir) -> Router {
    create_router(AppState::new(CoefficientLoader::new(root.path())))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn post_coefficients(router: Router, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri("/coefficients")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

// =============================================================================
// Coefficient loading
// =============================================================================

#[test]
fn test_coefficients_for_every_product() {
    let root = create_site();

    for product in Product::ALL {
        let first_call = load(&root, product.key(), &FREQ);
        let data = load(&root, product.key(), &FREQ);
        assert_eq!(first_call, data, "repeated call differs for {}", product);
        assert!(!data.is_empty());

        let record = &data[0];
        assert_eq!(record.configuration, product.key());

        for (name, (first, last, mean), shape) in setup_references(product) {
            let value = record.field(name).unwrap();
            check(name, &value, first, last, mean, &shape);
        }
        for (name, shape) in network_shapes(product) {
            let value = record.field(name).unwrap();
            assert_eq!(value.shape().unwrap(), shape.as_slice(), "{} {}", product, name);
        }
        for (name, value) in record.fields() {
            match value {
                FieldValue::Text(text) => {
                    assert_eq!((name, text.as_str()), ("configuration", product.key()))
                }
                FieldValue::Array(array) => assert!((1..=3).contains(&array.ndim()), "{}", name),
            }
        }
    }
}

#[test]
fn test_lwp_w1_stacks_angles_on_last_axis() {
    let root = create_site();
    let data = load(&root, "lwp", &FREQ);

    let flattened: Vec<f32> = data[0].w1.iter().copied().take(5).collect();
    for (actual, expected) in flattened.iter().zip(LWP_SEEDS) {
        assert_abs_diff_eq!(*actual, expected, epsilon = 1e-5);
    }
    assert_eq!(data[0].w1.shape(), &[17, 9, 19]);
}

#[test]
fn test_tpb_input_offset() {
    let root = create_site();
    let data = load(&root, "tpb", &FREQ);

    let stored: Vec<f32> = (0..133)
        .map(|i| if i == 132 { LAST_INPUT_OFFSET } else { 61.404 - 0.5 * i as f32 })
        .collect();
    let value = data[0].field("input_offset").unwrap();
    check("input_offset", &value, 61.404, f64::from(LAST_INPUT_OFFSET), mean(&stored), &[133]);
}

#[test]
fn test_profile_output_fields() {
    let root = create_site();
    let data = load(&root, "tpt", &FREQ);

    let rm: Vec<f32> = (0..LEVELS).map(|o| 0.004 + 0.001 * o as f32).collect();
    check("RM", &data[0].field("RM").unwrap(), 0.004, 0.096, mean(&rm), &[93, 1]);
    let altitudes = data[0].altitudes.as_ref().unwrap();
    assert_eq!(altitudes.len(), data[0].output_offset.len());
}

#[test]
fn test_channel_index_skips_unused_frequency() {
    let root = create_site();
    let data = load(&root, "iwv", &FREQ);

    assert_eq!(data[0].channel_index, (1..14).collect::<Vec<_>>());
    assert_eq!(data[0].scan_channel_index, (1..14).collect::<Vec<_>>());
}

#[test]
fn test_reversed_frequencies_reorder_frequency_fields() {
    let root = create_site();
    let reversed: Vec<f64> = FREQ.iter().rev().copied().collect();
    let data = load(&root, "lwp", &reversed);
    let record = &data[0];

    assert_abs_diff_eq!(record.frequencies[0], 58.0);
    assert_abs_diff_eq!(record.frequencies[12], 23.04);
    assert_eq!(record.channel_index, (0..13).collect::<Vec<_>>());

    // First network input is now stored frequency 12; auxiliary inputs stay put.
    assert_abs_diff_eq!(record.input_offset[[0, 0]], 61.404 - 6.0, epsilon = 1e-4);
    assert_abs_diff_eq!(record.input_offset[[0, 13]], 61.404 - 6.5, epsilon = 1e-4);
    assert_abs_diff_eq!(record.input_offset[[0, 15]], LAST_INPUT_OFFSET);
    assert_abs_diff_eq!(record.w1[[0, 0, 0]], 0.12, epsilon = 1e-6);
    assert_abs_diff_eq!(record.w1[[12, 0, 0]], LWP_SEEDS[0]);
    assert_abs_diff_eq!(record.w1[[16, 0, 0]], 0.16, epsilon = 1e-6);

    // Frequency-independent fields are untouched.
    let ordered = load(&root, "lwp", &FREQ);
    assert_eq!(record.w2, ordered[0].w2);
    assert_eq!(record.rm, ordered[0].rm);
}

#[test]
fn test_scan_inputs_reordered_per_angle() {
    let root = create_site();
    let reversed: Vec<f64> = FREQ.iter().rev().copied().collect();
    let data = load(&root, "tpb", &reversed);

    // Second angle block starts at input 13; its first entry is stored input 25.
    assert_abs_diff_eq!(data[0].input_offset[[13]], 61.404 - 12.5, epsilon = 1e-4);
    assert_abs_diff_eq!(data[0].input_offset[[132]], LAST_INPUT_OFFSET);
}

#[test]
fn test_scan_frequencies_written_to_yaml() {
    let root = create_site();
    let scan_frequencies = vec![54.94_f32, 56.66, 57.3, 58.0];
    let inputs = scan_frequencies.len() * SCAN_ANGLES.len() + AUX_INPUTS;
    let mut file = network(Some(5), &SCAN_ANGLES, inputs, 15, LEVELS, -149.74174);
    file.scan_frequencies = Some(scan_frequencies);
    let path = root.path().join(SITE).join("coefficients").join("tpb.yaml");
    write_yaml(&path, &file);
    assert!(fs::read_to_string(&path).unwrap().contains("FR_BL:"));

    let data = load(&root, "tpb", &FREQ);
    check("FR_BL", &data[0].field("FR_BL").unwrap(), 54.94, 58.0, 56.725, &[4]);
    assert_eq!(data[0].scan_channel_index, vec![10, 11, 12, 13]);
    assert_eq!(data[0].channel_index, (1..14).collect::<Vec<_>>());
    assert_eq!(data[0].input_offset.shape(), &[43]);
    assert_eq!(data[0].w1.shape(), &[44, 15]);

    // Reversed channels reorder each angle block of four scan frequencies.
    let reversed: Vec<f64> = FREQ.iter().rev().copied().collect();
    let data = load(&root, "tpb", &reversed);
    assert_eq!(data[0].scan_channel_index, vec![0, 1, 2, 3]);
    assert_abs_diff_eq!(data[0].scan_frequencies[0], 58.0);
    assert_abs_diff_eq!(data[0].input_offset[[0]], 61.404 - 1.5, epsilon = 1e-4);
    assert_abs_diff_eq!(data[0].input_offset[[4]], 61.404 - 3.5, epsilon = 1e-4);
    assert_abs_diff_eq!(data[0].input_offset[[40]], 61.404 - 20.0, epsilon = 1e-4);
    assert_abs_diff_eq!(data[0].input_offset[[42]], LAST_INPUT_OFFSET);
}

#[test]
fn test_loads_are_deterministic_across_threads() {
    let root = create_site();
    let loader = CoefficientLoader::new(root.path());
    let baseline = loader.get_mvr_coeff(SITE, "tpb", &FREQ, None).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| loader.get_mvr_coeff(SITE, "tpb", &FREQ, None).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), baseline);
        }
    });
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_returns_all_configurations_by_default() {
    let root = create_site();
    let data = load(&root, "lwp", &FREQ);

    let names: Vec<&str> = data.iter().map(|c| c.configuration.as_str()).collect();
    assert_eq!(names, vec!["lwp", "lwp_zenith"]);
    assert_eq!(data[1].w1.shape(), &[17, 9, 1]);
    assert_eq!(data[1].noise.shape(), &[1, 1]);
}

#[test]
fn test_select_configuration_by_name() {
    let root = create_site();
    let selection = CoefficientSelection::Configurations(vec!["iwv_zenith".to_string()]);
    let data = CoefficientLoader::new(root.path())
        .get_mvr_coeff(SITE, "iwv", &FREQ, Some(&selection))
        .unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data[0].configuration, "iwv_zenith");
}

#[test]
fn test_select_configuration_by_elevation_angle() {
    let root = create_site();
    let selection = CoefficientSelection::ElevationAngle(42.0);
    let data = CoefficientLoader::new(root.path())
        .get_mvr_coeff(SITE, "lwp", &FREQ, Some(&selection))
        .unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data[0].configuration, "lwp");
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_unknown_site() {
    let root = create_site();
    match CoefficientLoader::new(root.path()).get_mvr_coeff("juelich", "lwp", &FREQ, None) {
        Err(CoeffError::ConfigurationNotFound { site, .. }) => assert_eq!(site, "juelich"),
        other => panic!("Expected ConfigurationNotFound error, got {:?}", other),
    }
}

#[test]
fn test_unknown_product() {
    let root = create_site();
    match CoefficientLoader::new(root.path()).get_mvr_coeff(SITE, "lwc", &FREQ, None) {
        Err(CoeffError::UnknownProduct { product }) => assert_eq!(product, "lwc"),
        other => panic!("Expected UnknownProduct error, got {:?}", other),
    }
}

#[test]
fn test_missing_channel_is_frequency_mismatch() {
    let root = create_site();
    let without_31: Vec<f64> = FREQ.iter().copied().filter(|&f| f != 31.4).collect();
    match CoefficientLoader::new(root.path()).get_mvr_coeff(SITE, "hpt", &without_31, None) {
        Err(CoeffError::FrequencyMismatch {
            product, message, ..
        }) => {
            assert_eq!(product, "hpt");
            assert_eq!(message, "stored frequency 31.40 GHz was not supplied");
        }
        other => panic!("Expected FrequencyMismatch error, got {:?}", other),
    }
}

#[test]
fn test_corrupt_coefficient_file() {
    let root = create_site();
    let coeff_dir = root.path().join(SITE).join("coefficients");
    let mut file = network(Some(4), &[90.0], 16, 12, LEVELS, 0.0);
    file.w1[3].pop();
    write_yaml(&coeff_dir.join("tpt.yaml"), &file);

    match CoefficientLoader::new(root.path()).get_mvr_coeff(SITE, "tpt", &FREQ, None) {
        Err(CoeffError::CorruptBundle {
            source_name,
            message,
        }) => {
            assert_eq!(source_name, "tpt.yaml");
            assert_eq!(message, "W1 is ragged at row 3");
        }
        other => panic!("Expected CorruptBundle error, got {:?}", other),
    }
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_returns_field_summaries() {
    let root = create_site();
    let (status, body) = post_coefficients(
        create_router_for_test(&root),
        json!({"site": SITE, "product": "tpb", "frequencies": FREQ}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"], "tpb");
    let configuration = &body["configurations"][0];
    assert_eq!(configuration["name"], "tpb");
    assert_eq!(configuration["fields"]["W1"]["shape"], json!([134, 15]));
    assert_eq!(configuration["fields"]["configuration"]["text"], "tpb");
    assert!(configuration["fields"]["W1"].get("values").is_none());
    assert_eq!(configuration["channel_index"][0], 1);
}

#[tokio::test]
async fn test_api_includes_values_on_request() {
    let root = create_site();
    let (status, body) = post_coefficients(
        create_router_for_test(&root),
        json!({
            "site": SITE,
            "product": "lwp",
            "frequencies": FREQ,
            "selection": {"configurations": ["lwp_zenith"]},
            "include_values": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let configurations = body["configurations"].as_array().unwrap();
    assert_eq!(configurations.len(), 1);
    let values = configurations[0]["fields"]["RM"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 1);
}

#[tokio::test]
async fn test_api_unknown_product_is_bad_request() {
    let root = create_site();
    let (status, body) = post_coefficients(
        create_router_for_test(&root),
        json!({"site": SITE, "product": "lwc", "frequencies": FREQ}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_PRODUCT");
}

#[tokio::test]
async fn test_api_unknown_site_is_not_found() {
    let root = create_site();
    let (status, body) = post_coefficients(
        create_router_for_test(&root),
        json!({"site": "juelich", "product": "lwp", "frequencies": FREQ}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CONFIGURATION_NOT_FOUND");
}

#[tokio::test]
async fn test_api_frequency_mismatch_is_unprocessable() {
    let root = create_site();
    let (status, body) = post_coefficients(
        create_router_for_test(&root),
        json!({"site": SITE, "product": "iwv", "frequencies": [22.24, 23.04]}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "FREQUENCY_MISMATCH");
}

#[tokio::test]
async fn test_api_malformed_json() {
    let root = create_site();
    let (status, body) = send(
        create_router_for_test(&root),
        Request::builder()
            .method("POST")
            .uri("/coefficients")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_api_missing_field_is_validation_error() {
    let root = create_site();
    let (status, body) = post_coefficients(
        create_router_for_test(&root),
        json!({"site": SITE, "product": "lwp"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_api_lists_site_products() {
    let root = create_site();
    let (status, body) = send(
        create_router_for_test(&root),
        Request::builder()
            .uri(format!("/sites/{}/products", SITE))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["site"], SITE);
    assert_eq!(body["station"]["name"], "Hyytiälä");
    let products: Vec<&str> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["product"].as_str().unwrap())
        .collect();
    assert_eq!(products, vec!["lwp", "iwv", "tpt", "tpb", "hpt"]);
    assert_eq!(body["products"][0]["configurations"], json!(["lwp", "lwp_zenith"]));
}

#[tokio::test]
async fn test_api_unknown_site_products_is_not_found() {
    let root = create_site();
    let (status, _) = send(
        create_router_for_test(&root),
        Request::builder()
            .uri("/sites/juelich/products")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
