//! # Tests for Config
//!
//! Unit tests verifying the constants and the settings tree.

use crate::constants::*;
use crate::*;

// =============================================================================
// CONSTANT TESTS
// =============================================================================

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON > 0.0);
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
    assert!(DEGENERATE_AREA_EPSILON <= EPSILON);
}

#[test]
fn test_resolutions_form_a_grid() {
    assert!(DEFAULT_GRID_RESOLUTION >= MIN_GRID_RESOLUTION);
    assert!(DEFAULT_NORMAL_MAP_RESOLUTION >= DEFAULT_GRID_RESOLUTION);
}

#[test]
fn test_uv_crop_leaves_interior() {
    assert!(UV_CROP_MARGIN > 0.0);
    assert!(UV_CROP_MARGIN < 0.5);
}

#[test]
fn test_back_taper_is_thinner_than_front() {
    assert!(DEFAULT_BACK_TAPER_RATIO > 0.0);
    assert!(DEFAULT_BACK_TAPER_RATIO < 1.0);
}

#[test]
fn test_file_prefixes_differ() {
    assert_ne!(EXTRUSION_FILE_PREFIX, DEPTH_MESH_FILE_PREFIX);
}

// =============================================================================
// SETTINGS TESTS
// =============================================================================

#[test]
fn test_defaults_match_constants() {
    let config = HologramConfig::default();
    assert_eq!(config.mesh.grid_rows, DEFAULT_GRID_RESOLUTION);
    assert_eq!(config.mesh.grid_cols, DEFAULT_GRID_RESOLUTION);
    assert_eq!(config.mesh.depth_scale_factor, DEFAULT_DEPTH_SCALE_FACTOR);
    assert_eq!(config.mesh.back_taper_ratio, DEFAULT_BACK_TAPER_RATIO);
    assert_eq!(config.strategy.low_variance_threshold, LOW_VARIANCE_THRESHOLD);
    assert_eq!(config.normal_map.resolution, DEFAULT_NORMAL_MAP_RESOLUTION);
    assert!(!config.normal_map.green_up);
    assert_eq!(config.depth.convention, DepthConvention::Inverted);
    assert_eq!(config.extrusion.mask_threshold, MASK_THRESHOLD);
    assert_eq!(config.finish.smoothing_iterations, SMOOTHING_ITERATIONS);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_overrides_only_named_fields() {
    let config = HologramConfig::from_json_str(
        r#"{
            "mesh": { "grid_rows": 64, "grid_cols": 32 },
            "strategy": { "low_variance_threshold": 0.01 },
            "depth": { "convention": "direct" }
        }"#,
    )
    .unwrap();

    assert_eq!(config.mesh.grid_rows, 64);
    assert_eq!(config.mesh.grid_cols, 32);
    assert_eq!(config.mesh.depth_scale_factor, DEFAULT_DEPTH_SCALE_FACTOR);
    assert_eq!(config.strategy.low_variance_threshold, 0.01);
    assert_eq!(config.depth.convention, DepthConvention::Direct);
    assert_eq!(config.depth.bilateral, BilateralConfig::default());
    assert_eq!(config.export, ExportConfig::default());
}

#[test]
fn test_empty_json_is_default() {
    let config = HologramConfig::from_json_str("{}").unwrap();
    assert_eq!(config, HologramConfig::default());
}

#[test]
fn test_rejects_tiny_grid() {
    let err = HologramConfig::from_json_str(r#"{ "mesh": { "grid_rows": 1 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "mesh.grid", .. }));
}

#[test]
fn test_rejects_non_positive_depth_scale() {
    let mut config = HologramConfig::default();
    config.mesh.depth_scale_factor = 0.0;
    assert!(config.validate().is_err());

    config.mesh.depth_scale_factor = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_out_of_range_material() {
    let mut config = HologramConfig::default();
    config.material.roughness = 1.5;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("material.roughness"));
}

#[test]
fn test_rejects_malformed_json() {
    let err = HologramConfig::from_json_str("{ mesh: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_missing_file_reports_path() {
    let path = std::env::temp_dir().join("holo-config-does-not-exist.json");
    let err = HologramConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("holo-config-does-not-exist.json"));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(-1e-12));
    assert!(!approx_zero(1e-3));
}
