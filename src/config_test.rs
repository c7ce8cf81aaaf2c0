#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn load(vars: &[(&str, &str)]) -> Result<BoardConfig, ConfigError> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    BoardConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn empty_source_gives_defaults() {
    let cfg = load(&[]).unwrap();
    assert_eq!(cfg, BoardConfig::default());
    assert_eq!(cfg.grid.size, 20.0);
    assert!(cfg.grid.snap_to_grid);
    assert_eq!(cfg.index.max_elements, 10);
    assert_eq!(cfg.index.bounds, Rect::new(-10_000.0, -10_000.0, 20_000.0, 20_000.0));
}

#[test]
fn parses_overrides() {
    let cfg = load(&[
        ("SKETCH_GRID_SIZE", "25"),
        ("SKETCH_GRID_SNAP_DISTANCE", " 4.5 "),
        ("SKETCH_GRID_SNAP", "false"),
        ("SKETCH_INDEX_MAX_ELEMENTS", "16"),
        ("SKETCH_INDEX_MAX_DEPTH", "5"),
        ("SKETCH_INDEX_EXTENT", "500"),
    ])
    .unwrap();
    assert_eq!(cfg.grid.size, 25.0);
    assert!(cfg.grid.enabled);
    assert_eq!(cfg.grid.snap_distance, 4.5);
    assert!(!cfg.grid.snap_to_grid);
    assert_eq!(cfg.index.max_elements, 16);
    assert_eq!(cfg.index.max_depth, 5);
    assert_eq!(cfg.index.bounds, Rect::new(-500.0, -500.0, 1000.0, 1000.0));
}

#[test]
fn zero_grid_size_disables_grid() {
    let cfg = load(&[("SKETCH_GRID_SIZE", "0")]).unwrap();
    assert!(!cfg.grid.enabled);
}

#[test]
fn flag_accepts_numeric_and_mixed_case() {
    assert!(load(&[("SKETCH_GRID_SNAP", "TRUE")]).unwrap().grid.snap_to_grid);
    assert!(!load(&[("SKETCH_GRID_SNAP", "0")]).unwrap().grid.snap_to_grid);
}

#[test]
fn rejects_non_numeric() {
    let err = load(&[("SKETCH_GRID_SIZE", "big")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { var: "SKETCH_GRID_SIZE", ref value } if value == "big"));
    assert_eq!(err.to_string(), "SKETCH_GRID_SIZE: expected a number, got \"big\"");
}

#[test]
fn rejects_bad_flag() {
    let err = load(&[("SKETCH_GRID_SNAP", "maybe")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBool { var: "SKETCH_GRID_SNAP", .. }));
}

#[test]
fn rejects_negative_grid_size() {
    let err = load(&[("SKETCH_GRID_SIZE", "-5")]).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { var: "SKETCH_GRID_SIZE", .. }));
}

#[test]
fn rejects_non_finite_snap_distance() {
    let err = load(&[("SKETCH_GRID_SNAP_DISTANCE", "NaN")]).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { var: "SKETCH_GRID_SNAP_DISTANCE", .. }));
}

#[test]
fn rejects_zero_leaf_capacity() {
    let err = load(&[("SKETCH_INDEX_MAX_ELEMENTS", "0")]).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { var: "SKETCH_INDEX_MAX_ELEMENTS", .. }));
}

#[test]
fn rejects_negative_depth() {
    let err = load(&[("SKETCH_INDEX_MAX_DEPTH", "-1")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { var: "SKETCH_INDEX_MAX_DEPTH", .. }));
}

#[test]
fn rejects_depth_past_ceiling() {
    let err = load(&[("SKETCH_INDEX_MAX_DEPTH", "5000")]).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { var: "SKETCH_INDEX_MAX_DEPTH", .. }));
    assert_eq!(load(&[("SKETCH_INDEX_MAX_DEPTH", "32")]).unwrap().index.max_depth, 32);
}

#[test]
fn rejects_non_positive_extent() {
    for raw in ["0", "-10", "inf"] {
        let err = load(&[("SKETCH_INDEX_EXTENT", raw)]).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { var: "SKETCH_INDEX_EXTENT", .. }), "{raw}");
    }
}

#[test]
fn json_error_converts() {
    let err = GridSettings::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("invalid grid settings:"));
}
