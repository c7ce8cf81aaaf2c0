#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

fn settings(size: f64) -> GridSettings {
    GridSettings { size, ..GridSettings::default() }
}

// --- defaults / serde ---

#[test]
fn default_settings() {
    let s = GridSettings::default();
    assert!(s.enabled);
    assert!(s.snap_to_grid);
    assert_eq!(s.size, 20.0);
    assert_eq!(s.snap_distance, 10.0);
}

#[test]
fn from_json_fills_missing_keys() {
    let s = GridSettings::from_json(r#"{"size": 50, "snapToGrid": false}"#).unwrap();
    assert_eq!(s.size, 50.0);
    assert!(!s.snap_to_grid);
    assert!(s.enabled);
    assert_eq!(s.opacity, 0.5);
}

#[test]
fn from_json_rejects_garbage() {
    let err = GridSettings::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

// --- snap_point_to_grid ---

#[test]
fn snap_to_nearest_intersection() {
    assert_eq!(snap_point_to_grid(Point::new(23.0, 17.0), &settings(20.0)), Point::new(20.0, 20.0));
}

#[test]
fn snap_rounds_half_away_from_zero() {
    let s = settings(20.0);
    assert_eq!(snap_point_to_grid(Point::new(10.0, 30.0), &s), Point::new(20.0, 40.0));
    assert_eq!(snap_point_to_grid(Point::new(-10.0, -30.0), &s), Point::new(-20.0, -40.0));
}

#[test]
fn snap_disabled_returns_input() {
    let s = GridSettings { enabled: false, ..GridSettings::default() };
    let p = Point::new(23.0, 17.0);
    assert_eq!(snap_point_to_grid(p, &s), p);
}

#[test]
fn snap_off_returns_input() {
    let s = GridSettings { snap_to_grid: false, ..GridSettings::default() };
    let p = Point::new(23.0, 17.0);
    assert_eq!(snap_point_to_grid(p, &s), p);
}

#[test]
fn snap_zero_size_does_not_divide() {
    let p = Point::new(23.0, 17.0);
    assert_eq!(snap_point_to_grid(p, &settings(0.0)), p);
    assert_eq!(snap_point_to_grid(p, &settings(-5.0)), p);
    assert_eq!(snap_point_to_grid(p, &settings(f64::NAN)), p);
}

#[test]
fn snap_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let s = settings(rng.random_range(1.0..64.0));
        let p = Point::new(rng.random_range(-5000.0..5000.0), rng.random_range(-5000.0..5000.0));
        let once = snap_point_to_grid(p, &s);
        let twice = snap_point_to_grid(once, &s);
        assert!((once.x - twice.x).abs() < 1e-9 && (once.y - twice.y).abs() < 1e-9, "{p:?} with size {}", s.size);
    }
}

// --- snap_point_to_grid_with_distance ---

#[test]
fn magnetic_snap_within_distance() {
    let p = Point::new(23.0, 17.0);
    assert_eq!(snap_point_to_grid_with_distance(p, &settings(20.0)), Point::new(20.0, 20.0));
}

#[test]
fn magnetic_snap_beyond_distance_keeps_point() {
    let s = GridSettings { size: 100.0, snap_distance: 5.0, ..GridSettings::default() };
    let p = Point::new(40.0, 40.0);
    assert_eq!(snap_point_to_grid_with_distance(p, &s), p);
}

#[test]
fn magnetic_snap_at_exact_distance_snaps() {
    let s = GridSettings { size: 20.0, snap_distance: 5.0, ..GridSettings::default() };
    assert_eq!(snap_point_to_grid_with_distance(Point::new(23.0, 24.0), &s), Point::new(20.0, 20.0));
}

#[test]
fn magnetic_snap_zero_size_keeps_point() {
    let p = Point::new(1.0, 2.0);
    assert_eq!(snap_point_to_grid_with_distance(p, &settings(0.0)), p);
}

// --- snap_rect_to_grid ---

#[test]
fn snap_rect_keeps_size() {
    let r = snap_rect_to_grid(Rect::new(13.0, 27.0, 55.0, 33.0), &settings(10.0));
    assert_eq!(r, Rect::new(10.0, 30.0, 55.0, 33.0));
}

// --- grid_points_in_area ---

#[test]
fn grid_points_expand_to_whole_cells() {
    let pts = grid_points_in_area(&Rect::new(5.0, 5.0, 30.0, 10.0), &settings(20.0));
    let xs: Vec<f64> = pts.iter().filter(|p| p.y == 0.0).map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 20.0, 40.0]);
    let ys: Vec<f64> = pts.iter().filter(|p| p.x == 0.0).map(|p| p.y).collect();
    assert_eq!(ys, vec![0.0, 20.0]);
    assert_eq!(pts.len(), 6);
}

#[test]
fn grid_points_negative_area() {
    let pts = grid_points_in_area(&Rect::new(-25.0, -5.0, 10.0, 5.0), &settings(10.0));
    assert!(pts.contains(&Point::new(-30.0, -10.0)));
    assert!(pts.contains(&Point::new(-10.0, 0.0)));
}

#[test]
fn grid_points_empty_when_disabled() {
    let s = GridSettings { enabled: false, ..GridSettings::default() };
    assert!(grid_points_in_area(&Rect::new(0.0, 0.0, 100.0, 100.0), &s).is_empty());
    assert!(grid_points_in_area(&Rect::new(0.0, 0.0, 100.0, 100.0), &settings(0.0)).is_empty());
}

#[test]
fn grid_points_unbounded_area_is_empty() {
    let area = Rect::new(0.0, 0.0, f64::INFINITY, 10.0);
    assert!(grid_points_in_area(&area, &settings(20.0)).is_empty());
    let huge = Rect::new(0.0, 0.0, 1e9, 1e9);
    assert!(grid_points_in_area(&huge, &settings(1.0)).is_empty());
}

// --- visible_grid_lines ---

#[test]
fn grid_lines_cover_area() {
    let lines = visible_grid_lines(&Rect::new(0.0, 0.0, 40.0, 20.0), &settings(20.0));
    assert_eq!(lines.vertical, vec![0.0, 20.0, 40.0]);
    assert_eq!(lines.horizontal, vec![0.0, 20.0]);
}

#[test]
fn grid_lines_empty_when_disabled() {
    let lines = visible_grid_lines(&Rect::new(0.0, 0.0, 40.0, 20.0), &settings(0.0));
    assert!(lines.vertical.is_empty() && lines.horizontal.is_empty());
}

// --- grid_metrics ---

#[test]
fn metrics_normal_density() {
    let m = grid_metrics(&settings(20.0), 1.0);
    assert_eq!(m.scaled_size, 20.0);
    assert_eq!(m.density, GridDensity::Normal);
    assert!(m.visible);
}

#[test]
fn metrics_dense_at_threshold() {
    let m = grid_metrics(&settings(20.0), 0.5);
    assert_eq!(m.scaled_size, 10.0);
    assert_eq!(m.density, GridDensity::Dense);
    assert!(m.visible);
}

#[test]
fn metrics_invisible_below_four_pixels() {
    let m = grid_metrics(&settings(20.0), 0.15);
    assert!(!m.visible);
    let m = grid_metrics(&settings(20.0), 0.2);
    assert!(m.visible);
}

#[test]
fn metrics_zero_size() {
    let m = grid_metrics(&settings(0.0), 2.0);
    assert_eq!(m.scaled_size, 0.0);
    assert!(!m.visible);
}
