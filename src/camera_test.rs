#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_rotate_about_quarter_turn() {
    let p = Point::new(10.0, 0.0).rotate_about(Point::new(0.0, 0.0), std::f64::consts::FRAC_PI_2);
    assert!(point_approx_eq(p, Point::new(0.0, 10.0)));
}

#[test]
fn point_rotate_about_own_center_is_identity() {
    let c = Point::new(5.0, 5.0);
    assert!(point_approx_eq(c.rotate_about(c, 1.234), c));
}

// --- distance ---

#[test]
fn distance_pythagorean() {
    assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
}

#[test]
fn distance_propagates_nan() {
    assert!(distance(Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0)).is_nan());
}

#[test]
fn distance_propagates_infinity() {
    assert!(distance(Point::new(f64::INFINITY, 0.0), Point::new(1.0, 1.0)).is_infinite());
}

// --- is_point_in_rect ---

#[test]
fn point_in_rect_inclusive_edges() {
    let r = Rect::new(10.0, 10.0, 100.0, 50.0);
    assert!(is_point_in_rect(Point::new(10.0, 10.0), &r));
    assert!(is_point_in_rect(Point::new(110.0, 60.0), &r));
    assert!(is_point_in_rect(Point::new(110.0, 10.0), &r));
    assert!(is_point_in_rect(Point::new(10.0, 60.0), &r));
}

#[test]
fn point_outside_rect() {
    let r = Rect::new(10.0, 10.0, 100.0, 50.0);
    assert!(!is_point_in_rect(Point::new(9.999, 30.0), &r));
    assert!(!is_point_in_rect(Point::new(50.0, 60.001), &r));
}

#[test]
fn nan_point_is_never_in_rect() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!is_point_in_rect(Point::new(f64::NAN, 5.0), &r));
}

// --- Rect helpers ---

#[test]
fn rect_normalized_flips_negative_extents() {
    let r = Rect::new(100.0, 100.0, -40.0, -20.0).normalized();
    assert_eq!(r, Rect::new(60.0, 80.0, 40.0, 20.0));
}

#[test]
fn rect_from_points_any_order() {
    let r = Rect::from_points(Point::new(50.0, 10.0), Point::new(10.0, 30.0));
    assert_eq!(r, Rect::new(10.0, 10.0, 40.0, 20.0));
}

#[test]
fn rect_intersects_touching_edges() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn rect_disjoint_does_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.5, 0.0, 10.0, 10.0);
    assert!(!a.intersects(&b));
}

#[test]
fn zero_size_rect_intersects_container() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Rect::new(5.0, 5.0, 0.0, 0.0)));
}

#[test]
fn rect_union_covers_both() {
    let u = Rect::new(0.0, 0.0, 10.0, 10.0).union(&Rect::new(20.0, -5.0, 5.0, 5.0));
    assert_eq!(u, Rect::new(0.0, -5.0, 25.0, 15.0));
}

#[test]
fn rect_contains_rect() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 90.0, 90.0)));
    assert!(!outer.contains_rect(&Rect::new(10.0, 10.0, 91.0, 90.0)));
}

// --- transform_point / inverse_transform_point ---

#[test]
fn transform_identity() {
    let p = transform_point(Point::new(50.0, 75.0), 1.0, Point::default());
    assert!(point_approx_eq(p, Point::new(50.0, 75.0)));
}

#[test]
fn transform_applies_pan_then_zoom() {
    let p = transform_point(Point::new(110.0, 220.0), 2.0, Point::new(10.0, 20.0));
    assert!(point_approx_eq(p, Point::new(200.0, 400.0)));
}

#[test]
fn inverse_transform_divides_then_pans() {
    let p = inverse_transform_point(Point::new(200.0, 400.0), 2.0, Point::new(10.0, 20.0));
    assert!(point_approx_eq(p, Point::new(110.0, 220.0)));
}

#[test]
fn inverse_transform_zero_zoom_is_infinite() {
    let p = inverse_transform_point(Point::new(5.0, -5.0), 0.0, Point::default());
    assert_eq!(p.x, f64::INFINITY);
    assert_eq!(p.y, f64::NEG_INFINITY);
}

#[test]
fn transform_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let p = Point::new(rng.random_range(-1e4..1e4), rng.random_range(-1e4..1e4));
        let pan = Point::new(rng.random_range(-1e3..1e3), rng.random_range(-1e3..1e3));
        let zoom = rng.random_range(0.05..20.0);
        let back = inverse_transform_point(transform_point(p, zoom, pan), zoom, pan);
        assert!((back.x - p.x).abs() < 1e-6, "x drifted: {p:?} -> {back:?}");
        assert!((back.y - p.y).abs() < 1e-6, "y drifted: {p:?} -> {back:?}");
    }
}

// --- Camera ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.pan, Point::new(0.0, 0.0));
}

#[test]
fn camera_screen_to_world_matches_free_function() {
    let cam = Camera { pan: Point::new(-30.0, 12.0), zoom: 1.5 };
    let screen = Point::new(300.0, 150.0);
    assert_eq!(cam.screen_to_world(screen), inverse_transform_point(screen, 1.5, Point::new(-30.0, 12.0)));
}

#[test]
fn camera_round_trip() {
    let cam = Camera { pan: Point::new(100.0, -50.0), zoom: 0.25 };
    let world = Point::new(42.0, 17.0);
    assert!(point_approx_eq(cam.screen_to_world(cam.world_to_screen(world)), world));
}

#[test]
fn camera_screen_dist_to_world() {
    let cam = Camera { pan: Point::default(), zoom: 4.0 };
    assert!(approx_eq(cam.screen_dist_to_world(8.0), 2.0));
}

#[test]
fn camera_visible_world_rect() {
    let cam = Camera { pan: Point::new(50.0, 60.0), zoom: 2.0 };
    let r = cam.visible_world_rect(800.0, 600.0);
    assert_eq!(r, Rect::new(50.0, 60.0, 400.0, 300.0));
}
