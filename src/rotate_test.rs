#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::camera::Rect;
use crate::doc::ElementKind;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Element centered on (200, 150).
fn centered_element() -> Element {
    Element::new(ElementKind::Rectangle, Rect::new(150.0, 100.0, 100.0, 100.0))
}

fn angle_of(p: &PartialElement) -> f64 {
    p.angle.unwrap_or(f64::NAN)
}

#[test]
fn mouse_directly_right_is_zero() {
    let p = apply_rotation(&centered_element(), Point::new(250.0, 150.0), None);
    assert!(approx_eq(angle_of(&p), 0.0));
}

#[test]
fn only_angle_is_returned() {
    let p = apply_rotation(&centered_element(), Point::new(250.0, 150.0), None);
    assert_eq!(p, PartialElement { angle: p.angle, ..Default::default() });
}

#[test]
fn mouse_directly_below_is_quarter_turn() {
    let p = apply_rotation(&centered_element(), Point::new(200.0, 300.0), None);
    assert!(approx_eq(angle_of(&p), FRAC_PI_2));
}

#[test]
fn mouse_directly_above_is_negative_quarter_turn() {
    let p = apply_rotation(&centered_element(), Point::new(200.0, 0.0), None);
    assert!(approx_eq(angle_of(&p), -FRAC_PI_2));
}

#[test]
fn snaps_to_fifteen_degrees() {
    // 20° from the center snaps to 15°.
    let rad = 20.0_f64.to_radians();
    let mouse = Point::new(200.0 + 100.0 * rad.cos(), 150.0 + 100.0 * rad.sin());
    let p = apply_rotation(&centered_element(), mouse, None);
    assert!(approx_eq(angle_of(&p), 15.0_f64.to_radians()));
}

#[test]
fn explicit_center_overrides_element_center() {
    let p = apply_rotation(&centered_element(), Point::new(0.0, 10.0), Some(Point::new(0.0, 0.0)));
    assert!(approx_eq(angle_of(&p), FRAC_PI_2));
}

#[test]
fn ignores_existing_angle() {
    let mut el = centered_element();
    el.angle = 3.0;
    let p = apply_rotation(&el, Point::new(250.0, 150.0), None);
    assert!(approx_eq(angle_of(&p), 0.0));
}

#[test]
fn repeated_calls_are_identical() {
    let el = centered_element();
    let mouse = Point::new(287.0, 211.0);
    let first = apply_rotation(&el, mouse, None);
    for _ in 0..10 {
        assert_eq!(apply_rotation(&el, mouse, None), first);
    }
}

#[test]
fn result_is_always_a_multiple_of_fifteen_degrees() {
    let mut rng = StdRng::seed_from_u64(5);
    let el = centered_element();
    for _ in 0..1000 {
        let mouse = Point::new(rng.random_range(-1000.0..1000.0), rng.random_range(-1000.0..1000.0));
        let angle = angle_of(&apply_rotation(&el, mouse, None));
        let steps = angle / ROTATION_SNAP_STEP;
        assert!((steps - steps.round()).abs() < 1e-9, "{angle} is not a 15° multiple");
        assert!(angle.abs() <= PI + EPSILON);
    }
}

#[test]
fn mouse_at_center_does_not_panic() {
    let p = apply_rotation(&centered_element(), Point::new(200.0, 150.0), None);
    assert!(approx_eq(angle_of(&p), 0.0));
}

#[test]
fn nan_mouse_propagates() {
    let p = apply_rotation(&centered_element(), Point::new(f64::NAN, 0.0), None);
    assert!(angle_of(&p).is_nan());
}

// --- helpers ---

#[test]
fn snap_angle_rounds_to_nearest_step() {
    assert!(approx_eq(snap_angle(7.6_f64.to_radians()), 15.0_f64.to_radians()));
    assert!(approx_eq(snap_angle(7.4_f64.to_radians()), 0.0));
}

#[test]
fn normalize_angle_wraps() {
    assert!(approx_eq(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2));
    assert!(approx_eq(normalize_angle(5.0 * PI), PI));
    assert!(normalize_angle(-1e-20) < TAU);
}

#[test]
fn display_degrees() {
    assert_eq!(angle_degrees_for_display(-FRAC_PI_2), 270.0);
    assert_eq!(angle_degrees_for_display(TAU + 0.5_f64.to_radians()), 0.5);
}

#[test]
fn swept_angle_signed() {
    let pivot = Point::new(0.0, 0.0);
    assert!(approx_eq(swept_angle(pivot, Point::new(1.0, 0.0), Point::new(0.0, 1.0)), FRAC_PI_2));
    assert!(approx_eq(swept_angle(pivot, Point::new(0.0, 1.0), Point::new(1.0, 0.0)), -FRAC_PI_2));
}

#[test]
fn swept_angle_across_branch_cut() {
    let pivot = Point::new(0.0, 0.0);
    let start = Point::new(-1.0, 0.01);
    let current = Point::new(-1.0, -0.01);
    assert!(swept_angle(pivot, start, current).abs() < 0.1);
}
