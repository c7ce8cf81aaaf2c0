//! Rotation from pointer position.
//!
//! The angle is recomputed from scratch on every call (pointer relative to
//! the pivot, snapped to 15° steps), so a drag never accumulates error and
//! there is no rotation-in-progress state to track.

#[cfg(test)]
#[path = "rotate_test.rs"]
mod rotate_test;

use std::f64::consts::TAU;

use crate::camera::Point;
use crate::consts::ROTATION_SNAP_STEP;
use crate::doc::{Element, PartialElement};

/// Absolute angle for an element whose rotation handle is at `mouse`.
///
/// The pivot is `center`, or the element's own center when `None`. The
/// result replaces `element.angle`; it is not a delta.
#[must_use]
pub fn apply_rotation(element: &Element, mouse: Point, center: Option<Point>) -> PartialElement {
    let center = center.unwrap_or_else(|| element.center());
    let raw = (mouse.y - center.y).atan2(mouse.x - center.x);
    PartialElement { angle: Some(snap_angle(raw)), ..Default::default() }
}

/// Round `radians` to the nearest multiple of [`ROTATION_SNAP_STEP`].
#[must_use]
pub fn snap_angle(radians: f64) -> f64 {
    (radians / ROTATION_SNAP_STEP).round() * ROTATION_SNAP_STEP
}

/// Map an angle into `[0, 2π)`. For display and comparisons only; stored
/// angles are left unbounded.
#[must_use]
pub fn normalize_angle(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Angle in degrees within `[0, 360)`, rounded to one decimal, for the inspector readout.
#[must_use]
pub fn angle_degrees_for_display(radians: f64) -> f64 {
    let deg = normalize_angle(radians).to_degrees();
    (deg * 10.0).round() / 10.0 % 360.0
}

/// Signed angle swept from `start` to `current` around `pivot`, in `(-π, π]`.
#[must_use]
pub fn swept_angle(pivot: Point, start: Point, current: Point) -> f64 {
    let a = (start.y - pivot.y).atan2(start.x - pivot.x);
    let b = (current.y - pivot.y).atan2(current.x - pivot.x);
    let delta = (b - a).rem_euclid(TAU);
    if delta > std::f64::consts::PI { delta - TAU } else { delta }
}
