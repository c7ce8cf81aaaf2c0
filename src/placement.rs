//! Collision-avoiding placement for new elements.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::camera::{Point, Rect};
use crate::spatial::SpatialIndex;

/// Top-left position near `preferred` where a `(width, height)` box overlaps
/// no unlocked element.
///
/// Candidates are laid out on a lattice of `step` around `preferred` and
/// visited ring by ring (square rings, nearest first within each ring).
/// Returns `preferred` itself when it is free, or when nothing within
/// `max_rings` is.
#[must_use]
pub fn find_free_position(index: &SpatialIndex, size: (f64, f64), preferred: Point, step: f64, max_rings: u16) -> Point {
    let (width, height) = size;
    let is_free = |p: Point| {
        let rect = Rect::new(p.x, p.y, width, height);
        index.query(&rect).iter().all(|el| el.locked)
    };

    if is_free(preferred) {
        return preferred;
    }
    if !(step.is_finite() && step > 0.0) {
        return preferred;
    }

    for ring in 1..=i32::from(max_rings) {
        let found = ring_offsets(ring)
            .into_iter()
            .map(|(dx, dy)| preferred.offset(f64::from(dx) * step, f64::from(dy) * step))
            .find(|p| is_free(*p));
        if let Some(p) = found {
            tracing::trace!(ring, x = p.x, y = p.y, "found free position");
            return p;
        }
    }
    tracing::debug!(max_rings, "no free position; using preferred");
    preferred
}

/// Lattice offsets on the square ring at Chebyshev distance `ring`, nearest first.
fn ring_offsets(ring: i32) -> Vec<(i32, i32)> {
    let mut offsets: Vec<(i32, i32)> = (-ring..=ring)
        .flat_map(|dy| (-ring..=ring).map(move |dx| (dx, dy)))
        .filter(|(dx, dy)| dx.abs().max(dy.abs()) == ring)
        .collect();
    offsets.sort_by_key(|(dx, dy)| dx * dx + dy * dy);
    offsets
}
