//! Hit-testing: which element (or handle) is under a world-space point.
//!
//! The spatial index narrows the field to elements whose world bounds contain
//! the point; the precise per-kind test here decides. Index duplicates are
//! collapsed by id, then candidates are checked front to back and the first
//! precise match wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, distance};
use crate::consts::PEN_HIT_MIN_DISTANCE;
use crate::doc::{Element, ElementId, ElementKind};
use crate::handles::{HandleType, find_resize_handle};
use crate::spatial::{SpatialIndex, dedup_by_id};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(HandleType),
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Front-most unlocked element whose shape contains `point`.
///
/// Candidates come from `index` and are resolved to live elements through
/// `elements`; an id the index still holds but `elements` no longer knows is
/// skipped. Higher `z_index` wins; among equal `z_index`, the element inserted
/// into the index later wins, including across the index's overflow list.
pub fn spatial_hit_test<'a>(
    index: &SpatialIndex,
    point: Point,
    elements: impl Fn(&str) -> Option<&'a Element>,
) -> Option<&'a Element> {
    let mut candidates: Vec<&'a Element> = dedup_by_id(index.query_point(point))
        .into_iter()
        .filter_map(|c| elements(&c.id))
        .filter(|el| !el.locked)
        .collect();
    candidates.sort_by_key(|el| el.z_index);
    tracing::trace!(candidates = candidates.len(), "hit-test candidates");

    candidates.into_iter().rev().find(|el| element_contains_point(el, point))
}

/// Precise shape test in the element's local frame.
///
/// The point is rotated by `-angle` about the element center first, so the
/// rules below apply to the unrotated shape:
/// - `Circle`: inside the inscribed ellipse.
/// - `Pen`: within `max(2 * stroke_width, 8)` of some stroke segment. Missing
///   or non-finite samples are skipped; fewer than two valid samples means no
///   segment and no hit.
/// - everything else: inside the box, edges inclusive.
#[must_use]
pub fn element_contains_point(element: &Element, point: Point) -> bool {
    let local = if element.angle == 0.0 { point } else { point.rotate_about(element.center(), -element.angle) };
    match element.kind {
        ElementKind::Circle => ellipse_contains(element, local),
        ElementKind::Pen => pen_contains(element, local),
        _ => element.bounds().normalized().contains_point(local),
    }
}

/// Handle-first hit test for pointer-down.
///
/// When `selected` names a live, unlocked element, its resize and rotation
/// handles are checked before any element body.
pub fn hit_test<'a>(
    point: Point,
    index: &SpatialIndex,
    elements: impl Fn(&str) -> Option<&'a Element>,
    selected: Option<&str>,
) -> Option<Hit> {
    if let Some(sel) = selected.and_then(&elements).filter(|el| !el.locked) {
        if let Some(handle) = find_resize_handle(point, sel) {
            return Some(Hit { element_id: sel.id.clone(), part: HitPart::Handle(handle) });
        }
    }
    spatial_hit_test(index, point, elements).map(|el| Hit { element_id: el.id.clone(), part: HitPart::Body })
}

fn ellipse_contains(element: &Element, p: Point) -> bool {
    let c = element.center();
    let rx = element.width.abs() / 2.0;
    let ry = element.height.abs() / 2.0;
    let nx = (p.x - c.x) / rx;
    let ny = (p.y - c.y) / ry;
    nx * nx + ny * ny <= 1.0
}

fn pen_contains(element: &Element, p: Point) -> bool {
    let threshold = (element.props().stroke_width() * 2.0).max(PEN_HIT_MIN_DISTANCE);
    let local = Point::new(p.x - element.x, p.y - element.y);
    let points: Vec<Point> = element.valid_points().collect();
    points.windows(2).any(|seg| point_segment_distance(local, seg[0], seg[1]) <= threshold)
}

/// Distance from `p` to the segment `a`–`b`.
fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b.sub(a);
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let ap = p.sub(a);
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    distance(p, Point::new(a.x + t * ab.x, a.y + t * ab.y))
}
