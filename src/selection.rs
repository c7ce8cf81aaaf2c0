//! Multi-selection: group bounds, group handles, and mapping group-level
//! resize/rotation back onto member elements.
//!
//! Group bounds are derived from the live elements on every selection change
//! and never stored. Member updates come back as [`ElementUpdate`]s in input
//! order; nothing is mutated here.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect, distance};
use crate::consts::{
    GROUP_HANDLE_SIZE, GROUP_HANDLE_TOLERANCE, GROUP_RESIZE_SENSITIVITY, GROUP_ROTATION_HANDLE_OFFSET, MIN_GROUP_SIZE,
};
use crate::doc::{Element, ElementId, ElementUpdate, PartialElement};
use crate::handles::{HandleType, ResizeHandle, drag_leading_edge_min, drag_trailing_edge_min};

/// Axis-aligned box around a multi-selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center: Point,
}

impl BoundingBox {
    /// Box with its center derived from the rectangle.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self { x: rect.x, y: rect.y, width: rect.width, height: rect.height, center: rect.center() }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Bounds enclosing every element's rotated footprint, or `None` for an empty selection.
#[must_use]
pub fn multi_selection_bounds<'a, I>(elements: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut corners = elements.into_iter().flat_map(Element::corners);
    let first = corners.next()?;
    let (mut min, mut max) = (first, first);
    for c in corners {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }
    Some(BoundingBox::from_rect(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)))
}

/// Four corner handles plus a rotation handle above the top-center.
#[must_use]
pub fn multi_selection_handles(bounds: &BoundingBox) -> Vec<ResizeHandle> {
    let r = bounds.rect();
    vec![
        ResizeHandle::new(HandleType::TopLeft, r.x, r.y, GROUP_HANDLE_SIZE),
        ResizeHandle::new(HandleType::TopRight, r.right(), r.y, GROUP_HANDLE_SIZE),
        ResizeHandle::new(HandleType::BottomLeft, r.x, r.bottom(), GROUP_HANDLE_SIZE),
        ResizeHandle::new(HandleType::BottomRight, r.right(), r.bottom(), GROUP_HANDLE_SIZE),
        ResizeHandle::new(
            HandleType::Rotation,
            bounds.center.x,
            r.y - GROUP_ROTATION_HANDLE_OFFSET,
            GROUP_HANDLE_SIZE,
        ),
    ]
}

/// The handle whose center is nearest `point`, provided it is within the
/// handle radius plus [`GROUP_HANDLE_TOLERANCE`].
#[must_use]
pub fn find_multi_selection_handle(point: Point, bounds: &BoundingBox) -> Option<HandleType> {
    let mut best: Option<(f64, HandleType)> = None;
    for handle in multi_selection_handles(bounds) {
        let d = distance(point, handle.center());
        if d > handle.size / 2.0 + GROUP_HANDLE_TOLERANCE {
            continue;
        }
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, handle.kind));
        }
    }
    best.map(|(_, kind)| kind)
}

/// Resize the group bounds by dragging a corner handle.
///
/// The pointer delta is damped by [`GROUP_RESIZE_SENSITIVITY`], then applied
/// with the same per-corner rules as single elements, clamped to
/// [`MIN_GROUP_SIZE`] with the opposite edge anchored. Endpoint handles act as
/// their matching corners; the rotation handle leaves the bounds unchanged.
#[must_use]
pub fn apply_multi_selection_resize(
    bounds: &BoundingBox,
    handle: HandleType,
    start: Point,
    current: Point,
) -> BoundingBox {
    let dx = (current.x - start.x) * GROUP_RESIZE_SENSITIVITY;
    let dy = (current.y - start.y) * GROUP_RESIZE_SENSITIVITY;
    let mut r = bounds.rect();

    match handle {
        HandleType::TopLeft | HandleType::StartPoint => {
            (r.x, r.width) = drag_leading_edge_min(r.x, r.width, dx, MIN_GROUP_SIZE);
            (r.y, r.height) = drag_leading_edge_min(r.y, r.height, dy, MIN_GROUP_SIZE);
        }
        HandleType::TopRight => {
            r.width = drag_trailing_edge_min(r.width, dx, MIN_GROUP_SIZE);
            (r.y, r.height) = drag_leading_edge_min(r.y, r.height, dy, MIN_GROUP_SIZE);
        }
        HandleType::BottomRight | HandleType::EndPoint => {
            r.width = drag_trailing_edge_min(r.width, dx, MIN_GROUP_SIZE);
            r.height = drag_trailing_edge_min(r.height, dy, MIN_GROUP_SIZE);
        }
        HandleType::BottomLeft => {
            (r.x, r.width) = drag_leading_edge_min(r.x, r.width, dx, MIN_GROUP_SIZE);
            r.height = drag_trailing_edge_min(r.height, dy, MIN_GROUP_SIZE);
        }
        HandleType::Rotation => return *bounds,
    }
    BoundingBox::from_rect(r)
}

/// Scale every member proportionally from `original` bounds into `new` bounds.
///
/// Each element keeps its position and size as fractions of the group box.
/// An axis on which `original` has zero extent can't be scaled; members keep
/// their offset and size along it.
#[must_use]
pub fn apply_group_resize(elements: &[&Element], original: &BoundingBox, new: &BoundingBox) -> Vec<ElementUpdate> {
    elements
        .iter()
        .map(|el| {
            let (x, width) = map_axis(el.x, el.width, original.x, original.width, new.x, new.width);
            let (y, height) = map_axis(el.y, el.height, original.y, original.height, new.y, new.height);
            ElementUpdate {
                id: el.id.clone(),
                fields: PartialElement {
                    x: Some(x),
                    y: Some(y),
                    width: Some(width),
                    height: Some(height),
                    ..Default::default()
                },
            }
        })
        .collect()
}

/// Rotate every member about `pivot` by `delta` radians.
///
/// Each element's center orbits the pivot, its top-left is recomputed from
/// the new center, and `delta` is added to its own angle.
#[must_use]
pub fn apply_group_rotation(elements: &[&Element], pivot: Point, delta: f64) -> Vec<ElementUpdate> {
    elements
        .iter()
        .map(|el| {
            let center = el.center().rotate_about(pivot, delta);
            ElementUpdate {
                id: el.id.clone(),
                fields: PartialElement {
                    x: Some(center.x - el.width / 2.0),
                    y: Some(center.y - el.height / 2.0),
                    angle: Some(el.angle + delta),
                    ..Default::default()
                },
            }
        })
        .collect()
}

/// Selected elements plus every element sharing a group with one of them.
///
/// Locked elements are dropped. Output keeps the order of `elements`.
#[must_use]
pub fn expand_to_groups<'a, I>(selected: &[ElementId], elements: I) -> Vec<&'a Element>
where
    I: IntoIterator<Item = &'a Element>,
    I::IntoIter: Clone,
{
    let elements = elements.into_iter();
    let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let groups: HashSet<&str> = elements
        .clone()
        .filter(|el| selected.contains(el.id.as_str()))
        .filter_map(|el| el.group_id.as_deref())
        .collect();
    elements
        .filter(|el| !el.locked)
        .filter(|el| {
            selected.contains(el.id.as_str()) || el.group_id.as_deref().is_some_and(|g| groups.contains(g))
        })
        .collect()
}

/// Map one axis of an element from the `(from_origin, from_extent)` span onto
/// `(to_origin, to_extent)`.
fn map_axis(
    origin: f64,
    extent: f64,
    from_origin: f64,
    from_extent: f64,
    to_origin: f64,
    to_extent: f64,
) -> (f64, f64) {
    if from_extent == 0.0 {
        return (to_origin + (origin - from_origin), extent);
    }
    let rel_pos = (origin - from_origin) / from_extent;
    let rel_size = extent / from_extent;
    (to_origin + rel_pos * to_extent, rel_size * to_extent)
}
