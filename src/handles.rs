//! Resize and rotation handles for single elements.
//!
//! Handles live in the element's unrotated frame, and so do resize deltas.
//! Dragging a handle changes only the box fields that handle owns, whatever
//! the element's `angle`. The selection overlay may draw handles rotated, but
//! the math here never looks at `angle`.

#[cfg(test)]
#[path = "handles_test.rs"]
mod handles_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect};
use crate::consts::{HANDLE_SIZE, HANDLE_TOLERANCE, MIN_ELEMENT_SIZE, ROTATION_HANDLE_OFFSET};
use crate::doc::{Element, PartialElement};

/// Which handle is being pointed at or dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleType {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// First endpoint of a line/arrow, at `(x, y)`.
    StartPoint,
    /// Second endpoint of a line/arrow, at `(x + width, y + height)`.
    EndPoint,
    Rotation,
}

/// A handle hotspot. `(x, y)` is the handle's center; `size` its side length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeHandle {
    #[serde(rename = "type")]
    pub kind: HandleType,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl ResizeHandle {
    #[must_use]
    pub fn new(kind: HandleType, x: f64, y: f64, size: f64) -> Self {
        Self { kind, x, y, size }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether `p` falls inside the handle box grown by `tolerance` on every side.
    #[must_use]
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        let half = self.size / 2.0 + tolerance;
        (p.x - self.x).abs() <= half && (p.y - self.y).abs() <= half
    }
}

/// Handles for an element: four corners for box-like kinds or two endpoints
/// for lines and arrows, followed by the rotation handle.
#[must_use]
pub fn resize_handles(element: &Element) -> Vec<ResizeHandle> {
    let b = element.bounds();
    let mut handles = if element.kind.is_linear() {
        vec![
            ResizeHandle::new(HandleType::StartPoint, b.x, b.y, HANDLE_SIZE),
            ResizeHandle::new(HandleType::EndPoint, b.right(), b.bottom(), HANDLE_SIZE),
        ]
    } else {
        vec![
            ResizeHandle::new(HandleType::TopLeft, b.x, b.y, HANDLE_SIZE),
            ResizeHandle::new(HandleType::TopRight, b.right(), b.y, HANDLE_SIZE),
            ResizeHandle::new(HandleType::BottomLeft, b.x, b.bottom(), HANDLE_SIZE),
            ResizeHandle::new(HandleType::BottomRight, b.right(), b.bottom(), HANDLE_SIZE),
        ]
    };
    handles.push(rotation_handle(&b));
    handles
}

/// The first handle (in [`resize_handles`] order) whose box, grown by
/// [`HANDLE_TOLERANCE`], contains `point`.
#[must_use]
pub fn find_resize_handle(point: Point, element: &Element) -> Option<HandleType> {
    resize_handles(element)
        .into_iter()
        .find(|h| h.contains(point, HANDLE_TOLERANCE))
        .map(|h| h.kind)
}

/// Compute the box update for dragging `handle` from `start` to `current`.
///
/// The delta is taken against `original` when given (the box at drag start),
/// so repeated calls during one drag don't compound. `snap`, if given, is
/// applied to `current` before the delta is computed. Width and height are
/// clamped to [`MIN_ELEMENT_SIZE`]; when a clamp hits a handle that moves the
/// origin, the origin is recomputed so the opposite edge stays put.
///
/// Only fields the handle owns are returned. The rotation handle yields an
/// empty update.
#[must_use]
pub fn apply_resize(
    element: &Element,
    handle: HandleType,
    current: Point,
    start: Point,
    original: Option<Rect>,
    snap: Option<&dyn Fn(Point) -> Point>,
) -> PartialElement {
    let base = original.unwrap_or_else(|| element.bounds());
    let target = snap.map_or(current, |f| f(current));
    let dx = target.x - start.x;
    let dy = target.y - start.y;

    match handle {
        HandleType::TopLeft | HandleType::StartPoint => {
            let (x, width) = drag_leading_edge(base.x, base.width, dx);
            let (y, height) = drag_leading_edge(base.y, base.height, dy);
            PartialElement { x: Some(x), y: Some(y), width: Some(width), height: Some(height), ..Default::default() }
        }
        HandleType::TopRight => {
            let (y, height) = drag_leading_edge(base.y, base.height, dy);
            PartialElement {
                y: Some(y),
                width: Some(drag_trailing_edge(base.width, dx)),
                height: Some(height),
                ..Default::default()
            }
        }
        HandleType::BottomRight | HandleType::EndPoint => PartialElement {
            width: Some(drag_trailing_edge(base.width, dx)),
            height: Some(drag_trailing_edge(base.height, dy)),
            ..Default::default()
        },
        HandleType::BottomLeft => {
            let (x, width) = drag_leading_edge(base.x, base.width, dx);
            PartialElement {
                x: Some(x),
                width: Some(width),
                height: Some(drag_trailing_edge(base.height, dy)),
                ..Default::default()
            }
        }
        HandleType::Rotation => PartialElement::default(),
    }
}

/// CSS cursor for hovering or dragging a handle.
#[must_use]
pub fn resize_cursor(handle: HandleType) -> &'static str {
    match handle {
        HandleType::TopLeft | HandleType::BottomRight => "nw-resize",
        HandleType::TopRight | HandleType::BottomLeft => "ne-resize",
        HandleType::Rotation => "grab",
        HandleType::StartPoint | HandleType::EndPoint => "move",
    }
}

/// Rotation handle centered above the top edge of `bounds`.
pub(crate) fn rotation_handle(bounds: &Rect) -> ResizeHandle {
    let b = bounds.normalized();
    ResizeHandle::new(HandleType::Rotation, b.x + b.width / 2.0, b.y - ROTATION_HANDLE_OFFSET, HANDLE_SIZE)
}

/// Move the leading (left/top) edge by `delta`; returns the new `(origin, extent)`.
///
/// Clamping keeps the trailing edge at `origin + extent`.
pub(crate) fn drag_leading_edge(origin: f64, extent: f64, delta: f64) -> (f64, f64) {
    drag_leading_edge_min(origin, extent, delta, MIN_ELEMENT_SIZE)
}

pub(crate) fn drag_leading_edge_min(origin: f64, extent: f64, delta: f64, min: f64) -> (f64, f64) {
    let resized = extent - delta;
    if resized < min {
        (origin + extent - min, min)
    } else {
        (origin + delta, resized)
    }
}

/// Move the trailing (right/bottom) edge by `delta`; returns the new extent.
pub(crate) fn drag_trailing_edge(extent: f64, delta: f64) -> f64 {
    drag_trailing_edge_min(extent, delta, MIN_ELEMENT_SIZE)
}

pub(crate) fn drag_trailing_edge_min(extent: f64, delta: f64, min: f64) -> f64 {
    let resized = extent + delta;
    if resized < min { min } else { resized }
}
