//! Document model: drawable elements, sparse updates, and the in-memory store.
//!
//! This module defines what is on the canvas (`Element`, `ElementKind`), a
//! sparse-update type that every transform engine returns instead of mutating
//! its input (`PartialElement`), a typed accessor for the open-ended `props`
//! JSON bag (`Props`), and a store that owns live elements (`ElementStore`).
//!
//! Element records arrive from the persistence layer as camelCase JSON. The
//! core reads and derives geometry from them; only the caller applies updates.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Rect};
use crate::consts::DEFAULT_STROKE_WIDTH;

/// Opaque, stable identifier for an element.
pub type ElementId = String;

/// The kind of a drawable element. Drives handle layout and hit-test rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Axis-aligned rectangle.
    Rectangle,
    /// Ellipse inscribed within the bounding box.
    Circle,
    /// Straight segment from `(x, y)` to `(x + width, y + height)`.
    Line,
    /// Line with an arrowhead at the end point.
    Arrow,
    /// Text block occupying its bounding box.
    Text,
    /// Freehand stroke described by `points`.
    Pen,
    /// Raster image occupying its bounding box.
    Image,
    /// Rhombus with vertices at the bounding-box edge midpoints.
    Diamond,
}

impl ElementKind {
    /// Whether this kind is manipulated by its two endpoints rather than four corners.
    #[must_use]
    pub fn is_linear(self) -> bool {
        matches!(self, Self::Line | Self::Arrow)
    }
}

/// A drawable element as stored in the document and by the persistence layer.
///
/// `x`, `y`, `width`, `height` describe the box in the element's unrotated
/// frame; `angle` (radians, cumulative) is applied about the box center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Shape discriminator.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Left edge of the unrotated box in world coordinates.
    pub x: f64,
    /// Top edge of the unrotated box in world coordinates.
    pub y: f64,
    /// Width of the unrotated box.
    pub width: f64,
    /// Height of the unrotated box.
    pub height: f64,
    /// Rotation in radians about the box center. Not range-limited.
    #[serde(default)]
    pub angle: f64,
    /// Stroke samples relative to `(x, y)`. Entries may be missing in
    /// malformed records; consumers skip them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Option<Point>>>,
    /// Locked elements are invisible to hit-testing and group operations.
    #[serde(default)]
    pub locked: bool,
    /// Stacking order; higher values are in front.
    #[serde(default)]
    pub z_index: i64,
    /// Elements sharing a group id transform together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Open-ended styling properties (stroke, fill, text, ...).
    #[serde(default)]
    pub props: serde_json::Value,
}

impl Element {
    /// Create an element with a fresh id at the given box.
    #[must_use]
    pub fn new(kind: ElementKind, rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            angle: 0.0,
            points: None,
            locked: false,
            z_index: 0,
            group_id: None,
            props: serde_json::Value::Null,
        }
    }

    /// The unrotated box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Center of the box; the pivot for the element's own rotation.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// World-space corners after applying `angle`, clockwise from top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let corners = self.bounds().corners();
        if self.angle == 0.0 {
            return corners;
        }
        let center = self.center();
        corners.map(|c| c.rotate_about(center, self.angle))
    }

    /// Axis-aligned box enclosing the rotated footprint.
    #[must_use]
    pub fn world_bounds(&self) -> Rect {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Stroke samples that are present and finite, in element-local offsets.
    pub fn valid_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .flatten()
            .copied()
            .flatten()
            .filter(|p| p.is_finite())
    }

    /// Typed view over `props`.
    #[must_use]
    pub fn props(&self) -> Props<'_> {
        Props::new(&self.props)
    }

    /// Merge a partial update into this element. Absent fields are untouched.
    pub fn apply(&mut self, partial: &PartialElement) {
        if let Some(x) = partial.x {
            self.x = x;
        }
        if let Some(y) = partial.y {
            self.y = y;
        }
        if let Some(w) = partial.width {
            self.width = w;
        }
        if let Some(h) = partial.height {
            self.height = h;
        }
        if let Some(a) = partial.angle {
            self.angle = a;
        }
        if let Some(z) = partial.z_index {
            self.z_index = z;
        }
        if let Some(locked) = partial.locked {
            self.locked = locked;
        }
    }
}

/// Sparse update for an element. Only present fields are applied; an absent
/// field means "unchanged", never "cleared".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl PartialElement {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A partial update addressed to a specific element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementUpdate {
    pub id: ElementId,
    pub fields: PartialElement,
}

/// Typed access to common fields of an element's `props` JSON value.
pub struct Props<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Props<'a> {
    /// Wrap a reference to a `props` JSON value for typed access.
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Stroke width in world units. Defaults to [`DEFAULT_STROKE_WIDTH`] when
    /// absent or not a positive finite number.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.value
            .get("strokeWidth")
            .and_then(serde_json::Value::as_f64)
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(DEFAULT_STROKE_WIDTH)
    }

    /// Stroke color as a CSS color string. Defaults to `"#1e1e1e"`.
    #[must_use]
    pub fn stroke(&self) -> &str {
        self.value
            .get("stroke")
            .and_then(|v| v.as_str())
            .unwrap_or("#1e1e1e")
    }

    /// Fill color as a CSS color string. Defaults to `"transparent"`.
    #[must_use]
    pub fn fill(&self) -> &str {
        self.value
            .get("fill")
            .and_then(|v| v.as_str())
            .unwrap_or("transparent")
    }

    /// Text content. Empty string when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.value
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }
}

/// In-memory store of elements keyed by id.
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element.
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Apply a partial update to an existing element. Returns false if the id is unknown.
    pub fn apply_partial(&mut self, id: &str, partial: &PartialElement) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        element.apply(partial);
        true
    }

    /// Replace all elements with a full snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.elements.clear();
        for element in elements {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// All elements sorted by `(z_index, id)`, back to front.
    #[must_use]
    pub fn sorted_elements(&self) -> Vec<&Element> {
        let mut elements: Vec<&Element> = self.elements.values().collect();
        elements.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
