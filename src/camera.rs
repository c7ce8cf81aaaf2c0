//! Geometry primitives and the pan/zoom camera.
//!
//! World space is where element geometry lives; screen space is what the
//! viewport shows. The camera's `pan` is the world-space point that maps to
//! the screen origin, so `screen = (world - pan) * zoom`.
//!
//! Nothing here rejects non-finite input. NaN and infinities propagate through
//! the arithmetic unchanged, and a zero zoom yields infinite world coordinates.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Rotate this point about `center` by `angle` radians (clockwise on a y-down canvas).
    #[must_use]
    pub fn rotate_about(self, center: Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle with a top-left origin.
///
/// Width and height may be negative while a drag is being constructed; use
/// [`Rect::normalized`] before comparing extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Same rectangle with non-negative width and height.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 { (self.x + self.width, -self.width) } else { (self.x, self.width) };
        let (y, height) = if self.height < 0.0 { (self.y + self.height, -self.height) } else { (self.y, self.height) };
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test; see [`is_point_in_rect`].
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        is_point_in_rect(p, self)
    }

    /// Whether `other` lies entirely within this rectangle (edges inclusive).
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        b.x >= a.x && b.y >= a.y && b.right() <= a.right() && b.bottom() <= a.bottom()
    }

    /// Whether the two rectangles overlap. Touching edges count as overlap, so
    /// a zero-size rectangle on a boundary intersects both sides of it.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.x <= b.right() && b.x <= a.right() && a.y <= b.bottom() && b.y <= a.bottom()
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let a = self.normalized();
        let b = other.normalized();
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        let max_x = a.right().max(b.right());
        let max_y = a.bottom().max(b.bottom());
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// The four corners, clockwise from top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Whether `p` lies inside `rect`, inclusive on all four edges.
#[must_use]
pub fn is_point_in_rect(p: Point, rect: &Rect) -> bool {
    p.x >= rect.x && p.x <= rect.x + rect.width && p.y >= rect.y && p.y <= rect.y + rect.height
}

/// World to screen: `(p - pan) * zoom`.
#[must_use]
pub fn transform_point(p: Point, zoom: f64, pan: Point) -> Point {
    Point::new((p.x - pan.x) * zoom, (p.y - pan.y) * zoom)
}

/// Screen to world: `p / zoom + pan`.
#[must_use]
pub fn inverse_transform_point(p: Point, zoom: f64, pan: Point) -> Point {
    Point::new(p.x / zoom + pan.x, p.y / zoom + pan.y)
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan` is the world-space point shown at the screen origin.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan: Point,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan: Point::default(), zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        inverse_transform_point(screen, self.zoom, self.pan)
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        transform_point(world, self.zoom, self.pan)
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// The world-space rectangle covered by a viewport of the given screen size.
    #[must_use]
    pub fn visible_world_rect(&self, viewport_width: f64, viewport_height: f64) -> Rect {
        let top_left = self.screen_to_world(Point::new(0.0, 0.0));
        Rect::new(top_left.x, top_left.y, viewport_width / self.zoom, viewport_height / self.zoom)
    }
}
