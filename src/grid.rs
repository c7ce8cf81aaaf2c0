//! Grid snapping and grid-line enumeration.
//!
//! `GridSettings` is plain configuration that the persistence layer stores as
//! camelCase JSON. A non-positive or non-finite `size` is treated as "grid
//! disabled" by every computation here, so nothing divides by zero.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect, distance};
use crate::config::ConfigError;
use crate::consts::{GRID_DENSE_THRESHOLD_PX, GRID_MIN_VISIBLE_PX};

/// Upper bound on enumerated grid intersections for a single area.
const MAX_GRID_POINTS: usize = 250_000;

/// Grid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    /// Master switch for all grid behavior.
    pub enabled: bool,
    /// Spacing between grid lines in world units.
    pub size: f64,
    /// Whether pointer input is quantized to grid intersections.
    pub snap_to_grid: bool,
    /// Maximum distance at which the magnetic variant snaps.
    pub snap_distance: f64,
    /// Whether the renderer draws the grid.
    pub show_grid: bool,
    /// Grid line color as a CSS color string.
    pub color: String,
    /// Grid line opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 20.0,
            snap_to_grid: true,
            snap_distance: 10.0,
            show_grid: true,
            color: "#e5e5e5".to_owned(),
            opacity: 0.5,
        }
    }
}

impl GridSettings {
    /// Parse settings from persisted JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the input is not a valid settings object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Grid spacing if the grid is enabled and the spacing is usable.
    fn active_size(&self) -> Option<f64> {
        (self.enabled && self.size.is_finite() && self.size > 0.0).then_some(self.size)
    }

    /// Grid spacing if snapping is currently in effect.
    fn snap_size(&self) -> Option<f64> {
        self.active_size().filter(|_| self.snap_to_grid)
    }
}

/// Whether the grid renders dense (fine) or normal lines at the current zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridDensity {
    Dense,
    Normal,
}

/// Zoom-dependent rendering metrics for the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Spacing in world units.
    pub size: f64,
    /// Spacing in screen pixels.
    pub scaled_size: f64,
    pub density: GridDensity,
    /// False when lines would be closer than [`GRID_MIN_VISIBLE_PX`].
    pub visible: bool,
}

/// World-space coordinates of the grid lines crossing an area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// x coordinates of vertical lines.
    pub vertical: Vec<f64>,
    /// y coordinates of horizontal lines.
    pub horizontal: Vec<f64>,
}

/// Snap to the nearest grid intersection. Returns `p` unchanged when the grid
/// is disabled or snapping is off.
///
/// Rounding is half-away-from-zero (`f64::round`).
#[must_use]
pub fn snap_point_to_grid(p: Point, settings: &GridSettings) -> Point {
    match settings.snap_size() {
        Some(size) => snap_with(p, size),
        None => p,
    }
}

/// Magnetic variant: snaps only if the nearest intersection is within
/// `snap_distance` of `p`.
#[must_use]
pub fn snap_point_to_grid_with_distance(p: Point, settings: &GridSettings) -> Point {
    let Some(size) = settings.snap_size() else {
        return p;
    };
    let candidate = snap_with(p, size);
    if distance(p, candidate) <= settings.snap_distance {
        candidate
    } else {
        p
    }
}

/// Snap a rectangle's origin to the grid, keeping its size.
#[must_use]
pub fn snap_rect_to_grid(rect: Rect, settings: &GridSettings) -> Rect {
    let origin = snap_point_to_grid(Point::new(rect.x, rect.y), settings);
    Rect::new(origin.x, origin.y, rect.width, rect.height)
}

/// All grid intersections within the area expanded outward to whole cells.
///
/// Empty when the grid is disabled, the spacing is unusable, or the area is
/// so large (or non-finite) that enumeration would be unbounded.
#[must_use]
pub fn grid_points_in_area(area: &Rect, settings: &GridSettings) -> Vec<Point> {
    let Some(size) = settings.active_size() else {
        return Vec::new();
    };
    let area = area.normalized();
    let xs = line_positions(area.x, area.right(), size);
    let ys = line_positions(area.y, area.bottom(), size);
    if xs.len().saturating_mul(ys.len()) > MAX_GRID_POINTS {
        tracing::debug!(columns = xs.len(), rows = ys.len(), "grid area too large to enumerate");
        return Vec::new();
    }
    let mut points = Vec::with_capacity(xs.len() * ys.len());
    for &y in &ys {
        for &x in &xs {
            points.push(Point::new(x, y));
        }
    }
    points
}

/// Grid line coordinates covering `area`, for the renderer.
#[must_use]
pub fn visible_grid_lines(area: &Rect, settings: &GridSettings) -> GridLines {
    let Some(size) = settings.active_size() else {
        return GridLines::default();
    };
    let area = area.normalized();
    GridLines {
        vertical: line_positions(area.x, area.right(), size),
        horizontal: line_positions(area.y, area.bottom(), size),
    }
}

/// Rendering metrics for the grid at `zoom`.
#[must_use]
pub fn grid_metrics(settings: &GridSettings, zoom: f64) -> GridMetrics {
    let scaled_size = settings.size * zoom;
    let density = if scaled_size <= GRID_DENSE_THRESHOLD_PX { GridDensity::Dense } else { GridDensity::Normal };
    GridMetrics { size: settings.size, scaled_size, density, visible: scaled_size >= GRID_MIN_VISIBLE_PX }
}

fn snap_with(p: Point, size: f64) -> Point {
    Point::new((p.x / size).round() * size, (p.y / size).round() * size)
}

/// Multiples of `size` from `floor(min/size)` to `ceil(max/size)`, inclusive.
///
/// Positions are computed from an integer step count so they don't drift.
fn line_positions(min: f64, max: f64, size: f64) -> Vec<f64> {
    let first = (min / size).floor();
    let last = (max / size).ceil();
    let span = last - first;
    #[allow(clippy::cast_precision_loss)]
    let limit = MAX_GRID_POINTS as f64;
    if !span.is_finite() || span < 0.0 || span > limit {
        return Vec::new();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = span as usize;
    (0..=steps)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f64;
            (first + offset) * size
        })
        .collect()
}
