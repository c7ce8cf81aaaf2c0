//! Shared numeric constants for the sketchboard core.

// ── Math ────────────────────────────────────────────────────────

/// π / 12 (15°), the angular step that rotation snaps to.
pub const ROTATION_SNAP_STEP: f64 = std::f64::consts::PI / 12.0;

// ── Single-element handles ──────────────────────────────────────

/// Side length of a resize/rotation handle box, in world units.
pub const HANDLE_SIZE: f64 = 8.0;

/// Extra slop around a handle box when hit-testing, in world units.
pub const HANDLE_TOLERANCE: f64 = 2.0;

/// Distance above the top edge at which the rotation handle sits.
pub const ROTATION_HANDLE_OFFSET: f64 = 20.0;

/// Smallest width/height a single element can be resized to.
pub const MIN_ELEMENT_SIZE: f64 = 10.0;

// ── Multi-selection ─────────────────────────────────────────────

/// Side length of a group handle, in world units.
pub const GROUP_HANDLE_SIZE: f64 = 8.0;

/// Slop beyond the group handle radius when hit-testing.
pub const GROUP_HANDLE_TOLERANCE: f64 = 3.0;

/// Distance above the group bounds at which the group rotation handle sits.
pub const GROUP_ROTATION_HANDLE_OFFSET: f64 = 30.0;

/// Smallest width/height the group bounds can be resized to.
pub const MIN_GROUP_SIZE: f64 = 20.0;

/// Damping applied to pointer deltas while resizing a group.
pub const GROUP_RESIZE_SENSITIVITY: f64 = 0.7;

// ── Hit-testing ─────────────────────────────────────────────────

/// Minimum distance from a freehand stroke that still counts as a hit.
pub const PEN_HIT_MIN_DISTANCE: f64 = 8.0;

/// Stroke width assumed when an element's props don't carry one.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

// ── Grid ────────────────────────────────────────────────────────

/// Screen-space grid spacing at or below which the grid is drawn "dense".
pub const GRID_DENSE_THRESHOLD_PX: f64 = 10.0;

/// Screen-space grid spacing below which the grid is not drawn at all.
pub const GRID_MIN_VISIBLE_PX: f64 = 4.0;

// ── Spatial index ───────────────────────────────────────────────

/// Half-extent of the default index bounds around the world origin.
pub const DEFAULT_INDEX_EXTENT: f64 = 10_000.0;

/// Leaf capacity before a quad-tree node subdivides.
pub const DEFAULT_MAX_ELEMENTS: usize = 10;

/// Depth past which quad-tree nodes stop subdividing.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Hard ceiling on quad-tree depth; deeper configs are clamped to this.
pub const MAX_INDEX_DEPTH: usize = 32;
