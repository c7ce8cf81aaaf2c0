//! Board configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use crate::camera::Rect;
use crate::consts::MAX_INDEX_DEPTH;
use crate::grid::GridSettings;
use crate::spatial::IndexConfig;

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Variable is set but is not a number.
    #[error("{var}: expected a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// Variable is set but is not a boolean flag.
    #[error("{var}: expected true/false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },

    /// Variable parsed but is outside its allowed range.
    #[error("{var}: {value} is out of range")]
    OutOfRange { var: &'static str, value: String },

    /// Persisted grid settings are not valid JSON.
    #[error("invalid grid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a board needs at startup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardConfig {
    pub grid: GridSettings,
    pub index: IndexConfig,
}

impl BoardConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SKETCH_GRID_SIZE`: grid spacing, default 20; `0` disables the grid
    /// - `SKETCH_GRID_SNAP_DISTANCE`: magnetic snap radius, default 10
    /// - `SKETCH_GRID_SNAP`: `true` (default) or `false`
    /// - `SKETCH_INDEX_MAX_ELEMENTS`: leaf capacity, default 10
    /// - `SKETCH_INDEX_MAX_DEPTH`: default 8, at most 32
    /// - `SKETCH_INDEX_EXTENT`: half-width of the indexed square around the origin, default 10000
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first variable that is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`BoardConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut grid = GridSettings::default();
        let mut index = IndexConfig::default();

        if let Some(size) = parse_var::<f64>(&lookup, "SKETCH_GRID_SIZE")? {
            grid.size = non_negative("SKETCH_GRID_SIZE", size)?;
            grid.enabled = grid.size > 0.0;
        }
        if let Some(distance) = parse_var::<f64>(&lookup, "SKETCH_GRID_SNAP_DISTANCE")? {
            grid.snap_distance = non_negative("SKETCH_GRID_SNAP_DISTANCE", distance)?;
        }
        if let Some(raw) = lookup("SKETCH_GRID_SNAP") {
            grid.snap_to_grid = parse_flag("SKETCH_GRID_SNAP", &raw)?;
        }
        if let Some(max) = parse_var::<usize>(&lookup, "SKETCH_INDEX_MAX_ELEMENTS")? {
            if max == 0 {
                return Err(ConfigError::OutOfRange { var: "SKETCH_INDEX_MAX_ELEMENTS", value: max.to_string() });
            }
            index.max_elements = max;
        }
        if let Some(depth) = parse_var::<usize>(&lookup, "SKETCH_INDEX_MAX_DEPTH")? {
            if depth > MAX_INDEX_DEPTH {
                return Err(ConfigError::OutOfRange { var: "SKETCH_INDEX_MAX_DEPTH", value: depth.to_string() });
            }
            index.max_depth = depth;
        }
        if let Some(extent) = parse_var::<f64>(&lookup, "SKETCH_INDEX_EXTENT")? {
            if !(extent.is_finite() && extent > 0.0) {
                return Err(ConfigError::OutOfRange { var: "SKETCH_INDEX_EXTENT", value: extent.to_string() });
            }
            index.bounds = Rect::new(-extent, -extent, 2.0 * extent, 2.0 * extent);
        }

        Ok(Self { grid, index })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        // Pass it through so parsing reports the bad value instead of ignoring it.
        Err(std::env::VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value: raw.to_owned() }),
    }
}

fn non_negative(var: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange { var, value: value.to_string() })
    }
}
