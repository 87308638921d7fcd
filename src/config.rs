//! Editor configuration: snapping, size limits, history depth and units.
//!
//! Defaults live in [`crate::consts`]. `from_env` lets a host override any of
//! them through `FLOORPLAN_*` environment variables; unparsable values fall
//! back to the default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::consts::{
    DEFAULT_CM_PER_UNIT, DEFAULT_DEBOUNCE_MS, DEFAULT_DOOR_DRAG_REACH, DEFAULT_GRID_STEP, DEFAULT_HISTORY_DEPTH,
    DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, DEFAULT_SNAP_STEP,
};
use crate::units::UnitScale;

/// Tuning knobs for the geometry engines and the history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Drag and edge-resize coordinates round to multiples of this.
    pub snap_step: f64,
    /// Keyboard nudge distance.
    pub grid_step: f64,
    /// Rooms and furniture must stay strictly wider than this.
    pub min_width: f64,
    /// Rooms and furniture must stay strictly taller than this.
    pub min_height: f64,
    /// How far a dragged door may stray from its room's walls.
    pub door_drag_reach: f64,
    /// Maximum number of history snapshots.
    pub history_depth: usize,
    /// Idle time that ends a debounced field edit.
    pub debounce: Duration,
    pub units: UnitScale,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_step: DEFAULT_SNAP_STEP,
            grid_step: DEFAULT_GRID_STEP,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            door_drag_reach: DEFAULT_DOOR_DRAG_REACH,
            history_depth: DEFAULT_HISTORY_DEPTH,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            units: UnitScale::default(),
        }
    }
}

impl EditorConfig {
    /// Defaults overridden by `FLOORPLAN_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            snap_step: env_parse("FLOORPLAN_SNAP_STEP", DEFAULT_SNAP_STEP),
            grid_step: env_parse("FLOORPLAN_GRID_STEP", DEFAULT_GRID_STEP),
            min_width: env_parse("FLOORPLAN_MIN_WIDTH", DEFAULT_MIN_WIDTH),
            min_height: env_parse("FLOORPLAN_MIN_HEIGHT", DEFAULT_MIN_HEIGHT),
            door_drag_reach: env_parse("FLOORPLAN_DOOR_DRAG_REACH", DEFAULT_DOOR_DRAG_REACH),
            history_depth: env_parse("FLOORPLAN_HISTORY_DEPTH", DEFAULT_HISTORY_DEPTH),
            debounce: Duration::from_millis(env_parse("FLOORPLAN_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)),
            units: UnitScale::new(env_parse("FLOORPLAN_CM_PER_UNIT", DEFAULT_CM_PER_UNIT)),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
