//! Shared numeric constants for the floor-plan core.

// ── Geometry ────────────────────────────────────────────────────

/// Tolerance for treating two coordinates as equal (axis-aligned edge tests).
pub const GEOM_EPSILON: f64 = 1e-9;

// ── Snapping ────────────────────────────────────────────────────

/// Default rounding step for drag and edge-resize, in scene units.
pub const DEFAULT_SNAP_STEP: f64 = 5.0;

/// Default grid step used by keyboard nudges, in scene units.
pub const DEFAULT_GRID_STEP: f64 = 10.0;

// ── Size limits ─────────────────────────────────────────────────

/// A room or furniture bounding box must stay wider than this.
pub const DEFAULT_MIN_WIDTH: f64 = 50.0;

/// A room or furniture bounding box must stay taller than this.
pub const DEFAULT_MIN_HEIGHT: f64 = 50.0;

// ── Walls ───────────────────────────────────────────────────────

/// How far the pointer may stray from a wall while sliding a door along it.
pub const DEFAULT_DOOR_DRAG_REACH: f64 = 50.0;

/// New doors and windows are centred on their wall.
pub const DEFAULT_POSITION_ON_WALL: f64 = 0.5;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of snapshots kept in the undo history.
pub const DEFAULT_HISTORY_DEPTH: usize = 10;

/// Idle time after the last field change before the edit is committed.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

// ── Units ───────────────────────────────────────────────────────

/// Centimetres represented by one scene unit.
pub const DEFAULT_CM_PER_UNIT: f64 = 1.0;

// ── Styling ─────────────────────────────────────────────────────

/// Border colour given to new objects.
pub const DEFAULT_BORDER_COLOR: &str = "#000000";

/// Label colour given to new objects.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

// ── Hit-testing ─────────────────────────────────────────────────

/// Distance within which a pointer grabs an edge of the selected object.
pub const EDGE_GRAB_RADIUS: f64 = 6.0;
