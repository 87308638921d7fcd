//! Input model: modifier keys, logical commands, field edits, and the pointer
//! gesture state machine.
//!
//! The host translates raw events into these types before calling
//! [`crate::engine::EngineCore`]. `InputState` is the pointer gesture being
//! tracked between pointer-down and pointer-up, carrying the context needed
//! to compute each frame from the gesture's starting point rather than from
//! the previous frame.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::{DoorSwing, ObjectId};
use crate::geom::Point;
use crate::resize::EdgeAxis;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held. Locks drags to one axis.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g.
/// `"Delete"`, `"ArrowUp"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Editor commands reachable from the keyboard or a toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Undo,
    Redo,
    DeleteSelected,
    NudgeUp,
    NudgeDown,
    NudgeLeft,
    NudgeRight,
    BringToFront,
    SendToBack,
}

impl Command {
    /// Map a key press to a command, if it has one.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        let cmd = modifiers.command();
        match key.0.as_str() {
            "z" | "Z" if cmd && modifiers.shift => Some(Self::Redo),
            "z" | "Z" if cmd => Some(Self::Undo),
            "y" | "Y" if cmd => Some(Self::Redo),
            "]" if cmd => Some(Self::BringToFront),
            "[" if cmd => Some(Self::SendToBack),
            "Delete" | "Backspace" => Some(Self::DeleteSelected),
            "ArrowUp" => Some(Self::NudgeUp),
            "ArrowDown" => Some(Self::NudgeDown),
            "ArrowLeft" => Some(Self::NudgeLeft),
            "ArrowRight" => Some(Self::NudgeRight),
            _ => None,
        }
    }

    /// Unit direction for nudge commands.
    #[must_use]
    pub fn nudge_direction(self) -> Option<(f64, f64)> {
        match self {
            Self::NudgeUp => Some((0.0, -1.0)),
            Self::NudgeDown => Some((0.0, 1.0)),
            Self::NudgeLeft => Some((-1.0, 0.0)),
            Self::NudgeRight => Some((1.0, 0.0)),
            _ => None,
        }
    }
}

/// A change typed into the attribute panel.
///
/// Positions and sizes are in metres as shown to the user; the engine
/// converts them to scene units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    Name(String),
    X(f64),
    Y(f64),
    /// Degrees.
    Rotation(f64),
    Width(f64),
    Height(f64),
    Color(String),
    BorderColor(String),
    TextColor(String),
    Swing(DoorSwing),
}

/// Internal state for the pointer state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an object. Doors and windows slide along their wall.
    DraggingObject {
        id: ObjectId,
        /// Pointer minus object origin at pointer-down.
        grab_offset: Point,
        /// Object origin at pointer-down; the axis lock measures from here.
        start_origin: Point,
    },
    /// The user is dragging one edge of a room or piece of furniture.
    ResizingEdge {
        id: ObjectId,
        edge_index: usize,
        axis: EdgeAxis,
    },
}

impl InputState {
    /// The object the active gesture works on.
    #[must_use]
    pub fn target(&self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::DraggingObject { id, .. } | Self::ResizingEdge { id, .. } => Some(*id),
        }
    }
}
