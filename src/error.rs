//! Rejected-operation taxonomy.
//!
//! None of these reach the user as errors. Engine functions return them so the
//! caller can log why a gesture frame was dropped; `EngineCore` turns every
//! rejection into a no-op that leaves the scene and history untouched.

use crate::doc::{ObjectId, ObjectKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// The edit would leave the bounding box at or below the minimum size.
    #[error("bounding box {width}x{height} is at or below the minimum size")]
    BelowMinimumSize { width: f64, height: f64 },
    /// Only horizontal and vertical edges can be dragged.
    #[error("edge {0} is neither horizontal nor vertical")]
    DiagonalEdge(usize),
    /// The object kind does not support this edit.
    #[error("{0:?} objects cannot be resized this way")]
    NotResizable(ObjectKind),
    /// No room wall could host the door or window.
    #[error("no wall available to attach to")]
    NoAttachmentTarget,
    /// The pointer is too far from every wall of the door's room.
    #[error("pointer is out of reach of the attached room's walls")]
    OutOfReach,
    /// Position and rotation of an attached door or window follow its wall.
    #[error("object is locked to its wall")]
    WallLocked,
    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),
    #[error("unknown edge {edge} on object {id}")]
    UnknownEdge { id: ObjectId, edge: usize },
    #[error("unknown {kind:?} preset: {name}")]
    UnknownPreset { kind: ObjectKind, name: String },
    /// A typed number is NaN or infinite.
    #[error("invalid value: {0}")]
    InvalidValue(f64),
    /// Nothing is selected for a command that needs a selection.
    #[error("nothing selected")]
    NoSelection,
    /// The operation would not change anything.
    #[error("no change")]
    Unchanged,
}
