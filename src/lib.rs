//! Scene geometry and constraint engine for a floor-plan editor.
//!
//! The crate owns the editing model behind a floor-plan canvas: rooms drawn
//! as polygons, doors and windows that stay attached to room walls, free
//! furniture, edge resizing of axis-aligned rooms, and gesture-batched
//! undo/redo. The host is responsible for drawing and for wiring raw input
//! events to [`engine::EngineCore`]; every handler returns
//! [`engine::Action`]s describing what changed.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] tying everything together |
//! | [`doc`] | Floor objects, attachment state and the in-memory [`doc::Scene`] |
//! | [`geom`] | Points, segments, bounding boxes, centroid and grid snapping |
//! | [`wall`] | Nearest-wall search and keeping doors and windows on their walls |
//! | [`resize`] | Edge resizing and attribute-panel size changes |
//! | [`history`] | Bounded snapshot history and the gesture controller |
//! | [`input`] | Modifier keys, keyboard commands, field edits and pointer state |
//! | [`hit`] | Hit-testing bodies and edge handles |
//! | [`preset`] | Built-in and JSON-loaded shape presets |
//! | [`units`] | Scene units to centimetres and metres |
//! | [`config`] | Editor tunables with environment overrides |
//! | [`script`] | JSON replay scripts driving the engine |
//! | [`error`] | Reasons an edit is rejected |
//! | [`consts`] | Shared numeric defaults (snap steps, minimum sizes, etc.) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod history;
pub mod input;
pub mod preset;
pub mod resize;
pub mod script;
pub mod units;
pub mod wall;
