//! Scripted replay of editor sessions.
//!
//! A script is a JSON array of steps. Objects are referred to by the order
//! in which steps created them (0 for the first successfully created
//! object), so a script never needs to know generated ids. Time is virtual:
//! field edits and polls carry a millisecond offset from the start of the
//! run.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::doc::{FloorObject, ObjectId};
use crate::engine::{Action, EngineCore};
use crate::geom::Point;
use crate::input::{Command, FieldEdit, Key, Modifiers};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {step} refers to object #{index}, but only {created} objects exist")]
    UnknownObjectIndex { step: usize, index: usize, created: usize },
}

/// One step of a replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    AddRoom { preset: String, x: f64, y: f64 },
    AddDoor { preset: String, x: f64, y: f64 },
    AddWindow { preset: String, x: f64, y: f64 },
    AddFurniture { preset: String, x: f64, y: f64 },
    /// Select an object, or clear the selection when `object` is absent.
    Select {
        #[serde(default)]
        object: Option<usize>,
    },
    /// Press on `object` at `from`, move through `path`, release.
    Drag {
        object: usize,
        from: Point,
        path: Vec<Point>,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Grab edge `edge` of `object`, move through `path`, release.
    ResizeEdge { object: usize, edge: usize, path: Vec<Point> },
    /// Type into an attribute field of the selection.
    Edit {
        edit: FieldEdit,
        #[serde(default)]
        at_ms: u64,
    },
    /// Leave the attribute field, committing pending edits.
    Blur,
    Poll { at_ms: u64 },
    Command { command: Command },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// Final state printed after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct SceneReport {
    pub objects: Vec<FloorObject>,
    pub selected: Option<ObjectId>,
    pub history: HistoryReport,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HistoryReport {
    pub cursor: Option<usize>,
    pub len: usize,
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns `Json` when the text is not a valid step array.
pub fn parse(json: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns `Io` when the file cannot be read and `Json` when it does not
/// parse.
pub fn load(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Drives an [`EngineCore`] from script steps.
pub struct ScriptRunner {
    engine: EngineCore,
    created: Vec<ObjectId>,
    epoch: Instant,
    steps_run: usize,
}

impl ScriptRunner {
    #[must_use]
    pub fn new(engine: EngineCore) -> Self {
        Self { engine, created: Vec::new(), epoch: Instant::now(), steps_run: 0 }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    /// Ids of created objects, indexed the way steps refer to them.
    #[must_use]
    pub fn created(&self) -> &[ObjectId] {
        &self.created
    }

    /// Run every step, then commit whatever gesture is still open.
    ///
    /// # Errors
    ///
    /// Stops at the first step that refers to an object index that was never
    /// created.
    pub fn run(&mut self, steps: &[ScriptStep]) -> Result<(), ScriptError> {
        for step in steps {
            self.step(step)?;
        }
        self.finish();
        Ok(())
    }

    /// Run one step and return the engine's actions.
    ///
    /// # Errors
    ///
    /// `UnknownObjectIndex` when the step names an object that does not exist.
    pub fn step(&mut self, step: &ScriptStep) -> Result<Vec<Action>, ScriptError> {
        let index = self.steps_run;
        self.steps_run += 1;
        debug!(index, ?step, "script step");

        let actions = match step {
            ScriptStep::AddRoom { preset, x, y } => self.engine.add_room(preset, *x, *y),
            ScriptStep::AddDoor { preset, x, y } => self.engine.add_door(preset, Point::new(*x, *y)),
            ScriptStep::AddWindow { preset, x, y } => self.engine.add_window(preset, *x, *y),
            ScriptStep::AddFurniture { preset, x, y } => self.engine.add_furniture(preset, *x, *y),
            ScriptStep::Select { object } => {
                let id = object.map(|i| self.resolve(index, i)).transpose()?;
                self.engine.select(id)
            }
            ScriptStep::Drag { object, from, path, modifiers } => {
                let id = self.resolve(index, *object)?;
                let mut actions = self.engine.begin_object_drag(id, *from);
                for p in path {
                    actions.extend(self.engine.on_pointer_move(*p, *modifiers));
                }
                actions.extend(self.engine.on_pointer_up());
                actions
            }
            ScriptStep::ResizeEdge { object, edge, path } => {
                let id = self.resolve(index, *object)?;
                let mut actions = self.engine.begin_edge_drag(id, *edge);
                for p in path {
                    actions.extend(self.engine.on_pointer_move(*p, Modifiers::default()));
                }
                actions.extend(self.engine.on_pointer_up());
                actions
            }
            ScriptStep::Edit { edit, at_ms } => {
                let now = self.at(*at_ms);
                self.engine.edit_field(edit.clone(), now)
            }
            ScriptStep::Blur => self.engine.end_field_edit(),
            ScriptStep::Poll { at_ms } => {
                let now = self.at(*at_ms);
                self.engine.poll(now)
            }
            ScriptStep::Command { command } => self.engine.on_command(*command),
            ScriptStep::Key { key, modifiers } => self.engine.on_key_down(&Key(key.clone()), *modifiers),
        };

        for action in &actions {
            if let Action::ObjectCreated(id) = action {
                if !self.created.contains(id) {
                    self.created.push(*id);
                }
            }
        }
        Ok(actions)
    }

    /// Commit any gesture or field edit left open by the last steps.
    pub fn finish(&mut self) {
        self.engine.on_pointer_up();
        self.engine.end_field_edit();
    }

    #[must_use]
    pub fn report(&self) -> SceneReport {
        let history = self.engine.history();
        SceneReport {
            objects: self.engine.objects().to_vec(),
            selected: self.engine.selection(),
            history: HistoryReport { cursor: history.cursor(), len: history.len() },
        }
    }

    fn resolve(&self, step: usize, index: usize) -> Result<ObjectId, ScriptError> {
        self.created
            .get(index)
            .copied()
            .ok_or(ScriptError::UnknownObjectIndex { step, index, created: self.created.len() })
    }

    fn at(&self, ms: u64) -> Instant {
        self.epoch + Duration::from_millis(ms)
    }
}
