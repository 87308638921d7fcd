use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::config::EditorConfig;
use crate::consts::GEOM_EPSILON;
use crate::doc::{Attachment, DoorSwing, FloorObject, ObjectId, ObjectKind, PartialFloorObject, Scene, find_object};
use crate::error::Rejection;
use crate::geom::{Point, snap_to_grid};
use crate::hit::{Hit, HitPart, hit_test};
use crate::history::{GestureController, History};
use crate::input::{Command, FieldEdit, InputState, Key, Modifiers};
use crate::preset::PresetCatalog;
use crate::resize::{classify_edge, resize_edge, scale_to_size};
use crate::wall::{fit_to_wall, place_on_nearest_wall, reflow_room, slide_along_wall};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
///
/// An empty list means the operation was rejected or changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ObjectCreated(ObjectId),
    ObjectUpdated(ObjectId),
    ObjectDeleted(ObjectId),
    SelectionChanged(Option<ObjectId>),
    /// A history entry was written or the cursor moved.
    HistoryChanged,
    RenderNeeded,
}

/// Attribute-panel view of one object, positions and sizes in metres
/// rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValues {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub border_color: String,
    pub text_color: String,
    pub swing: DoorSwing,
}

/// Core engine state: the scene, its history, and the pointer gesture in
/// progress. Everything a host needs to drive the editor without a screen.
pub struct EngineCore {
    pub config: EditorConfig,
    pub presets: PresetCatalog,
    pub input: InputState,
    controller: GestureController,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EditorConfig::default(), PresetCatalog::builtin())
    }
}

fn rejected(op: &'static str, err: &Rejection) -> Vec<Action> {
    debug!(op, %err, "operation rejected");
    Vec::new()
}

/// Created, updated and deleted ids between two object lists.
fn diff_actions(before: &[FloorObject], after: &[FloorObject]) -> Vec<Action> {
    let mut actions = Vec::new();
    for obj in after {
        match find_object(before, obj.id) {
            None => actions.push(Action::ObjectCreated(obj.id)),
            Some(old) if old != obj => actions.push(Action::ObjectUpdated(obj.id)),
            Some(_) => {}
        }
    }
    for obj in before {
        if find_object(after, obj.id).is_none() {
            actions.push(Action::ObjectDeleted(obj.id));
        }
    }
    actions
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EditorConfig, presets: PresetCatalog) -> Self {
        Self {
            controller: GestureController::new(config.history_depth, config.debounce),
            config,
            presets,
            input: InputState::Idle,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.controller.scene()
    }

    #[must_use]
    pub fn objects(&self) -> &[FloorObject] {
        self.controller.scene().objects()
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&FloorObject> {
        self.controller.scene().get(&id)
    }

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.controller.scene().selection()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        self.controller.history()
    }

    /// Whether a pointer or field gesture is collecting changes.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.controller.is_active()
    }

    /// Display values for the attribute panel.
    #[must_use]
    pub fn field_values(&self, id: ObjectId) -> Option<FieldValues> {
        let obj = self.object(id)?;
        let units = self.config.units;
        let (w, h) = obj.size();
        Some(FieldValues {
            name: obj.name.clone(),
            x: units.display_m(obj.x),
            y: units.display_m(obj.y),
            rotation: obj.rotation,
            width: units.display_m(w),
            height: units.display_m(h),
            color: obj.color.clone(),
            border_color: obj.border_color.clone(),
            text_color: obj.text_color.clone(),
            swing: obj.swing,
        })
    }

    // --- Scene plumbing ---

    /// Hand a new object list to the controller and describe the change.
    fn commit(&mut self, objects: Vec<FloorObject>) -> Vec<Action> {
        let mut actions = {
            let before = self.objects();
            if before == objects.as_slice() {
                return Vec::new();
            }
            diff_actions(before, &objects)
        };
        let selection = self.selection();
        let was_active = self.controller.is_active();
        self.controller.apply(objects);
        if !was_active {
            actions.push(Action::HistoryChanged);
        }
        if self.selection() != selection {
            actions.push(Action::SelectionChanged(self.selection()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The object list with `obj` replaced; rooms carry their doors along.
    fn placed(&self, obj: &FloorObject) -> Vec<FloorObject> {
        if obj.kind == ObjectKind::Room {
            reflow_room(self.objects(), obj)
        } else {
            self.scene().with_replaced(obj.clone())
        }
    }

    /// Refit a door or window to its wall after its footprint changed.
    /// Orphans are returned unchanged.
    fn refit_mounted(&self, obj: FloorObject) -> FloorObject {
        let Attachment::Attached { room_id, edge_index, position_on_wall } = obj.attachment else {
            return obj;
        };
        match self.object(room_id) {
            Some(room) => fit_to_wall(&obj, room, edge_index, position_on_wall).unwrap_or(obj),
            None => obj,
        }
    }

    fn selected(&self) -> Result<FloorObject, Rejection> {
        self.scene().selected_object().cloned().ok_or(Rejection::NoSelection)
    }

    fn require(&self, id: ObjectId) -> Result<FloorObject, Rejection> {
        self.object(id).cloned().ok_or(Rejection::UnknownObject(id))
    }

    // --- Creation ---

    pub fn add_room(&mut self, preset: &str, x: f64, y: f64) -> Vec<Action> {
        self.add_free(ObjectKind::Room, preset, x, y)
    }

    pub fn add_furniture(&mut self, preset: &str, x: f64, y: f64) -> Vec<Action> {
        self.add_free(ObjectKind::Furniture, preset, x, y)
    }

    /// Drop a door; it snaps to the nearest room wall.
    pub fn add_door(&mut self, preset: &str, drop: Point) -> Vec<Action> {
        self.add_mounted(ObjectKind::Door, preset, drop)
    }

    /// Drop a window; like doors, it snaps to the nearest room wall.
    pub fn add_window(&mut self, preset: &str, x: f64, y: f64) -> Vec<Action> {
        self.add_mounted(ObjectKind::Window, preset, Point::new(x, y))
    }

    fn instantiate(&self, kind: ObjectKind, preset: &str, x: f64, y: f64) -> Result<FloorObject, Rejection> {
        self.presets
            .get(kind, preset)
            .map(|p| p.instantiate(kind, x, y))
            .ok_or_else(|| Rejection::UnknownPreset { kind, name: preset.to_string() })
    }

    fn add_free(&mut self, kind: ObjectKind, preset: &str, x: f64, y: f64) -> Vec<Action> {
        match self.instantiate(kind, preset, x, y) {
            Ok(obj) => self.insert(obj),
            Err(err) => rejected("add", &err),
        }
    }

    fn add_mounted(&mut self, kind: ObjectKind, preset: &str, drop: Point) -> Vec<Action> {
        let placed = self
            .instantiate(kind, preset, drop.x, drop.y)
            .and_then(|obj| place_on_nearest_wall(self.objects(), &obj, drop));
        match placed {
            Ok(obj) => self.insert(obj),
            Err(err) => rejected("add", &err),
        }
    }

    fn insert(&mut self, obj: FloorObject) -> Vec<Action> {
        let id = obj.id;
        debug!(%id, kind = ?obj.kind, "object created");
        let objects = self.scene().with_added(obj);
        let mut actions = self.commit(objects);
        if self.controller.select(Some(id)) {
            actions.push(Action::SelectionChanged(Some(id)));
        }
        actions
    }

    // --- Selection ---

    /// Select an object, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<ObjectId>) -> Vec<Action> {
        if self.controller.select(id) {
            vec![Action::SelectionChanged(self.selection()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Pointer input ---

    /// Route a press: an edge of the selection starts an edge drag, a body
    /// starts an object drag, empty space clears the selection.
    pub fn on_pointer_down(&mut self, point: Point, _modifiers: Modifiers) -> Vec<Action> {
        match hit_test(point, self.scene()) {
            Some(Hit { object_id, part: HitPart::Edge(edge) }) => self.begin_edge_drag(object_id, edge),
            Some(Hit { object_id, part: HitPart::Body }) => self.begin_object_drag(object_id, point),
            None => self.select(None),
        }
    }

    /// Start moving `id` with the pointer at `point`.
    pub fn begin_object_drag(&mut self, id: ObjectId, point: Point) -> Vec<Action> {
        let obj = match self.require(id) {
            Ok(obj) => obj,
            Err(err) => return rejected("begin_object_drag", &err),
        };
        let origin = obj.origin();
        self.begin_pointer_gesture(InputState::DraggingObject { id, grab_offset: point.sub(origin), start_origin: origin })
    }

    /// Start dragging edge `edge` of `id`.
    pub fn begin_edge_drag(&mut self, id: ObjectId, edge: usize) -> Vec<Action> {
        let axis = self.require(id).and_then(|obj| {
            if obj.kind.is_wall_mounted() || obj.rotation.abs() > GEOM_EPSILON {
                return Err(Rejection::NotResizable(obj.kind));
            }
            if edge >= obj.edge_count() {
                return Err(Rejection::UnknownEdge { id, edge });
            }
            classify_edge(&obj.points, edge).ok_or(Rejection::DiagonalEdge(edge))
        });
        let axis = match axis {
            Ok(axis) => axis,
            Err(err) => return rejected("begin_edge_drag", &err),
        };
        self.begin_pointer_gesture(InputState::ResizingEdge { id, edge_index: edge, axis })
    }

    /// Enter a pointer gesture on its target. A pending field edit is
    /// committed as its own step first.
    fn begin_pointer_gesture(&mut self, input: InputState) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.controller.end_gesture() {
            actions.push(Action::HistoryChanged);
        }
        let target = input.target();
        self.input = input;
        self.controller.start_gesture();
        actions.extend(self.select(target));
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_pointer_move(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        let result = match self.input {
            InputState::Idle => return Vec::new(),
            InputState::DraggingObject { id, grab_offset, start_origin } => {
                self.drag_frame(id, point.sub(grab_offset), start_origin, modifiers)
            }
            InputState::ResizingEdge { id, edge_index, axis } => self
                .require(id)
                .and_then(|obj| resize_edge(&obj, edge_index, axis, point, &self.config))
                .map(|obj| self.placed(&obj)),
        };
        match result {
            Ok(objects) => self.commit(objects),
            Err(err) => rejected("pointer_move", &err),
        }
    }

    /// One frame of an object drag. `raw` is the unsnapped origin the
    /// pointer asks for.
    fn drag_frame(
        &self,
        id: ObjectId,
        raw: Point,
        start: Point,
        modifiers: Modifiers,
    ) -> Result<Vec<FloorObject>, Rejection> {
        let obj = self.require(id)?;

        if obj.kind.is_wall_mounted() && obj.is_attached() {
            let local_center = obj.rotation_center().sub(obj.origin());
            let target = raw.offset(local_center.x, local_center.y);
            match slide_along_wall(self.objects(), &obj, target, self.config.door_drag_reach) {
                Ok(slid) => return Ok(self.scene().with_replaced(slid)),
                Err(Rejection::UnknownObject(_)) => {
                    debug!(%id, "host room is gone; moving object freely");
                }
                Err(err) => return Err(err),
            }
        }

        let step = self.config.snap_step;
        let mut target = Point::new(snap_to_grid(raw.x, step), snap_to_grid(raw.y, step));
        if modifiers.shift {
            if (target.x - start.x).abs() < (target.y - start.y).abs() {
                target.x = start.x;
            } else {
                target.y = start.y;
            }
        }
        let moved = FloorObject { x: target.x, y: target.y, attachment: Attachment::Detached, ..obj };
        Ok(self.placed(&moved))
    }

    /// Finish the pointer gesture and commit it as one history step.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        self.input = InputState::Idle;
        if self.controller.end_gesture() {
            vec![Action::HistoryChanged]
        } else {
            Vec::new()
        }
    }

    /// The pointer left the canvas; a release may never arrive.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Attribute fields ---

    /// Apply a typed value to the selected object. Consecutive edits within
    /// the debounce interval form one history step.
    pub fn edit_field(&mut self, edit: FieldEdit, now: Instant) -> Vec<Action> {
        match self.field_objects(edit) {
            Ok(objects) => {
                self.controller.touch(now);
                self.commit(objects)
            }
            Err(err) => rejected("edit_field", &err),
        }
    }

    fn field_objects(&self, edit: FieldEdit) -> Result<Vec<FloorObject>, Rejection> {
        if let FieldEdit::X(v) | FieldEdit::Y(v) | FieldEdit::Rotation(v) | FieldEdit::Width(v) | FieldEdit::Height(v) =
            &edit
        {
            if !v.is_finite() {
                return Err(Rejection::InvalidValue(*v));
            }
        }
        let obj = self.selected()?;
        let units = self.config.units;
        let locked = obj.kind.is_wall_mounted() && obj.is_attached();
        let id = obj.id;
        let patch = |partial: PartialFloorObject| self.scene().patched(id, &partial).ok_or(Rejection::UnknownObject(id));

        match edit {
            FieldEdit::Name(name) => patch(PartialFloorObject { name: Some(name), ..Default::default() }),
            FieldEdit::Color(c) => patch(PartialFloorObject { color: Some(c), ..Default::default() }),
            FieldEdit::BorderColor(c) => patch(PartialFloorObject { border_color: Some(c), ..Default::default() }),
            FieldEdit::TextColor(c) => patch(PartialFloorObject { text_color: Some(c), ..Default::default() }),
            FieldEdit::Swing(s) => patch(PartialFloorObject { swing: Some(s), ..Default::default() }),
            FieldEdit::X(_) | FieldEdit::Y(_) | FieldEdit::Rotation(_) if locked => Err(Rejection::WallLocked),
            FieldEdit::X(m) => Ok(self.placed(&FloorObject { x: units.from_m(m), ..obj })),
            FieldEdit::Y(m) => Ok(self.placed(&FloorObject { y: units.from_m(m), ..obj })),
            FieldEdit::Rotation(deg) => Ok(self.placed(&FloorObject { rotation: deg, ..obj })),
            FieldEdit::Width(m) => {
                let (_, h) = obj.size();
                self.sized(&obj, units.from_m(m), h)
            }
            FieldEdit::Height(m) => {
                let (w, _) = obj.size();
                self.sized(&obj, w, units.from_m(m))
            }
        }
    }

    fn sized(&self, obj: &FloorObject, width: f64, height: f64) -> Result<Vec<FloorObject>, Rejection> {
        let scaled = scale_to_size(obj, width, height, &self.config)?;
        if scaled.kind.is_wall_mounted() {
            let refit = self.refit_mounted(scaled);
            Ok(self.scene().with_replaced(refit))
        } else {
            Ok(self.placed(&scaled))
        }
    }

    /// The field lost focus or a picker closed: commit pending edits now.
    pub fn end_field_edit(&mut self) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        if self.controller.end_gesture() {
            vec![Action::HistoryChanged]
        } else {
            Vec::new()
        }
    }

    /// Commit a debounced field edit whose quiet period has elapsed. A
    /// pointer gesture in progress is left alone; it ends on release.
    pub fn poll(&mut self, now: Instant) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        if self.controller.poll(now) {
            vec![Action::HistoryChanged]
        } else {
            Vec::new()
        }
    }

    // --- Keyboard and commands ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match Command::from_key(key, modifiers) {
            Some(cmd) => self.on_command(cmd),
            None => Vec::new(),
        }
    }

    pub fn on_command(&mut self, cmd: Command) -> Vec<Action> {
        match cmd {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::DeleteSelected => self.delete_selected(),
            Command::BringToFront => self.reorder(true),
            Command::SendToBack => self.reorder(false),
            Command::NudgeUp | Command::NudgeDown | Command::NudgeLeft | Command::NudgeRight => {
                let (dx, dy) = cmd.nudge_direction().unwrap_or((0.0, 0.0));
                self.nudge(dx * self.config.grid_step, dy * self.config.grid_step)
            }
        }
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.restore(true)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        self.restore(false)
    }

    fn restore(&mut self, back: bool) -> Vec<Action> {
        // A pointer gesture in flight is committed and abandoned.
        self.input = InputState::Idle;
        let before = self.objects().to_vec();
        let selection = self.selection();
        let moved = if back { self.controller.undo() } else { self.controller.redo() };
        if !moved {
            return Vec::new();
        }
        let mut actions = diff_actions(&before, self.objects());
        actions.push(Action::HistoryChanged);
        if self.selection() != selection {
            actions.push(Action::SelectionChanged(self.selection()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Delete the selected object. Deleting a room also deletes the doors
    /// and windows attached to it.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let obj = match self.selected() {
            Ok(obj) => obj,
            Err(err) => return rejected("delete_selected", &err),
        };
        let mut ids = vec![obj.id];
        ids.extend(self.scene().attached_to(obj.id).map(|o| o.id));
        let objects = self.scene().without(&ids);
        self.commit(objects)
    }

    /// Move the selection by `(dx, dy)`. Attached doors and windows stay on
    /// their wall.
    pub fn nudge(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        let result = self.selected().and_then(|obj| {
            if obj.kind.is_wall_mounted() && obj.is_attached() {
                return Err(Rejection::WallLocked);
            }
            Ok(self.placed(&obj.translated(dx, dy)))
        });
        match result {
            Ok(objects) => self.commit(objects),
            Err(err) => rejected("nudge", &err),
        }
    }

    pub fn bring_to_front(&mut self) -> Vec<Action> {
        self.reorder(true)
    }

    pub fn send_to_back(&mut self) -> Vec<Action> {
        self.reorder(false)
    }

    fn reorder(&mut self, to_front: bool) -> Vec<Action> {
        let result = self.selected().and_then(|obj| {
            let scene = self.scene();
            let objects = if to_front { scene.brought_to_front(obj.id) } else { scene.sent_to_back(obj.id) };
            objects.ok_or(Rejection::UnknownObject(obj.id))
        });
        match result {
            Ok(objects) => self.commit(objects),
            Err(err) => rejected("reorder", &err),
        }
    }
}
