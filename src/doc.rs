//! Document model: floor objects, their attachment state, and the scene store.
//!
//! This module defines what is on the plan (`FloorObject`, `ObjectKind`,
//! `Attachment`), a sparse-update type for attribute edits
//! (`PartialFloorObject`), and the runtime store that owns the ordered object
//! list plus the current selection (`Scene`).
//!
//! Objects are treated as value records. Every mutation produces a new object
//! list which the caller hands to [`Scene::replace_all`] in one step, so a
//! room and the doors glued to it always change together. The store performs
//! no validation; the wall and resize engines are responsible for invariants.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Bounds, Point, Segment, bounding_box};

/// Unique identifier for a floor object.
pub type ObjectId = Uuid;

/// The kind of a floor object. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A closed room outline whose edges are walls.
    Room,
    /// A door glued to a room wall.
    Door,
    /// A window glued to a room wall.
    Window,
    /// Free-standing furniture.
    Furniture,
}

impl ObjectKind {
    /// Whether objects of this kind ride on a room wall.
    #[must_use]
    pub fn is_wall_mounted(self) -> bool {
        matches!(self, Self::Door | Self::Window)
    }
}

/// How an object relates to a room wall.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Attachment {
    /// Free-floating.
    #[default]
    Detached,
    /// Glued to edge `edge_index` of room `room_id`.
    Attached {
        room_id: ObjectId,
        /// Wall runs from `points[edge_index]` to `points[(edge_index + 1) % n]`.
        edge_index: usize,
        /// Centre of the object along the wall, 0 = wall start, 1 = wall end.
        position_on_wall: f64,
    },
}

impl Attachment {
    /// The host room, if attached.
    #[must_use]
    pub fn room_id(&self) -> Option<ObjectId> {
        match self {
            Self::Detached => None,
            Self::Attached { room_id, .. } => Some(*room_id),
        }
    }
}

/// Which side of the wall a door swings to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorSwing {
    #[default]
    Positive,
    Negative,
}

impl DoorSwing {
    /// `+1.0` or `-1.0`.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// A placeable object on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Display label.
    pub name: String,
    /// Scene x of the local origin.
    pub x: f64,
    /// Scene y of the local origin.
    pub y: f64,
    /// Closed polygon in local coordinates (at least three points).
    pub points: Vec<Point>,
    pub color: String,
    pub border_color: String,
    pub text_color: String,
    /// Clockwise rotation in degrees around the local bounding-box centre.
    pub rotation: f64,
    /// Nominal width. For doors and windows this is the wall-fit width and
    /// matches the bounding-box width of `points`.
    pub width: f64,
    pub attachment: Attachment,
    pub swing: DoorSwing,
}

impl FloorObject {
    /// Local-space bounding box of `points`.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        bounding_box(&self.points)
    }

    /// `(width, height)` of the local bounding box.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        self.bounds().map_or((0.0, 0.0), |b| (b.width(), b.height()))
    }

    /// Scene position of the local origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Scene position of the bounding-box centre; the pivot for `rotation`.
    #[must_use]
    pub fn rotation_center(&self) -> Point {
        let c = self.bounds().map_or_else(Point::default, |b| b.center());
        Point::new(self.x + c.x, self.y + c.y)
    }

    /// Polygon vertices in scene coordinates, rotation applied.
    #[must_use]
    pub fn world_points(&self) -> Vec<Point> {
        let local_center = self.bounds().map_or_else(Point::default, |b| b.center());
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        self.points
            .iter()
            .map(|p| {
                let d = p.sub(local_center);
                Point::new(
                    self.x + local_center.x + d.x * cos - d.y * sin,
                    self.y + local_center.y + d.x * sin + d.y * cos,
                )
            })
            .collect()
    }

    /// Number of polygon edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.points.len()
    }

    /// Edge `index` in scene coordinates.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<Segment> {
        let n = self.points.len();
        if index >= n {
            return None;
        }
        let world = self.world_points();
        Some(Segment::new(world[index], world[(index + 1) % n]))
    }

    /// All edges in scene coordinates, in index order.
    #[must_use]
    pub fn edges(&self) -> Vec<Segment> {
        let world = self.world_points();
        let n = world.len();
        (0..n).map(|i| Segment::new(world[i], world[(i + 1) % n])).collect()
    }

    /// A copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self.clone() }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        matches!(self.attachment, Attachment::Attached { .. })
    }
}

/// Sparse update for a floor object. Only present fields are applied.
///
/// Geometry (`points`, attachment) is deliberately absent: those change only
/// through the wall and resize engines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialFloorObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing: Option<DoorSwing>,
}

impl PartialFloorObject {
    /// Merge the present fields into `obj`.
    pub fn apply_to(&self, obj: &mut FloorObject) {
        if let Some(ref name) = self.name {
            obj.name.clone_from(name);
        }
        if let Some(x) = self.x {
            obj.x = x;
        }
        if let Some(y) = self.y {
            obj.y = y;
        }
        if let Some(r) = self.rotation {
            obj.rotation = r;
        }
        if let Some(ref c) = self.color {
            obj.color.clone_from(c);
        }
        if let Some(ref c) = self.border_color {
            obj.border_color.clone_from(c);
        }
        if let Some(ref c) = self.text_color {
            obj.text_color.clone_from(c);
        }
        if let Some(s) = self.swing {
            obj.swing = s;
        }
    }
}

/// Return `objects` with the record sharing `obj.id` replaced by `obj`.
/// Unknown ids leave the list unchanged.
#[must_use]
pub fn replace_object(objects: &[FloorObject], obj: FloorObject) -> Vec<FloorObject> {
    let mut out = objects.to_vec();
    if let Some(slot) = out.iter_mut().find(|o| o.id == obj.id) {
        *slot = obj;
    }
    out
}

/// Look up an object by id in a plain object list.
#[must_use]
pub fn find_object(objects: &[FloorObject], id: ObjectId) -> Option<&FloorObject> {
    objects.iter().find(|o| o.id == id)
}

/// The authoritative object list and the current selection.
///
/// Order is stacking order: later objects draw on top.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<FloorObject>,
    selected: Option<ObjectId>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The object list in stacking order.
    #[must_use]
    pub fn objects(&self) -> &[FloorObject] {
        &self.objects
    }

    /// Atomically replace the whole object list.
    ///
    /// A selection whose object no longer exists is cleared.
    pub fn replace_all(&mut self, objects: Vec<FloorObject>) {
        self.objects = objects;
        if let Some(id) = self.selected {
            if self.get(&id).is_none() {
                self.selected = None;
            }
        }
    }

    /// Select an object by id, or clear the selection with `None`.
    /// Unknown ids clear the selection. Returns whether the selection changed.
    pub fn select(&mut self, id: Option<ObjectId>) -> bool {
        let next = id.filter(|id| self.get(id).is_some());
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    /// The currently selected id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.selected
    }

    /// The currently selected object, if any.
    #[must_use]
    pub fn selected_object(&self) -> Option<&FloorObject> {
        self.selected.and_then(|id| self.get(&id))
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&FloorObject> {
        find_object(&self.objects, *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All rooms, in stacking order.
    pub fn rooms(&self) -> impl Iterator<Item = &FloorObject> {
        self.objects.iter().filter(|o| o.kind == ObjectKind::Room)
    }

    /// Doors and windows glued to `room_id`.
    pub fn attached_to(&self, room_id: ObjectId) -> impl Iterator<Item = &FloorObject> {
        self.objects
            .iter()
            .filter(move |o| o.attachment.room_id() == Some(room_id))
    }

    /// A new object list with `partial` merged into object `id`.
    /// Returns `None` when the id is unknown.
    #[must_use]
    pub fn patched(&self, id: ObjectId, partial: &PartialFloorObject) -> Option<Vec<FloorObject>> {
        let mut obj = self.get(&id)?.clone();
        partial.apply_to(&mut obj);
        Some(replace_object(&self.objects, obj))
    }

    /// A new object list with the record sharing `obj.id` replaced.
    #[must_use]
    pub fn with_replaced(&self, obj: FloorObject) -> Vec<FloorObject> {
        replace_object(&self.objects, obj)
    }

    /// A new object list with `obj` appended on top.
    #[must_use]
    pub fn with_added(&self, obj: FloorObject) -> Vec<FloorObject> {
        let mut out = self.objects.clone();
        out.push(obj);
        out
    }

    /// A new object list without the given ids.
    #[must_use]
    pub fn without(&self, ids: &[ObjectId]) -> Vec<FloorObject> {
        self.objects
            .iter()
            .filter(|o| !ids.contains(&o.id))
            .cloned()
            .collect()
    }

    /// A new object list with `id` moved to the top of the stack.
    #[must_use]
    pub fn brought_to_front(&self, id: ObjectId) -> Option<Vec<FloorObject>> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        let mut out = self.objects.clone();
        let obj = out.remove(idx);
        out.push(obj);
        Some(out)
    }

    /// A new object list with `id` moved to the bottom of the stack.
    #[must_use]
    pub fn sent_to_back(&self, id: ObjectId) -> Option<Vec<FloorObject>> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        let mut out = self.objects.clone();
        let obj = out.remove(idx);
        out.insert(0, obj);
        Some(out)
    }

    /// Draw order for the renderer: stacking order with the selected object
    /// promoted to the top. The persisted order is not touched.
    #[must_use]
    pub fn render_order(&self) -> Vec<&FloorObject> {
        let mut out: Vec<&FloorObject> = self
            .objects
            .iter()
            .filter(|o| Some(o.id) != self.selected)
            .collect();
        if let Some(sel) = self.selected_object() {
            out.push(sel);
        }
        out
    }
}
