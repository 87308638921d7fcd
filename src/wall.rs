//! Wall-attachment engine.
//!
//! Doors and windows live on room walls. This module finds the wall a drop
//! point belongs to, mounts an object on a wall at a parametric position, and
//! refits every attached object when its room moves or changes shape.
//!
//! All functions take the current object list and return new records; the
//! caller replaces the scene in one step so a room and its doors are never
//! observed out of sync.

#[cfg(test)]
#[path = "wall_test.rs"]
mod wall_test;

use tracing::debug;

use crate::consts::DEFAULT_POSITION_ON_WALL;
use crate::doc::{Attachment, FloorObject, ObjectId, ObjectKind, find_object, replace_object};
use crate::error::Rejection;
use crate::geom::{
    Point, Segment, bounding_box, centroid, closest_point_on_segment, point_to_segment_distance, position_on_segment,
};

/// A wall found by [`find_nearest_wall`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub room_id: ObjectId,
    pub edge_index: usize,
    /// The wall in scene coordinates.
    pub segment: Segment,
    /// Distance from the query point to the wall.
    pub distance: f64,
}

/// Find the wall closest to `point`.
///
/// Candidates are the edges of every room, or of `room_id` only. An edge is
/// skipped when it has zero length, lies farther than `max_distance`, or sits
/// on the opposite side of the room centroid from `point` (the direction
/// from the centroid to the point and to the edge midpoint must have a
/// non-negative dot product). That last filter keeps a drop near the front
/// wall of an L-shaped room from snapping to an inner wall that happens to be
/// closer.
#[must_use]
pub fn find_nearest_wall(
    objects: &[FloorObject],
    point: Point,
    max_distance: Option<f64>,
    room_id: Option<ObjectId>,
) -> Option<WallHit> {
    let mut best: Option<WallHit> = None;
    for room in objects.iter().filter(|o| o.kind == ObjectKind::Room) {
        if room_id.is_some_and(|id| id != room.id) {
            continue;
        }
        let center = centroid(&room.world_points());
        let toward_point = point.sub(center);
        for (edge_index, segment) in room.edges().into_iter().enumerate() {
            if segment.length() == 0.0 {
                continue;
            }
            let distance = point_to_segment_distance(point, segment);
            if max_distance.is_some_and(|max| distance > max) {
                continue;
            }
            if toward_point.dot(segment.midpoint().sub(center)) < 0.0 {
                continue;
            }
            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(WallHit { room_id: room.id, edge_index, segment, distance });
            }
        }
    }
    best
}

/// Clamp a wall position so an object of `width` stays within the wall.
///
/// The valid range is `[half / len, 1 - half / len]`. When the object is as
/// long as the wall (or the wall is degenerate) the only valid spot is the
/// middle.
#[must_use]
pub fn clamp_position(position: f64, width: f64, wall_length: f64) -> f64 {
    if wall_length <= 0.0 {
        return DEFAULT_POSITION_ON_WALL;
    }
    let half = width / 2.0 / wall_length;
    if half >= 0.5 {
        return DEFAULT_POSITION_ON_WALL;
    }
    position.clamp(half, 1.0 - half)
}

/// Stretch or shrink a footprint along x to `new_width`, keeping its left
/// edge and its thickness.
#[must_use]
pub fn resize_footprint(points: &[Point], new_width: f64) -> Vec<Point> {
    let Some(b) = bounding_box(points) else {
        return points.to_vec();
    };
    let old_width = b.width();
    if old_width <= 0.0 {
        return points.to_vec();
    }
    let scale = new_width / old_width;
    points
        .iter()
        .map(|p| Point::new(b.min_x + (p.x - b.min_x) * scale, p.y))
        .collect()
}

/// Place `obj` so its footprint centre sits on the wall at `position` and it
/// runs along the wall.
///
/// Rotation pivots on the bounding-box centre, so putting the centre on the
/// wall line also centres the footprint's thickness on it.
#[must_use]
pub fn mount(obj: &FloorObject, segment: Segment, position: f64) -> FloorObject {
    let local_center = obj.bounds().map_or_else(Point::default, |b| b.center());
    let at = segment.point_at(position);
    FloorObject {
        x: at.x - local_center.x,
        y: at.y - local_center.y,
        rotation: segment.angle_degrees(),
        ..obj.clone()
    }
}

/// Fit `obj` onto wall `edge_index` of `room` at `position`.
///
/// An object wider than the wall is shrunk to the wall length and recentred.
/// The position is clamped so the footprint never crosses a wall end.
/// Returns `None` for an out-of-range or zero-length edge.
#[must_use]
pub fn fit_to_wall(obj: &FloorObject, room: &FloorObject, edge_index: usize, position: f64) -> Option<FloorObject> {
    let segment = room.edge(edge_index).filter(|s| s.length() > 0.0)?;
    let wall_length = segment.length();

    let mut fitted = obj.clone();
    let mut position = position;
    if fitted.width > wall_length {
        fitted.points = resize_footprint(&fitted.points, wall_length);
        fitted.width = wall_length;
        position = DEFAULT_POSITION_ON_WALL;
    }
    let position = clamp_position(position, fitted.width, wall_length);
    fitted.attachment = Attachment::Attached { room_id: room.id, edge_index, position_on_wall: position };
    Some(mount(&fitted, segment, position))
}

/// Attach a new door or window to the wall nearest `drop`, centred on it.
///
/// The search is uncapped, so this succeeds whenever any room exists.
///
/// # Errors
///
/// `NoAttachmentTarget` when there is no room wall to attach to.
pub fn place_on_nearest_wall(objects: &[FloorObject], obj: &FloorObject, drop: Point) -> Result<FloorObject, Rejection> {
    let hit = find_nearest_wall(objects, drop, None, None).ok_or(Rejection::NoAttachmentTarget)?;
    let room = find_object(objects, hit.room_id).ok_or(Rejection::NoAttachmentTarget)?;
    fit_to_wall(obj, room, hit.edge_index, DEFAULT_POSITION_ON_WALL).ok_or(Rejection::NoAttachmentTarget)
}

/// Replace `room` in `objects` and refit every door and window glued to it.
///
/// Attached objects keep their edge and wall position (reclamped for the new
/// wall length); their scene position and rotation follow the wall. An edge
/// index that no longer exists is re-resolved to the room's wall nearest the
/// object. An object that fits nowhere is detached rather than left
/// inconsistent.
#[must_use]
pub fn reflow_room(objects: &[FloorObject], room: &FloorObject) -> Vec<FloorObject> {
    let mut out = replace_object(objects, room.clone());
    for slot in &mut out {
        let Attachment::Attached { room_id, edge_index, position_on_wall } = slot.attachment else {
            continue;
        };
        if room_id != room.id {
            continue;
        }
        let refit = fit_to_wall(slot, room, edge_index, position_on_wall).or_else(|| {
            let hit = find_nearest_wall(std::slice::from_ref(room), slot.rotation_center(), None, Some(room.id))?;
            fit_to_wall(slot, room, hit.edge_index, position_on_wall)
        });
        match refit {
            Some(fitted) => *slot = fitted,
            None => {
                debug!(id = %slot.id, room = %room.id, "no wall left to host object; detaching");
                slot.attachment = Attachment::Detached;
            }
        }
    }
    out
}

/// Slide an attached object so its centre follows `target` along the walls
/// of its own room.
///
/// Only walls within `reach` of `target` qualify; the object may hop to
/// another wall of the same room but never to a different room.
///
/// # Errors
///
/// `OutOfReach` when no wall of the room is close enough (the object stays
/// put), `UnknownObject` when the object is not attached to an existing room.
pub fn slide_along_wall(
    objects: &[FloorObject],
    obj: &FloorObject,
    target: Point,
    reach: f64,
) -> Result<FloorObject, Rejection> {
    let room_id = obj.attachment.room_id().ok_or(Rejection::UnknownObject(obj.id))?;
    let room = find_object(objects, room_id).ok_or(Rejection::UnknownObject(room_id))?;
    let hit = find_nearest_wall(objects, target, Some(reach), Some(room_id)).ok_or(Rejection::OutOfReach)?;
    let on_wall = closest_point_on_segment(target, hit.segment);
    let position = position_on_segment(on_wall, hit.segment);
    fit_to_wall(obj, room, hit.edge_index, position).ok_or(Rejection::OutOfReach)
}
