#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::EDGE_GRAB_RADIUS;
use crate::doc::{ObjectId, Scene};
use crate::geom::{Point, point_to_segment_distance};

/// Which part of an object was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// An edge of the selected object, by index.
    Edge(usize),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    pub part: HitPart,
}

/// Test which object (if any) is under `point`, checking the selected
/// object's edges first and then bodies in draw order, topmost first.
///
/// Doors and windows expose no edge handles.
#[must_use]
pub fn hit_test(point: Point, scene: &Scene) -> Option<Hit> {
    if let Some(sel) = scene.selected_object().filter(|o| !o.kind.is_wall_mounted()) {
        let grabbed = sel
            .edges()
            .into_iter()
            .enumerate()
            .map(|(i, seg)| (i, point_to_segment_distance(point, seg)))
            .filter(|&(_, d)| d <= EDGE_GRAB_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((edge, _)) = grabbed {
            return Some(Hit { object_id: sel.id, part: HitPart::Edge(edge) });
        }
    }

    scene
        .render_order()
        .into_iter()
        .rev()
        .find(|o| point_in_polygon(point, &o.world_points()))
        .map(|o| Hit { object_id: o.id, part: HitPart::Body })
}

/// Even-odd ray cast. Points exactly on the boundary may land either way.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
