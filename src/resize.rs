//! Edge-resize engine.
//!
//! A room or piece of furniture is resized by dragging one of its
//! axis-aligned edges: both endpoints of the edge move together along the
//! edge's normal, so the rest of the outline keeps its shape. The numeric
//! size fields go through [`scale_to_size`] instead, which scales the whole
//! outline about its centre.
//!
//! Both functions return a new record or a [`Rejection`]; the caller decides
//! whether a room also needs its doors reflowed.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::config::EditorConfig;
use crate::consts::GEOM_EPSILON;
use crate::doc::FloorObject;
use crate::error::Rejection;
use crate::geom::{Point, bounding_box, signed_area, snap_to_grid};

/// Orientation of a draggable edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAxis {
    /// Both endpoints share a y; dragging moves the edge up or down.
    Horizontal,
    /// Both endpoints share an x; dragging moves the edge left or right.
    Vertical,
}

/// Classify edge `index` of a local polygon. `None` for diagonal edges and
/// out-of-range indices.
#[must_use]
pub fn classify_edge(points: &[Point], index: usize) -> Option<EdgeAxis> {
    let n = points.len();
    if index >= n {
        return None;
    }
    let p1 = points[index];
    let p2 = points[(index + 1) % n];
    if (p1.y - p2.y).abs() < GEOM_EPSILON {
        Some(EdgeAxis::Horizontal)
    } else if (p1.x - p2.x).abs() < GEOM_EPSILON {
        Some(EdgeAxis::Vertical)
    } else {
        None
    }
}

/// Move edge `edge_index` of `obj` so it passes through `pointer`.
///
/// The pointer coordinate along the edge normal is snapped to
/// `config.snap_step` in scene space before being converted to local space.
///
/// # Errors
///
/// - `NotResizable` for doors, windows and rotated objects;
/// - `UnknownEdge` for an index past the last edge;
/// - `Unchanged` when the snapped coordinate equals the current one;
/// - `BelowMinimumSize` when the result would not be strictly larger than
///   the configured minimum in both directions, or when the edge is dragged
///   so far past the opposite side that the outline turns inside out.
pub fn resize_edge(
    obj: &FloorObject,
    edge_index: usize,
    axis: EdgeAxis,
    pointer: Point,
    config: &EditorConfig,
) -> Result<FloorObject, Rejection> {
    if obj.kind.is_wall_mounted() || obj.rotation.abs() > GEOM_EPSILON {
        return Err(Rejection::NotResizable(obj.kind));
    }
    let n = obj.points.len();
    if edge_index >= n {
        return Err(Rejection::UnknownEdge { id: obj.id, edge: edge_index });
    }
    let next = (edge_index + 1) % n;

    let mut points = obj.points.clone();
    match axis {
        EdgeAxis::Horizontal => {
            let local = snap_to_grid(pointer.y, config.snap_step) - obj.y;
            if (points[edge_index].y - local).abs() < GEOM_EPSILON && (points[next].y - local).abs() < GEOM_EPSILON {
                return Err(Rejection::Unchanged);
            }
            points[edge_index].y = local;
            points[next].y = local;
        }
        EdgeAxis::Vertical => {
            let local = snap_to_grid(pointer.x, config.snap_step) - obj.x;
            if (points[edge_index].x - local).abs() < GEOM_EPSILON && (points[next].x - local).abs() < GEOM_EPSILON {
                return Err(Rejection::Unchanged);
            }
            points[edge_index].x = local;
            points[next].x = local;
        }
    }

    if signed_area(&points) * signed_area(&obj.points) <= 0.0 {
        let (width, height) = bounding_box(&points).map_or((0.0, 0.0), |b| (b.width(), b.height()));
        return Err(Rejection::BelowMinimumSize { width, height });
    }
    let width = check_min_size(&points, config)?;
    Ok(FloorObject { points, width, ..obj.clone() })
}

/// Scale `obj` about its bounding-box centre to `width` × `height`.
///
/// Rooms and furniture must stay above the configured minimums. Doors and
/// windows only need a positive size; the caller refits them to their wall.
///
/// # Errors
///
/// `BelowMinimumSize` when the target is too small and `Unchanged` when the
/// object already has that size.
pub fn scale_to_size(obj: &FloorObject, width: f64, height: f64, config: &EditorConfig) -> Result<FloorObject, Rejection> {
    let Some(b) = obj.bounds() else {
        return Err(Rejection::Unchanged);
    };
    if (b.width() - width).abs() < GEOM_EPSILON && (b.height() - height).abs() < GEOM_EPSILON {
        return Err(Rejection::Unchanged);
    }
    if !width.is_finite() || !height.is_finite() {
        return Err(Rejection::InvalidValue(if width.is_finite() { height } else { width }));
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(Rejection::BelowMinimumSize { width, height });
    }

    let sx = if b.width() > 0.0 { width / b.width() } else { 1.0 };
    let sy = if b.height() > 0.0 { height / b.height() } else { 1.0 };
    let c = b.center();
    let points: Vec<Point> = obj
        .points
        .iter()
        .map(|p| Point::new(c.x + (p.x - c.x) * sx, c.y + (p.y - c.y) * sy))
        .collect();

    let new_width = if obj.kind.is_wall_mounted() {
        bounding_box(&points).map_or(width, |nb| nb.width())
    } else {
        check_min_size(&points, config)?
    };
    Ok(FloorObject { points, width: new_width, ..obj.clone() })
}

/// Bounding-box width of `points` if both dimensions exceed the minimums.
fn check_min_size(points: &[Point], config: &EditorConfig) -> Result<f64, Rejection> {
    let (width, height) = bounding_box(points).map_or((0.0, 0.0), |b| (b.width(), b.height()));
    if width <= config.min_width || height <= config.min_height {
        return Err(Rejection::BelowMinimumSize { width, height });
    }
    Ok(width)
}
