//! Geometry utilities: points, segments, bounding boxes and the handful of
//! measurements the wall and resize engines are built on.
//!
//! Everything here is pure and infallible. Degenerate input (zero-length
//! segments, empty point lists) produces a neutral value rather than an error;
//! callers that care skip such input up front.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in scene space or in an object's local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }

    /// Dot product, treating both points as vectors from the origin.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

/// A finite line segment from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    #[must_use]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(self.p1, self.p2)
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        Point::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }

    /// The point at parameter `t` (0 = `p1`, 1 = `p2`). Not clamped.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        Point::new(
            self.p1.x + (self.p2.x - self.p1.x) * t,
            self.p1.y + (self.p2.y - self.p1.y) * t,
        )
    }

    /// Direction of the segment in degrees.
    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        segment_angle_degrees(self.p1, self.p2)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Distance from `point` to the closest point of a finite segment.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to the nearest endpoint. A zero-length segment measures to `p1`.
#[must_use]
pub fn point_to_segment_distance(point: Point, segment: Segment) -> f64 {
    distance(point, closest_point_on_segment(point, segment))
}

/// The point of a finite segment nearest to `point` (clamped projection).
#[must_use]
pub fn closest_point_on_segment(point: Point, segment: Segment) -> Point {
    let d = segment.p2.sub(segment.p1);
    let len_sq = d.dot(d);
    if len_sq == 0.0 {
        return segment.p1;
    }
    let t = (point.sub(segment.p1).dot(d) / len_sq).clamp(0.0, 1.0);
    segment.point_at(t)
}

/// Fraction of the way from `segment.p1` toward `segment.p2`, measured as
/// `distance(point, p1) / length`.
///
/// Not clamped: points past `p2` give values above 1. Returns 0 for a
/// zero-length segment.
#[must_use]
pub fn position_on_segment(point: Point, segment: Segment) -> f64 {
    let len = segment.length();
    if len == 0.0 {
        return 0.0;
    }
    distance(point, segment.p1) / len
}

/// Bounding box of a point list, or `None` when the list is empty.
#[must_use]
pub fn bounding_box(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let init = Bounds { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
    Some(points.iter().fold(init, |b, p| Bounds {
        min_x: b.min_x.min(p.x),
        min_y: b.min_y.min(p.y),
        max_x: b.max_x.max(p.x),
        max_y: b.max_y.max(p.y),
    }))
}

/// Top-left corner of the bounding box (origin for an empty list).
#[must_use]
pub fn bounding_box_top_left(points: &[Point]) -> Point {
    bounding_box(points).map_or_else(Point::default, |b| b.top_left())
}

/// Centre of the bounding box (origin for an empty list).
#[must_use]
pub fn bounding_box_center(points: &[Point]) -> Point {
    bounding_box(points).map_or_else(Point::default, |b| b.center())
}

/// Shoelace area of a closed polygon. Positive for clockwise outlines in
/// y-down screen space, negative for counter-clockwise ones.
#[must_use]
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// Area centroid of a closed polygon.
///
/// Falls back to the vertex mean when the polygon has (near) zero area.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    let n = points.len();
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area2 += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    if area2.abs() < crate::consts::GEOM_EPSILON {
        let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        return Point::new(sx / n as f64, sy / n as f64);
    }
    Point::new(cx / (3.0 * area2), cy / (3.0 * area2))
}

/// `atan2(dy, dx)` of the segment from `p1` to `p2`, in degrees.
#[must_use]
pub fn segment_angle_degrees(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x).to_degrees()
}

/// Round `value` to the nearest multiple of `step`. A non-positive step
/// leaves the value untouched.
#[must_use]
pub fn snap_to_grid(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}
