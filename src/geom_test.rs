#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::new(pt(x1, y1), pt(x2, y2))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// distance
// =============================================================

#[test]
fn distance_3_4_5() {
    assert_eq!(distance(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0);
}

#[test]
fn distance_is_symmetric() {
    let a = pt(-2.0, 7.5);
    let b = pt(11.0, -3.0);
    assert_eq!(distance(a, b), distance(b, a));
}

#[test]
fn distance_to_self_is_zero() {
    assert_eq!(distance(pt(4.0, 4.0), pt(4.0, 4.0)), 0.0);
}

// =============================================================
// point_to_segment_distance
// =============================================================

#[test]
fn segment_distance_perpendicular() {
    assert!(approx(point_to_segment_distance(pt(50.0, 5.0), seg(0.0, 0.0, 100.0, 0.0)), 5.0));
}

#[test]
fn segment_distance_on_segment_is_zero() {
    assert!(approx(point_to_segment_distance(pt(30.0, 0.0), seg(0.0, 0.0, 100.0, 0.0)), 0.0));
}

#[test]
fn segment_distance_beyond_end_uses_endpoint() {
    // Projection parameter > 1: nearest point is p2 = (100, 0).
    let d = point_to_segment_distance(pt(103.0, 4.0), seg(0.0, 0.0, 100.0, 0.0));
    assert!(approx(d, 5.0));
}

#[test]
fn segment_distance_before_start_uses_endpoint() {
    let d = point_to_segment_distance(pt(-6.0, -8.0), seg(0.0, 0.0, 100.0, 0.0));
    assert!(approx(d, 10.0));
}

#[test]
fn segment_distance_zero_length_segment() {
    let d = point_to_segment_distance(pt(3.0, 4.0), seg(0.0, 0.0, 0.0, 0.0));
    assert!(approx(d, 5.0));
}

#[test]
fn segment_distance_diagonal() {
    // Distance from the origin to the line x + y = 10 is 10 / sqrt(2).
    let d = point_to_segment_distance(pt(0.0, 0.0), seg(10.0, 0.0, 0.0, 10.0));
    assert!(approx(d, 10.0 / 2.0_f64.sqrt()));
}

#[test]
fn closest_point_projects_onto_segment() {
    let s = seg(0.0, 0.0, 100.0, 0.0);
    assert_eq!(closest_point_on_segment(pt(40.0, 25.0), s), pt(40.0, 0.0));
    assert_eq!(closest_point_on_segment(pt(140.0, 25.0), s), pt(100.0, 0.0));
    assert_eq!(closest_point_on_segment(pt(-5.0, -5.0), s), pt(0.0, 0.0));
}

// =============================================================
// position_on_segment
// =============================================================

#[test]
fn position_on_segment_midpoint() {
    assert!(approx(position_on_segment(pt(50.0, 0.0), seg(0.0, 0.0, 100.0, 0.0)), 0.5));
}

#[test]
fn position_on_segment_endpoints() {
    let s = seg(0.0, 0.0, 0.0, 40.0);
    assert!(approx(position_on_segment(pt(0.0, 0.0), s), 0.0));
    assert!(approx(position_on_segment(pt(0.0, 40.0), s), 1.0));
}

#[test]
fn position_on_segment_past_end_exceeds_one() {
    assert!(position_on_segment(pt(150.0, 0.0), seg(0.0, 0.0, 100.0, 0.0)) > 1.0);
}

#[test]
fn position_on_segment_zero_length_is_zero() {
    assert_eq!(position_on_segment(pt(9.0, 9.0), seg(1.0, 1.0, 1.0, 1.0)), 0.0);
}

// =============================================================
// Bounding box
// =============================================================

#[test]
fn bounding_box_of_l_shape() {
    let points = [
        pt(0.0, 0.0),
        pt(200.0, 0.0),
        pt(200.0, 100.0),
        pt(100.0, 100.0),
        pt(100.0, 200.0),
        pt(0.0, 200.0),
    ];
    let b = bounding_box(&points).unwrap();
    assert_eq!(b.width(), 200.0);
    assert_eq!(b.height(), 200.0);
    assert_eq!(b.top_left(), pt(0.0, 0.0));
    assert_eq!(b.center(), pt(100.0, 100.0));
}

#[test]
fn bounding_box_empty_is_none() {
    assert!(bounding_box(&[]).is_none());
    assert_eq!(bounding_box_top_left(&[]), Point::default());
    assert_eq!(bounding_box_center(&[]), Point::default());
}

#[test]
fn bounding_box_negative_coordinates() {
    let points = [pt(-10.0, 5.0), pt(20.0, -15.0), pt(0.0, 0.0)];
    assert_eq!(bounding_box_top_left(&points), pt(-10.0, -15.0));
    assert_eq!(bounding_box_center(&points), pt(5.0, -5.0));
}

// =============================================================
// centroid
// =============================================================

#[test]
fn centroid_of_square() {
    let points = [pt(0.0, 0.0), pt(200.0, 0.0), pt(200.0, 200.0), pt(0.0, 200.0)];
    let c = centroid(&points);
    assert!(approx(c.x, 100.0));
    assert!(approx(c.y, 100.0));
}

#[test]
fn centroid_is_winding_independent() {
    let cw = [pt(0.0, 0.0), pt(0.0, 100.0), pt(50.0, 100.0), pt(50.0, 0.0)];
    let c = centroid(&cw);
    assert!(approx(c.x, 25.0));
    assert!(approx(c.y, 50.0));
}

#[test]
fn centroid_of_l_shape_leans_into_the_mass() {
    let points = [
        pt(0.0, 0.0),
        pt(200.0, 0.0),
        pt(200.0, 100.0),
        pt(100.0, 100.0),
        pt(100.0, 200.0),
        pt(0.0, 200.0),
    ];
    let c = centroid(&points);
    // Three 100x100 cells at (50,50), (150,50), (50,150).
    assert!(approx(c.x, 250.0 / 3.0));
    assert!(approx(c.y, 250.0 / 3.0));
}

#[test]
fn centroid_degenerate_falls_back_to_vertex_mean() {
    let points = [pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)];
    assert_eq!(centroid(&points), pt(10.0, 0.0));
}

// =============================================================
// Angles and snapping
// =============================================================

#[test]
fn segment_angle_cardinal_directions() {
    assert!(approx(segment_angle_degrees(pt(0.0, 0.0), pt(10.0, 0.0)), 0.0));
    assert!(approx(segment_angle_degrees(pt(0.0, 0.0), pt(0.0, 10.0)), 90.0));
    assert!(approx(segment_angle_degrees(pt(0.0, 0.0), pt(-10.0, 0.0)), 180.0));
    assert!(approx(segment_angle_degrees(pt(0.0, 0.0), pt(0.0, -10.0)), -90.0));
}

#[test]
fn segment_methods_agree_with_free_functions() {
    let s = seg(0.0, 0.0, 30.0, 40.0);
    assert_eq!(s.length(), 50.0);
    assert_eq!(s.midpoint(), pt(15.0, 20.0));
    assert_eq!(s.point_at(0.25), pt(7.5, 10.0));
    assert!(approx(s.angle_degrees(), segment_angle_degrees(s.p1, s.p2)));
}

#[test]
fn snap_rounds_to_nearest_multiple() {
    assert_eq!(snap_to_grid(12.0, 5.0), 10.0);
    assert_eq!(snap_to_grid(13.0, 5.0), 15.0);
    assert_eq!(snap_to_grid(-12.0, 5.0), -10.0);
}

#[test]
fn snap_with_non_positive_step_is_identity() {
    assert_eq!(snap_to_grid(12.3, 0.0), 12.3);
    assert_eq!(snap_to_grid(12.3, -5.0), 12.3);
}

#[test]
fn point_vector_helpers() {
    let a = pt(3.0, 4.0);
    assert_eq!(a.offset(1.0, -1.0), pt(4.0, 3.0));
    assert_eq!(a.sub(pt(1.0, 1.0)), pt(2.0, 3.0));
    assert_eq!(a.dot(pt(2.0, 0.5)), 8.0);
}

// =============================================================
// signed_area
// =============================================================

#[test]
fn signed_area_follows_winding() {
    let cw = vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
    let ccw: Vec<Point> = cw.iter().rev().copied().collect();
    assert_eq!(signed_area(&cw), 100.0);
    assert_eq!(signed_area(&ccw), -100.0);
    assert_eq!(signed_area(&[pt(0.0, 0.0), pt(5.0, 5.0)]), 0.0);
}
