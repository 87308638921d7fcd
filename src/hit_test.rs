use uuid::Uuid;

use super::*;
use crate::doc::{Attachment, DoorSwing, FloorObject, ObjectKind};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn make_object(kind: ObjectKind, x: f64, y: f64, w: f64, h: f64) -> FloorObject {
    FloorObject {
        id: Uuid::new_v4(),
        kind,
        name: String::new(),
        x,
        y,
        points: vec![pt(0.0, 0.0), pt(w, 0.0), pt(w, h), pt(0.0, h)],
        color: "#ffffff".into(),
        border_color: "#000000".into(),
        text_color: "#000000".into(),
        rotation: 0.0,
        width: w,
        attachment: Attachment::Detached,
        swing: DoorSwing::Positive,
    }
}

fn scene_with(objects: Vec<FloorObject>) -> Scene {
    let mut scene = Scene::new();
    scene.replace_all(objects);
    scene
}

// =============================================================
// point_in_polygon
// =============================================================

#[test]
fn inside_and_outside_square() {
    let square = vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
    assert!(point_in_polygon(pt(5.0, 5.0), &square));
    assert!(!point_in_polygon(pt(15.0, 5.0), &square));
    assert!(!point_in_polygon(pt(5.0, -1.0), &square));
}

#[test]
fn notch_of_l_shape_is_outside() {
    let l = vec![pt(0.0, 0.0), pt(200.0, 0.0), pt(200.0, 100.0), pt(100.0, 100.0), pt(100.0, 200.0), pt(0.0, 200.0)];
    assert!(point_in_polygon(pt(50.0, 150.0), &l));
    assert!(!point_in_polygon(pt(150.0, 150.0), &l));
}

#[test]
fn degenerate_polygon_contains_nothing() {
    assert!(!point_in_polygon(pt(0.0, 0.0), &[pt(0.0, 0.0), pt(1.0, 1.0)]));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_scene_hits_nothing() {
    assert!(hit_test(pt(0.0, 0.0), &Scene::new()).is_none());
}

#[test]
fn topmost_body_wins() {
    let room = make_object(ObjectKind::Room, 0.0, 0.0, 200.0, 200.0);
    let sofa = make_object(ObjectKind::Furniture, 50.0, 50.0, 100.0, 60.0);
    let scene = scene_with(vec![room.clone(), sofa.clone()]);

    let hit = hit_test(pt(80.0, 80.0), &scene).unwrap();
    assert_eq!(hit, Hit { object_id: sofa.id, part: HitPart::Body });

    let hit = hit_test(pt(10.0, 150.0), &scene).unwrap();
    assert_eq!(hit.object_id, room.id);
}

#[test]
fn selected_object_is_hit_first() {
    let room = make_object(ObjectKind::Room, 0.0, 0.0, 200.0, 200.0);
    let sofa = make_object(ObjectKind::Furniture, 50.0, 50.0, 100.0, 60.0);
    let mut scene = scene_with(vec![room.clone(), sofa]);
    scene.select(Some(room.id));

    let hit = hit_test(pt(80.0, 80.0), &scene).unwrap();
    assert_eq!(hit, Hit { object_id: room.id, part: HitPart::Body });
}

#[test]
fn edge_of_selection_is_grabbed_within_radius() {
    let room = make_object(ObjectKind::Room, 0.0, 0.0, 200.0, 200.0);
    let mut scene = scene_with(vec![room.clone()]);
    scene.select(Some(room.id));

    let hit = hit_test(pt(100.0, 4.0), &scene).unwrap();
    assert_eq!(hit.part, HitPart::Edge(0));
    let hit = hit_test(pt(203.0, 120.0), &scene).unwrap();
    assert_eq!(hit.part, HitPart::Edge(1));
    let hit = hit_test(pt(100.0, 20.0), &scene).unwrap();
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn unselected_edges_are_not_handles() {
    let room = make_object(ObjectKind::Room, 0.0, 0.0, 200.0, 200.0);
    let scene = scene_with(vec![room]);
    assert_eq!(hit_test(pt(100.0, 2.0), &scene).map(|h| h.part), Some(HitPart::Body));
}

#[test]
fn doors_have_no_edge_handles() {
    let door = make_object(ObjectKind::Door, 0.0, 0.0, 80.0, 10.0);
    let mut scene = scene_with(vec![door.clone()]);
    scene.select(Some(door.id));
    assert_eq!(hit_test(pt(40.0, 5.0), &scene), Some(Hit { object_id: door.id, part: HitPart::Body }));
}
