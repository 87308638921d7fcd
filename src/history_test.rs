#![allow(clippy::float_cmp)]

use std::time::{Duration, Instant};

use uuid::Uuid;

use super::*;
use crate::doc::{Attachment, DoorSwing, ObjectKind};
use crate::geom::Point;

fn make_object(x: f64) -> FloorObject {
    FloorObject {
        id: Uuid::new_v4(),
        kind: ObjectKind::Furniture,
        name: "Chair".into(),
        x,
        y: 0.0,
        points: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(50.0, 50.0), Point::new(0.0, 50.0)],
        color: "#DEB887".into(),
        border_color: "#000000".into(),
        text_color: "#000000".into(),
        rotation: 0.0,
        width: 50.0,
        attachment: Attachment::Detached,
        swing: DoorSwing::Positive,
    }
}

fn controller() -> GestureController {
    GestureController::new(10, Duration::from_millis(150))
}

fn moved(objects: &[FloorObject], dx: f64) -> Vec<FloorObject> {
    objects.iter().map(|o| o.translated(dx, 0.0)).collect()
}

// =============================================================
// History
// =============================================================

#[test]
fn empty_history_has_no_cursor() {
    let mut h = History::new(10);
    assert!(h.is_empty());
    assert_eq!(h.cursor(), None);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(h.undo().is_none());
    assert!(h.redo().is_none());
}

#[test]
fn first_commit_stores_before_and_after() {
    let mut h = History::new(10);
    let a = vec![make_object(0.0)];
    h.commit(Vec::new(), a.clone());
    assert_eq!(h.len(), 2);
    assert_eq!(h.cursor(), Some(1));
    assert_eq!(h.undo(), Some(Vec::new()));
    assert_eq!(h.redo(), Some(a));
}

#[test]
fn later_commits_advance_by_one() {
    let mut h = History::new(10);
    h.commit(Vec::new(), vec![make_object(0.0)]);
    h.commit(vec![make_object(0.0)], vec![make_object(10.0)]);
    assert_eq!(h.len(), 3);
    assert_eq!(h.cursor(), Some(2));
}

#[test]
fn commit_after_undo_discards_redo_branch() {
    let mut h = History::new(10);
    h.commit(Vec::new(), vec![make_object(0.0)]);
    h.commit(Vec::new(), vec![make_object(10.0)]);
    h.undo();
    assert!(h.can_redo());
    h.commit(Vec::new(), vec![make_object(20.0)]);
    assert!(!h.can_redo());
    assert_eq!(h.len(), 3);
    assert_eq!(h.cursor(), Some(2));
}

#[test]
fn oldest_entries_are_dropped_at_capacity() {
    let mut h = History::new(3);
    for i in 0..5 {
        h.commit(Vec::new(), vec![make_object(f64::from(i))]);
    }
    assert_eq!(h.len(), 3);
    assert_eq!(h.cursor(), Some(2));
    assert!(h.undo().is_some());
    assert!(h.undo().is_some());
    assert!(h.undo().is_none());
    assert_eq!(h.cursor(), Some(0));
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut h = History::new(0);
    h.commit(Vec::new(), vec![make_object(0.0)]);
    assert_eq!(h.len(), 1);
    assert_eq!(h.cursor(), Some(0));
    assert!(!h.can_undo());
}

// =============================================================
// GestureController: batching
// =============================================================

#[test]
fn apply_outside_gesture_commits_immediately() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);
    assert_eq!(c.history().cursor(), Some(1));
    assert!(!c.is_active());
}

#[test]
fn gesture_with_many_frames_is_one_step() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);

    c.start_gesture();
    for _ in 0..20 {
        let next = moved(c.scene().objects(), 5.0);
        c.apply(next);
    }
    assert_eq!(c.history().cursor(), Some(1));
    assert!(c.end_gesture());
    assert_eq!(c.history().cursor(), Some(2));
    assert_eq!(c.scene().objects()[0].x, 100.0);
}

#[test]
fn first_gesture_advances_cursor_to_one() {
    let mut c = controller();
    c.start_gesture();
    c.apply(vec![make_object(0.0)]);
    c.apply(vec![make_object(5.0)]);
    assert!(c.end_gesture());
    assert_eq!(c.history().cursor(), Some(1));
    assert_eq!(c.history().len(), 2);
}

#[test]
fn unchanged_gesture_records_nothing() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);
    let before = c.scene().objects().to_vec();

    c.start_gesture();
    c.apply(moved(&before, 10.0));
    c.apply(before.clone());
    assert!(!c.end_gesture());
    assert_eq!(c.history().cursor(), Some(1));
}

#[test]
fn nested_start_keeps_original_snapshot() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);
    let before = c.scene().objects().to_vec();

    c.start_gesture();
    c.apply(moved(&before, 10.0));
    c.start_gesture();
    c.apply(moved(&before, 20.0));
    c.end_gesture();

    assert!(c.undo());
    assert_eq!(c.scene().objects(), before.as_slice());
}

#[test]
fn end_without_gesture_is_noop() {
    let mut c = controller();
    assert!(!c.end_gesture());
    assert!(c.history().is_empty());
}

// =============================================================
// GestureController: debounce
// =============================================================

#[test]
fn debounced_edit_commits_after_quiet_period() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);
    let t0 = Instant::now();

    c.touch(t0);
    c.apply(moved(c.scene().objects(), 1.0));
    assert!(!c.poll(t0 + Duration::from_millis(100)));

    c.touch(t0 + Duration::from_millis(100));
    c.apply(moved(c.scene().objects(), 1.0));
    assert!(!c.poll(t0 + Duration::from_millis(200)));
    assert!(c.is_active());

    assert!(c.poll(t0 + Duration::from_millis(250)));
    assert!(!c.is_active());
    assert_eq!(c.history().cursor(), Some(2));
}

#[test]
fn poll_ignores_pointer_gestures() {
    let mut c = controller();
    c.start_gesture();
    c.apply(vec![make_object(0.0)]);
    assert!(!c.poll(Instant::now() + Duration::from_secs(60)));
    assert!(c.is_active());
}

// =============================================================
// GestureController: undo / redo
// =============================================================

#[test]
fn undo_then_redo_restores_exactly() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);
    c.apply(moved(c.scene().objects(), 30.0));
    let latest = c.scene().objects().to_vec();

    assert!(c.undo());
    assert_ne!(c.scene().objects(), latest.as_slice());
    assert!(c.redo());
    assert_eq!(c.scene().objects(), latest.as_slice());
}

#[test]
fn undo_and_redo_do_not_record_entries() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);
    c.apply(moved(c.scene().objects(), 30.0));
    let len = c.history().len();
    c.undo();
    c.redo();
    c.undo();
    assert_eq!(c.history().len(), len);
}

#[test]
fn undo_past_oldest_is_noop() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);
    assert!(c.undo());
    assert!(c.scene().is_empty());
    assert!(!c.undo());
    assert!(c.history().can_redo());
}

#[test]
fn undo_during_gesture_commits_it_first() {
    let mut c = controller();
    c.apply(vec![make_object(0.0)]);
    let before = c.scene().objects().to_vec();

    c.start_gesture();
    c.apply(moved(&before, 10.0));
    assert!(c.undo());
    assert!(!c.is_active());
    assert_eq!(c.scene().objects(), before.as_slice());
    assert!(c.history().can_redo());
}

#[test]
fn undo_clears_selection_of_vanished_object() {
    let mut c = controller();
    let obj = make_object(0.0);
    c.apply(vec![obj.clone()]);
    c.select(Some(obj.id));
    assert!(c.undo());
    assert_eq!(c.scene().selection(), None);
}

#[test]
fn undo_keeps_selection_of_surviving_object() {
    let mut c = controller();
    let obj = make_object(0.0);
    c.apply(vec![obj.clone()]);
    c.apply(moved(c.scene().objects(), 10.0));
    c.select(Some(obj.id));
    assert!(c.undo());
    assert_eq!(c.scene().selection(), Some(obj.id));
    assert_eq!(c.scene().selected_object().map(|o| o.x), Some(0.0));
}
