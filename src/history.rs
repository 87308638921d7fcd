//! Snapshot history and gesture batching.
//!
//! [`History`] is a bounded list of full object-list snapshots with a cursor
//! pointing at the one currently shown. [`GestureController`] owns the scene
//! and the history together: every change to the object list goes through
//! it, and a whole gesture (a drag, a burst of typing in a field) becomes a
//! single undo step.
//!
//! Snapshots are deep copies. Restoring one never aliases a later mutation.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::doc::{FloorObject, ObjectId, Scene};

/// Bounded snapshot list with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<FloorObject>>,
    /// Index of the snapshot matching the scene; `None` before the first commit.
    cursor: Option<usize>,
    max_entries: usize,
}

impl History {
    /// An empty history keeping at most `max_entries` snapshots (at least one).
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self { entries: Vec::new(), cursor: None, max_entries: max_entries.max(1) }
    }

    /// Record the transition `before` → `current`.
    ///
    /// The first commit stores both snapshots so the initial state can be
    /// undone to. Later commits drop any redo entries past the cursor and
    /// push `current`. The oldest snapshots are discarded once the list
    /// exceeds its bound.
    pub fn commit(&mut self, before: Vec<FloorObject>, current: Vec<FloorObject>) {
        match self.cursor {
            None => {
                self.entries.clear();
                self.entries.push(before);
                self.entries.push(current);
            }
            Some(cursor) => {
                self.entries.truncate(cursor + 1);
                self.entries.push(current);
            }
        }
        while self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len().checked_sub(1);
        debug!(cursor = ?self.cursor, len = self.entries.len(), "history commit");
    }

    /// Step back one snapshot. `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<Vec<FloorObject>> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1).cloned()
    }

    /// Step forward one snapshot. `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<Vec<FloorObject>> {
        let next = self.cursor.map(|c| c + 1).filter(|&n| n < self.entries.len())?;
        self.cursor = Some(next);
        self.entries.get(next).cloned()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a gesture is collecting changes.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Active {
        /// The object list when the gesture started.
        before: Vec<FloorObject>,
        /// When set, the gesture ends on the first `poll` at or after this instant.
        deadline: Option<Instant>,
    },
}

/// Owns the scene and its history and turns gestures into undo steps.
#[derive(Debug, Clone)]
pub struct GestureController {
    scene: Scene,
    history: History,
    gesture: GestureState,
    debounce: Duration,
}

impl GestureController {
    #[must_use]
    pub fn new(history_depth: usize, debounce: Duration) -> Self {
        Self {
            scene: Scene::new(),
            history: History::new(history_depth),
            gesture: GestureState::Idle,
            debounce,
        }
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.gesture, GestureState::Active { .. })
    }

    /// Change the selection. Selection is not part of the history.
    pub fn select(&mut self, id: Option<ObjectId>) -> bool {
        self.scene.select(id)
    }

    /// Snapshot the scene and start collecting changes. Ignored while a
    /// gesture is already active.
    pub fn start_gesture(&mut self) {
        if self.is_active() {
            return;
        }
        debug!("gesture start");
        self.gesture = GestureState::Active { before: self.scene.objects().to_vec(), deadline: None };
    }

    /// Replace the object list.
    ///
    /// Outside a gesture the change is committed on its own.
    pub fn apply(&mut self, objects: Vec<FloorObject>) {
        if self.is_active() {
            self.scene.replace_all(objects);
            return;
        }
        self.start_gesture();
        self.scene.replace_all(objects);
        self.end_gesture();
    }

    /// Finish the active gesture and commit it. A gesture that left the
    /// object list as it found it records nothing. Returns whether a history
    /// entry was written.
    pub fn end_gesture(&mut self) -> bool {
        let GestureState::Active { before, .. } = std::mem::take(&mut self.gesture) else {
            return false;
        };
        if before.as_slice() == self.scene.objects() {
            debug!("gesture end without changes");
            return false;
        }
        debug!("gesture end");
        self.history.commit(before, self.scene.objects().to_vec());
        true
    }

    /// Extend a debounced gesture, starting one if needed. The gesture ends
    /// once `poll` is called at least one debounce interval after the last
    /// touch.
    pub fn touch(&mut self, now: Instant) {
        self.start_gesture();
        if let GestureState::Active { deadline, .. } = &mut self.gesture {
            *deadline = Some(now + self.debounce);
        }
    }

    /// End a debounced gesture whose deadline has passed. Returns whether a
    /// history entry was written.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.gesture {
            GestureState::Active { deadline: Some(deadline), .. } if now >= deadline => self.end_gesture(),
            _ => false,
        }
    }

    /// Restore the previous snapshot. An active gesture is committed first.
    /// Returns whether the scene changed.
    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        match self.history.undo() {
            Some(snapshot) => {
                self.scene.replace_all(snapshot);
                debug!(cursor = ?self.history.cursor(), "undo");
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot. An active gesture is committed first.
    /// Returns whether the scene changed.
    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        match self.history.redo() {
            Some(snapshot) => {
                self.scene.replace_all(snapshot);
                debug!(cursor = ?self.history.cursor(), "redo");
                true
            }
            None => false,
        }
    }
}
