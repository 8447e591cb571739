//! Undo/redo over full view-state snapshots.
//!
//! A snapshot captures the layer state of every view at once. Layer
//! pixel data is behind `Arc`, so snapshots are cheap to take and keep.

use teeforge_core::ViewMap;

use crate::editor::Editor;
use crate::view_state::ViewState;

/// One entry of the undo or redo stack.
#[derive(Clone)]
pub struct Snapshot {
    views: ViewMap<ViewState>,
}

impl Editor {
    /// Records the current state on the undo stack and clears the redo
    /// stack. Called right before every mutating operation.
    pub fn save_state(&mut self) {
        let snapshot = Snapshot {
            views: self.views().clone(),
        };
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Restores the most recent snapshot; the replaced state moves to
    /// the redo stack. Does nothing when there is nothing to undo.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.undo_stack.pop() else {
            return;
        };
        let current = Snapshot {
            views: self.views().clone(),
        };
        self.redo_stack.push(current);
        *self.views_mut() = snapshot.views;
        self.fix_selection();
    }

    /// Reapplies the most recently undone state.
    pub fn redo(&mut self) {
        let Some(snapshot) = self.redo_stack.pop() else {
            return;
        };
        let current = Snapshot {
            views: self.views().clone(),
        };
        self.undo_stack.push(current);
        *self.views_mut() = snapshot.views;
        self.fix_selection();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drops a selection that no longer refers to a live layer after a
    /// history jump.
    fn fix_selection(&mut self) {
        if let Some(id) = self.selection() {
            if !self.current().exists(id) {
                self.set_selection(None);
            }
        }
    }
}
