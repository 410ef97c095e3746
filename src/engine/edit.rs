use std::collections::HashSet;

use crate::engine::entity::Position;

pub const EDIT_ON_STATUS: &str = "Edit Mode - press P again to export";
pub const EDIT_OFF_STATUS: &str = "Done with edit mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEvent {
    Entered,
    Exited,
}

/// Pointer painting of blocked tiles.
///
/// While editing, a pointer press marks its cell and starts a drag; every
/// cell entered during the drag is marked too. There is no eraser.
#[derive(Debug, Clone, Default)]
pub struct EditState {
    mode: EditMode,
    dragging: bool,
    marked: HashSet<Position>,
}

impl EditState {
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Cells marked during this edit session, for border highlighting.
    pub fn marked(&self) -> impl Iterator<Item = &Position> {
        self.marked.iter()
    }

    pub fn clear_highlights(&mut self) {
        self.marked.clear();
    }

    pub fn toggle(&mut self) -> EditEvent {
        match self.mode {
            EditMode::Normal => {
                self.mode = EditMode::Editing;
                EditEvent::Entered
            }
            EditMode::Editing => {
                self.mode = EditMode::Normal;
                self.dragging = false;
                self.marked.clear();
                EditEvent::Exited
            }
        }
    }

    /// Returns the cell to block, if the press lands while editing.
    pub fn pointer_down(&mut self, pos: Position) -> Option<Position> {
        if !self.is_editing() {
            return None;
        }
        self.dragging = true;
        self.marked.insert(pos);
        Some(pos)
    }

    pub fn pointer_enter(&mut self, pos: Position) -> Option<Position> {
        if !(self.is_editing() && self.dragging) {
            return None;
        }
        self.marked.insert(pos);
        Some(pos)
    }

    pub fn pointer_up(&mut self) {
        if self.is_editing() {
            self.dragging = false;
        }
    }
}
