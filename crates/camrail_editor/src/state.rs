// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor state management.
//!
//! This module contains the rail being edited, the editor-wide mode, the
//! current selection, and the queue of change notifications for the host UI.

use camrail_rail::{CameraRail, ControlPoint, PointId, RailDocument};
use glam::{Quat, Vec3};
use std::path::PathBuf;

/// What a primary pointer-down does in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Pick, drag and rotate existing points
    #[default]
    Select,
    /// Place one new point, then return to `Select`
    Create,
}

impl EditorMode {
    /// Get the name of this mode
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Create => "Create",
        }
    }
}

/// Change notifications for the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Selection changed
    SelectionChanged(Option<PointId>),
    /// Point appended to the rail
    PointAdded(PointId),
    /// Point removed from the rail
    PointRemoved(PointId),
    /// Point position changed
    PointMoved(PointId),
    /// Point orientation changed
    PointRotated(PointId),
    /// Point moved to another index
    PointReordered(PointId),
    /// Editor mode changed
    ModeChanged(EditorMode),
}

/// Main editor state
pub struct EditorState {
    /// The rail being edited
    pub rail: CameraRail,

    /// Scene the rail belongs to
    pub scene_url: String,

    /// Current document file path
    pub document_path: Option<PathBuf>,

    /// Whether the rail has unsaved changes
    pub dirty: bool,

    /// Current mode
    mode: EditorMode,

    /// Currently selected point
    selected: Option<PointId>,

    /// Pending notifications
    events: Vec<EditorEvent>,
}

impl EditorState {
    /// Create an editor state for a scene
    pub fn new(scene_url: impl Into<String>) -> Self {
        Self {
            rail: CameraRail::new(),
            scene_url: scene_url.into(),
            document_path: None,
            dirty: false,
            mode: EditorMode::Select,
            selected: None,
            events: Vec::new(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switch mode
    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        tracing::debug!("Editor mode: {}", mode.name());
        self.events.push(EditorEvent::ModeChanged(mode));
    }

    /// Currently selected point
    pub fn selected(&self) -> Option<&PointId> {
        self.selected.as_ref()
    }

    /// Change the selection
    pub fn select(&mut self, id: Option<PointId>) {
        if self.selected == id {
            return;
        }
        match &id {
            Some(id) => tracing::debug!("Selected control point {}", id),
            None => tracing::debug!("Cleared selection"),
        }
        self.selected = id.clone();
        self.events.push(EditorEvent::SelectionChanged(id));
    }

    /// Append a point to the rail
    pub fn add_point(&mut self, position: Vec3, orientation: Option<Quat>) -> ControlPoint {
        let point = self.rail.add_point(position, orientation);
        if self.rail.contains(&point.id) {
            self.dirty = true;
            self.events.push(EditorEvent::PointAdded(point.id.clone()));
        }
        point
    }

    /// Remove a point, dropping it from the selection
    pub fn delete_point(&mut self, id: &PointId) -> bool {
        if self.rail.remove_point(id).is_none() {
            tracing::debug!("Delete ignored, no control point {}", id);
            return false;
        }
        if self.selected.as_ref() == Some(id) {
            self.select(None);
        }
        self.dirty = true;
        self.events.push(EditorEvent::PointRemoved(id.clone()));
        true
    }

    /// Delete the selected point
    pub fn delete_selected(&mut self) -> bool {
        match self.selected.clone() {
            Some(id) => self.delete_point(&id),
            None => false,
        }
    }

    /// Move a point
    pub fn move_point(&mut self, id: &PointId, position: Vec3) -> bool {
        let updated = self.rail.update_point(id, Some(position), None);
        if updated {
            self.dirty = true;
            self.events.push(EditorEvent::PointMoved(id.clone()));
        }
        updated
    }

    /// Re-orient a point
    pub fn rotate_point(&mut self, id: &PointId, orientation: Quat) -> bool {
        let updated = self.rail.update_point(id, None, Some(orientation));
        if updated {
            self.dirty = true;
            self.events.push(EditorEvent::PointRotated(id.clone()));
        }
        updated
    }

    /// Move a point to another index in rail order
    pub fn reorder_point(&mut self, id: &PointId, index: usize) -> bool {
        let before = self.rail.index_of(id);
        self.rail.reorder_point(id, index);
        let after = self.rail.index_of(id);
        if before.is_none() || before == after {
            return false;
        }
        self.dirty = true;
        self.events.push(EditorEvent::PointReordered(id.clone()));
        true
    }

    /// Snapshot the rail as an export record
    pub fn to_document(&self) -> RailDocument {
        RailDocument::from_rail(&self.rail, self.scene_url.clone())
    }

    /// Replace the rail with a document's contents
    pub fn load_document(&mut self, document: &RailDocument) {
        self.rail = document.to_rail();
        self.scene_url = document.scene.url.clone();
        self.select(None);
        self.dirty = false;
    }

    /// Take pending notifications
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if the rail has unsaved changes
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_events_only_on_change() {
        let mut state = EditorState::default();
        let id = state.add_point(Vec3::ZERO, None).id;
        state.take_events();

        state.select(Some(id.clone()));
        state.select(Some(id.clone()));
        state.select(None);

        assert_eq!(
            state.take_events(),
            vec![EditorEvent::SelectionChanged(Some(id)), EditorEvent::SelectionChanged(None)]
        );
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut state = EditorState::default();
        let id = state.add_point(Vec3::ZERO, None).id;
        state.select(Some(id.clone()));

        assert!(state.delete_selected());
        assert!(state.selected().is_none());
        assert!(state.rail.is_empty());
        assert!(!state.delete_point(&id));
    }

    #[test]
    fn test_missing_point_updates_are_silent() {
        let mut state = EditorState::default();
        let missing = PointId::from("gone");
        assert!(!state.move_point(&missing, Vec3::ONE));
        assert!(!state.rotate_point(&missing, Quat::IDENTITY));
        assert!(!state.reorder_point(&missing, 0));
        assert!(state.take_events().is_empty());
        assert!(!state.has_unsaved_changes());
    }

    #[test]
    fn test_mode_change_event() {
        let mut state = EditorState::default();
        state.set_mode(EditorMode::Create);
        state.set_mode(EditorMode::Create);
        assert_eq!(state.take_events(), vec![EditorEvent::ModeChanged(EditorMode::Create)]);
    }

    #[test]
    fn test_document_round_trip() {
        let mut state = EditorState::new("scenes/hall.glb");
        state.add_point(Vec3::ZERO, None);
        state.add_point(Vec3::X, None);
        let document = state.to_document();

        let mut other = EditorState::default();
        other.load_document(&document);
        assert_eq!(other.scene_url, "scenes/hall.glb");
        assert_eq!(other.rail.to_serializable(), state.rail.to_serializable());
        assert!(!other.has_unsaved_changes());
    }
}
