// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer-driven editing of rail control points.
//!
//! [`RailInteraction`] turns pointer events into rail mutations:
//! - `Create` mode: a primary press places one point on a camera-facing
//!   plane through the origin, then the editor drops back to `Select`.
//! - `Select` mode: a press on a point's body starts a position drag, a
//!   press on its direction indicator starts a rotation drag, a press on
//!   empty space clears the selection.
//!
//! While a drag is active the camera's free-look controls are disabled;
//! releasing or leaving the viewport always re-enables them, even if the
//! dragged point was deleted in the meantime.

use crate::camera::ViewCamera;
use crate::commands::{CommandQueue, CommandSender, RailCommand};
use crate::picking::{DragPlane, Viewport};
use crate::project::EditorSettings;
use crate::state::{EditorMode, EditorState};
use crate::visuals::{HandlePart, VisualSync};
use camrail_rail::math::normalize_orientation;
use camrail_rail::PointId;
use glam::{Quat, Vec2, Vec3};

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (left) button
    Primary,
    /// Secondary (right) button
    Secondary,
    /// Middle button
    Middle,
}

/// Raw pointer input in viewport pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed
    Down {
        /// Pointer position
        position: Vec2,
        /// Button pressed
        button: PointerButton,
    },
    /// Pointer moved
    Move {
        /// Pointer position
        position: Vec2,
    },
    /// Button released
    Up {
        /// Pointer position
        position: Vec2,
        /// Button released
        button: PointerButton,
    },
    /// Pointer left the viewport
    Leave,
}

/// Drag sub-state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// Not dragging
    #[default]
    Idle,
    /// Moving a point across its drag plane
    DraggingPosition(PointId),
    /// Turning a point with pointer deltas
    DraggingRotation(PointId),
}

impl DragState {
    /// Point being dragged, if any
    pub fn point_id(&self) -> Option<&PointId> {
        match self {
            Self::Idle => None,
            Self::DraggingPosition(id) | Self::DraggingRotation(id) => Some(id),
        }
    }

    /// Check if a drag is active
    pub fn is_dragging(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Pointer interaction state machine for the rail viewport
#[derive(Debug)]
pub struct RailInteraction {
    /// Current drag
    drag: DragState,
    /// Plane the current position drag moves across
    drag_plane: Option<DragPlane>,
    /// Last pointer sample in device coordinates
    last_sample: Vec2,
    /// Viewport used to normalize pointer positions
    viewport: Viewport,
    /// Free-look mode owns the pointer
    free_look: bool,
    /// Radians per normalized viewport unit
    pub rotation_sensitivity: f32,
    /// Commands from outside the viewport
    commands: CommandQueue,
}

impl RailInteraction {
    /// Create an idle interaction for a viewport
    pub fn new(viewport: Viewport, settings: &EditorSettings) -> Self {
        Self {
            drag: DragState::Idle,
            drag_plane: None,
            last_sample: Vec2::ZERO,
            viewport,
            free_look: false,
            rotation_sensitivity: settings.rotation_sensitivity,
            commands: CommandQueue::new(),
        }
    }

    /// Current drag state
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Viewport used for pointer normalization
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the viewport size
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Handle for panels that need to command the viewport
    pub fn command_sender(&self) -> CommandSender {
        self.commands.sender()
    }

    /// Whether free-look mode currently owns the pointer
    pub fn is_free_look(&self) -> bool {
        self.free_look
    }

    /// Enter or leave free-look mode. Entering ends any active drag.
    pub fn set_free_look(&mut self, active: bool, camera: &mut impl ViewCamera) {
        if active {
            self.end_drag(camera);
        }
        self.free_look = active;
    }

    /// Apply queued commands
    pub fn process_commands(&mut self, state: &mut EditorState, visuals: &mut impl VisualSync) {
        for command in self.commands.drain() {
            apply_command(command, state, visuals);
        }
    }

    /// Handle one pointer event. Returns whether the event was consumed.
    pub fn handle_pointer<C, V>(
        &mut self,
        event: PointerEvent,
        state: &mut EditorState,
        camera: &mut C,
        visuals: &mut V,
    ) -> bool
    where
        C: ViewCamera,
        V: VisualSync,
    {
        self.process_commands(state, visuals);

        if self.free_look {
            return false;
        }

        match event {
            PointerEvent::Down { position, button } => {
                if button != PointerButton::Primary || self.drag.is_dragging() {
                    return false;
                }
                let ndc = self.viewport.to_ndc(position);
                match state.mode() {
                    EditorMode::Create => self.create_point(ndc, state, &*camera, visuals),
                    EditorMode::Select => self.begin_drag(ndc, state, camera, &*visuals),
                }
            }
            PointerEvent::Move { position } => {
                let ndc = self.viewport.to_ndc(position);
                match self.drag.clone() {
                    DragState::Idle => false,
                    DragState::DraggingPosition(id) => {
                        self.drag_position(&id, ndc, state, &*camera, visuals);
                        true
                    }
                    DragState::DraggingRotation(id) => {
                        self.drag_rotation(&id, ndc, state, visuals);
                        true
                    }
                }
            }
            PointerEvent::Up {
                button: PointerButton::Primary,
                ..
            }
            | PointerEvent::Leave => self.end_drag(camera),
            PointerEvent::Up { .. } => false,
        }
    }

    /// Place a point where the pointer ray meets a camera-facing plane through the origin
    fn create_point(
        &mut self,
        ndc: Vec2,
        state: &mut EditorState,
        camera: &impl ViewCamera,
        visuals: &mut impl VisualSync,
    ) -> bool {
        let ray = camera.ray_through(ndc);
        let plane = DragPlane::facing_camera(Vec3::ZERO, camera.forward());
        let Some(hit) = ray.intersect_plane(&plane) else {
            tracing::debug!("Create skipped, pointer ray misses the placement plane");
            return false;
        };

        let point = state.add_point(hit, Some(camera.orientation()));
        visuals.sync(state.rail.points());
        state.set_mode(EditorMode::Select);
        tracing::debug!("Created control point {} at {:?}", point.id, point.position);
        true
    }

    /// Pick a handle and start the matching drag, or clear the selection
    fn begin_drag(
        &mut self,
        ndc: Vec2,
        state: &mut EditorState,
        camera: &mut impl ViewCamera,
        visuals: &impl VisualSync,
    ) -> bool {
        let ray = camera.ray_through(ndc);
        let target = visuals
            .pick(&ray)
            .and_then(|hit| state.rail.get_point(&hit.point_id).map(|p| (hit, p.position)));

        let Some((hit, position)) = target else {
            state.select(None);
            return false;
        };

        state.select(Some(hit.point_id.clone()));
        self.drag_plane = Some(DragPlane::facing_camera(position, camera.forward()));
        self.last_sample = ndc;
        self.drag = match hit.part {
            HandlePart::Body => DragState::DraggingPosition(hit.point_id),
            HandlePart::DirectionIndicator => DragState::DraggingRotation(hit.point_id),
        };
        camera.set_controls_enabled(false);
        tracing::debug!("Started drag: {:?}", self.drag);
        true
    }

    fn drag_position(
        &mut self,
        id: &PointId,
        ndc: Vec2,
        state: &mut EditorState,
        camera: &impl ViewCamera,
        visuals: &mut impl VisualSync,
    ) {
        let Some(plane) = self.drag_plane else {
            return;
        };
        let Some(hit) = camera.ray_through(ndc).intersect_plane(&plane) else {
            return;
        };
        if state.move_point(id, hit) {
            visuals.sync(state.rail.points());
        }
    }

    fn drag_rotation(
        &mut self,
        id: &PointId,
        ndc: Vec2,
        state: &mut EditorState,
        visuals: &mut impl VisualSync,
    ) {
        let delta = ndc - self.last_sample;
        self.last_sample = ndc;

        let Some(current) = state.rail.get_point(id).map(|p| p.orientation) else {
            return;
        };
        let orientation = look_rotation(current, delta, self.rotation_sensitivity);
        if state.rotate_point(id, orientation) {
            visuals.sync(state.rail.points());
        }
    }

    /// Return to idle and hand the pointer back to the camera controls
    fn end_drag(&mut self, camera: &mut impl ViewCamera) -> bool {
        if !self.drag.is_dragging() {
            return false;
        }
        tracing::debug!("Finished drag: {:?}", self.drag);
        self.drag = DragState::Idle;
        self.drag_plane = None;
        camera.set_controls_enabled(true);
        true
    }
}

/// Apply a pointer delta to an orientation the way a look-around rig does.
///
/// Horizontal travel yaws around world up, vertical travel pitches around the
/// point's own right axis: `yaw * current * pitch`.
pub fn look_rotation(current: Quat, delta: Vec2, sensitivity: f32) -> Quat {
    let yaw = Quat::from_axis_angle(Vec3::Y, -delta.x * sensitivity);
    let pitch = Quat::from_axis_angle(Vec3::X, delta.y * sensitivity);
    normalize_orientation(yaw * current * pitch)
}

fn apply_command(command: RailCommand, state: &mut EditorState, visuals: &mut impl VisualSync) {
    match command {
        RailCommand::DeletePoint(id) => {
            if state.delete_point(&id) {
                visuals.sync(state.rail.points());
            }
        }
        RailCommand::SelectPoint(id) => {
            if state.rail.contains(&id) {
                state.select(Some(id));
            } else {
                tracing::warn!("Select ignored, no control point {}", id);
            }
        }
        RailCommand::ClearSelection => state.select(None),
        RailCommand::ReorderPoint { id, index } => {
            if state.reorder_point(&id, index) {
                visuals.sync(state.rail.points());
            }
        }
        RailCommand::SetMode(mode) => state.set_mode(mode),
    }
}
