// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end editing session: create, move, rotate, delete, export.

use camrail_editor::{
    DragState, EditorCamera, EditorEvent, EditorMode, EditorSettings, EditorState, PointerButton,
    PointerEvent, RailInteraction, RailVisuals, ViewCamera, Viewport, VisualSync,
};
use camrail_rail::math;
use camrail_rail::{RailDocument, DOCUMENT_VERSION};
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

const SIZE: f32 = 400.0;
const CAMERA_DISTANCE: f32 = 10.0;

struct Session {
    interaction: RailInteraction,
    state: EditorState,
    camera: EditorCamera,
    visuals: RailVisuals,
}

impl Session {
    fn new() -> Self {
        let settings = EditorSettings::default();
        let mut camera =
            EditorCamera::looking_at(Vec3::new(0.0, 0.0, CAMERA_DISTANCE), Vec3::ZERO);
        camera.aspect = 1.0;
        Self {
            interaction: RailInteraction::new(Viewport::new(SIZE, SIZE), &settings),
            state: EditorState::new("scenes/courtyard.glb"),
            camera,
            visuals: RailVisuals::new(&settings),
        }
    }

    fn send(&mut self, event: PointerEvent) -> bool {
        self.interaction
            .handle_pointer(event, &mut self.state, &mut self.camera, &mut self.visuals)
    }

    fn press(&mut self, x: f32, y: f32) -> bool {
        self.send(PointerEvent::Down {
            position: Vec2::new(x, y),
            button: PointerButton::Primary,
        })
    }

    fn release(&mut self, x: f32, y: f32) -> bool {
        self.send(PointerEvent::Up {
            position: Vec2::new(x, y),
            button: PointerButton::Primary,
        })
    }

    /// Pixel x of a world point on the z = 0 plane
    fn pixel_x(&self, world_x: f32) -> f32 {
        let half_extent = (self.camera.fov.to_radians() * 0.5).tan() * CAMERA_DISTANCE;
        (world_x / half_extent + 1.0) * SIZE * 0.5
    }
}

#[test]
fn test_full_editing_session() {
    let mut s = Session::new();

    // Two points from Create mode, one click each
    s.state.set_mode(EditorMode::Create);
    assert!(s.press(200.0, 200.0));
    s.release(200.0, 200.0);
    assert_eq!(s.state.mode(), EditorMode::Select);

    s.state.set_mode(EditorMode::Create);
    assert!(s.press(300.0, 200.0));
    s.release(300.0, 200.0);

    assert_eq!(s.state.rail.len(), 2);
    assert_eq!(s.visuals.handle_count(), 2);
    assert_eq!(s.visuals.path(), s.state.rail.sample_path(s.visuals.path_samples).as_slice());
    let first = s.state.rail.points()[0].id.clone();
    let second = s.state.rail.points()[1].id.clone();
    assert!(s.state.rail.points()[1].position.x > 0.0);
    assert!(math::same_rotation(
        s.state.rail.points()[0].orientation,
        s.camera.orientation(),
        1e-5
    ));

    // Drag the first point upward by its body
    assert!(s.press(200.0, 200.0));
    assert_eq!(*s.interaction.drag_state(), DragState::DraggingPosition(first.clone()));
    assert!(!s.camera.controls_enabled());
    s.send(PointerEvent::Move {
        position: Vec2::new(200.0, 120.0),
    });
    assert!(s.release(200.0, 120.0));
    assert!(s.camera.controls_enabled());

    let moved = s.state.rail.get_point(&first).unwrap();
    assert!(moved.position.y > 0.0);
    assert!(moved.position.x.abs() < 1e-4);
    assert!(moved.position.z.abs() < 1e-4);

    // Turn the second point to face +X, then rotate it by its arrow
    s.state.rotate_point(&second, Quat::from_rotation_y(-FRAC_PI_2));
    s.visuals.sync(s.state.rail.points());
    let (start, end) = s
        .visuals
        .handle(&second)
        .unwrap()
        .indicator_segment(s.visuals.body_radius, s.visuals.indicator_length);
    let arrow_x = s.pixel_x(((start + end) * 0.5).x);

    let before = s.state.rail.get_point(&second).unwrap().clone();
    assert!(s.press(arrow_x, 200.0));
    assert_eq!(*s.interaction.drag_state(), DragState::DraggingRotation(second.clone()));
    s.send(PointerEvent::Move {
        position: Vec2::new(arrow_x + 30.0, 170.0),
    });
    s.send(PointerEvent::Leave);
    assert!(s.camera.controls_enabled());

    let rotated = s.state.rail.get_point(&second).unwrap().clone();
    assert_eq!(rotated.position, before.position);
    assert!(!math::same_rotation(rotated.orientation, before.orientation, 1e-6));

    // Delete the first point from outside the viewport
    let sender = s.interaction.command_sender();
    assert!(sender.delete_point(first.clone()));
    s.send(PointerEvent::Move {
        position: Vec2::new(10.0, 10.0),
    });
    assert_eq!(s.state.rail.len(), 1);
    assert!(s.visuals.handle(&first).is_none());

    let events = s.state.take_events();
    assert!(events.contains(&EditorEvent::PointAdded(first.clone())));
    assert!(events.contains(&EditorEvent::PointMoved(first.clone())));
    assert!(events.contains(&EditorEvent::PointRotated(second.clone())));
    assert!(events.contains(&EditorEvent::PointRemoved(first)));

    // Export and read the record back
    let json = s.state.to_document().to_json().unwrap();
    assert!(json.contains("controlPoints"));
    let document = RailDocument::from_json(&json).unwrap();
    assert_eq!(document.version, DOCUMENT_VERSION);
    assert_eq!(document.scene.url, "scenes/courtyard.glb");

    let rail = document.to_rail();
    assert_eq!(rail.len(), 1);
    let restored = rail.get_point(&second).unwrap();
    assert!(restored.position.abs_diff_eq(rotated.position, 1e-6));
    assert!(math::same_rotation(restored.orientation, rotated.orientation, 1e-6));

    let pose = rail.get_pose(0.5).unwrap();
    assert_eq!(pose.position, restored.position);
}

#[test]
fn test_session_with_free_look_between_edits() {
    let mut s = Session::new();
    s.state.set_mode(EditorMode::Create);
    s.press(200.0, 200.0);

    s.interaction.set_free_look(true, &mut s.camera);
    assert!(!s.press(200.0, 200.0));
    assert_eq!(*s.interaction.drag_state(), DragState::Idle);

    s.interaction.set_free_look(false, &mut s.camera);
    assert!(s.press(200.0, 200.0));
    assert!(s.interaction.drag_state().is_dragging());
    s.release(200.0, 200.0);
    assert_eq!(s.state.rail.len(), 1);
}
