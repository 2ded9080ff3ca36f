// SPDX-License-Identifier: MIT OR Apache-2.0
//! Viewport camera: the collaborator the rail editor casts rays through.

use crate::picking::Ray;
use camrail_rail::math;
use camrail_rail::CameraPose;
use glam::{Mat3, Quat, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

/// Pitch stays this far away from straight up/down
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// What the rail editor needs from the viewport camera.
///
/// The editor reads the camera and casts rays through it. The only thing it
/// ever changes is whether the free-look controls respond to the pointer.
pub trait ViewCamera {
    /// World-space camera position
    fn position(&self) -> Vec3;

    /// World-space camera orientation
    fn orientation(&self) -> Quat;

    /// Direction the camera looks along
    fn forward(&self) -> Vec3 {
        math::forward(self.orientation())
    }

    /// Ray from the camera through a point in device coordinates
    fn ray_through(&self, ndc: Vec2) -> Ray;

    /// Enable or disable the free-look controls
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Whether the free-look controls currently respond to input
    fn controls_enabled(&self) -> bool;
}

/// Orbit camera used by the editor viewport
#[derive(Debug, Clone)]
pub struct EditorCamera {
    /// Camera position
    pub position: Vec3,
    /// Camera target (look-at point)
    pub target: Vec3,
    /// World up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Orbit distance from target
    pub distance: f32,
    /// Orbit yaw angle in radians
    pub yaw: f32,
    /// Orbit pitch angle in radians
    pub pitch: f32,
    /// Rotation speed (radians per pixel)
    pub rotate_speed: f32,
    /// Zoom speed
    pub zoom_speed: f32,
    /// Whether orbit/zoom respond to input
    controls_enabled: bool,
}

impl Default for EditorCamera {
    fn default() -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60.0,
            aspect: 4.0 / 3.0,
            distance: 10.0,
            yaw: FRAC_PI_4,
            pitch: FRAC_PI_6,
            rotate_speed: 0.01,
            zoom_speed: 1.0,
            controls_enabled: true,
        };
        camera.update_position();
        camera
    }
}

impl EditorCamera {
    /// Create a new editor camera
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera looking from `position` at `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self::default();
        camera.set_orbit_from(position, target);
        camera
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        if !self.controls_enabled {
            return;
        }
        self.yaw += delta_x * self.rotate_speed;
        self.pitch = (self.pitch + delta_y * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_position();
    }

    /// Zoom the camera (change distance)
    pub fn zoom(&mut self, delta: f32) {
        if !self.controls_enabled {
            return;
        }
        self.distance *= 1.0 - delta * self.zoom_speed * 0.1;
        self.distance = self.distance.clamp(0.1, 10000.0);
        self.update_position();
    }

    /// Focus on a point
    pub fn focus(&mut self, target: Vec3, distance: Option<f32>) {
        self.target = target;
        if let Some(d) = distance {
            self.distance = d;
        }
        self.update_position();
    }

    /// Move the camera to a pose, keeping the orbit distance
    pub fn set_pose(&mut self, pose: &CameraPose) {
        let target = pose.position + math::forward(pose.orientation) * self.distance;
        self.set_orbit_from(pose.position, target);
    }

    /// Update camera position from orbit parameters
    fn update_position(&mut self) {
        let offset = Vec3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        );
        self.position = self.target + offset;
    }

    /// Derive orbit parameters from an eye and a target
    fn set_orbit_from(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        let distance = offset.length();
        if distance < 1e-6 {
            return;
        }

        self.target = target;
        self.distance = distance;
        self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = offset.x.atan2(offset.z);
        self.update_position();
    }

    /// Get the camera forward direction
    pub fn get_forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Get the camera right direction
    pub fn right(&self) -> Vec3 {
        self.get_forward().cross(self.up).normalize_or(Vec3::X)
    }

    /// Get the camera up direction (orthogonalized)
    pub fn camera_up(&self) -> Vec3 {
        self.right().cross(self.get_forward())
    }
}

impl ViewCamera for EditorCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> Quat {
        let basis = Mat3::from_cols(self.right(), self.camera_up(), -self.get_forward());
        math::normalize_orientation(Quat::from_mat3(&basis))
    }

    fn forward(&self) -> Vec3 {
        self.get_forward()
    }

    fn ray_through(&self, ndc: Vec2) -> Ray {
        let half_height = (self.fov.to_radians() * 0.5).tan();
        let half_width = half_height * self.aspect;

        let direction = self.get_forward()
            + self.right() * (ndc.x * half_width)
            + self.camera_up() * (ndc.y * half_height);
        Ray::new(self.position, direction)
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }
}
