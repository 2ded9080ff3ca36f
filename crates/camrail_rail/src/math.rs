// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpolation, path sampling and orientation helpers shared by the rail
//! and the editor.
//!
//! Orientations follow the camera convention: an identity orientation looks
//! down -Z with +Y up and +X to the right.

use glam::{Quat, Vec3};

/// Dot products above this are treated as "same rotation" and lerped
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two positions.
    ///
    /// `t == 0` and `t == 1` return the endpoints bit-for-bit.
    pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
        if t <= 0.0 {
            return a;
        }
        if t >= 1.0 {
            return b;
        }
        a.lerp(b, t)
    }

    /// Shortest-path spherical linear interpolation for unit quaternions.
    ///
    /// `t == 0` and `t == 1` return the endpoints unchanged so that rail
    /// segments meet exactly at shared control points.
    pub fn slerp(a: Quat, b: Quat, t: f32) -> Quat {
        if t <= 0.0 {
            return a;
        }
        if t >= 1.0 {
            return b;
        }

        let mut dot = a.dot(b);

        // Handle opposite quaternions
        let b = if dot < 0.0 {
            dot = -dot;
            -b
        } else {
            b
        };

        // Use lerp for very close quaternions
        if dot > SLERP_LINEAR_THRESHOLD {
            return normalize_orientation(a.lerp(b, t));
        }

        let theta_0 = dot.acos();
        let theta = theta_0 * t;
        let sin_theta_0 = theta_0.sin();

        let s0 = (theta_0 - theta).sin() / sin_theta_0;
        let s1 = theta.sin() / sin_theta_0;

        normalize_orientation(a * s0 + b * s1)
    }
}

/// Polyline through `positions` with `samples_per_segment` evenly spaced
/// steps per segment. Every input position appears exactly in the output.
pub fn sample_polyline(positions: &[Vec3], samples_per_segment: usize) -> Vec<Vec3> {
    let Some(first) = positions.first() else {
        return Vec::new();
    };
    let steps = samples_per_segment.max(1);

    let mut path = Vec::with_capacity((positions.len() - 1) * steps + 1);
    path.push(*first);
    for pair in positions.windows(2) {
        for step in 1..=steps {
            path.push(Interpolation::lerp_vec3(pair[0], pair[1], step as f32 / steps as f32));
        }
    }
    path
}

/// Renormalize an orientation, falling back to identity when degenerate
pub fn normalize_orientation(q: Quat) -> Quat {
    let len_sq = q.length_squared();
    if !len_sq.is_finite() || len_sq < 1e-12 {
        return Quat::IDENTITY;
    }
    q / len_sq.sqrt()
}

/// Direction an orientation looks along
pub fn forward(orientation: Quat) -> Vec3 {
    orientation * Vec3::NEG_Z
}

/// Equality of two rotations, treating `q` and `-q` as the same rotation
pub fn same_rotation(a: Quat, b: Quat, epsilon: f32) -> bool {
    a.dot(b).abs() >= 1.0 - epsilon
}
