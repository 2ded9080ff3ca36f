// SPDX-License-Identifier: MIT OR Apache-2.0
//! The rail store: ordered control points and the `t -> pose` function.
//!
//! Lookups by id never fail loudly. An id that is absent (typically a point
//! deleted from a list panel while the viewport still references it) turns
//! the operation into a no-op or an empty result.

use crate::control_point::{CameraPose, ControlPoint, ControlPointData, InterpolationMode, PointId};
use crate::math::{self, normalize_orientation, Interpolation};
use glam::{Quat, Vec3};
use std::collections::HashSet;

/// Ordered sequence of camera control points
#[derive(Debug, Clone, Default)]
pub struct CameraRail {
    /// Points in rail order
    points: Vec<ControlPoint>,
    /// Declared interpolation mode
    interpolation: InterpolationMode,
    /// Set once `dispose` has run
    disposed: bool,
}

impl CameraRail {
    /// Create an empty rail
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interpolation mode
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Declared interpolation mode
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Change the declared interpolation mode
    pub fn set_interpolation(&mut self, mode: InterpolationMode) {
        if !mode.is_implemented() {
            tracing::warn!("{} interpolation is not implemented, evaluating as linear", mode.name());
        }
        self.interpolation = mode;
    }

    /// Append a point to the end of the rail.
    ///
    /// Orientation defaults to identity.
    pub fn add_point(&mut self, position: Vec3, orientation: Option<Quat>) -> ControlPoint {
        let mut point = ControlPoint::new(position, orientation.unwrap_or(Quat::IDENTITY));
        while self.contains(&point.id) {
            point.id = PointId::new();
        }

        if self.rejects_mutation("add_point") {
            return point;
        }

        self.points.push(point.clone());
        tracing::debug!("Added control point {} at {:?}", point.id, point.position);
        point
    }

    /// Remove a point by id
    pub fn remove_point(&mut self, id: &PointId) -> Option<ControlPoint> {
        let index = self.index_of(id)?;
        let removed = self.points.remove(index);
        tracing::debug!("Removed control point {}", removed.id);
        Some(removed)
    }

    /// Update the given fields of a point in place.
    ///
    /// Returns whether a point was updated.
    pub fn update_point(&mut self, id: &PointId, position: Option<Vec3>, orientation: Option<Quat>) -> bool {
        if self.rejects_mutation("update_point") {
            return false;
        }
        let Some(point) = self.point_mut(id) else {
            return false;
        };
        if let Some(position) = position {
            point.position = position;
        }
        if let Some(orientation) = orientation {
            point.orientation = normalize_orientation(orientation);
        }
        true
    }

    /// Get a point by id
    pub fn get_point(&self, id: &PointId) -> Option<&ControlPoint> {
        self.points.iter().find(|p| &p.id == id)
    }

    /// Move a point to a new index, clamped to the rail length
    pub fn reorder_point(&mut self, id: &PointId, new_index: usize) {
        if self.rejects_mutation("reorder_point") {
            return;
        }
        let Some(index) = self.index_of(id) else {
            return;
        };
        let point = self.points.remove(index);
        let target = new_index.min(self.points.len());
        self.points.insert(target, point);
        tracing::debug!("Moved control point {} from {} to {}", id, index, target);
    }

    /// Evaluate the camera pose at progress `t`.
    ///
    /// `t` is clamped to `[0, 1]`; NaN counts as 0. Returns `None` when the
    /// rail has no points.
    pub fn get_pose(&self, t: f32) -> Option<CameraPose> {
        match self.points.as_slice() {
            [] => None,
            [only] => Some(only.pose()),
            points => {
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
                let segments = points.len() - 1;
                let u = t * segments as f32;
                let segment = (u.floor() as usize).min(segments - 1);
                let local = u - segment as f32;

                let a = &points[segment];
                let b = &points[segment + 1];

                // Catmull-Rom is declared but not implemented; every mode evaluates linearly.
                Some(CameraPose::new(
                    Interpolation::lerp_vec3(a.position, b.position, local),
                    Interpolation::slerp(a.orientation, b.orientation, local),
                ))
            }
        }
    }

    /// Positions along the rail for drawing the path line
    pub fn sample_path(&self, samples_per_segment: usize) -> Vec<Vec3> {
        let positions: Vec<Vec3> = self.points.iter().map(|p| p.position).collect();
        math::sample_polyline(&positions, samples_per_segment)
    }

    /// Plain-data snapshot of every point, in rail order
    pub fn to_serializable(&self) -> Vec<ControlPointData> {
        self.points.iter().map(ControlPoint::to_data).collect()
    }

    /// Replace every point with the given data, keeping ids and order.
    ///
    /// A repeated id is replaced with a fresh one so ids stay unique.
    pub fn from_serializable(&mut self, data: &[ControlPointData]) {
        if self.rejects_mutation("from_serializable") {
            return;
        }

        let mut seen = HashSet::with_capacity(data.len());
        self.points = data
            .iter()
            .map(|entry| {
                let mut point = ControlPoint::from_data(entry);
                if !seen.insert(point.id.clone()) {
                    let fresh = PointId::new();
                    tracing::warn!("Duplicate control point id {} on import, reassigned to {}", point.id, fresh);
                    point.id = fresh;
                    seen.insert(point.id.clone());
                }
                point
            })
            .collect();
    }

    /// Clear the rail. A disposed rail ignores further mutation.
    pub fn dispose(&mut self) {
        self.points.clear();
        self.disposed = true;
    }

    /// Whether `dispose` has been called
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Points in rail order
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Index of a point in rail order
    pub fn index_of(&self, id: &PointId) -> Option<usize> {
        self.points.iter().position(|p| &p.id == id)
    }

    /// Check if a point exists
    pub fn contains(&self, id: &PointId) -> bool {
        self.index_of(id).is_some()
    }

    /// Get point count
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the rail has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn point_mut(&mut self, id: &PointId) -> Option<&mut ControlPoint> {
        self.points.iter_mut().find(|p| &p.id == id)
    }

    fn rejects_mutation(&self, operation: &str) -> bool {
        if self.disposed {
            tracing::warn!("Ignoring {} on a disposed camera rail", operation);
        }
        self.disposed
    }
}
