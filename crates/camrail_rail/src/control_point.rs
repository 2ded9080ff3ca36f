// SPDX-License-Identifier: MIT OR Apache-2.0
//! Control point definitions for the camera rail.

use crate::math::normalize_orientation;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a control point.
///
/// Ids are strings so that imported documents keep whatever ids they were
/// written with; freshly created points get a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    /// Create a new random point ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PointId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Interpolation mode used between control points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationMode {
    /// Linear position, spherical orientation
    #[default]
    Linear,
    /// Reserved; evaluated as linear
    CatmullRom,
}

impl InterpolationMode {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::CatmullRom => "Catmull-Rom",
        }
    }

    /// Whether pose evaluation implements this mode natively
    pub fn is_implemented(&self) -> bool {
        matches!(self, Self::Linear)
    }
}

/// A camera pose: where the camera sits and which way it looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// World-space position
    pub position: Vec3,
    /// Unit orientation
    pub orientation: Quat,
}

impl CameraPose {
    /// Create a new pose
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// A control point on the rail
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    /// Unique point ID
    pub id: PointId,
    /// World-space position
    pub position: Vec3,
    /// Unit orientation
    pub orientation: Quat,
}

impl ControlPoint {
    /// Create a control point with a fresh id
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self::with_id(PointId::new(), position, orientation)
    }

    /// Create a control point with a given id
    pub fn with_id(id: PointId, position: Vec3, orientation: Quat) -> Self {
        Self {
            id,
            position,
            orientation: normalize_orientation(orientation),
        }
    }

    /// The pose stored at this point
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.orientation)
    }

    /// Plain-data snapshot of this point
    pub fn to_data(&self) -> ControlPointData {
        ControlPointData {
            id: self.id.as_str().to_owned(),
            position: self.position.into(),
            orientation: self.orientation.into(),
        }
    }

    /// Rebuild a point from plain data, renormalizing its orientation
    pub fn from_data(data: &ControlPointData) -> Self {
        Self::with_id(
            PointId::from(data.id.as_str()),
            data.position.into(),
            data.orientation.into(),
        )
    }
}

/// Plain `{x, y, z}` vector used in exported documents
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3Data {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl From<Vec3> for Vec3Data {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3Data> for Vec3 {
    fn from(v: Vec3Data) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Plain `{x, y, z, w}` quaternion used in exported documents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatData {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Default for QuatData {
    fn default() -> Self {
        Quat::IDENTITY.into()
    }
}

impl From<Quat> for QuatData {
    fn from(q: Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<QuatData> for Quat {
    fn from(q: QuatData) -> Self {
        Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

/// Plain-data mirror of a [`ControlPoint`], shared with nothing inside the rail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPointData {
    /// Point id
    pub id: String,
    /// Position
    pub position: Vec3Data,
    /// Orientation quaternion
    #[serde(default)]
    pub orientation: QuatData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ids_are_unique() {
        let a = PointId::new();
        let b = PointId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_interpolation_mode_names() {
        assert_eq!(serde_json::to_string(&InterpolationMode::Linear).unwrap(), "\"linear\"");
        assert_eq!(
            serde_json::to_string(&InterpolationMode::CatmullRom).unwrap(),
            "\"catmull-rom\""
        );
        let mode: InterpolationMode = serde_json::from_str("\"catmull-rom\"").unwrap();
        assert_eq!(mode, InterpolationMode::CatmullRom);
        assert!(!mode.is_implemented());
    }

    #[test]
    fn test_point_normalizes_orientation() {
        let point = ControlPoint::new(Vec3::ZERO, Quat::from_xyzw(0.0, 0.0, 0.0, 3.0));
        assert!((point.orientation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_data_json_shape() {
        let point = ControlPoint::with_id(PointId::from("cp-1"), Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let json = serde_json::to_value(point.to_data()).unwrap();
        assert_eq!(json["id"], "cp-1");
        assert_eq!(json["position"]["y"], 2.0);
        assert_eq!(json["orientation"]["w"], 1.0);
    }

    #[test]
    fn test_missing_orientation_defaults_to_identity() {
        let data: ControlPointData =
            serde_json::from_str(r#"{"id":"a","position":{"x":0,"y":0,"z":0}}"#).unwrap();
        assert_eq!(ControlPoint::from_data(&data).orientation, Quat::IDENTITY);
    }
}
