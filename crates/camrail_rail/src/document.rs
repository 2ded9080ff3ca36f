// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export record for a camera rail.
//!
//! A [`RailDocument`] is materialized on demand from a [`CameraRail`] and is
//! never kept in sync with it afterwards. On disk it is pretty-printed JSON:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "scene": { "url": "scenes/atrium.glb" },
//!   "rail": {
//!     "controlPoints": [
//!       { "id": "...", "position": { "x": 0, "y": 1, "z": 5 }, "orientation": { "x": 0, "y": 0, "z": 0, "w": 1 } }
//!     ],
//!     "interpolation": "linear"
//!   }
//! }
//! ```

use crate::control_point::{ControlPointData, InterpolationMode};
use crate::error::{RailError, Result};
use crate::rail::CameraRail;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current rail document format version
pub const DOCUMENT_VERSION: &str = "1.0";

/// Conventional extension for rail documents
pub const DOCUMENT_EXTENSION: &str = "rail.json";

/// Scene the rail was authored against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneReference {
    /// Scene asset location
    pub url: String,
}

/// Serialized rail contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailData {
    /// Control points in rail order
    pub control_points: Vec<ControlPointData>,
    /// Interpolation mode
    #[serde(default)]
    pub interpolation: InterpolationMode,
}

/// Persisted/exchanged form of a camera rail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailDocument {
    /// Format version
    pub version: String,
    /// Scene reference
    pub scene: SceneReference,
    /// Rail contents
    pub rail: RailData,
}

impl RailDocument {
    /// Snapshot a rail into a document
    pub fn from_rail(rail: &CameraRail, scene_url: impl Into<String>) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            scene: SceneReference { url: scene_url.into() },
            rail: RailData {
                control_points: rail.to_serializable(),
                interpolation: rail.interpolation(),
            },
        }
    }

    /// Build a fresh rail from this document
    pub fn to_rail(&self) -> CameraRail {
        let mut rail = CameraRail::new().with_interpolation(self.rail.interpolation);
        rail.from_serializable(&self.rail.control_points);
        rail
    }

    /// Consume the document into a rail
    pub fn into_rail(self) -> CameraRail {
        self.to_rail()
    }

    /// Number of control points
    pub fn point_count(&self) -> usize {
        self.rail.control_points.len()
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON, rejecting unknown versions
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.check_version()?;
        Ok(document)
    }

    /// Write to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Saved rail document ({} points) to {:?}", self.point_count(), path);
        Ok(())
    }

    /// Read from a file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let document = Self::from_json(&json)?;
        tracing::info!("Loaded rail document ({} points) from {:?}", document.point_count(), path);
        Ok(document)
    }

    fn check_version(&self) -> Result<()> {
        if self.version != DOCUMENT_VERSION {
            return Err(RailError::UnsupportedVersion {
                found: self.version.clone(),
                expected: DOCUMENT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn sample_rail() -> CameraRail {
        let mut rail = CameraRail::new();
        rail.add_point(Vec3::new(0.0, 1.0, 5.0), None);
        rail.add_point(Vec3::new(3.0, 1.0, 2.0), Some(Quat::from_rotation_y(0.5)));
        rail
    }

    #[test]
    fn test_document_json_layout() {
        let document = RailDocument::from_rail(&sample_rail(), "scenes/atrium.glb");
        let value: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();

        assert_eq!(value["version"], "1.0");
        assert_eq!(value["scene"]["url"], "scenes/atrium.glb");
        assert_eq!(value["rail"]["interpolation"], "linear");
        assert_eq!(value["rail"]["controlPoints"].as_array().unwrap().len(), 2);
        assert_eq!(value["rail"]["controlPoints"][0]["position"]["z"], 5.0);
    }

    #[test]
    fn test_document_restores_rail() {
        let rail = sample_rail();
        let json = RailDocument::from_rail(&rail, "scene.glb").to_json().unwrap();
        let restored = RailDocument::from_json(&json).unwrap().into_rail();

        assert_eq!(restored.len(), rail.len());
        for (a, b) in rail.points().iter().zip(restored.points()) {
            assert_eq!(a.id, b.id);
            assert!(a.position.abs_diff_eq(b.position, 1e-6));
        }
    }

    #[test]
    fn test_catmull_rom_round_trips() {
        let rail = sample_rail().with_interpolation(InterpolationMode::CatmullRom);
        let json = RailDocument::from_rail(&rail, "").to_json().unwrap();
        assert!(json.contains("\"catmull-rom\""));
        let restored = RailDocument::from_json(&json).unwrap().to_rail();
        assert_eq!(restored.interpolation(), InterpolationMode::CatmullRom);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut document = RailDocument::from_rail(&sample_rail(), "");
        document.version = "2.0".to_string();
        let json = serde_json::to_string(&document).unwrap();

        let err = RailDocument::from_json(&json).unwrap_err();
        assert!(matches!(err, RailError::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(RailDocument::from_json("{ not json"), Err(RailError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("camrail-doc-{}.{}", uuid::Uuid::new_v4(), DOCUMENT_EXTENSION));
        let document = RailDocument::from_rail(&sample_rail(), "scene.glb");

        document.save(&path).unwrap();
        let loaded = RailDocument::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, document);
    }
}
