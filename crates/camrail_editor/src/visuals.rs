// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual representation of control points and the path line.
//!
//! The interaction code only talks to [`VisualSync`]: after every rail
//! mutation it hands over the full ordered point list, and it asks the
//! visuals which handle (if any) a ray hits. [`RailVisuals`] is the headless
//! implementation the editor ships with: it tracks one [`PointHandle`] per
//! point plus the path polyline, which a renderer can draw as-is.

use crate::picking::Ray;
use crate::project::EditorSettings;
use camrail_rail::math;
use camrail_rail::{ControlPoint, PointId};
use glam::{Quat, Vec3};
use indexmap::IndexMap;

/// Which part of a point handle was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePart {
    /// The sphere at the point position; dragging it moves the point
    Body,
    /// The arrow along the point's view direction; dragging it rotates the point
    DirectionIndicator,
}

/// Result of picking against the handles
#[derive(Debug, Clone, PartialEq)]
pub struct HandleHit {
    /// Point the handle belongs to
    pub point_id: PointId,
    /// Part of the handle that was hit
    pub part: HandlePart,
    /// Distance along the ray
    pub distance: f32,
}

/// Keeps per-point visuals and the path line in step with the rail
pub trait VisualSync {
    /// Mirror the current ordered point list
    fn sync(&mut self, points: &[ControlPoint]);

    /// Nearest handle hit by a ray
    fn pick(&self, ray: &Ray) -> Option<HandleHit>;
}

/// Hit volumes for one control point
#[derive(Debug, Clone, PartialEq)]
pub struct PointHandle {
    /// Body sphere center
    pub position: Vec3,
    /// Point orientation
    pub orientation: Quat,
    /// Index in rail order
    pub index: usize,
}

impl PointHandle {
    /// Direction indicator segment, starting at the body surface
    pub fn indicator_segment(&self, body_radius: f32, length: f32) -> (Vec3, Vec3) {
        let forward = math::forward(self.orientation);
        let start = self.position + forward * body_radius;
        (start, start + forward * length)
    }
}

/// Counts from the most recent sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Handles created
    pub created: usize,
    /// Handles updated in place
    pub updated: usize,
    /// Handles destroyed
    pub removed: usize,
}

/// Headless handle cache and path line
#[derive(Debug, Clone)]
pub struct RailVisuals {
    /// Handles in rail order
    handles: IndexMap<PointId, PointHandle>,
    /// Path polyline
    path: Vec<Vec3>,
    /// Body sphere radius
    pub body_radius: f32,
    /// Direction indicator length
    pub indicator_length: f32,
    /// Direction indicator radius
    pub indicator_radius: f32,
    /// Polyline samples per segment
    pub path_samples: usize,
    /// Stats from the last sync
    last_sync: SyncStats,
    /// Total number of syncs
    sync_count: u64,
}

impl RailVisuals {
    /// Create empty visuals sized by the editor settings
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            handles: IndexMap::new(),
            path: Vec::new(),
            body_radius: settings.handle_radius,
            indicator_length: settings.indicator_length,
            indicator_radius: settings.indicator_radius,
            path_samples: settings.path_samples_per_segment.max(1),
            last_sync: SyncStats::default(),
            sync_count: 0,
        }
    }

    /// Handle for a point
    pub fn handle(&self, id: &PointId) -> Option<&PointHandle> {
        self.handles.get(id)
    }

    /// All handles in rail order
    pub fn handles(&self) -> impl Iterator<Item = (&PointId, &PointHandle)> {
        self.handles.iter()
    }

    /// Number of live handles
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// Path polyline
    pub fn path(&self) -> &[Vec3] {
        &self.path
    }

    /// Stats from the last sync
    pub fn last_sync(&self) -> SyncStats {
        self.last_sync
    }

    /// Total number of syncs
    pub fn sync_count(&self) -> u64 {
        self.sync_count
    }

    fn rebuild_path(&mut self) {
        let positions: Vec<Vec3> = self.handles.values().map(|h| h.position).collect();
        self.path = math::sample_polyline(&positions, self.path_samples);
    }
}

impl Default for RailVisuals {
    fn default() -> Self {
        Self::new(&EditorSettings::default())
    }
}

impl VisualSync for RailVisuals {
    fn sync(&mut self, points: &[ControlPoint]) {
        let mut stats = SyncStats::default();

        let before = self.handles.len();
        self.handles.retain(|id, _| points.iter().any(|p| &p.id == id));
        stats.removed = before - self.handles.len();

        let mut synced = IndexMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            let handle = PointHandle {
                position: point.position,
                orientation: point.orientation,
                index,
            };
            if self.handles.swap_remove(&point.id).is_some() {
                stats.updated += 1;
            } else {
                stats.created += 1;
            }
            synced.insert(point.id.clone(), handle);
        }
        self.handles = synced;

        self.rebuild_path();
        self.last_sync = stats;
        self.sync_count += 1;
    }

    fn pick(&self, ray: &Ray) -> Option<HandleHit> {
        let mut best: Option<HandleHit> = None;

        for (id, handle) in &self.handles {
            let body = ray
                .intersect_sphere(handle.position, self.body_radius)
                .map(|d| (HandlePart::Body, d));

            let (start, end) = handle.indicator_segment(self.body_radius, self.indicator_length);
            let indicator = ray
                .intersect_capsule(start, end, self.indicator_radius)
                .map(|d| (HandlePart::DirectionIndicator, d));

            for (part, distance) in body.into_iter().chain(indicator) {
                if best.as_ref().map_or(true, |b| distance < b.distance) {
                    best = Some(HandleHit {
                        point_id: id.clone(),
                        part,
                        distance,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, position: Vec3) -> ControlPoint {
        ControlPoint::with_id(PointId::from(id), position, Quat::IDENTITY)
    }

    #[test]
    fn test_sync_creates_updates_and_removes() {
        let mut visuals = RailVisuals::default();

        visuals.sync(&[point("a", Vec3::ZERO), point("b", Vec3::X)]);
        assert_eq!(visuals.last_sync(), SyncStats { created: 2, updated: 0, removed: 0 });

        visuals.sync(&[point("b", Vec3::Y), point("c", Vec3::Z)]);
        assert_eq!(visuals.last_sync(), SyncStats { created: 1, updated: 1, removed: 1 });
        assert_eq!(visuals.handle_count(), 2);
        assert_eq!(visuals.handle(&PointId::from("b")).unwrap().position, Vec3::Y);
        assert_eq!(visuals.handle(&PointId::from("b")).unwrap().index, 0);
        assert!(visuals.handle(&PointId::from("a")).is_none());
        assert_eq!(visuals.sync_count(), 2);
    }

    #[test]
    fn test_path_follows_rail_order() {
        let mut visuals = RailVisuals::default();
        visuals.path_samples = 2;
        visuals.sync(&[point("a", Vec3::ZERO), point("b", Vec3::new(2.0, 0.0, 0.0))]);
        assert_eq!(visuals.path(), &[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)]);

        visuals.sync(&[point("a", Vec3::ZERO)]);
        assert_eq!(visuals.path(), &[Vec3::ZERO]);

        visuals.sync(&[]);
        assert!(visuals.path().is_empty());
    }

    #[test]
    fn test_pick_body() {
        let mut visuals = RailVisuals::default();
        visuals.sync(&[point("a", Vec3::ZERO), point("b", Vec3::new(5.0, 0.0, 0.0))]);

        // Looking straight down at "b"
        let ray = Ray::new(Vec3::new(5.0, 10.0, 0.0), Vec3::NEG_Y);
        let hit = visuals.pick(&ray).unwrap();
        assert_eq!(hit.point_id, PointId::from("b"));
        assert_eq!(hit.part, HandlePart::Body);
    }

    #[test]
    fn test_pick_direction_indicator() {
        let mut visuals = RailVisuals::default();
        visuals.sync(&[point("a", Vec3::ZERO)]);

        // Identity looks down -Z; aim at the middle of the arrow from above
        let along = visuals.body_radius + visuals.indicator_length * 0.5;
        let ray = Ray::new(Vec3::new(0.0, 10.0, -along), Vec3::NEG_Y);
        let hit = visuals.pick(&ray).unwrap();
        assert_eq!(hit.part, HandlePart::DirectionIndicator);
    }

    #[test]
    fn test_pick_miss() {
        let mut visuals = RailVisuals::default();
        visuals.sync(&[point("a", Vec3::ZERO)]);
        let ray = Ray::new(Vec3::new(3.0, 10.0, 3.0), Vec3::NEG_Y);
        assert!(visuals.pick(&ray).is_none());
    }
}
