// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ray casting against drag planes and control point handles.
//!
//! Pointer positions arrive in viewport pixels and are normalized to device
//! coordinates (`[-1, 1]` on both axes, +Y up) before a ray is built.

use glam::{Vec2, Vec3};

/// Denominators below this count as "ray parallel to plane"
const PARALLEL_EPSILON: f32 = 1e-6;

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Create a new viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Convert a pixel position (origin top-left, +Y down) to device coordinates
    pub fn to_ndc(&self, pixel: Vec2) -> Vec2 {
        let normalized_x = pixel.x / self.width.max(1.0);
        let normalized_y = pixel.y / self.height.max(1.0);
        Vec2::new(normalized_x * 2.0 - 1.0, 1.0 - normalized_y * 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// A ray in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect with a plane. Parallel planes and planes behind the origin miss.
    pub fn intersect_plane(&self, plane: &DragPlane) -> Option<Vec3> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (plane.point - self.origin).dot(plane.normal) / denom;
        if !t.is_finite() || t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }

    /// Distance along the ray to a sphere, if hit
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        let far = -b + sqrt_d;
        if far < 0.0 {
            // Sphere is behind the ray
            return None;
        }
        Some(near.max(0.0))
    }

    /// Distance along the ray to a capsule around `start..end`, if hit
    pub fn intersect_capsule(&self, start: Vec3, end: Vec3, radius: f32) -> Option<f32> {
        let (distance, along) = self.segment_distance(start, end);
        (distance <= radius).then_some(along)
    }

    /// Closest distance between the ray and a segment, with the ray parameter
    /// at the closest approach
    pub fn segment_distance(&self, start: Vec3, end: Vec3) -> (f32, f32) {
        let segment = end - start;
        let seg_len_sq = segment.length_squared();
        let w = self.origin - start;

        let b = self.direction.dot(segment);
        let d = self.direction.dot(w);
        let e = segment.dot(w);
        let denom = seg_len_sq - b * b;

        let mut seg_t = if seg_len_sq < 1e-12 {
            0.0
        } else if denom.abs() < 1e-8 {
            (e / seg_len_sq).clamp(0.0, 1.0)
        } else {
            ((e - b * d) / denom).clamp(0.0, 1.0)
        };

        let ray_t = (start + segment * seg_t - self.origin).dot(self.direction).max(0.0);
        if seg_len_sq >= 1e-12 {
            seg_t = ((self.at(ray_t) - start).dot(segment) / seg_len_sq).clamp(0.0, 1.0);
        }

        let closest_on_segment = start + segment * seg_t;
        (self.at(ray_t).distance(closest_on_segment), ray_t)
    }
}

/// A plane used to turn a 2D pointer position into a 3D point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPlane {
    /// A point on the plane
    pub point: Vec3,
    /// Unit normal
    pub normal: Vec3,
}

impl DragPlane {
    /// Create a plane through `point` with the given normal
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    /// Plane through `point` facing back at a camera looking along `camera_forward`
    pub fn facing_camera(point: Vec3, camera_forward: Vec3) -> Self {
        Self::new(point, -camera_forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_to_ndc() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(viewport.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(viewport.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_ray_plane_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let plane = DragPlane::facing_camera(Vec3::ZERO, Vec3::NEG_Z);
        let hit = ray.intersect_plane(&plane).unwrap();
        assert!(hit.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_ray_plane_parallel_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::X);
        let plane = DragPlane::facing_camera(Vec3::ZERO, Vec3::NEG_Z);
        assert!(ray.intersect_plane(&plane).is_none());
    }

    #[test]
    fn test_ray_plane_behind_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        let plane = DragPlane::new(Vec3::ZERO, Vec3::Z);
        assert!(ray.intersect_plane(&plane).is_none());
    }

    #[test]
    fn test_ray_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn test_ray_capsule() {
        let ray = Ray::new(Vec3::new(0.5, 0.0, 10.0), Vec3::NEG_Z);
        let t = ray.intersect_capsule(Vec3::ZERO, Vec3::X, 0.1).unwrap();
        assert!((t - 10.0).abs() < 1e-4);
        assert!(ray.intersect_capsule(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0), 0.1).is_none());
    }
}
