/// Axis-aligned bounds used by the octree.
///
/// A node's cube is described by its center and edge length. Containment of
/// a sphere is tested against the cube shrunk by the sphere radius on every
/// side ("inner bounds"), so a body is inside a node only when its whole
/// sphere fits.

use glam::Vec3;

/// Axis-Aligned Bounding Box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Build a box from its center and half edge length.
    pub fn from_center_half_size(center: Vec3, half_size: f32) -> Self {
        AABB {
            min: center - Vec3::splat(half_size),
            max: center + Vec3::splat(half_size),
        }
    }

    /// Center point of this AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths on each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Shrink every face inward by `margin`.
    ///
    /// The result may be inverted (min > max) when `margin` exceeds the half
    /// size; an inverted box contains no point.
    pub fn shrunk(&self, margin: f32) -> AABB {
        AABB {
            min: self.min + Vec3::splat(margin),
            max: self.max - Vec3::splat(margin),
        }
    }

    /// Test if a point lies within the box (bounds inclusive).
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.x <= point.x && point.x <= self.max.x
        && self.min.y <= point.y && point.y <= self.max.y
        && self.min.z <= point.z && point.z <= self.max.z
    }

    /// Test if this AABB fully contains another AABB.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if this AABB intersects (overlaps or touches) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
