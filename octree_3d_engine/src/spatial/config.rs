/// Octree configuration.
///
/// Fixed at construction: the tree shape (node count, sizes, transforms) is
/// derived once from these values and never changes afterwards.

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;
use super::bounds::AABB;

/// Deepest tree accepted by `OctreeConfig::validate` (2 396 745 nodes).
pub const MAX_SUPPORTED_DEPTH: u32 = 7;

/// Octree construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeConfig {
    /// Depth of the leaves (root = 0). Total nodes = (8^(d+1) - 1) / 7.
    pub max_depth: u32,
    /// Edge length of the root cube
    pub root_size: f32,
    /// World-space center of the root cube
    pub root_center: Vec3,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            root_size: 1.0,
            root_center: Vec3::ZERO,
        }
    }
}

impl OctreeConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_root_size(mut self, root_size: f32) -> Self {
        self.root_size = root_size;
        self
    }

    pub fn with_root_center(mut self, root_center: Vec3) -> Self {
        self.root_center = root_center;
        self
    }

    /// Reject configurations that cannot produce a usable tree.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            engine_bail!(
                "octree3d::Config", InvalidConfig,
                "max_depth {} exceeds the supported maximum of {}",
                self.max_depth, MAX_SUPPORTED_DEPTH
            );
        }
        if !self.root_size.is_finite() || self.root_size <= 0.0 {
            engine_bail!(
                "octree3d::Config", InvalidConfig,
                "root_size must be finite and positive, got {}", self.root_size
            );
        }
        if !self.root_center.is_finite() {
            engine_bail!(
                "octree3d::Config", InvalidConfig,
                "root_center must be finite, got {:?}", self.root_center
            );
        }
        Ok(())
    }

    /// Total number of nodes: sum of 8^i for i in 0..=max_depth
    pub fn node_count(&self) -> usize {
        let mut count = 0usize;
        let mut level_count = 1usize;
        for _ in 0..=self.max_depth {
            count += level_count;
            level_count *= 8;
        }
        count
    }

    /// Edge length of a leaf cube.
    pub fn leaf_size(&self) -> f32 {
        self.root_size / (1u32 << self.max_depth) as f32
    }

    /// Half edge length of a leaf cube.
    ///
    /// Bodies must have a radius below this value to ever reach a leaf.
    pub fn leaf_half_size(&self) -> f32 {
        self.leaf_size() * 0.5
    }

    /// World bounds of the root cube.
    pub fn world_bounds(&self) -> AABB {
        AABB::from_center_half_size(self.root_center, self.root_size * 0.5)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
