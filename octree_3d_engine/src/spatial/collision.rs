/// Wall classification for sphere-vs-cube collision.
///
/// A body breaches a wall of its node when its center reaches the inner
/// bound on that side (`pos <= min` for a negative face, `pos >= max` for a
/// positive face). Only one wall is resolved per call, picked in priority
/// order -X, +X, -Y, +Y, -Z, +Z.

use bitflags::bitflags;
use glam::Vec3;
use super::bounds::AABB;

/// One face of an axis-aligned cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Wall {
    /// Resolution order used when several walls are breached at once.
    pub const PRIORITY: [Wall; 6] = [
        Wall::NegX, Wall::PosX, Wall::NegY, Wall::PosY, Wall::NegZ, Wall::PosZ,
    ];

    /// Reflection plane normal, pointing back into the cube.
    pub fn normal(self) -> Vec3 {
        match self {
            Wall::NegX => Vec3::X,
            Wall::PosX => Vec3::NEG_X,
            Wall::NegY => Vec3::Y,
            Wall::PosY => Vec3::NEG_Y,
            Wall::NegZ => Vec3::Z,
            Wall::PosZ => Vec3::NEG_Z,
        }
    }

    pub fn flag(self) -> Walls {
        match self {
            Wall::NegX => Walls::NEG_X,
            Wall::PosX => Walls::POS_X,
            Wall::NegY => Walls::NEG_Y,
            Wall::PosY => Walls::POS_Y,
            Wall::NegZ => Walls::NEG_Z,
            Wall::PosZ => Walls::POS_Z,
        }
    }
}

bitflags! {
    /// Set of breached walls.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Walls: u8 {
        const NEG_X = 1 << 0;
        const POS_X = 1 << 1;
        const NEG_Y = 1 << 2;
        const POS_Y = 1 << 3;
        const NEG_Z = 1 << 4;
        const POS_Z = 1 << 5;
    }
}

impl Walls {
    /// Highest-priority wall in the set.
    pub fn first(self) -> Option<Wall> {
        Wall::PRIORITY.into_iter().find(|wall| self.contains(wall.flag()))
    }
}

/// Classify which walls a body centered at `position` breaches.
///
/// `inner` is the node's cube already shrunk by the body radius
/// (see `OctreeNode::inner_bounds`).
pub fn breached_walls(inner: &AABB, position: Vec3) -> Walls {
    let mut walls = Walls::empty();
    walls.set(Walls::NEG_X, position.x <= inner.min.x);
    walls.set(Walls::POS_X, position.x >= inner.max.x);
    walls.set(Walls::NEG_Y, position.y <= inner.min.y);
    walls.set(Walls::POS_Y, position.y >= inner.max.y);
    walls.set(Walls::NEG_Z, position.z <= inner.min.z);
    walls.set(Walls::POS_Z, position.z >= inner.max.z);
    walls
}

#[cfg(test)]
#[path = "collision_tests.rs"]
mod tests;
