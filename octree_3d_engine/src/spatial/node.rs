/// OctreeNode: one cube of the static octree.
///
/// Shape data (depth, center, size, transform, links) is fixed when the tree
/// is built. Only the occupant set changes at runtime.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashSet;
use slotmap::new_key_type;
use super::body::BodyKey;
use super::bounds::AABB;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable handle of a node in an `OctreeIndex` arena.
    ///
    /// Bodies store this as their back-reference. A key that no longer
    /// resolves in the arena is reported as `Error::StaleNode`.
    pub struct NodeKey;
}

/// Number of children of every interior node.
pub const CHILD_COUNT: usize = 8;

/// Offset of octant `octant` in the parent's unit cube.
///
/// Octants are enumerated x-major: index = 4·x + 2·y + z, each of x, y, z
/// in {0, 1}, giving offsets in {-0.5, +0.5}³.
pub fn octant_offset(octant: usize) -> Vec3 {
    Vec3::new(
        ((octant >> 2) & 1) as f32,
        ((octant >> 1) & 1) as f32,
        (octant & 1) as f32,
    ) - Vec3::splat(0.5)
}

/// A single node in the octree.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    depth: u32,
    /// World-space center (translation column of `transform`)
    center: Vec3,
    /// Edge length of the cube
    size: f32,
    /// Root-to-node transform, maps the unit cube [-0.5, 0.5]³ onto this node
    transform: Mat4,
    parent: Option<NodeKey>,
    /// All 8 children, or None for leaves
    children: Option<[NodeKey; CHILD_COUNT]>,
    /// Bodies attached directly to this node
    pub(super) occupants: FxHashSet<BodyKey>,
}

impl OctreeNode {
    pub(super) fn new(depth: u32, transform: Mat4, size: f32, parent: Option<NodeKey>) -> Self {
        Self {
            depth,
            center: transform.w_axis.truncate(),
            size,
            transform,
            parent,
            children: None,
            occupants: FxHashSet::default(),
        }
    }

    pub(super) fn set_children(&mut self, children: [NodeKey; CHILD_COUNT]) {
        self.children = Some(children);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> Option<&[NodeKey; CHILD_COUNT]> {
        self.children.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Iterate over the bodies attached to this node (arbitrary order).
    pub fn occupants(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.occupants.iter().copied()
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn has_occupant(&self, key: BodyKey) -> bool {
        self.occupants.contains(&key)
    }

    /// World-space cube of this node.
    pub fn bounds(&self) -> AABB {
        AABB::from_center_half_size(self.center, self.half_size())
    }

    /// Range of positions at which a sphere of `radius` fits in this cube.
    pub fn inner_bounds(&self, radius: f32) -> AABB {
        self.bounds().shrunk(radius)
    }

    /// True iff the whole sphere fits inside the cube on all three axes.
    ///
    /// `center - size/2 + radius <= position <= center + size/2 - radius`
    pub fn contains_sphere(&self, position: Vec3, radius: f32) -> bool {
        self.inner_bounds(radius).contains_point(position)
    }
}
