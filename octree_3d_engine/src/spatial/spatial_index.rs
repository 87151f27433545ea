/// Spatial index seam.
///
/// A SpatialIndex keeps every tracked body attached to exactly one region
/// and resolves body-vs-region wall collisions.
///
/// Ownership: the caller owns both the index and the bodies. Bodies are
/// passed by `&mut` so the index can update their back-reference and
/// bounce them.

use crate::error::Result;
use super::body::{BodyKey, SpatialBody};
use super::collision::Wall;
use super::node::NodeKey;

/// Outcome of reclassifying one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The body still belongs to this node; nothing was mutated.
    Unchanged(NodeKey),
    /// The body was attached to `to` and detached from `from` (if any).
    Moved {
        from: Option<NodeKey>,
        to: NodeKey,
    },
}

impl Placement {
    /// Node owning the body after the update.
    pub fn node(&self) -> NodeKey {
        match *self {
            Placement::Unchanged(node) => node,
            Placement::Moved { to, .. } => to,
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, Placement::Moved { .. })
    }
}

/// Trait for spatial indexing of moving bodies.
pub trait SpatialIndex: Send + Sync {
    /// Attach an untracked body, or move a tracked one to the region that
    /// now contains it. The search starts at the body's current node.
    fn update_object(&mut self, key: BodyKey, body: &mut dyn SpatialBody) -> Result<Placement>;

    /// Detach a body and clear its back-reference. Returns its former node.
    fn remove_object(&mut self, key: BodyKey, body: &mut dyn SpatialBody) -> Result<NodeKey>;

    /// Bounce the body off the first breached wall of its current node.
    fn resolve_collision(&self, body: &mut dyn SpatialBody) -> Result<Option<Wall>>;

    /// Detach every body from every region.
    ///
    /// Body back-references are left untouched; the next `update_object`
    /// re-attaches each body.
    fn clear(&mut self);
}
