/// OctreeIndex: static octree tracking moving spheres.
///
/// Every object is stored in exactly one node: the deepest node whose cube
/// fully contains its sphere. A sphere that straddles a child boundary stays
/// in the parent.
///
/// The tree structure is pre-allocated at construction time (static octree)
/// with a fixed `max_depth`. All (8^(d+1) - 1) / 7 nodes exist regardless of
/// occupancy; only occupant sets and the empty/in-use registry change.
///
/// Reclassification starts from the body's previous node and walks up to
/// the first ancestor that still contains it, then down into the deepest
/// containing descendant (see `search.rs`). Bodies moving locally cost a
/// handful of containment tests per frame instead of a root-down scan.

use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_info, engine_trace};
use super::body::{BodyKey, SpatialBody};
use super::collision::{breached_walls, Wall};
use super::config::OctreeConfig;
use super::node::{octant_offset, NodeKey, OctreeNode, CHILD_COUNT};
use super::registry::NodeRegistry;
use super::spatial_index::{Placement, SpatialIndex};

/// Static octree spatial index.
pub struct OctreeIndex {
    /// Arena of all nodes (pre-allocated)
    pub(super) nodes: SlotMap<NodeKey, OctreeNode>,
    pub(super) root: NodeKey,
    config: OctreeConfig,
    registry: NodeRegistry,
}

impl OctreeIndex {
    /// Build the full tree described by `config`.
    ///
    /// Every node starts in the "empty" bucket.
    pub fn new(config: OctreeConfig) -> Result<Self> {
        config.validate()?;

        let total_nodes = config.node_count();
        let mut nodes = SlotMap::with_capacity_and_key(total_nodes);
        let mut registry = NodeRegistry::new();

        let root_transform = Mat4::from_translation(config.root_center)
            * Mat4::from_scale(Vec3::splat(config.root_size));
        let root = Self::build_recursive(
            &mut nodes,
            &mut registry,
            None,
            root_transform,
            config.root_size,
            0,
            config.max_depth,
        );

        debug_assert_eq!(nodes.len(), total_nodes);

        engine_info!(
            "octree3d::Index",
            "Built octree: depth {}, {} nodes, leaf size {}",
            config.max_depth, nodes.len(), config.leaf_size()
        );

        Ok(Self { nodes, root, config, registry })
    }

    /// Recursively build the node arena (depth-first, children in octant order).
    fn build_recursive(
        nodes: &mut SlotMap<NodeKey, OctreeNode>,
        registry: &mut NodeRegistry,
        parent: Option<NodeKey>,
        transform: Mat4,
        size: f32,
        depth: u32,
        max_depth: u32,
    ) -> NodeKey {
        let key = nodes.insert(OctreeNode::new(depth, transform, size, parent));
        registry.register(key);

        if depth < max_depth {
            let half = Mat4::from_scale(Vec3::splat(0.5));
            let mut children = [NodeKey::default(); CHILD_COUNT];
            for (octant, child) in children.iter_mut().enumerate() {
                let child_transform =
                    transform * half * Mat4::from_translation(octant_offset(octant));
                *child = Self::build_recursive(
                    nodes, registry, Some(key), child_transform, size * 0.5, depth + 1, max_depth,
                );
            }
            nodes[key].set_children(children);
        }

        key
    }

    // ===== QUERIES =====

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn node(&self, key: NodeKey) -> Option<&OctreeNode> {
        self.nodes.get(key)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes (key, node).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &OctreeNode)> {
        self.nodes.iter()
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn empty_nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.registry.empty_nodes()
    }

    pub fn in_use_nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.registry.in_use_nodes()
    }

    /// Bodies attached directly to `node` (empty for unknown keys).
    pub fn occupants(&self, node: NodeKey) -> impl Iterator<Item = BodyKey> + '_ {
        self.nodes.get(node).into_iter().flat_map(|n| n.occupants())
    }

    /// Total number of attached bodies across all nodes.
    pub fn tracked_count(&self) -> usize {
        self.nodes.values().map(OctreeNode::occupant_count).sum()
    }

    // ===== MEMBERSHIP =====

    fn attach(&mut self, node: NodeKey, key: BodyKey) {
        let entry = &mut self.nodes[node];
        if entry.occupants.is_empty() {
            self.registry.mark_in_use(node);
        }
        entry.occupants.insert(key);
    }

    fn detach(&mut self, node: NodeKey, key: BodyKey) {
        let entry = &mut self.nodes[node];
        if entry.occupants.remove(&key) && entry.occupants.is_empty() {
            self.registry.mark_empty(node);
        }
    }

    /// Resolve a body's back-reference, rejecting keys from elsewhere.
    fn checked_current(&self, body: &dyn SpatialBody) -> Result<Option<NodeKey>> {
        match body.current_node() {
            Some(node) if !self.nodes.contains_key(node) => {
                engine_bail!(
                    "octree3d::Index", StaleNode,
                    "body refers to {:?}, which is not a node of this octree", node
                );
            }
            current => Ok(current),
        }
    }

    fn check_body(body: &dyn SpatialBody) -> Result<()> {
        let position = body.local_position();
        let radius = body.radius();
        if !position.is_finite() {
            engine_bail!("octree3d::Index", InvalidBody, "position {:?} is not finite", position);
        }
        if !radius.is_finite() || radius < 0.0 {
            engine_bail!("octree3d::Index", InvalidBody, "radius {} must be finite and >= 0", radius);
        }
        Ok(())
    }

    /// Bounce `body` off the first breached wall of `node`.
    ///
    /// Walls are tested in priority order -X, +X, -Y, +Y, -Z, +Z; a single
    /// wall is resolved per call.
    pub fn resolve_collision_at(
        &self,
        node: NodeKey,
        body: &mut dyn SpatialBody,
    ) -> Result<Option<Wall>> {
        let Some(entry) = self.nodes.get(node) else {
            engine_bail!("octree3d::Index", StaleNode, "{:?} is not a node of this octree", node);
        };

        let inner = entry.inner_bounds(body.radius());
        let wall = breached_walls(&inner, body.local_position()).first();
        if let Some(wall) = wall {
            engine_trace!("octree3d::Index", "bounce off {:?} of {:?}", wall, node);
            body.bounce(wall.normal());
        }
        Ok(wall)
    }

    // ===== VALIDATION =====

    /// Check the registry partition and occupancy bookkeeping.
    pub fn validate(&self) -> Result<()> {
        if self.registry.len() != self.nodes.len() {
            engine_bail!(
                "octree3d::Index", InvariantViolation,
                "registry holds {} nodes, tree has {}", self.registry.len(), self.nodes.len()
            );
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for (key, node) in &self.nodes {
            let in_use = self.registry.is_in_use(key);
            let empty = self.registry.is_empty_node(key);
            if in_use == empty {
                engine_bail!(
                    "octree3d::Index", InvariantViolation,
                    "{:?} is in {} registry buckets", key, if in_use { "both" } else { "neither" }
                );
            }
            if in_use == (node.occupant_count() == 0) {
                engine_bail!(
                    "octree3d::Index", InvariantViolation,
                    "{:?} has {} occupants but is registered as {}",
                    key, node.occupant_count(), if in_use { "in-use" } else { "empty" }
                );
            }
            for body in node.occupants() {
                if !seen.insert(body) {
                    engine_bail!(
                        "octree3d::Index", InvariantViolation,
                        "{:?} is attached to more than one node", body
                    );
                }
            }
        }
        Ok(())
    }

    /// Check that each `(body, current_node)` pair matches the occupant sets
    /// and that no other body is attached anywhere.
    pub fn validate_bodies<I>(&self, bodies: I) -> Result<()>
    where
        I: IntoIterator<Item = (BodyKey, Option<NodeKey>)>,
    {
        self.validate()?;

        let mut tracked = 0usize;
        for (key, current) in bodies {
            let Some(node) = current else { continue };
            match self.nodes.get(node) {
                Some(entry) if entry.has_occupant(key) => tracked += 1,
                Some(_) => engine_bail!(
                    "octree3d::Index", InvariantViolation,
                    "{:?} points at {:?} but is not one of its occupants", key, node
                ),
                None => engine_bail!(
                    "octree3d::Index", StaleNode,
                    "{:?} points at unknown {:?}", key, node
                ),
            }
        }

        if tracked != self.tracked_count() {
            engine_bail!(
                "octree3d::Index", InvariantViolation,
                "{} bodies tracked but {} occupants attached", tracked, self.tracked_count()
            );
        }
        Ok(())
    }
}

// ===== SPATIAL INDEX TRAIT =====

impl SpatialIndex for OctreeIndex {
    fn update_object(&mut self, key: BodyKey, body: &mut dyn SpatialBody) -> Result<Placement> {
        Self::check_body(body)?;
        let current = self.checked_current(body)?;

        let target = self.locate_from(current, body.local_position(), body.radius());

        if let Some(node) = current {
            if node == target && self.nodes[node].has_occupant(key) {
                return Ok(Placement::Unchanged(node));
            }
        }

        self.attach(target, key);
        if let Some(old) = current.filter(|&old| old != target) {
            self.detach(old, key);
        }
        body.set_current_node(Some(target));

        engine_trace!(
            "octree3d::Index", "{:?} moved {:?} -> {:?} (depth {})",
            key, current, target, self.nodes[target].depth()
        );
        Ok(Placement::Moved { from: current, to: target })
    }

    fn remove_object(&mut self, key: BodyKey, body: &mut dyn SpatialBody) -> Result<NodeKey> {
        let Some(node) = self.checked_current(body)? else {
            engine_bail!("octree3d::Index", UntrackedBody, "{:?} has no current node", key);
        };
        self.detach(node, key);
        body.set_current_node(None);
        Ok(node)
    }

    fn resolve_collision(&self, body: &mut dyn SpatialBody) -> Result<Option<Wall>> {
        let Some(node) = self.checked_current(body)? else {
            engine_bail!(
                "octree3d::Index", UntrackedBody,
                "collision requested for a body with no current node"
            );
        };
        self.resolve_collision_at(node, body)
    }

    fn clear(&mut self) {
        let occupied: Vec<NodeKey> = self.registry.in_use_nodes().collect();
        for node in &occupied {
            self.nodes[*node].occupants.clear();
            self.registry.mark_empty(*node);
        }
        engine_debug!("octree3d::Index", "Cleared {} occupied nodes", occupied.len());
    }
}

#[cfg(test)]
#[path = "octree_index_tests.rs"]
mod tests;
