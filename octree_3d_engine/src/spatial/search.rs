/// Reclassification search: up from the last known node, then down.
///
/// Both phases are loops. Downward refinement keeps an explicit stack of
/// partially scanned nodes, so the result and tie-break order are those of
/// the recursive formulation:
///
/// - children are scanned in octant order;
/// - the first containing child whose subtree holds a deeper containing
///   node wins, and that deeper node is returned;
/// - otherwise the last containing child is returned.
///
/// Containment is monotone (a sphere inside a child is inside its parent),
/// so when the upward walk leaves a node, that node's whole subtree is
/// known not to contain the sphere and is skipped on the way back down.

use glam::Vec3;
use super::node::NodeKey;
use super::octree_index::OctreeIndex;

/// Sphere being located.
#[derive(Debug, Clone, Copy)]
struct Probe {
    position: Vec3,
    radius: f32,
}

/// A node whose children are partially scanned.
struct Frame {
    node: NodeKey,
    /// Next octant to test
    next: usize,
    /// Last child found to contain the probe
    candidate: Option<NodeKey>,
}

impl Frame {
    fn new(node: NodeKey) -> Self {
        Self { node, next: 0, candidate: None }
    }
}

impl OctreeIndex {
    /// Deepest node containing the sphere, searched from the root.
    ///
    /// Spheres that do not fit in the root are clamped to the root.
    pub fn locate(&self, position: Vec3, radius: f32) -> NodeKey {
        self.locate_from(None, position, radius)
    }

    /// Deepest node containing the sphere, searched from `hint`.
    ///
    /// `hint` is normally the sphere's node from the previous frame. None
    /// (or a key that is not part of this tree) starts from the root.
    pub fn locate_from(&self, hint: Option<NodeKey>, position: Vec3, radius: f32) -> NodeKey {
        let probe = Probe { position, radius };
        let start = hint
            .filter(|&node| self.nodes.contains_key(node))
            .unwrap_or(self.root);
        self.get_parent_node(start, &probe)
    }

    fn is_inside(&self, node: NodeKey, probe: &Probe) -> bool {
        self.nodes[node].contains_sphere(probe.position, probe.radius)
    }

    /// Node that should own the probe, given the node that owned it last.
    fn get_parent_node(&self, node: NodeKey, probe: &Probe) -> NodeKey {
        if self.is_inside(node, probe) {
            return self.search_children(node, probe, None).unwrap_or(node);
        }

        match self.nodes[node].parent() {
            // Never escapes the world bound
            None => node,
            Some(parent) => self.search_parent(parent, probe, node),
        }
    }

    /// Ascend from `node` until an ancestor contains the probe, then refine
    /// into its children other than the subtree just left.
    fn search_parent(&self, node: NodeKey, probe: &Probe, exclude: NodeKey) -> NodeKey {
        let mut node = node;
        let mut exclude = exclude;

        loop {
            if self.is_inside(node, probe) {
                return self.search_children(node, probe, Some(exclude)).unwrap_or(node);
            }

            match self.nodes[node].parent() {
                None => return node,
                Some(parent) => {
                    exclude = node;
                    node = parent;
                }
            }
        }
    }

    /// Deepest strict descendant of `start` containing the probe.
    ///
    /// Returns None when no child of `start` contains it (or `start` is a
    /// leaf), meaning `start` itself is the best match. `exclude` is skipped
    /// among the children of `start`.
    fn search_children(
        &self,
        start: NodeKey,
        probe: &Probe,
        exclude: Option<NodeKey>,
    ) -> Option<NodeKey> {
        let mut stack: Vec<Frame> = Vec::with_capacity(self.max_depth() as usize + 1);
        stack.push(Frame::new(start));

        while let Some(frame) = stack.last_mut() {
            let Some(children) = self.nodes[frame.node].children().copied() else {
                // Leaf: nothing deeper below this frame
                stack.pop();
                continue;
            };

            let mut descend = None;
            while frame.next < children.len() {
                let child = children[frame.next];
                frame.next += 1;

                if Some(child) == exclude {
                    continue;
                }
                if self.is_inside(child, probe) {
                    frame.candidate = Some(child);
                    descend = Some(child);
                    break;
                }
            }

            match descend {
                Some(child) => stack.push(Frame::new(child)),
                None => {
                    // Scan exhausted. A candidate here is deeper than every
                    // frame below it on the stack, so it is the answer.
                    if let Some(found) = stack.pop().and_then(|done| done.candidate) {
                        return Some(found);
                    }
                }
            }
        }

        None
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
