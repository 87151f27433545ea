/// Moving bodies tracked by the octree.
///
/// The index only needs a body's position and radius, a slot for its
/// current node, and a way to bounce it off a wall. Integration of the
/// body's motion stays with the body.

use glam::Vec3;
use slotmap::new_key_type;
use super::node::NodeKey;

new_key_type! {
    /// Stable key for a body, used as occupant identity in node sets.
    pub struct BodyKey;
}

/// Contract between the octree and a moving sphere.
pub trait SpatialBody {
    /// Sphere radius. Must be below the leaf half-size to reach leaves.
    fn radius(&self) -> f32;

    /// Sphere center in the octree's world space.
    fn local_position(&self) -> Vec3;

    /// Node currently owning this body, None if untracked.
    fn current_node(&self) -> Option<NodeKey>;

    /// Store the node now owning this body.
    fn set_current_node(&mut self, node: Option<NodeKey>);

    /// Reflect off the plane with the given unit normal.
    fn bounce(&mut self, normal: Vec3);
}

/// Ball: constant-velocity sphere
#[derive(Debug, Clone)]
pub struct Ball {
    position: Vec3,
    velocity: Vec3,
    radius: f32,
    current_node: Option<NodeKey>,
    bounces: u32,
}

impl Ball {
    pub fn new(position: Vec3, velocity: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            current_node: None,
            bounces: 0,
        }
    }

    /// Integrate position over `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Number of reflections applied so far.
    pub fn bounce_count(&self) -> u32 {
        self.bounces
    }
}

impl SpatialBody for Ball {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn local_position(&self) -> Vec3 {
        self.position
    }

    fn current_node(&self) -> Option<NodeKey> {
        self.current_node
    }

    fn set_current_node(&mut self, node: Option<NodeKey>) {
        self.current_node = node;
    }

    /// Mirror the velocity about the plane, only while moving into it.
    ///
    /// A ball still overlapping the wall on the next frame is already
    /// heading away and must not be flipped back.
    fn bounce(&mut self, normal: Vec3) {
        let approach = self.velocity.dot(normal);
        if approach < 0.0 {
            self.velocity -= 2.0 * approach * normal;
            self.bounces += 1;
        }
    }
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
