/// Simulation: owns a set of bodies and the octree tracking them.
///
/// One `update()` per frame reclassifies every body from its previous node,
/// then resolves its wall collision against the node it now belongs to.
/// Motion integration is left to the caller (via `bodies_mut()`).

use slotmap::SlotMap;
use crate::error::Result;
use crate::{engine_bail, engine_debug};
use super::body::{BodyKey, SpatialBody};
use super::config::OctreeConfig;
use super::octree_index::OctreeIndex;
use super::spatial_index::SpatialIndex;

/// Per-frame counters returned by `Simulation::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Bodies attached to a different node than last frame
    pub moved: usize,
    /// Bodies reflected off a wall
    pub bounced: usize,
    /// Bodies that stayed in their node
    pub unchanged: usize,
}

/// Bodies plus the octree index that classifies them.
pub struct Simulation<B: SpatialBody> {
    bodies: SlotMap<BodyKey, B>,
    index: OctreeIndex,
    frame: u64,
}

impl<B: SpatialBody> Simulation<B> {
    pub fn new(config: OctreeConfig) -> Result<Self> {
        Ok(Self {
            bodies: SlotMap::with_key(),
            index: OctreeIndex::new(config)?,
            frame: 0,
        })
    }

    /// Add a body and attach it to its node immediately.
    ///
    /// A body rejected by the index (non-finite position, bad radius) is not
    /// kept.
    pub fn add_body(&mut self, body: B) -> Result<BodyKey> {
        let key = self.bodies.insert(body);
        let placed = self.index.update_object(key, &mut self.bodies[key]);
        if let Err(err) = placed {
            self.bodies.remove(key);
            return Err(err);
        }
        Ok(key)
    }

    /// Untrack and return a body.
    pub fn remove_body(&mut self, key: BodyKey) -> Result<B> {
        let Some(mut body) = self.bodies.remove(key) else {
            engine_bail!("octree3d::Simulation", UntrackedBody, "{:?} is not part of this simulation", key);
        };
        if body.current_node().is_some() {
            self.index.remove_object(key, &mut body)?;
        }
        Ok(body)
    }

    pub fn body(&self, key: BodyKey) -> Option<&B> {
        self.bodies.get(key)
    }

    /// Mutable access to a body. Changes take effect at the next `update()`.
    pub fn body_mut(&mut self, key: BodyKey) -> Option<&mut B> {
        self.bodies.get_mut(key)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &B)> {
        self.bodies.iter()
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = (BodyKey, &mut B)> {
        self.bodies.iter_mut()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn index(&self) -> &OctreeIndex {
        &self.index
    }

    /// Number of completed `update()` calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Reclassify every body, then bounce it off its node's walls.
    pub fn update(&mut self) -> Result<FrameStats> {
        let mut stats = FrameStats::default();

        for (key, body) in self.bodies.iter_mut() {
            if self.index.update_object(key, body)?.is_moved() {
                stats.moved += 1;
            } else {
                stats.unchanged += 1;
            }
            if self.index.resolve_collision(body)?.is_some() {
                stats.bounced += 1;
            }
        }

        self.frame += 1;
        engine_debug!(
            "octree3d::Simulation",
            "frame {}: {} moved, {} bounced, {} unchanged",
            self.frame, stats.moved, stats.bounced, stats.unchanged
        );
        Ok(stats)
    }

    /// Check the index bookkeeping against every body's back-reference.
    pub fn validate(&self) -> Result<()> {
        self.index
            .validate_bodies(self.bodies.iter().map(|(key, body)| (key, body.current_node())))
    }
}

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod tests;
