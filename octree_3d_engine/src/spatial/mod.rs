//! Spatial module: static octree occupancy index.
//!
//! Tracks moving spheres in a pre-built octree, keeps every node in exactly
//! one of two registry buckets (empty / in-use), and bounces spheres off the
//! walls of the node that owns them.

mod bounds;
mod config;
mod node;
mod registry;
mod collision;
mod body;
mod spatial_index;
mod octree_index;
mod search;
mod simulation;

pub use bounds::AABB;
pub use config::{OctreeConfig, MAX_SUPPORTED_DEPTH};
pub use node::{octant_offset, NodeKey, OctreeNode, CHILD_COUNT};
pub use registry::NodeRegistry;
pub use collision::{breached_walls, Wall, Walls};
pub use body::{Ball, BodyKey, SpatialBody};
pub use spatial_index::{Placement, SpatialIndex};
pub use octree_index::OctreeIndex;
pub use simulation::{FrameStats, Simulation};
