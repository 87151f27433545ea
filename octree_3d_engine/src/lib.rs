/*!
# Octree 3D Engine

Static octree occupancy index for moving spheres.

The tree is built once to a fixed depth. Each frame, every tracked body is
reclassified starting from the node that owned it last, the empty/in-use
registry is kept in sync, and bodies bounce off the walls of their node.

## Architecture

- **OctreeIndex**: the pre-allocated tree, node registry and search
- **SpatialIndex**: trait seam for reclassification and collision
- **SpatialBody**: contract a moving sphere implements (see `Ball`)
- **Simulation**: owns bodies plus index and drives one update per frame
- **WireframeDrawer**: render hook seam for debug visualization
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod spatial;
pub mod debug;

// Main octree3d namespace module
pub mod octree3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (global logger)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Spatial sub-module
    pub mod spatial {
        pub use crate::spatial::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Debug rendering sub-module
    pub mod debug {
        pub use crate::debug::*;
    }
}

// Re-export math library at crate root
pub use glam;
