//! Debug module: wireframe visualization of the octree.
//!
//! Provides the shared line-cube mesh, the drawing seam a renderer plugs
//! into, and the octree render hook. No GPU backend lives here.

mod wireframe;

pub use wireframe::{
    DrawCall, RecordingDrawer, WireframeCube, WireframeDrawer,
    EMPTY_NODE_COLOR, IN_USE_NODE_COLOR, CUBE_VERTEX_COUNT,
};
