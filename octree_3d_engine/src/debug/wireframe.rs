/// Wireframe debug rendering of octree nodes.
///
/// Every node is drawn as the shared unit line-cube transformed by the
/// node's root-to-node transform. Empty nodes are drawn first in white,
/// the depth buffer is cleared, then in-use nodes are drawn in red so they
/// are never hidden behind empty cubes.

use std::sync::OnceLock;
use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::camera::Camera;
use crate::engine_info;
use crate::spatial::{NodeKey, OctreeIndex};

/// Line color of nodes with no occupant.
pub const EMPTY_NODE_COLOR: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Line color of nodes with at least one occupant.
pub const IN_USE_NODE_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// 12 edges, 2 endpoints each.
pub const CUBE_VERTEX_COUNT: usize = 24;

static CUBE: OnceLock<WireframeCube> = OnceLock::new();

/// Line list of the unit cube [-0.5, 0.5]³.
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeCube {
    vertices: [Vec3; CUBE_VERTEX_COUNT],
}

impl WireframeCube {
    /// The process-wide cube, built on first use.
    pub fn shared() -> &'static WireframeCube {
        CUBE.get_or_init(|| {
            engine_info!("octree3d::Debug", "Initializing octree cube ({} vertices)", CUBE_VERTEX_COUNT);
            Self::build()
        })
    }

    fn build() -> Self {
        let mut vertices = [Vec3::ZERO; CUBE_VERTEX_COUNT];
        let mut i = 0;
        // For each axis, the 4 edges parallel to it
        for axis in 0..3 {
            for corner in 0..4 {
                let a = if corner & 1 == 0 { -0.5 } else { 0.5 };
                let b = if corner & 2 == 0 { -0.5 } else { 0.5 };
                let (start, end) = match axis {
                    0 => (Vec3::new(-0.5, a, b), Vec3::new(0.5, a, b)),
                    1 => (Vec3::new(a, -0.5, b), Vec3::new(a, 0.5, b)),
                    _ => (Vec3::new(a, b, -0.5), Vec3::new(a, b, 0.5)),
                };
                vertices[i] = start;
                vertices[i + 1] = end;
                i += 2;
            }
        }
        Self { vertices }
    }

    /// Vertex pairs, one pair per edge.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Tightly packed f32 xyz data for vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Drawing seam implemented by a renderer backend.
pub trait WireframeDrawer {
    /// Draw `cube` as a line list transformed by `mvp`.
    fn draw_lines(&mut self, mvp: &Mat4, color: Vec3, cube: &WireframeCube) -> Result<()>;

    /// Clear the depth attachment.
    fn clear_depth(&mut self) -> Result<()>;
}

/// Recorded drawer command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Lines { mvp: Mat4, color: Vec3 },
    ClearDepth,
}

/// Drawer that records calls in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingDrawer {
    calls: Vec<DrawCall>,
}

impl RecordingDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of line draws with exactly `color`.
    pub fn count_with_color(&self, color: Vec3) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Lines { color: c, .. } if *c == color))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl WireframeDrawer for RecordingDrawer {
    fn draw_lines(&mut self, mvp: &Mat4, color: Vec3, _cube: &WireframeCube) -> Result<()> {
        self.calls.push(DrawCall::Lines { mvp: *mvp, color });
        Ok(())
    }

    fn clear_depth(&mut self) -> Result<()> {
        self.calls.push(DrawCall::ClearDepth);
        Ok(())
    }
}

impl OctreeIndex {
    /// Draw every node: empty ones white, clear depth, in-use ones red.
    ///
    /// Returns the number of cubes drawn.
    pub fn render(&self, camera: &Camera, drawer: &mut dyn WireframeDrawer) -> Result<usize> {
        let cube = WireframeCube::shared();
        let view_proj = camera.view_projection_matrix();

        let mut drawn = self.draw_nodes(self.empty_nodes(), &view_proj, EMPTY_NODE_COLOR, cube, drawer)?;
        drawer.clear_depth()?;
        drawn += self.draw_nodes(self.in_use_nodes(), &view_proj, IN_USE_NODE_COLOR, cube, drawer)?;
        Ok(drawn)
    }

    fn draw_nodes(
        &self,
        keys: impl Iterator<Item = NodeKey>,
        view_proj: &Mat4,
        color: Vec3,
        cube: &WireframeCube,
        drawer: &mut dyn WireframeDrawer,
    ) -> Result<usize> {
        let mut drawn = 0;
        for node in keys.filter_map(|key| self.node(key)) {
            let mvp = *view_proj * *node.transform();
            drawer.draw_lines(&mvp, color, cube)?;
            drawn += 1;
        }
        Ok(drawn)
    }
}

#[cfg(test)]
#[path = "wireframe_tests.rs"]
mod tests;
