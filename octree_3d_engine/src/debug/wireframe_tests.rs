use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::spatial::{Ball, BodyKey, OctreeConfig, OctreeIndex, SpatialIndex};
use super::*;

fn make_index(max_depth: u32) -> OctreeIndex {
    OctreeIndex::new(OctreeConfig::default().with_max_depth(max_depth)).unwrap()
}

// ============================================================================
// Shared cube
// ============================================================================

#[test]
fn test_cube_has_twelve_unit_edges() {
    let cube = WireframeCube::shared();
    assert_eq!(cube.vertices().len(), CUBE_VERTEX_COUNT);

    for edge in cube.vertices().chunks(2) {
        let delta = (edge[1] - edge[0]).abs();
        // Axis-aligned, length 1
        assert_eq!(delta.element_sum(), 1.0);
        assert_eq!(delta.max_element(), 1.0);
        for v in edge {
            assert_eq!(v.abs(), Vec3::splat(0.5));
        }
    }
}

#[test]
fn test_cube_edges_are_distinct() {
    let cube = WireframeCube::shared();
    let edges: Vec<_> = cube.vertices().chunks(2).collect();
    for (i, a) in edges.iter().enumerate() {
        for b in &edges[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_cube_is_shared() {
    assert!(std::ptr::eq(WireframeCube::shared(), WireframeCube::shared()));
}

#[test]
fn test_cube_byte_view() {
    let cube = WireframeCube::shared();
    let bytes = cube.as_bytes();
    assert_eq!(bytes.len(), CUBE_VERTEX_COUNT * 3 * std::mem::size_of::<f32>());

    let first_x = f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    assert_eq!(first_x, cube.vertices()[0].x);
}

// ============================================================================
// Render hook
// ============================================================================

#[test]
fn test_render_empty_tree_draws_all_white() {
    let index = make_index(1);
    let mut drawer = RecordingDrawer::new();

    let drawn = index.render(&Camera::default(), &mut drawer).unwrap();

    assert_eq!(drawn, 9);
    assert_eq!(drawer.count_with_color(EMPTY_NODE_COLOR), 9);
    assert_eq!(drawer.count_with_color(IN_USE_NODE_COLOR), 0);
    assert_eq!(drawer.calls().last(), Some(&DrawCall::ClearDepth));
}

#[test]
fn test_render_draws_in_use_after_depth_clear() {
    let mut index = make_index(2);
    let mut sm = slotmap::SlotMap::<BodyKey, ()>::with_key();
    let mut ball = Ball::new(Vec3::splat(0.125), Vec3::ZERO, 0.05);
    index.update_object(sm.insert(()), &mut ball).unwrap();

    let mut drawer = RecordingDrawer::new();
    let drawn = index.render(&Camera::default(), &mut drawer).unwrap();
    assert_eq!(drawn, 73);

    let calls = drawer.calls();
    let clear_at = calls.iter().position(|c| *c == DrawCall::ClearDepth).unwrap();
    assert_eq!(clear_at, 72);
    assert!(calls[..clear_at]
        .iter()
        .all(|c| matches!(c, DrawCall::Lines { color, .. } if *color == EMPTY_NODE_COLOR)));
    assert_eq!(calls.len(), 74);
    assert!(matches!(calls[73], DrawCall::Lines { color, .. } if color == IN_USE_NODE_COLOR));
}

#[test]
fn test_render_mvp_is_view_projection_times_node_transform() {
    let mut index = make_index(1);
    let mut sm = slotmap::SlotMap::<BodyKey, ()>::with_key();
    let mut ball = Ball::new(Vec3::splat(0.25), Vec3::ZERO, 0.05);
    let node = index.update_object(sm.insert(()), &mut ball).unwrap().node();

    let camera = Camera::new(
        Mat4::look_at_rh(Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO, Vec3::Y),
        Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 10.0),
    );
    let mut drawer = RecordingDrawer::new();
    index.render(&camera, &mut drawer).unwrap();

    let expected = camera.view_projection_matrix() * *index.node(node).unwrap().transform();
    match drawer.calls().last() {
        Some(DrawCall::Lines { mvp, color }) => {
            assert_eq!(*color, IN_USE_NODE_COLOR);
            assert_eq!(*mvp, expected);
        }
        other => panic!("expected a red line draw, got {:?}", other),
    }
}

#[test]
fn test_recording_drawer_clear() {
    let mut drawer = RecordingDrawer::new();
    drawer.clear_depth().unwrap();
    drawer.draw_lines(&Mat4::IDENTITY, EMPTY_NODE_COLOR, WireframeCube::shared()).unwrap();
    assert_eq!(drawer.calls().len(), 2);

    drawer.clear();
    assert!(drawer.calls().is_empty());
}
