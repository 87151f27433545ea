//! Integration tests for the octree index through the public API
//!
//! Run with: cargo test --test octree_integration_tests

use octree_3d_engine::glam::{Mat4, Vec3};
use octree_3d_engine::octree3d::camera::Camera;
use octree_3d_engine::octree3d::debug::{
    DrawCall, RecordingDrawer, EMPTY_NODE_COLOR, IN_USE_NODE_COLOR,
};
use octree_3d_engine::octree3d::spatial::{
    Ball, BodyKey, NodeKey, OctreeConfig, OctreeIndex, Placement, Simulation, SpatialBody,
    SpatialIndex,
};
use octree_3d_engine::octree3d::Error;
use slotmap::SlotMap;

fn deepest_containing(index: &OctreeIndex, position: Vec3, radius: f32) -> u32 {
    index
        .nodes()
        .filter(|(_, node)| node.contains_sphere(position, radius))
        .map(|(_, node)| node.depth())
        .max()
        .unwrap_or(0)
}

fn siblings(index: &OctreeIndex, node: NodeKey) -> Vec<NodeKey> {
    let parent = index.node(node).unwrap().parent().unwrap();
    index.node(parent).unwrap().children().unwrap()
        .iter()
        .copied()
        .filter(|&k| k != node)
        .collect()
}

// ============================================================================
// FRAME-BY-FRAME SCENARIO
// ============================================================================

#[test]
fn test_integration_leaf_assignment_scenario() {
    let mut index = OctreeIndex::new(OctreeConfig::default()).unwrap();
    let mut keys = SlotMap::<BodyKey, ()>::with_key();
    let key = keys.insert(());

    assert_eq!(index.node_count(), 73);

    // Frame 1: body fits one depth-2 leaf
    let mut ball = Ball::new(Vec3::new(0.375, -0.125, 0.125), Vec3::ZERO, 0.05);
    let leaf = index.update_object(key, &mut ball).unwrap().node();
    assert_eq!(index.node(leaf).unwrap().depth(), 2);
    assert!(index.registry().is_in_use(leaf));
    for sibling in siblings(&index, leaf) {
        assert!(index.registry().is_empty_node(sibling));
    }
    assert_eq!(index.registry().in_use_count() + index.registry().empty_count(), 73);

    // Frame 2: small move inside the leaf
    let transitions = index.registry().transition_count();
    ball.set_position(Vec3::new(0.36, -0.13, 0.12));
    assert_eq!(index.update_object(key, &mut ball).unwrap(), Placement::Unchanged(leaf));
    assert_eq!(index.registry().transition_count(), transitions);

    // Frame 3: cross into a different depth-1 subtree
    ball.set_position(Vec3::new(0.375, 0.125, 0.125));
    let placement = index.update_object(key, &mut ball).unwrap();
    assert!(placement.is_moved());
    let new_leaf = placement.node();
    assert!(index.registry().is_empty_node(leaf));
    assert!(index.registry().is_in_use(new_leaf));
    assert_eq!(index.registry().in_use_count(), 1);
    assert!(index.validate_bodies([(key, ball.current_node())]).is_ok());

    // Frame 4: body at the root center straddles every child boundary
    ball.set_position(Vec3::ZERO);
    assert_eq!(index.update_object(key, &mut ball).unwrap().node(), index.root());
}

#[test]
fn test_integration_reclassification_matches_full_scan() {
    let config = OctreeConfig::default()
        .with_max_depth(4)
        .with_root_size(8.0)
        .with_root_center(Vec3::new(1.0, 2.0, 3.0));
    let mut index = OctreeIndex::new(config).unwrap();
    let mut keys = SlotMap::<BodyKey, ()>::with_key();
    let key = keys.insert(());

    // Walk a body along a deterministic path, reclassifying incrementally
    let mut ball = Ball::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 0.05);
    for step in 0..400 {
        let t = step as f32 * 0.05;
        let position = Vec3::new(1.0, 2.0, 3.0)
            + Vec3::new(t.sin() * 3.5, (t * 0.7).cos() * 3.0, (t * 1.3).sin() * 3.9);
        ball.set_position(position);

        let node = index.update_object(key, &mut ball).unwrap().node();
        assert_eq!(index.node(node).unwrap().depth(), deepest_containing(&index, position, 0.05));
        assert!(index.validate().is_ok());
    }
}

#[test]
fn test_integration_stale_reference_from_other_tree() {
    let deep = OctreeIndex::new(OctreeConfig::default().with_max_depth(3)).unwrap();
    let mut shallow = OctreeIndex::new(OctreeConfig::default().with_max_depth(0)).unwrap();
    let mut keys = SlotMap::<BodyKey, ()>::with_key();

    let mut ball = Ball::new(Vec3::splat(0.3), Vec3::ZERO, 0.01);
    ball.set_current_node(Some(deep.locate(Vec3::splat(0.3), 0.01)));

    let result = shallow.update_object(keys.insert(()), &mut ball);
    assert!(matches!(result, Err(Error::StaleNode(_))));
}

// ============================================================================
// SIMULATION
// ============================================================================

#[test]
fn test_integration_simulation_keeps_partition() {
    let mut sim: Simulation<Ball> =
        Simulation::new(OctreeConfig::default().with_max_depth(3)).unwrap();

    let golden = 0.618_034_f32;
    for i in 0..50 {
        let s = i as f32;
        let position = Vec3::new((s * golden).fract(), (s * golden * 2.0).fract(), (s * golden * 3.0).fract())
            * 0.9 - Vec3::splat(0.45);
        let velocity = Vec3::new((s * 1.1).cos(), (s * 0.9).sin(), (s * 1.7).cos()) * 0.3;
        sim.add_body(Ball::new(position, velocity, 0.015)).unwrap();
    }

    let mut total_moves = 0;
    let mut total_bounces = 0;
    for _ in 0..300 {
        for (_, ball) in sim.bodies_mut() {
            ball.advance(1.0 / 60.0);
        }
        let stats = sim.update().unwrap();
        assert_eq!(stats.moved + stats.unchanged, 50);
        total_moves += stats.moved;
        total_bounces += stats.bounced;

        let registry = sim.index().registry();
        assert_eq!(registry.empty_count() + registry.in_use_count(), sim.index().node_count());
        assert!(sim.validate().is_ok());
    }

    assert!(total_moves > 0);
    assert!(total_bounces > 0);
    assert_eq!(sim.index().tracked_count(), 50);
}

// ============================================================================
// RENDER HOOK
// ============================================================================

#[test]
fn test_integration_render_order() {
    let mut sim: Simulation<Ball> = Simulation::new(OctreeConfig::default()).unwrap();
    sim.add_body(Ball::new(Vec3::splat(0.125), Vec3::ZERO, 0.05)).unwrap();
    sim.add_body(Ball::new(Vec3::splat(-0.375), Vec3::ZERO, 0.05)).unwrap();
    sim.add_body(Ball::new(Vec3::ZERO, Vec3::ZERO, 0.05)).unwrap();

    let camera = Camera::new(
        Mat4::look_at_rh(Vec3::new(1.5, 1.0, 2.0), Vec3::ZERO, Vec3::Y),
        Mat4::perspective_rh(1.0, 4.0 / 3.0, 0.1, 10.0),
    );
    let mut drawer = RecordingDrawer::new();
    let drawn = sim.index().render(&camera, &mut drawer).unwrap();

    assert_eq!(drawn, 73);
    assert_eq!(drawer.count_with_color(IN_USE_NODE_COLOR), 3);
    assert_eq!(drawer.count_with_color(EMPTY_NODE_COLOR), 70);

    // White cubes, one depth clear, then red cubes
    let clear_at = drawer.calls().iter().position(|c| *c == DrawCall::ClearDepth).unwrap();
    assert_eq!(clear_at, 70);
    for call in &drawer.calls()[clear_at + 1..] {
        assert!(matches!(call, DrawCall::Lines { color, .. } if *color == IN_USE_NODE_COLOR));
    }
}
