use glam::Vec3;
use super::*;

fn make_aabb(min: Vec3, max: Vec3) -> AABB {
    AABB { min, max }
}

#[test]
fn test_from_center_half_size() {
    let b = AABB::from_center_half_size(Vec3::new(1.0, 0.0, -1.0), 0.5);
    assert_eq!(b.min, Vec3::new(0.5, -0.5, -1.5));
    assert_eq!(b.max, Vec3::new(1.5, 0.5, -0.5));
    assert_eq!(b.center(), Vec3::new(1.0, 0.0, -1.0));
    assert_eq!(b.size(), Vec3::ONE);
}

#[test]
fn test_contains_point_is_inclusive() {
    let b = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert!(b.contains_point(Vec3::ZERO));
    assert!(b.contains_point(Vec3::new(1.0, -1.0, 1.0)));
    assert!(!b.contains_point(Vec3::new(1.0001, 0.0, 0.0)));
}

#[test]
fn test_shrunk_moves_faces_inward() {
    let b = make_aabb(Vec3::splat(-0.5), Vec3::splat(0.5)).shrunk(0.1);
    assert!((b.min.x + 0.4).abs() < 1e-6);
    assert!((b.max.z - 0.4).abs() < 1e-6);
}

#[test]
fn test_over_shrunk_box_contains_nothing() {
    let b = make_aabb(Vec3::splat(-0.5), Vec3::splat(0.5)).shrunk(0.6);
    assert!(b.min.x > b.max.x);
    assert!(!b.contains_point(Vec3::ZERO));
}

#[test]
fn test_aabb_contains() {
    let big = make_aabb(Vec3::splat(-10.0), Vec3::splat(10.0));
    let small = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    let straddling = make_aabb(Vec3::new(5.0, 5.0, 5.0), Vec3::new(15.0, 15.0, 15.0));

    assert!(big.contains(&small));
    assert!(!small.contains(&big));
    assert!(!big.contains(&straddling));
}

#[test]
fn test_aabb_intersects() {
    let a = make_aabb(Vec3::splat(-2.0), Vec3::splat(2.0));
    let b = make_aabb(Vec3::splat(1.0), Vec3::splat(3.0));
    let c = make_aabb(Vec3::splat(5.0), Vec3::splat(7.0));

    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
}
