use glam::Vec3;
use super::*;

#[test]
fn test_new_ball_is_untracked() {
    let ball = Ball::new(Vec3::ZERO, Vec3::X, 0.05);
    assert_eq!(ball.current_node(), None);
    assert_eq!(ball.radius(), 0.05);
    assert_eq!(ball.bounce_count(), 0);
}

#[test]
fn test_advance_integrates_velocity() {
    let mut ball = Ball::new(Vec3::ZERO, Vec3::new(1.0, -2.0, 0.5), 0.05);
    ball.advance(0.5);
    assert_eq!(ball.local_position(), Vec3::new(0.5, -1.0, 0.25));
}

#[test]
fn test_bounce_reflects_approaching_velocity() {
    let mut ball = Ball::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 0.0), 0.05);
    // Hitting the +X wall: normal points back toward -X
    ball.bounce(Vec3::NEG_X);
    assert_eq!(ball.velocity(), Vec3::new(-2.0, 1.0, 0.0));
    assert_eq!(ball.bounce_count(), 1);
}

#[test]
fn test_bounce_ignored_when_moving_away() {
    let mut ball = Ball::new(Vec3::ZERO, Vec3::new(-2.0, 1.0, 0.0), 0.05);
    ball.bounce(Vec3::NEG_X);
    assert_eq!(ball.velocity(), Vec3::new(-2.0, 1.0, 0.0));
    assert_eq!(ball.bounce_count(), 0);
}

#[test]
fn test_bounce_preserves_speed() {
    let mut ball = Ball::new(Vec3::ZERO, Vec3::new(0.3, -0.4, 1.2), 0.05);
    let speed = ball.velocity().length();
    ball.bounce(Vec3::NEG_Z);
    assert!((ball.velocity().length() - speed).abs() < 1e-6);
    assert!(ball.velocity().z < 0.0);
}
