//! Headless octree demo.
//!
//! Bounces a swarm of balls inside the octree for a fixed number of frames,
//! reports per-frame statistics and what the render hook would draw, and
//! validates the index bookkeeping at the end.

use glam::{Mat4, Vec3};
use octree_3d_engine::octree3d::camera::Camera;
use octree_3d_engine::octree3d::debug::{RecordingDrawer, EMPTY_NODE_COLOR, IN_USE_NODE_COLOR};
use octree_3d_engine::octree3d::log::{DefaultLogger, LogSeverity};
use octree_3d_engine::octree3d::spatial::{Ball, FrameStats, OctreeConfig, Simulation};
use octree_3d_engine::octree3d::{Engine, Result};

const SOURCE: &str = "octree3d_demo";

/// Demo parameters.
#[derive(Debug, Clone)]
struct DemoConfig {
    octree: OctreeConfig,
    ball_count: usize,
    ball_radius: f32,
    max_speed: f32,
    frame_count: u32,
    /// Seconds per frame
    time_step: f32,
    /// Log statistics every N frames
    report_every: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            octree: OctreeConfig::default().with_max_depth(3),
            ball_count: 64,
            ball_radius: 0.02,
            max_speed: 0.6,
            frame_count: 600,
            time_step: 1.0 / 60.0,
            report_every: 60,
        }
    }
}

fn log(message: String) {
    Engine::log(LogSeverity::Info, SOURCE, message);
}

/// Spread balls with a low-discrepancy sequence so runs are reproducible.
fn spawn_balls(sim: &mut Simulation<Ball>, config: &DemoConfig) -> Result<()> {
    const PHI: [f32; 3] = [0.819_172_5, 0.671_043_5, 0.549_670_3];
    let half = config.octree.root_size * 0.5 - config.ball_radius * 2.0;

    for i in 0..config.ball_count {
        let n = i as f32 + 1.0;
        let unit = Vec3::new((n * PHI[0]).fract(), (n * PHI[1]).fract(), (n * PHI[2]).fract());
        let position = config.octree.root_center + (unit * 2.0 - Vec3::ONE) * half;

        let dir = Vec3::new((n * 2.39).sin(), (n * 1.71).cos(), (n * 0.93).sin());
        let velocity = dir.normalize_or_zero() * config.max_speed * (0.3 + 0.7 * unit.x);

        sim.add_body(Ball::new(position, velocity, config.ball_radius))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Info));

    let config = DemoConfig::default();
    log(format!(
        "{} balls (radius {}), leaf half-size {}",
        config.ball_count, config.ball_radius, config.octree.leaf_half_size()
    ));

    let mut sim: Simulation<Ball> = Simulation::new(config.octree)?;
    spawn_balls(&mut sim, &config)?;

    let camera = Camera::new(
        Mat4::look_at_rh(Vec3::new(1.2, 0.9, 1.6), config.octree.root_center, Vec3::Y),
        Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 10.0),
    );
    let mut drawer = RecordingDrawer::new();
    let mut totals = FrameStats::default();

    for frame in 1..=config.frame_count {
        for (_, ball) in sim.bodies_mut() {
            ball.advance(config.time_step);
        }
        let stats = sim.update()?;
        totals.moved += stats.moved;
        totals.bounced += stats.bounced;
        totals.unchanged += stats.unchanged;

        drawer.clear();
        sim.index().render(&camera, &mut drawer)?;

        if frame % config.report_every == 0 {
            log(format!(
                "frame {}: {} moved, {} bounced | {} white / {} red cubes",
                frame,
                stats.moved,
                stats.bounced,
                drawer.count_with_color(EMPTY_NODE_COLOR),
                drawer.count_with_color(IN_USE_NODE_COLOR),
            ));
        }
    }

    sim.validate()?;
    log(format!(
        "done: {} moves, {} bounces, {} stays over {} frames; {} registry transitions",
        totals.moved,
        totals.bounced,
        totals.unchanged,
        config.frame_count,
        sim.index().registry().transition_count(),
    ));
    Ok(())
}
