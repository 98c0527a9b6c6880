//! Random placement of obstacles, food and actors.

use glam::Vec2;
use rand::Rng;
use savanna_data::{Obstacle, ObstacleKind};

use crate::config::WorldConfig;

/// Rejection-sampling budget for a free spot.
pub const PLACEMENT_ATTEMPTS: usize = 64;

fn random_point<R: Rng>(rng: &mut R, size: Vec2, inset: f32) -> Vec2 {
    let axis = |rng: &mut R, extent: f32| {
        let inset = inset.min(extent * 0.5);
        let span = extent - 2.0 * inset;
        if span > 0.0 {
            inset + rng.gen::<f32>() * span
        } else {
            extent * 0.5
        }
    };
    let x = axis(rng, size.x);
    let y = axis(rng, size.y);
    Vec2::new(x, y)
}

/// A uniformly random point at least `radius` from the field edges and clear
/// of every obstacle. Falls back to the last candidate when the field is too
/// crowded to find one.
pub fn random_free_position<R: Rng>(
    rng: &mut R,
    size: Vec2,
    obstacles: &[Obstacle],
    radius: f32,
) -> Vec2 {
    let mut candidate = random_point(rng, size, radius);
    for _ in 1..PLACEMENT_ATTEMPTS {
        if !obstacles.iter().any(|o| o.contains(candidate, radius)) {
            return candidate;
        }
        candidate = random_point(rng, size, radius);
    }
    candidate
}

/// Builds the obstacle field: the explicit list when one is configured,
/// otherwise the configured number of lakes, trees and rocks at random.
pub fn layout_obstacles<R: Rng>(config: &WorldConfig, rng: &mut R) -> Vec<Obstacle> {
    if !config.obstacles.is_empty() {
        return config.obstacles.iter().map(|o| o.to_obstacle()).collect();
    }

    let size = Vec2::new(config.width, config.height);
    let plan = [
        (ObstacleKind::Lake, config.lakes, config.lake_radius),
        (ObstacleKind::Tree, config.trees, config.tree_radius),
        (ObstacleKind::Rock, config.rocks, config.rock_radius),
    ];

    let mut obstacles = Vec::with_capacity(config.lakes + config.trees + config.rocks);
    for (kind, count, radius) in plan {
        for _ in 0..count {
            let position = random_free_position(rng, size, &obstacles, radius);
            obstacles.push(Obstacle::new(kind, position, radius));
        }
    }
    obstacles
}

/// Random start velocity with each axis in `[-magnitude, magnitude]`.
pub fn random_velocity<R: Rng>(rng: &mut R, magnitude: f32) -> Vec2 {
    if magnitude <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        rng.gen_range(-magnitude..=magnitude),
        rng.gen_range(-magnitude..=magnitude),
    )
}
