//! Semi-implicit Euler integration of mob kinematics plus the hard
//! constraints applied after it (solid obstacles, world bounds).

use glam::Vec2;
use savanna_data::{Mob, Obstacle};

use crate::steering::truncate;

const MIN_TURN_SPEED: f32 = 1e-3;

/// Applies drag and the clamped steering force, then moves the mob.
///
/// `speed_factor` scales the speed cap (lakes slow mobs down).
pub fn integrate(mob: &mut Mob, force: Vec2, drag: f32, speed_factor: f32, dt: f32) {
    if dt <= 0.0 {
        return;
    }

    let steering = truncate(force, mob.max_force);
    mob.steering_direction = steering;

    let acceleration = if mob.mass > 0.0 { steering / mob.mass } else { Vec2::ZERO };
    mob.velocity -= mob.velocity * (drag * dt).clamp(0.0, 1.0);
    mob.velocity = truncate(
        mob.velocity + acceleration * dt,
        mob.max_speed * speed_factor.max(0.0),
    );
    mob.position += mob.velocity * dt;

    if mob.velocity.length() > MIN_TURN_SPEED {
        mob.orientation = mob.velocity.y.atan2(mob.velocity.x);
    }
}

/// Speed multiplier for a mob at its current position.
#[must_use]
pub fn terrain_speed_factor(mob: &Mob, obstacles: &[Obstacle], lake_speed_factor: f32) -> f32 {
    let wading = obstacles
        .iter()
        .any(|o| !o.kind.is_solid() && o.contains(mob.position, 0.0));
    if wading {
        lake_speed_factor
    } else {
        1.0
    }
}

/// Pushes a mob out of every solid obstacle it penetrates and cancels the
/// velocity component pointing into it. Returns true if anything was resolved.
pub fn resolve_obstacles(mob: &mut Mob, obstacles: &[Obstacle]) -> bool {
    let mut resolved = false;
    for obstacle in obstacles.iter().filter(|o| o.kind.is_solid()) {
        let reach = obstacle.radius + mob.radius;
        let offset = mob.position - obstacle.position;
        let distance_sq = offset.length_squared();
        if distance_sq >= reach * reach {
            continue;
        }

        let mut normal = offset.normalize_or_zero();
        if normal == Vec2::ZERO {
            normal = -mob.heading();
        }
        mob.position = obstacle.position + normal * reach;

        let inward = mob.velocity.dot(normal);
        if inward < 0.0 {
            mob.velocity -= normal * inward;
        }
        resolved = true;
    }
    resolved
}

/// Keeps a mob inside `(radius, radius)..(size - radius)`, stopping motion into the walls.
pub fn confine_to_bounds(mob: &mut Mob, size: Vec2) {
    let min = Vec2::splat(mob.radius).min(size * 0.5);
    let max = (size - Vec2::splat(mob.radius)).max(size * 0.5);

    if mob.position.x < min.x {
        mob.position.x = min.x;
        mob.velocity.x = mob.velocity.x.max(0.0);
    } else if mob.position.x > max.x {
        mob.position.x = max.x;
        mob.velocity.x = mob.velocity.x.min(0.0);
    }

    if mob.position.y < min.y {
        mob.position.y = min.y;
        mob.velocity.y = mob.velocity.y.max(0.0);
    } else if mob.position.y > max.y {
        mob.position.y = max.y;
        mob.velocity.y = mob.velocity.y.min(0.0);
    }
}
