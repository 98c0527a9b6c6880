//! Steering behaviors.
//!
//! Every behavior is a pure function of a mob's state and what it perceives,
//! returning a force-like vector. The herd and the predator controller weigh
//! the contributions, [`blend`] them and hand the result to the integrator.

use glam::Vec2;
use savanna_data::{Mob, Obstacle};
use serde::{Deserialize, Serialize};

use crate::config::{BehaviorWeights, SteeringConfig};

const EPSILON: f32 = 1e-4;

/// Clamps `vector` to at most `max_length`, keeping its direction.
#[inline]
#[must_use]
pub fn truncate(vector: Vec2, max_length: f32) -> Vec2 {
    let length = vector.length();
    if length > max_length && length > 0.0 {
        vector / length * max_length
    } else {
        vector
    }
}

/// True when two circles touch or overlap.
#[inline]
#[must_use]
pub fn circles_overlap(p1: Vec2, p2: Vec2, r1: f32, r2: f32) -> bool {
    let radii = r1 + r2;
    p1.distance_squared(p2) <= radii * radii
}

/// Nearest point where a ray enters a circle.
///
/// `direction` need not be normalized. An origin inside or on the circle
/// intersects at the origin itself. Circles behind the ray are not hit.
#[must_use]
pub fn ray_circle_intersection(
    origin: Vec2,
    direction: Vec2,
    center: Vec2,
    radius: f32,
) -> Option<Vec2> {
    let direction = direction.normalize_or_zero();
    if direction == Vec2::ZERO {
        return None;
    }

    let to_origin = origin - center;
    let c = to_origin.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(origin);
    }

    let b = to_origin.dot(direction);
    if b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = -b - discriminant.sqrt();
    Some(origin + direction * t)
}

/// Steers toward `target`, slowing down linearly inside `slowing_distance`.
#[must_use]
pub fn arrival(mob: &Mob, target: Vec2, slowing_distance: f32) -> Vec2 {
    let offset = target - mob.position;
    let distance = offset.length();
    if distance < EPSILON {
        return -mob.velocity;
    }

    let speed = if slowing_distance > 0.0 {
        mob.max_speed * (distance / slowing_distance).min(1.0)
    } else {
        mob.max_speed
    };
    let desired = offset * (speed / distance);
    desired - mob.velocity
}

/// Steers toward `target` at full speed.
#[must_use]
pub fn seek(mob: &Mob, target: Vec2) -> Vec2 {
    arrival(mob, target, 0.0)
}

/// Seeks the position a moving target will occupy, looking at most
/// `max_prediction` seconds ahead.
#[must_use]
pub fn pursuit(mob: &Mob, target_position: Vec2, target_velocity: Vec2, max_prediction: f32) -> Vec2 {
    let distance = mob.position.distance(target_position);
    let lookahead = if mob.max_speed > 0.0 {
        (distance / mob.max_speed).min(max_prediction.max(0.0))
    } else {
        0.0
    };
    seek(mob, target_position + target_velocity * lookahead)
}

/// Steers away from `threat` at full speed while it is closer than `panic_distance`.
#[must_use]
pub fn flee(mob: &Mob, threat: Vec2, panic_distance: f32) -> Vec2 {
    let offset = mob.position - threat;
    let distance = offset.length();
    if distance >= panic_distance {
        return Vec2::ZERO;
    }

    let away = if distance < EPSILON {
        mob.heading()
    } else {
        offset / distance
    };
    away * mob.max_speed - mob.velocity
}

/// Pushes away from neighbors inside `radius`, stronger the closer they are.
///
/// Coincident neighbors (including the mob itself) contribute nothing.
#[must_use]
pub fn separation<I>(mob: &Mob, neighbors: I, radius: f32) -> Vec2
where
    I: IntoIterator<Item = Vec2>,
{
    if radius <= 0.0 {
        return Vec2::ZERO;
    }

    let mut push = Vec2::ZERO;
    for neighbor in neighbors {
        let offset = mob.position - neighbor;
        let distance = offset.length();
        if distance > EPSILON && distance < radius {
            push += offset / distance * (1.0 - distance / radius);
        }
    }
    push * mob.max_force
}

/// Look-ahead parameters for [`avoidance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceParams {
    pub min_look_ahead: f32,
    pub look_ahead_time: f32,
    pub bounds_margin: f32,
    /// World size; the field spans `(0, 0)..bounds`.
    pub bounds: Vec2,
}

impl AvoidanceParams {
    #[must_use]
    pub fn from_config(config: &SteeringConfig, bounds: Vec2) -> Self {
        Self {
            min_look_ahead: config.min_look_ahead,
            look_ahead_time: config.look_ahead_time,
            bounds_margin: config.bounds_margin,
            bounds,
        }
    }

    #[must_use]
    pub fn look_ahead(&self, mob: &Mob) -> f32 {
        self.min_look_ahead + mob.speed() * self.look_ahead_time
    }
}

/// The ray a mob cast while avoiding, kept for debug drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvoidanceProbe {
    pub origin: Vec2,
    pub end: Vec2,
    pub hit: Option<Vec2>,
}

/// Ray-cast avoidance of circular obstacles and of the world bounds.
#[must_use]
pub fn avoidance(mob: &Mob, obstacles: &[Obstacle], params: &AvoidanceParams) -> (Vec2, AvoidanceProbe) {
    let heading = mob.heading();
    let look_ahead = params.look_ahead(mob);
    let end = mob.position + heading * look_ahead;

    let mut nearest: Option<(f32, Vec2, &Obstacle)> = None;
    for obstacle in obstacles {
        let reach = obstacle.radius + mob.radius;
        if let Some(hit) = ray_circle_intersection(mob.position, heading, obstacle.position, reach) {
            let distance = mob.position.distance(hit);
            let closer = nearest.map_or(true, |(best, _, _)| distance < best);
            if distance <= look_ahead && closer {
                nearest = Some((distance, hit, obstacle));
            }
        }
    }

    let mut force = Vec2::ZERO;
    if let Some((distance, hit, obstacle)) = nearest {
        if distance < EPSILON {
            let mut out = (mob.position - obstacle.position).normalize_or_zero();
            if out == Vec2::ZERO {
                out = heading.perp();
            }
            force += out * mob.max_force;
        } else {
            let away = hit - obstacle.position;
            let mut lateral = away - heading * away.dot(heading);
            if lateral.length_squared() < EPSILON {
                lateral = heading.perp();
            }
            let urgency = if look_ahead > 0.0 {
                (1.0 - distance / look_ahead).clamp(0.0, 1.0)
            } else {
                1.0
            };
            force += lateral.normalize_or_zero() * mob.max_force * urgency;
        }
    }

    force += bounds_push(end, look_ahead, mob.max_force, params);

    let probe = AvoidanceProbe {
        origin: mob.position,
        end,
        hit: nearest.map(|(_, hit, _)| hit),
    };
    (force, probe)
}

/// Pushes a look-ahead point that left the inset field back inside.
fn bounds_push(end: Vec2, look_ahead: f32, max_force: f32, params: &AvoidanceParams) -> Vec2 {
    let min = Vec2::splat(params.bounds_margin);
    let max = params.bounds - Vec2::splat(params.bounds_margin);
    let scale = if look_ahead > 0.0 { max_force / look_ahead } else { max_force };

    let axis = |value: f32, low: f32, high: f32| -> f32 {
        if value < low {
            ((low - value) * scale).min(max_force)
        } else if value > high {
            -((value - high) * scale).min(max_force)
        } else {
            0.0
        }
    };
    Vec2::new(axis(end.x, min.x, max.x), axis(end.y, min.y, max.y))
}

/// Per-behavior steering contributions for one mob in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringContributions {
    pub arrival: Vec2,
    pub flee: Vec2,
    pub separation: Vec2,
    pub avoidance: Vec2,
}

/// Weighted sum of the contributions, clamped to `max_force`.
#[must_use]
pub fn blend(contributions: &SteeringContributions, weights: &BehaviorWeights, max_force: f32) -> Vec2 {
    let sum = contributions.arrival * weights.arrival
        + contributions.flee * weights.flee
        + contributions.separation * weights.separation
        + contributions.avoidance * weights.avoidance;
    truncate(sum, max_force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use savanna_data::ObstacleKind;

    fn mob_at(x: f32, y: f32) -> Mob {
        Mob {
            mass: 1.0,
            max_force: 50.0,
            max_speed: 40.0,
            ..Mob::at(Vec2::new(x, y))
        }
    }

    fn params() -> AvoidanceParams {
        AvoidanceParams {
            min_look_ahead: 30.0,
            look_ahead_time: 1.0,
            bounds_margin: 20.0,
            bounds: Vec2::new(1000.0, 1000.0),
        }
    }

    #[test]
    fn test_truncate_clamps_long_vectors() {
        let v = truncate(Vec2::new(30.0, 40.0), 10.0);
        assert!((v.length() - 10.0).abs() < 1e-4);
        assert!((v.x - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_truncate_keeps_short_and_zero_vectors() {
        assert_eq!(truncate(Vec2::new(1.0, 1.0), 10.0), Vec2::new(1.0, 1.0));
        assert_eq!(truncate(Vec2::ZERO, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_circles_overlap_includes_touching() {
        assert!(circles_overlap(Vec2::ZERO, Vec2::new(20.0, 0.0), 10.0, 10.0));
        assert!(!circles_overlap(Vec2::ZERO, Vec2::new(20.1, 0.0), 10.0, 10.0));
    }

    #[test]
    fn test_ray_circle_hits_near_side() {
        let hit = ray_circle_intersection(Vec2::ZERO, Vec2::new(2.0, 0.0), Vec2::new(10.0, 0.0), 3.0)
            .expect("ray should hit");
        assert!((hit.x - 7.0).abs() < 1e-4);
        assert!(hit.y.abs() < 1e-4);
    }

    #[test]
    fn test_ray_circle_misses() {
        assert!(ray_circle_intersection(Vec2::ZERO, Vec2::X, Vec2::new(10.0, 5.0), 3.0).is_none());
        assert!(ray_circle_intersection(Vec2::ZERO, -Vec2::X, Vec2::new(10.0, 0.0), 3.0).is_none());
        assert!(ray_circle_intersection(Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, 0.0), 3.0).is_none());
    }

    #[test]
    fn test_ray_circle_origin_inside() {
        let origin = Vec2::new(9.0, 0.0);
        assert_eq!(
            ray_circle_intersection(origin, Vec2::Y, Vec2::new(10.0, 0.0), 3.0),
            Some(origin)
        );
    }

    #[test]
    fn test_arrival_full_speed_when_far() {
        let mob = mob_at(0.0, 0.0);
        let force = arrival(&mob, Vec2::new(500.0, 0.0), 100.0);
        assert!((force.x - 40.0).abs() < 1e-3);
        assert!(force.y.abs() < 1e-4);
    }

    #[test]
    fn test_arrival_ramps_down_near_target() {
        let mob = mob_at(0.0, 0.0);
        let force = arrival(&mob, Vec2::new(50.0, 0.0), 100.0);
        assert!((force.x - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_arrival_brakes_on_target() {
        let mut mob = mob_at(5.0, 5.0);
        mob.velocity = Vec2::new(3.0, -2.0);
        assert_eq!(arrival(&mob, Vec2::new(5.0, 5.0), 100.0), Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_pursuit_leads_moving_target() {
        let mob = mob_at(0.0, 0.0);
        let force = pursuit(&mob, Vec2::new(40.0, 0.0), Vec2::new(0.0, 40.0), 1.0);
        assert!(force.y > 0.0, "pursuer should aim ahead of the target");
        assert!(force.x > 0.0);
    }

    #[test]
    fn test_flee_inside_panic_distance() {
        let mob = mob_at(10.0, 0.0);
        let force = flee(&mob, Vec2::ZERO, 50.0);
        assert!((force.x - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_pursuit_look_ahead_capped_by_max_prediction() {
        let mob = mob_at(0.0, 0.0);
        let target = Vec2::new(400.0, 0.0);
        let velocity = Vec2::new(0.0, 40.0);
        // 10 s to close the gap, but only half a second of lead is allowed.
        assert_eq!(
            pursuit(&mob, target, velocity, 0.5),
            seek(&mob, target + velocity * 0.5)
        );
        assert_eq!(pursuit(&mob, target, velocity, 0.0), seek(&mob, target));
    }

    #[test]
    fn test_flee_on_top_of_threat_follows_heading() {
        let mut mob = mob_at(10.0, 10.0);
        mob.orientation = std::f32::consts::FRAC_PI_2;
        let force = flee(&mob, mob.position, 50.0);
        assert!(force.x.abs() < 1e-3);
        assert!((force.y - 40.0).abs() < 1e-3);

        mob.velocity = Vec2::new(-10.0, 0.0);
        let force = flee(&mob, mob.position, 50.0);
        assert!((force.x + 30.0).abs() < 1e-3);
        assert!(force.y.abs() < 1e-3);
    }

    #[test]
    fn test_flee_ignores_distant_threat() {
        let mob = mob_at(100.0, 0.0);
        assert_eq!(flee(&mob, Vec2::ZERO, 50.0), Vec2::ZERO);
    }

    #[test]
    fn test_separation_pushes_away() {
        let mob = mob_at(0.0, 0.0);
        let force = separation(&mob, [Vec2::new(5.0, 0.0), Vec2::new(100.0, 0.0), Vec2::ZERO], 10.0);
        assert!(force.x < 0.0);
        assert!(force.y.abs() < 1e-4);
        assert!((force.x + 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_avoidance_steers_around_obstacle_ahead() {
        let mut mob = mob_at(100.0, 500.0);
        mob.velocity = Vec2::new(30.0, 0.0);
        let rock = Obstacle::new(ObstacleKind::Rock, Vec2::new(140.0, 495.0), 10.0);
        let (force, probe) = avoidance(&mob, &[rock], &params());
        assert!(probe.hit.is_some());
        assert!(force.y > 0.0, "obstacle below the path should push upward");
        assert!(force.x.abs() < 1e-3);
    }

    #[test]
    fn test_avoidance_ignores_obstacles_beyond_look_ahead() {
        let mut mob = mob_at(100.0, 500.0);
        mob.velocity = Vec2::new(30.0, 0.0);
        let lake = Obstacle::new(ObstacleKind::Lake, Vec2::new(400.0, 500.0), 20.0);
        let (force, probe) = avoidance(&mob, &[lake], &params());
        assert!(probe.hit.is_none());
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_avoidance_pushes_out_when_inside() {
        let mob = mob_at(105.0, 500.0);
        let tree = Obstacle::new(ObstacleKind::Tree, Vec2::new(100.0, 500.0), 20.0);
        let (force, _) = avoidance(&mob, &[tree], &params());
        assert!((force.x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_avoidance_dead_center_hit_steers_sideways() {
        let mut mob = mob_at(100.0, 500.0);
        mob.velocity = Vec2::new(30.0, 0.0);
        let rock = Obstacle::new(ObstacleKind::Rock, Vec2::new(140.0, 500.0), 10.0);
        let (force, probe) = avoidance(&mob, &[rock], &params());
        assert!(probe.hit.is_some());
        assert!(force.length() > 1.0, "a head-on obstacle still needs a push");
        assert!(force.dot(mob.heading()).abs() < 1e-3);
    }

    #[test]
    fn test_bounds_push_capped_per_axis() {
        let p = params();
        let push = bounds_push(Vec2::new(-1000.0, 2000.0), 10.0, 50.0, &p);
        assert_eq!(push, Vec2::new(50.0, -50.0));

        let push = bounds_push(Vec2::new(15.0, 500.0), 10.0, 50.0, &p);
        assert!((push.x - 25.0).abs() < 1e-3);
        assert_eq!(push.y, 0.0);

        assert_eq!(bounds_push(Vec2::new(500.0, 500.0), 10.0, 50.0, &p), Vec2::ZERO);
    }

    #[test]
    fn test_avoidance_turns_back_from_bounds() {
        let mut mob = mob_at(990.0, 500.0);
        mob.velocity = Vec2::new(30.0, 0.0);
        let (force, probe) = avoidance(&mob, &[], &params());
        assert!(force.x < 0.0);
        assert!(probe.end.x > 1000.0);
    }

    #[test]
    fn test_blend_clamps_to_max_force() {
        let contributions = SteeringContributions {
            arrival: Vec2::new(100.0, 0.0),
            flee: Vec2::new(0.0, 100.0),
            ..Default::default()
        };
        let force = blend(&contributions, &BehaviorWeights::default(), 30.0);
        assert!((force.length() - 30.0).abs() < 1e-3);
    }
}
