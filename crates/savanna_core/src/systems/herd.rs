//! Giraffe herd: graze, panic, keep apart, go around things.

use glam::Vec2;
use rand::Rng;
use rayon::prelude::*;
use savanna_data::{Food, Giraffe, Mob, Obstacle, SpriteHandle, SpriteId};

use super::MobView;
use crate::config::SteeringConfig;
use crate::events::SimEvent;
use crate::physics;
use crate::spatial_hash::SpatialHash;
use crate::spawn;
use crate::steering::{self, AvoidanceParams, AvoidanceProbe, SteeringContributions};

pub struct HerdContext<'a> {
    pub steering: &'a SteeringConfig,
    pub obstacles: &'a [Obstacle],
    pub avoidance: AvoidanceParams,
    pub record_probes: bool,
}

/// Steering decided for one giraffe this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HerdSteering {
    pub force: Vec2,
    pub target: Vec2,
    pub probe: Option<AvoidanceProbe>,
}

#[must_use]
pub fn nearest_point(points: &[Vec2], position: Vec2) -> Option<Vec2> {
    points
        .iter()
        .copied()
        .min_by(|a, b| {
            a.distance_squared(position)
                .total_cmp(&b.distance_squared(position))
        })
}

/// Blended steering for one live giraffe.
#[must_use]
pub fn steer_giraffe(
    index: usize,
    giraffes: &[MobView],
    spatial: &SpatialHash,
    food: &[Vec2],
    lions: &[Vec2],
    ctx: &HerdContext,
) -> HerdSteering {
    let mob = &giraffes[index].mob;
    let s = ctx.steering;

    let target = nearest_point(food, mob.position).unwrap_or(mob.position);
    let arrival = steering::arrival(mob, target, s.arrival_distance);

    let flee = nearest_point(lions, mob.position)
        .map_or(Vec2::ZERO, |lion| steering::flee(mob, lion, s.panic_distance));

    let mut neighbors = Vec::new();
    spatial.query_callback(mob.position, s.separation_radius, |other| {
        if other != index && giraffes[other].alive {
            neighbors.push(giraffes[other].mob.position);
        }
    });
    let separation = steering::separation(mob, neighbors, s.separation_radius);

    let (avoidance, probe) = steering::avoidance(mob, ctx.obstacles, &ctx.avoidance);

    let contributions = SteeringContributions {
        arrival,
        flee,
        separation,
        avoidance,
    };
    HerdSteering {
        force: steering::blend(&contributions, &s.weights, mob.max_force),
        target,
        probe: ctx.record_probes.then_some(probe),
    }
}

/// Computes every giraffe's steering in parallel from the frame snapshot.
/// The result is index-aligned with `giraffes`; carcasses get a default entry.
#[must_use]
pub fn steer_herd(
    giraffes: &[MobView],
    spatial: &SpatialHash,
    food: &[Vec2],
    lions: &[Vec2],
    ctx: &HerdContext,
) -> Vec<HerdSteering> {
    (0..giraffes.len())
        .into_par_iter()
        .map(|i| {
            if giraffes[i].alive {
                steer_giraffe(i, giraffes, spatial, food, lions, ctx)
            } else {
                HerdSteering::default()
            }
        })
        .collect()
}

/// Applies the decided steering to the live giraffes in the ECS.
pub fn integrate_herd(
    ecs: &mut hecs::World,
    giraffes: &[MobView],
    decided: &[HerdSteering],
    ctx: &HerdContext,
    dt: f32,
    probes: &mut Vec<AvoidanceProbe>,
) {
    for (view, steer) in giraffes.iter().zip(decided) {
        if !view.alive {
            continue;
        }
        let Ok(mut mob) = ecs.get::<&mut Mob>(view.entity) else {
            continue;
        };
        mob.steering_target = steer.target;
        let speed_factor =
            physics::terrain_speed_factor(&mob, ctx.obstacles, ctx.steering.lake_speed_factor);
        physics::integrate(&mut mob, steer.force, ctx.steering.drag, speed_factor, dt);
        physics::resolve_obstacles(&mut mob, ctx.obstacles);
        physics::confine_to_bounds(&mut mob, ctx.avoidance.bounds);
        if let Some(probe) = steer.probe {
            probes.push(probe);
        }
    }
}

/// Relocates every food a live giraffe is touching. Each food feeds at most
/// one giraffe per frame.
pub fn eat_food<R: Rng>(
    ecs: &mut hecs::World,
    rng: &mut R,
    size: Vec2,
    obstacles: &[Obstacle],
    events: &mut Vec<SimEvent>,
) {
    let grazers: Vec<(hecs::Entity, Vec2, f32)> = ecs
        .query::<(&Giraffe, &Mob)>()
        .iter()
        .filter(|(_, (giraffe, _))| giraffe.is_alive())
        .map(|(entity, (_, mob))| (entity, mob.position, mob.radius))
        .collect();

    for (_, food) in ecs.query_mut::<&mut Food>() {
        let eater = grazers.iter().find(|(_, position, radius)| {
            steering::circles_overlap(*position, food.position, *radius, food.radius)
        });
        if let Some(&(giraffe, _, _)) = eater {
            let eaten_at = food.position;
            food.position = spawn::random_free_position(rng, size, obstacles, food.radius);
            tracing::debug!(?giraffe, x = eaten_at.x, y = eaten_at.y, "Food eaten");
            events.push(SimEvent::FoodEaten {
                giraffe,
                position: eaten_at,
            });
        }
    }
}

/// Counts carcass timers down and removes the expired ones, handing their
/// sprites back through `released`.
pub fn decay_carcasses(
    ecs: &mut hecs::World,
    dt: f32,
    events: &mut Vec<SimEvent>,
    released: &mut Vec<SpriteId>,
) {
    let mut expired = Vec::new();
    for (entity, giraffe) in ecs.query_mut::<&mut Giraffe>() {
        if giraffe.dead {
            giraffe.carcass_timer -= dt;
            if giraffe.carcass_timer <= 0.0 {
                expired.push(entity);
            }
        }
    }

    for entity in expired {
        let sprite = ecs.get::<&SpriteHandle>(entity).ok().map(|handle| handle.0);
        if ecs.despawn(entity).is_ok() {
            if let Some(id) = sprite {
                released.push(id);
            }
            events.push(SimEvent::CarcassRemoved {
                giraffe: entity,
                sprite,
            });
        }
    }
}
