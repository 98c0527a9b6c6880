//! Lion controller: energy gate, lock-on, pursuit and the kill.

use glam::Vec2;
use savanna_data::{LionState, Mob, Obstacle};

use super::MobView;
use crate::components::Lion;
use crate::config::{LionConfig, SteeringConfig};
use crate::events::SimEvent;
use crate::physics;
use crate::steering::{self, AvoidanceParams, AvoidanceProbe, SteeringContributions};

pub struct PredatorContext<'a> {
    pub lion: &'a LionConfig,
    pub steering: &'a SteeringConfig,
    pub obstacles: &'a [Obstacle],
    pub avoidance: AvoidanceParams,
    pub record_probes: bool,
}

/// Index of the live giraffe nearest to `position`.
#[must_use]
pub fn nearest_live_giraffe(giraffes: &[MobView], position: Vec2) -> Option<usize> {
    giraffes
        .iter()
        .enumerate()
        .filter(|(_, view)| view.alive)
        .map(|(i, view)| (i, view.mob.position.distance_squared(position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Advances one lion's state machine and returns what it wants to steer for.
///
/// Kills mark the prey's view dead so later lions and the herd see it this frame.
pub fn step_lion(
    entity: hecs::Entity,
    lion: &mut Lion,
    mob: &Mob,
    giraffes: &mut [MobView],
    ctx: &PredatorContext,
    dt: f32,
    events: &mut Vec<SimEvent>,
) -> Vec2 {
    if lion.state == LionState::Resting {
        lion.energy = (lion.energy + ctx.lion.recharge_rate * dt).min(lion.max_energy);
        if lion.ready_to_hunt() {
            if let Some(idx) = nearest_live_giraffe(giraffes, mob.position) {
                let giraffe = giraffes[idx].entity;
                lion.lock(giraffe);
                tracing::debug!(?entity, ?giraffe, "Lion locked on");
                events.push(SimEvent::LionLocked {
                    lion: entity,
                    giraffe,
                });
            }
        }
    }

    if !lion.is_hunting() {
        return mob.position;
    }

    let prey = lion
        .locked_giraffe
        .and_then(|target| giraffes.iter_mut().find(|v| v.entity == target && v.alive));
    let Some(prey) = prey else {
        lion.release();
        events.push(SimEvent::TargetLost { lion: entity });
        return mob.position;
    };

    if steering::circles_overlap(
        mob.position,
        prey.mob.position,
        mob.radius + ctx.lion.kill_reach,
        prey.mob.radius,
    ) {
        prey.alive = false;
        let position = prey.mob.position;
        let giraffe = prey.entity;
        lion.energy = 0.0;
        lion.release();
        tracing::debug!(?entity, ?giraffe, x = position.x, y = position.y, "Giraffe killed");
        events.push(SimEvent::GiraffeKilled {
            lion: entity,
            giraffe,
            position,
        });
        return mob.position;
    }

    lion.energy -= ctx.lion.exertion_rate * dt;
    if lion.energy <= 0.0 {
        lion.energy = 0.0;
        lion.release();
        tracing::debug!(?entity, "Lion exhausted");
        events.push(SimEvent::LionExhausted { lion: entity });
        return mob.position;
    }

    prey.mob.position
}

/// Runs every lion: decision, steering, integration and constraints.
pub fn run_lions(
    ecs: &mut hecs::World,
    giraffes: &mut [MobView],
    ctx: &PredatorContext,
    dt: f32,
    events: &mut Vec<SimEvent>,
    probes: &mut Vec<AvoidanceProbe>,
) {
    for (entity, (lion, mob)) in ecs.query_mut::<(&mut Lion, &mut Mob)>() {
        let target = step_lion(entity, lion, mob, giraffes, ctx, dt, events);
        mob.steering_target = target;

        let primary = match lion.locked_giraffe {
            Some(prey) if lion.is_hunting() => giraffes
                .iter()
                .find(|v| v.entity == prey)
                .map_or(Vec2::ZERO, |v| {
                    steering::pursuit(mob, v.mob.position, v.mob.velocity, ctx.lion.pursuit_prediction)
                }),
            _ => steering::arrival(mob, target, ctx.steering.arrival_distance),
        };

        let (avoid, probe) = steering::avoidance(mob, ctx.obstacles, &ctx.avoidance);
        if ctx.record_probes {
            probes.push(probe);
        }

        let contributions = SteeringContributions {
            arrival: primary,
            avoidance: avoid,
            ..Default::default()
        };
        let force = steering::blend(&contributions, &ctx.steering.weights, mob.max_force);

        let speed_factor =
            physics::terrain_speed_factor(mob, ctx.obstacles, ctx.steering.lake_speed_factor);
        physics::integrate(mob, force, ctx.steering.drag, speed_factor, dt);
        physics::resolve_obstacles(mob, ctx.obstacles);
        physics::confine_to_bounds(mob, ctx.avoidance.bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        ecs: hecs::World,
        lion_config: LionConfig,
        steering: SteeringConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                ecs: hecs::World::new(),
                lion_config: LionConfig::default(),
                steering: SteeringConfig::default(),
            }
        }

        fn ctx(&self) -> PredatorContext<'_> {
            PredatorContext {
                lion: &self.lion_config,
                steering: &self.steering,
                obstacles: &[],
                avoidance: AvoidanceParams::from_config(&self.steering, Vec2::new(1000.0, 1000.0)),
                record_probes: false,
            }
        }

        fn giraffe(&mut self, x: f32, y: f32, alive: bool) -> MobView {
            let mob = Mob::at(Vec2::new(x, y));
            let entity = self.ecs.spawn((mob.clone(),));
            MobView { entity, mob, alive }
        }
    }

    fn charged_lion(max_energy: f32) -> Lion {
        Lion {
            energy: max_energy,
            ..Lion::new(max_energy)
        }
    }

    #[test]
    fn test_nearest_live_giraffe_skips_dead() {
        let mut f = Fixture::new();
        let giraffes = vec![
            f.giraffe(10.0, 0.0, false),
            f.giraffe(50.0, 0.0, true),
            f.giraffe(30.0, 0.0, true),
        ];
        assert_eq!(nearest_live_giraffe(&giraffes, Vec2::ZERO), Some(2));
        assert_eq!(nearest_live_giraffe(&giraffes[..1], Vec2::ZERO), None);
    }

    #[test]
    fn test_resting_lion_recharges_without_locking() {
        let mut f = Fixture::new();
        let lion_entity = f.ecs.spawn(());
        let mut giraffes = vec![f.giraffe(300.0, 300.0, true)];
        let mut lion = Lion::new(10.0);
        let mob = Mob::at(Vec2::new(100.0, 100.0));
        let mut events = Vec::new();

        let ctx = f.ctx();
        let target = step_lion(lion_entity, &mut lion, &mob, &mut giraffes, &ctx, 2.0, &mut events);

        assert_eq!(lion.energy, 2.0);
        assert_eq!(lion.state, LionState::Resting);
        assert_eq!(target, mob.position);
        assert!(events.is_empty());
    }

    #[test]
    fn test_energy_gate_locks_nearest() {
        let mut f = Fixture::new();
        let lion_entity = f.ecs.spawn(());
        let mut giraffes = vec![f.giraffe(900.0, 900.0, true), f.giraffe(200.0, 100.0, true)];
        let near = giraffes[1].entity;
        let mut lion = Lion {
            energy: 9.5,
            ..Lion::new(10.0)
        };
        let mob = Mob::at(Vec2::new(100.0, 100.0));
        let mut events = Vec::new();

        let ctx = f.ctx();
        let target = step_lion(lion_entity, &mut lion, &mob, &mut giraffes, &ctx, 1.0, &mut events);

        assert_eq!(lion.state, LionState::Hunting);
        assert_eq!(lion.locked_giraffe, Some(near));
        assert_eq!(target, Vec2::new(200.0, 100.0));
        assert!(matches!(events[0], SimEvent::LionLocked { giraffe, .. } if giraffe == near));
    }

    #[test]
    fn test_kill_on_contact_resets_energy() {
        let mut f = Fixture::new();
        let lion_entity = f.ecs.spawn(());
        let mut giraffes = vec![f.giraffe(120.0, 100.0, true)];
        let prey = giraffes[0].entity;
        let mut lion = charged_lion(10.0);
        lion.lock(prey);
        let mob = Mob {
            radius: 14.0,
            ..Mob::at(Vec2::new(100.0, 100.0))
        };
        let mut events = Vec::new();

        let ctx = f.ctx();
        step_lion(lion_entity, &mut lion, &mob, &mut giraffes, &ctx, 0.016, &mut events);

        assert!(!giraffes[0].alive);
        assert_eq!(lion.energy, 0.0);
        assert_eq!(lion.state, LionState::Resting);
        assert_eq!(lion.locked_giraffe, None);
        assert!(matches!(events[0], SimEvent::GiraffeKilled { giraffe, .. } if giraffe == prey));
    }

    #[test]
    fn test_exhaustion_releases_lock() {
        let mut f = Fixture::new();
        let lion_entity = f.ecs.spawn(());
        let mut giraffes = vec![f.giraffe(800.0, 800.0, true)];
        let mut lion = Lion {
            energy: 0.5,
            ..Lion::new(10.0)
        };
        lion.lock(giraffes[0].entity);
        let mob = Mob::at(Vec2::new(100.0, 100.0));
        let mut events = Vec::new();

        let ctx = f.ctx();
        step_lion(lion_entity, &mut lion, &mob, &mut giraffes, &ctx, 1.0, &mut events);

        assert_eq!(lion.state, LionState::Resting);
        assert_eq!(lion.energy, 0.0);
        assert!(giraffes[0].alive);
        assert_eq!(events, vec![SimEvent::LionExhausted { lion: lion_entity }]);
    }

    #[test]
    fn test_dead_target_is_released_energy_kept() {
        let mut f = Fixture::new();
        let lion_entity = f.ecs.spawn(());
        let mut giraffes = vec![f.giraffe(500.0, 500.0, false)];
        let mut lion = Lion {
            energy: 6.0,
            ..Lion::new(10.0)
        };
        lion.lock(giraffes[0].entity);
        let mob = Mob::at(Vec2::new(100.0, 100.0));
        let mut events = Vec::new();

        let ctx = f.ctx();
        step_lion(lion_entity, &mut lion, &mob, &mut giraffes, &ctx, 0.1, &mut events);

        assert_eq!(lion.state, LionState::Resting);
        assert_eq!(lion.energy, 6.0);
        assert_eq!(events, vec![SimEvent::TargetLost { lion: lion_entity }]);
    }

    #[test]
    fn test_second_lion_loses_target_killed_this_frame() {
        let mut f = Fixture::new();
        let first = f.ecs.spawn(());
        let second = f.ecs.spawn(());
        let mut giraffes = vec![f.giraffe(120.0, 100.0, true)];
        let prey = giraffes[0].entity;

        let mut killer = charged_lion(10.0);
        killer.lock(prey);
        let killer_mob = Mob {
            radius: 14.0,
            ..Mob::at(Vec2::new(100.0, 100.0))
        };
        let mut rival = Lion {
            energy: 7.0,
            ..Lion::new(10.0)
        };
        rival.lock(prey);
        let rival_mob = Mob::at(Vec2::new(400.0, 400.0));
        let mut events = Vec::new();

        let ctx = f.ctx();
        step_lion(first, &mut killer, &killer_mob, &mut giraffes, &ctx, 0.1, &mut events);
        let target = step_lion(second, &mut rival, &rival_mob, &mut giraffes, &ctx, 0.1, &mut events);

        assert!(!giraffes[0].alive);
        assert_eq!(rival.state, LionState::Resting);
        assert_eq!(rival.locked_giraffe, None);
        assert_eq!(rival.energy, 7.0);
        assert_eq!(target, rival_mob.position);
        assert!(matches!(events[0], SimEvent::GiraffeKilled { lion, .. } if lion == first));
        assert_eq!(events[1], SimEvent::TargetLost { lion: second });
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_despawned_target_is_released() {
        let mut f = Fixture::new();
        let lion_entity = f.ecs.spawn(());
        let gone = f.ecs.spawn(());
        f.ecs.despawn(gone).expect("entity exists");
        let mut giraffes = vec![f.giraffe(150.0, 100.0, true)];
        let mut lion = Lion {
            energy: 4.0,
            ..Lion::new(10.0)
        };
        lion.lock(gone);
        let mob = Mob::at(Vec2::new(100.0, 100.0));
        let mut events = Vec::new();

        let ctx = f.ctx();
        step_lion(lion_entity, &mut lion, &mob, &mut giraffes, &ctx, 0.1, &mut events);

        assert_eq!(lion.state, LionState::Resting);
        assert_eq!(lion.locked_giraffe, None);
        assert_eq!(lion.energy, 4.0);
        assert!(giraffes[0].alive);
        assert_eq!(events, vec![SimEvent::TargetLost { lion: lion_entity }]);
    }

    #[test]
    fn test_run_lions_moves_hunter_toward_prey() {
        let mut f = Fixture::new();
        let mut giraffes = vec![f.giraffe(600.0, 500.0, true)];
        let lion_mob = f.lion_config.mob_at(Vec2::new(300.0, 500.0));
        f.ecs.spawn((charged_lion(10.0), lion_mob));
        let mut events = Vec::new();
        let mut probes = Vec::new();

        let lion_config = f.lion_config.clone();
        let steering = f.steering.clone();
        let ctx = PredatorContext {
            lion: &lion_config,
            steering: &steering,
            obstacles: &[],
            avoidance: AvoidanceParams::from_config(&steering, Vec2::new(1000.0, 1000.0)),
            record_probes: true,
        };
        for _ in 0..30 {
            run_lions(&mut f.ecs, &mut giraffes, &ctx, 1.0 / 30.0, &mut events, &mut probes);
        }

        let mut query = f.ecs.query::<(&Lion, &Mob)>();
        let (_, (lion, mob)) = query.iter().next().expect("lion exists");
        assert!(lion.is_hunting());
        assert!(mob.position.x > 300.0);
        assert!(mob.velocity.x > 0.0);
        assert_eq!(probes.len(), 30);
    }
}
