use std::time::Instant;

use glam::Vec2;
use savanna_data::{Food, Giraffe, Mob};

use super::World;
use crate::components::Lion;
use crate::events::SimEvent;
use crate::steering::AvoidanceParams;
use crate::systems::herd::{self, HerdContext};
use crate::systems::predator::{self, PredatorContext};
use crate::systems::snapshot_giraffes;

impl World {
    /// Advances the field by `dt` seconds, clamped to `[0, max_dt]`.
    ///
    /// Order: lions decide and move, kills land, the herd steers from the
    /// frame-start snapshot, then eating and carcass decay.
    pub fn update(&mut self, dt: f32) {
        let start = Instant::now();
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.world.max_dt)
        } else {
            0.0
        };

        self.events.clear();
        self.probes.clear();
        self.tick += 1;
        self.time += f64::from(dt);

        let mut views = std::mem::take(&mut self.view_buffer);
        snapshot_giraffes(&self.ecs, &mut views);

        let mut events = Vec::new();
        let avoidance = AvoidanceParams::from_config(&self.config.steering, self.size);

        let predators = PredatorContext {
            lion: &self.config.lion,
            steering: &self.config.steering,
            obstacles: &self.obstacles,
            avoidance,
            record_probes: self.record_probes,
        };
        predator::run_lions(&mut self.ecs, &mut views, &predators, dt, &mut events, &mut self.probes);
        self.apply_kills(&events);

        let mut positions = std::mem::take(&mut self.position_buffer);
        positions.clear();
        positions.extend(views.iter().map(|v| v.mob.position));
        self.spatial_hash.build(&positions, self.size.x, self.size.y);

        let lions: Vec<Vec2> = self
            .ecs
            .query::<(&Lion, &Mob)>()
            .iter()
            .map(|(_, (_, mob))| mob.position)
            .collect();
        let food: Vec<Vec2> = self
            .ecs
            .query::<&Food>()
            .iter()
            .map(|(_, f)| f.position)
            .collect();

        let grazers = HerdContext {
            steering: &self.config.steering,
            obstacles: &self.obstacles,
            avoidance,
            record_probes: self.record_probes,
        };
        let decided = herd::steer_herd(&views, &self.spatial_hash, &food, &lions, &grazers);
        herd::integrate_herd(&mut self.ecs, &views, &decided, &grazers, dt, &mut self.probes);

        herd::eat_food(&mut self.ecs, &mut self.rng, self.size, &self.obstacles, &mut events);
        herd::decay_carcasses(&mut self.ecs, dt, &mut events, &mut self.released_sprites);

        self.view_buffer = views;
        self.position_buffer = positions;
        for event in events {
            self.record_event(event);
        }

        self.metrics
            .record_tick(start.elapsed(), self.giraffe_count(), self.live_giraffe_count());
    }

    /// Turns the victims of this frame's kills into carcasses.
    fn apply_kills(&mut self, events: &[SimEvent]) {
        let lifetime = self.config.giraffe.carcass_lifetime;
        for event in events {
            let SimEvent::GiraffeKilled { giraffe, .. } = event else {
                continue;
            };
            if let Ok((state, mob)) = self.ecs.query_one_mut::<(&mut Giraffe, &mut Mob)>(*giraffe) {
                state.dead = true;
                state.carcass_timer = lifetime;
                mob.velocity = Vec2::ZERO;
                mob.steering_direction = Vec2::ZERO;
            }
        }
    }

    /// Files an event: cumulative stats, metrics counter, per-tick list.
    pub(crate) fn record_event(&mut self, event: SimEvent) {
        match &event {
            SimEvent::GiraffesSpawned { count } => self.stats.giraffes_spawned += *count as u64,
            SimEvent::GiraffeKilled { .. } => self.stats.giraffes_killed += 1,
            SimEvent::FoodEaten { .. } => self.stats.food_eaten += 1,
            SimEvent::LionExhausted { .. } => self.stats.lion_exhaustions += 1,
            SimEvent::CarcassRemoved { .. } => self.stats.carcasses_removed += 1,
            SimEvent::LionLocked { .. } | SimEvent::TargetLost { .. } => {}
        }
        self.metrics.increment_counter(event.counter_name());
        self.events.push(event);
    }
}
