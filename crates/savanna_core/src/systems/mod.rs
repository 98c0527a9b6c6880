//! Per-frame simulation systems.
//!
//! Systems read an immutable snapshot of the herd taken at the start of the
//! frame and write back through the ECS, so every mob steers from the same
//! picture of the world.

pub mod herd;
pub mod predator;

use savanna_data::{Giraffe, Mob};

/// Frame-start copy of one giraffe.
#[derive(Debug, Clone)]
pub struct MobView {
    pub entity: hecs::Entity,
    pub mob: Mob,
    pub alive: bool,
}

/// Collects every giraffe, live or dead, in ECS iteration order.
pub fn snapshot_giraffes(ecs: &hecs::World, out: &mut Vec<MobView>) {
    out.clear();
    let mut query = ecs.query::<(&Giraffe, &Mob)>();
    out.extend(query.iter().map(|(entity, (giraffe, mob))| MobView {
        entity,
        mob: mob.clone(),
        alive: giraffe.is_alive(),
    }));
}
