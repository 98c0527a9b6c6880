use glam::Vec2;
use savanna_data::SpriteId;

/// Something noteworthy that happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    GiraffesSpawned {
        count: usize,
    },
    LionLocked {
        lion: hecs::Entity,
        giraffe: hecs::Entity,
    },
    GiraffeKilled {
        lion: hecs::Entity,
        giraffe: hecs::Entity,
        position: Vec2,
    },
    LionExhausted {
        lion: hecs::Entity,
    },
    TargetLost {
        lion: hecs::Entity,
    },
    FoodEaten {
        giraffe: hecs::Entity,
        position: Vec2,
    },
    CarcassRemoved {
        giraffe: hecs::Entity,
        sprite: Option<SpriteId>,
    },
}

impl SimEvent {
    /// Metrics counter this event increments.
    #[must_use]
    pub fn counter_name(&self) -> &'static str {
        match self {
            SimEvent::GiraffesSpawned { .. } => "giraffes_spawned",
            SimEvent::LionLocked { .. } => "lion_locked",
            SimEvent::GiraffeKilled { .. } => "giraffe_killed",
            SimEvent::LionExhausted { .. } => "lion_exhausted",
            SimEvent::TargetLost { .. } => "target_lost",
            SimEvent::FoodEaten { .. } => "food_eaten",
            SimEvent::CarcassRemoved { .. } => "carcass_removed",
        }
    }
}
