//! ECS components that only make sense inside the simulation.

use savanna_data::LionState;

/// Predator controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct Lion {
    pub locked_giraffe: Option<hecs::Entity>,
    pub energy: f32,
    pub max_energy: f32,
    pub state: LionState,
}

impl Lion {
    /// A lion that starts exhausted and must rest before its first hunt.
    #[must_use]
    pub fn new(max_energy: f32) -> Self {
        Self {
            locked_giraffe: None,
            energy: 0.0,
            max_energy,
            state: LionState::Resting,
        }
    }

    #[must_use]
    pub fn is_hunting(&self) -> bool {
        self.state == LionState::Hunting
    }

    /// Energy gate: a resting lion may lock on only when fully charged.
    #[must_use]
    pub fn ready_to_hunt(&self) -> bool {
        self.state == LionState::Resting && self.energy >= self.max_energy
    }

    pub fn lock(&mut self, giraffe: hecs::Entity) {
        self.locked_giraffe = Some(giraffe);
        self.state = LionState::Hunting;
    }

    pub fn release(&mut self) {
        self.locked_giraffe = None;
        self.state = LionState::Resting;
    }
}
