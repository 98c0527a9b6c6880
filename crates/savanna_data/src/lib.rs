//! Plain data shared by the simulation, the engine seam and the application.

pub mod data;

pub use data::color::{pico8, Color4f};
pub use data::entity::{Food, Giraffe, LionState, Mob, SpriteHandle, SpriteId};
pub use data::obstacle::{Obstacle, ObstacleKind};
pub use glam::Vec2;
