//! Giraffes fleeing a lion: the application around the simulation.
//!
//! [`app::Game`] drives a [`savanna_core::World`] through the app-state
//! machine and presents it through any [`savanna_engine::SpriteBatch`].

pub mod app;
pub mod logging;

pub use app::{Action, AppState, Game, Playing, ShutdownManager};
