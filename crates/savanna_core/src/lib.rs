//! # Savanna Core
//!
//! The simulation behind Savanna: a herd of giraffes grazing while lions hunt
//! them.
//!
//! This crate contains:
//! - Steering behaviors (arrival, pursuit, flee, separation, avoidance)
//! - Semi-implicit Euler integration with drag, terrain and bounds
//! - The lion controller with its energy gate
//! - Spatial indexing for neighbor queries
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! Actors live in a `hecs` world. Each update takes an immutable snapshot of
//! the herd, lets the lions act on it, computes herd steering in parallel with
//! Rayon and applies the results sequentially, so a seeded run is
//! reproducible bit for bit.
//!
//! ## Example
//!
//! ```
//! use savanna_core::config::AppConfig;
//! use savanna_core::world::World;
//!
//! let mut config = AppConfig::default();
//! config.world.seed = Some(42);
//! let mut world = World::new(config).expect("valid config");
//! world.update(1.0 / 60.0);
//! assert_eq!(world.tick, 1);
//! ```

/// Predator state stored in the ECS
pub mod components;
/// Configuration management for simulation parameters
pub mod config;
/// Per-tick simulation events
pub mod events;
/// Performance metrics collection and logging
pub mod metrics;
/// Integration and hard constraints
pub mod physics;
/// Serializable world snapshots
pub mod snapshot;
/// Random placement of the field and actors
pub mod spawn;
/// Spatial hashing for radius queries
pub mod spatial_hash;
/// Steering behaviors and force blending
pub mod steering;
/// Herd and predator systems
pub mod systems;
/// The simulated world
pub mod world;

pub use components::Lion;
pub use config::AppConfig;
pub use events::SimEvent;
pub use metrics::{init_logging, Metrics};
pub use snapshot::{WorldSnapshot, WorldStats};
pub use world::World;
