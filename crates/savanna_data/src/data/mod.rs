//! Core data structures for the Savanna simulation.

pub mod color;
pub mod entity;
pub mod obstacle;
