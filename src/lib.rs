//! Spiritling Sim - offline-progress simulation and autonomous behavior
//! for player-raised spiritlings.
//!
//! The library exposes the simulation engine, the care actions that share
//! its rules, and the store abstraction they run against.

pub mod autonomy;
pub mod build_info;
pub mod care;
pub mod core;
pub mod daemon;
pub mod simulation;
pub mod spiritling;
pub mod store;

pub use crate::core::{SimError, SimulationConfig, StoreError};
pub use crate::daemon::Daemon;
pub use crate::simulation::SimulationScheduler;
pub use crate::spiritling::{Owner, Spiritling};
pub use crate::store::SpiritStore;
