//! Spontaneous, non-deterministic creature behavior on its own timer.

pub mod logic;
pub mod types;

pub use logic::{autonomous_actions, process_spiritling, status_drift, AutonomyPass};
pub use types::{AutonomousAction, AutonomyOutcome, AutonomyReport};
