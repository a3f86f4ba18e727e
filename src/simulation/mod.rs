//! Deterministic elapsed-time simulation: clock, personality, growth, and
//! the schedulers that drive them.

pub mod clock;
pub mod growth;
pub mod personality;
pub mod pipeline;
pub mod scheduler;

pub use clock::{baseline_decay, clock_delta, ClockDelta};
pub use growth::{
    gain_experience, level_up_message, required_experience, resolve_level_ups, LevelUpReport,
};
pub use personality::{personality_delta, ExperienceAdjust, PersonalityDelta};
pub use pipeline::{simulate_minutes, SimulationOutcome};
pub use scheduler::{BulkTickReport, CatchUpReport, SimulationScheduler};
