//! The spiritling data model.

pub mod entity;
pub mod types;
pub mod vitals;

pub use entity::{ActionLog, ActionType, Owner, Spiritling};
pub use types::{GrowthStage, Personality, StatKind, Task, VitalKind};
pub use vitals::{Stats, VitalShift, Vitals};
