//! Player care actions, task assignment, and item effects.

pub mod logic;
pub mod types;

pub use logic::{apply_care, apply_item, assign_task, CareService};
pub use types::{CareAction, CareOutcome, ItemEffect};
