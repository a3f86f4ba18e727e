//! One spiritling, one stretch of elapsed time.

use super::clock::clock_delta;
use super::growth::{gain_experience, LevelUpReport};
use super::personality::{combined_experience, personality_delta};
use crate::spiritling::{Spiritling, Task};

/// What a single simulation step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub minutes: u32,
    pub task: Task,
    pub experience_gained: u64,
    /// Currency to credit to the owner
    pub coins_earned: u64,
    pub growth: LevelUpReport,
}

/// Advances `spiritling` by `minutes` of its current task.
///
/// Runs the clock delta, then the personality adjustments, then level-up
/// resolution. Timestamps are left to the caller, which knows what "now" is.
pub fn simulate_minutes(spiritling: &mut Spiritling, minutes: u32) -> SimulationOutcome {
    let task = spiritling.current_action;

    let clock = clock_delta(task, minutes, &spiritling.vitals);
    clock.apply_to(&mut spiritling.vitals);

    let personality = personality_delta(spiritling.personality, task, minutes, &spiritling.vitals);
    spiritling.vitals.apply(&personality.shift);

    let experience_gained = combined_experience(&clock, &personality);
    let growth = gain_experience(spiritling, experience_gained);

    SimulationOutcome {
        minutes,
        task,
        experience_gained,
        coins_earned: clock.coins,
        growth,
    }
}
