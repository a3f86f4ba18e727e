//! Time-scaled vital decay and task effects.
//!
//! Every tick applies a baseline decay (one point of hunger per 10 minutes,
//! energy per 15, happiness per 20, cleanliness per 30) and then exactly one
//! task branch. Training and resting replace the baseline hunger and energy
//! lines with their own rates. Farming, exploring and playing stack their
//! effects on top of the baseline. Happiness and cleanliness decay always
//! apply. All divisions floor.

use crate::core::constants::*;
use crate::spiritling::{Task, VitalShift, Vitals};

/// Floor of `minutes / per`, as a signed amount.
fn per(minutes: u32, per: u32) -> i64 {
    (minutes / per) as i64
}

/// What a stretch of elapsed time does to a spiritling before personality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockDelta {
    /// Baseline decay lines still in force for this task
    pub baseline: VitalShift,
    /// Task-specific vital changes, applied after the baseline
    pub task: VitalShift,
    pub experience: u64,
    /// Currency earned for the owner
    pub coins: u64,
}

impl ClockDelta {
    /// Applies the baseline then the task shift, clamping after each stage.
    pub fn apply_to(&self, vitals: &mut Vitals) {
        vitals.apply(&self.baseline);
        vitals.apply(&self.task);
    }
}

/// The decay every task starts from.
pub fn baseline_decay(minutes: u32) -> VitalShift {
    VitalShift {
        hunger: -per(minutes, HUNGER_DECAY_MINUTES),
        happiness: -per(minutes, HAPPINESS_DECAY_MINUTES),
        energy: -per(minutes, ENERGY_DECAY_MINUTES),
        health: 0,
        cleanliness: -per(minutes, CLEANLINESS_DECAY_MINUTES),
    }
}

/// Computes the clock delta for `minutes` of `task`.
///
/// `vitals` is the state before the tick; the idle branch inspects it after
/// baseline decay to decide whether the creature forages or naps.
pub fn clock_delta(task: Task, minutes: u32, vitals: &Vitals) -> ClockDelta {
    let m = minutes;
    let mut baseline = baseline_decay(m);
    let mut delta = ClockDelta::default();

    match task {
        Task::Training => {
            baseline.energy = 0;
            baseline.hunger = 0;
            delta.experience = m as u64 * TRAINING_XP_PER_MINUTE;
            delta.task.energy = -per(m, TRAINING_ENERGY_MINUTES);
            delta.task.hunger = -per(m, TRAINING_HUNGER_MINUTES);
        }
        Task::Resting => {
            baseline.energy = 0;
            baseline.hunger = 0;
            delta.task.energy = per(m, RESTING_ENERGY_MINUTES);
            delta.task.health = per(m, RESTING_HEALTH_MINUTES);
            delta.task.hunger = -per(m, RESTING_HUNGER_MINUTES);
        }
        Task::Farming => {
            delta.experience = m as u64 * FARMING_XP_PER_MINUTE;
            delta.task.energy = -per(m, FARMING_ENERGY_MINUTES);
            delta.task.hunger = -per(m, FARMING_HUNGER_MINUTES);
            delta.coins = (m / FARMING_COIN_MINUTES) as u64;
        }
        Task::Exploring => {
            delta.experience = m as u64 * EXPLORING_XP_PER_MINUTE;
            delta.task.energy = -per(m, EXPLORING_ENERGY_MINUTES);
            delta.task.hunger = -per(m, EXPLORING_HUNGER_MINUTES);
        }
        Task::Playing => {
            delta.task.happiness = per(m, PLAYING_HAPPINESS_MINUTES);
            delta.task.energy = -per(m, PLAYING_ENERGY_MINUTES);
            delta.experience = m as u64 * PLAYING_XP_PER_MINUTE;
        }
        Task::Idle => {
            let decayed = vitals.shifted(&baseline);
            if decayed.hunger < IDLE_FORAGE_HUNGER_BELOW && decayed.energy > IDLE_FORAGE_ENERGY_ABOVE
            {
                delta.task.hunger = per(m, IDLE_FORAGE_MINUTES);
            }
            if decayed.energy < IDLE_NAP_ENERGY_BELOW {
                delta.task.energy = per(m, IDLE_NAP_MINUTES);
            }
        }
    }

    delta.baseline = baseline;
    delta
}
