//! Personality adjustments layered on top of the clock delta.

use super::clock::ClockDelta;
use crate::core::constants::*;
use crate::spiritling::{Personality, Task, VitalShift, Vitals};

fn per(minutes: u32, per: u32) -> i64 {
    (minutes / per) as i64
}

/// How a personality changes the experience the clock awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceAdjust {
    #[default]
    Keep,
    /// Added to the clock's experience
    Bonus(u64),
    /// Used instead of the clock's experience
    Replace(u64),
}

impl ExperienceAdjust {
    pub fn resolve(&self, clock_experience: u64) -> u64 {
        match *self {
            ExperienceAdjust::Keep => clock_experience,
            ExperienceAdjust::Bonus(extra) => clock_experience + extra,
            ExperienceAdjust::Replace(amount) => amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersonalityDelta {
    pub shift: VitalShift,
    pub experience: ExperienceAdjust,
}

impl PersonalityDelta {
    pub fn is_noop(&self) -> bool {
        self.shift.is_zero() && self.experience == ExperienceAdjust::Keep
    }
}

/// Adjustments for `personality` after `minutes` of `task`.
///
/// `vitals` is the state after the clock delta was applied. A glutton's
/// contentment check looks at hunger after its own extra hunger loss.
pub fn personality_delta(
    personality: Personality,
    task: Task,
    minutes: u32,
    vitals: &Vitals,
) -> PersonalityDelta {
    let m = minutes;
    let mut delta = PersonalityDelta::default();

    match personality {
        Personality::HardWorker => {
            if matches!(task, Task::Training | Task::Farming) {
                delta.experience = ExperienceAdjust::Bonus((m / HARD_WORKER_XP_MINUTES) as u64);
                delta.shift.energy = -per(m, HARD_WORKER_ENERGY_MINUTES);
            }
        }
        Personality::Lazy => match task {
            Task::Resting => delta.shift.energy = per(m, LAZY_REST_ENERGY_MINUTES),
            Task::Training => {
                delta.experience = ExperienceAdjust::Replace((m / LAZY_TRAINING_XP_MINUTES) as u64)
            }
            _ => {}
        },
        Personality::Glutton => {
            delta.shift.hunger = -per(m, GLUTTON_HUNGER_MINUTES);
            let hunger_after = (vitals.hunger as i64 + delta.shift.hunger).max(0);
            if hunger_after > GLUTTON_CONTENT_HUNGER_ABOVE as i64 {
                delta.shift.happiness = per(m, GLUTTON_HAPPINESS_MINUTES);
            }
        }
        Personality::Loner => {
            if task != Task::Idle {
                delta.shift.happiness = -per(m, LONER_HAPPINESS_MINUTES);
            }
        }
        Personality::Playful => match task {
            Task::Playing => delta.shift.happiness = per(m, PLAYFUL_PLAY_HAPPINESS_MINUTES),
            Task::Idle => {}
            _ => delta.shift.happiness = -per(m, PLAYFUL_BORED_HAPPINESS_MINUTES),
        },
        Personality::Normal => {}
    }

    delta
}

/// Experience after combining the clock award with a personality adjustment.
pub fn combined_experience(clock: &ClockDelta, personality: &PersonalityDelta) -> u64 {
    personality.experience.resolve(clock.experience)
}
