//! Closed enums for task, personality, growth stage, and stat/vital names.
//!
//! Stored records may carry values written by older clients. Tasks and
//! personalities therefore deserialize leniently (unknown values fall back to
//! `Idle` / `Normal`), while [`std::str::FromStr`] is strict and is what the
//! assignment path uses to reject bad input.

use crate::core::constants::*;
use crate::core::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The autonomous activity a spiritling performs between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Task {
    #[default]
    Idle,
    Training,
    Resting,
    Farming,
    Exploring,
    Playing,
}

impl Task {
    pub const ALL: [Task; 6] = [
        Task::Idle,
        Task::Training,
        Task::Resting,
        Task::Farming,
        Task::Exploring,
        Task::Playing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Idle => "idle",
            Task::Training => "training",
            Task::Resting => "resting",
            Task::Farming => "farming",
            Task::Exploring => "exploring",
            Task::Playing => "playing",
        }
    }

    /// Name shown in action logs
    pub fn display_name(&self) -> &'static str {
        match self {
            Task::Idle => "Free Time",
            Task::Training => "Training",
            Task::Resting => "Resting",
            Task::Farming => "Farm Work",
            Task::Exploring => "Exploring",
            Task::Playing => "Playing",
        }
    }

    /// Lenient parse for stored data: anything unrecognized is treated as idle.
    pub fn from_stored(value: &str) -> Task {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for Task {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| SimError::InvalidTask(s.to_string()))
    }
}

impl From<String> for Task {
    fn from(value: String) -> Self {
        Task::from_stored(&value)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed character trait that modulates task effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Personality {
    HardWorker,
    Lazy,
    Glutton,
    Loner,
    Playful,
    #[default]
    Normal,
}

impl Personality {
    pub const ALL: [Personality; 6] = [
        Personality::HardWorker,
        Personality::Lazy,
        Personality::Glutton,
        Personality::Loner,
        Personality::Playful,
        Personality::Normal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::HardWorker => "hard_worker",
            Personality::Lazy => "lazy",
            Personality::Glutton => "glutton",
            Personality::Loner => "loner",
            Personality::Playful => "playful",
            Personality::Normal => "normal",
        }
    }

    /// Unknown values become `Normal`.
    pub fn from_stored(value: &str) -> Personality {
        Personality::ALL
            .into_iter()
            .find(|p| p.as_str() == value)
            .unwrap_or_default()
    }
}

impl From<String> for Personality {
    fn from(value: String) -> Self {
        Personality::from_stored(&value)
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Life stage label, always derived from level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    #[default]
    Egg,
    Infant,
    Adolescent,
    Adult,
    Transcendent,
    Elder,
}

impl GrowthStage {
    pub fn for_level(level: u32) -> GrowthStage {
        match level {
            l if l >= ELDER_MIN_LEVEL => GrowthStage::Elder,
            l if l >= TRANSCENDENT_MIN_LEVEL => GrowthStage::Transcendent,
            l if l >= ADULT_MIN_LEVEL => GrowthStage::Adult,
            l if l >= ADOLESCENT_MIN_LEVEL => GrowthStage::Adolescent,
            l if l >= INFANT_MIN_LEVEL => GrowthStage::Infant,
            _ => GrowthStage::Egg,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Egg => "egg",
            GrowthStage::Infant => "infant",
            GrowthStage::Adolescent => "adolescent",
            GrowthStage::Adult => "adult",
            GrowthStage::Transcendent => "transcendent",
            GrowthStage::Elder => "elder",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six capped stats that grow on level-up and training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Health,
    Agility,
    Intelligence,
    Friendliness,
    Resilience,
    Luck,
}

impl StatKind {
    pub const ALL: [StatKind; NUM_STATS] = [
        StatKind::Health,
        StatKind::Agility,
        StatKind::Intelligence,
        StatKind::Friendliness,
        StatKind::Resilience,
        StatKind::Luck,
    ];

    pub fn index(&self) -> usize {
        match self {
            StatKind::Health => 0,
            StatKind::Agility => 1,
            StatKind::Intelligence => 2,
            StatKind::Friendliness => 3,
            StatKind::Resilience => 4,
            StatKind::Luck => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Health => "health",
            StatKind::Agility => "agility",
            StatKind::Intelligence => "intelligence",
            StatKind::Friendliness => "friendliness",
            StatKind::Resilience => "resilience",
            StatKind::Luck => "luck",
        }
    }
}

impl FromStr for StatKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKind::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| SimError::InvalidStat(s.to_string()))
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five capped vitals that decay and recover over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    Hunger,
    Happiness,
    Energy,
    /// Health status, distinct from the health stat
    Health,
    Cleanliness,
}

impl VitalKind {
    pub const ALL: [VitalKind; 5] = [
        VitalKind::Hunger,
        VitalKind::Happiness,
        VitalKind::Energy,
        VitalKind::Health,
        VitalKind::Cleanliness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VitalKind::Hunger => "hunger",
            VitalKind::Happiness => "happiness",
            VitalKind::Energy => "energy",
            VitalKind::Health => "health",
            VitalKind::Cleanliness => "cleanliness",
        }
    }
}

impl FromStr for VitalKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VitalKind::ALL
            .into_iter()
            .find(|vital| vital.as_str() == s)
            .ok_or_else(|| SimError::InvalidStat(s.to_string()))
    }
}
