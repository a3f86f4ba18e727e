//! Capped vitals and stats, plus the signed shifts applied to them.

use super::types::{StatKind, VitalKind};
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

fn clamp_vital(value: i64) -> u32 {
    value.clamp(VITAL_MIN as i64, VITAL_MAX as i64) as u32
}

/// Hunger, happiness, energy, health status, and cleanliness, each in [0, 100].
///
/// Hunger is a satiety gauge: 100 is full, 0 is starving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub hunger: u32,
    pub happiness: u32,
    pub energy: u32,
    pub health: u32,
    pub cleanliness: u32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new()
    }
}

impl Vitals {
    pub fn new() -> Self {
        Self {
            hunger: DEFAULT_VITAL_VALUE,
            happiness: DEFAULT_VITAL_VALUE,
            energy: DEFAULT_VITAL_VALUE,
            health: DEFAULT_VITAL_VALUE,
            cleanliness: DEFAULT_VITAL_VALUE,
        }
    }

    pub fn get(&self, vital: VitalKind) -> u32 {
        match vital {
            VitalKind::Hunger => self.hunger,
            VitalKind::Happiness => self.happiness,
            VitalKind::Energy => self.energy,
            VitalKind::Health => self.health,
            VitalKind::Cleanliness => self.cleanliness,
        }
    }

    fn slot(&mut self, vital: VitalKind) -> &mut u32 {
        match vital {
            VitalKind::Hunger => &mut self.hunger,
            VitalKind::Happiness => &mut self.happiness,
            VitalKind::Energy => &mut self.energy,
            VitalKind::Health => &mut self.health,
            VitalKind::Cleanliness => &mut self.cleanliness,
        }
    }

    /// Sets a vital, clamped to [0, 100].
    pub fn set(&mut self, vital: VitalKind, value: i64) {
        *self.slot(vital) = clamp_vital(value);
    }

    /// Adds a signed amount to one vital, clamped to [0, 100].
    pub fn adjust(&mut self, vital: VitalKind, delta: i64) {
        let slot = self.slot(vital);
        *slot = clamp_vital(*slot as i64 + delta);
    }

    /// Applies every line of a shift, clamping each vital independently.
    pub fn apply(&mut self, shift: &VitalShift) {
        self.adjust(VitalKind::Hunger, shift.hunger);
        self.adjust(VitalKind::Happiness, shift.happiness);
        self.adjust(VitalKind::Energy, shift.energy);
        self.adjust(VitalKind::Health, shift.health);
        self.adjust(VitalKind::Cleanliness, shift.cleanliness);
    }

    /// Returns a copy with `shift` applied.
    pub fn shifted(&self, shift: &VitalShift) -> Vitals {
        let mut next = *self;
        next.apply(shift);
        next
    }

    /// Forces every vital back into range (for records loaded from outside).
    pub fn normalize(&mut self) {
        for vital in VitalKind::ALL {
            let value = self.get(vital) as i64;
            self.set(vital, value);
        }
    }
}

/// Signed per-vital change produced by one stage of the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VitalShift {
    pub hunger: i64,
    pub happiness: i64,
    pub energy: i64,
    pub health: i64,
    pub cleanliness: i64,
}

impl VitalShift {
    pub fn is_zero(&self) -> bool {
        *self == VitalShift::default()
    }

    pub fn add(&mut self, vital: VitalKind, delta: i64) {
        match vital {
            VitalKind::Hunger => self.hunger += delta,
            VitalKind::Happiness => self.happiness += delta,
            VitalKind::Energy => self.energy += delta,
            VitalKind::Health => self.health += delta,
            VitalKind::Cleanliness => self.cleanliness += delta,
        }
    }
}

/// Health, agility, intelligence, friendliness, resilience, and luck, each capped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    values: [u32; NUM_STATS],
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            values: [DEFAULT_STAT_VALUE; NUM_STATS],
        }
    }

    pub fn get(&self, stat: StatKind) -> u32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: StatKind, value: u32) {
        self.values[stat.index()] = value.min(STAT_MAX);
    }

    /// Adds a signed amount, clamped to [0, 100].
    pub fn adjust(&mut self, stat: StatKind, delta: i64) {
        let current = self.get(stat) as i64;
        self.values[stat.index()] = (current + delta).clamp(0, STAT_MAX as i64) as u32;
    }

    pub fn raise(&mut self, stat: StatKind, amount: u32) {
        self.adjust(stat, amount as i64);
    }

    pub fn raise_all(&mut self, amount: u32) {
        for stat in StatKind::ALL {
            self.raise(stat, amount);
        }
    }

    pub fn normalize(&mut self) {
        for value in self.values.iter_mut() {
            *value = (*value).min(STAT_MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vitals_are_full() {
        let vitals = Vitals::new();
        for vital in VitalKind::ALL {
            assert_eq!(vitals.get(vital), 100);
        }
    }

    #[test]
    fn test_apply_clamps_each_line() {
        let mut vitals = Vitals {
            hunger: 5,
            happiness: 98,
            energy: 50,
            health: 0,
            cleanliness: 100,
        };
        vitals.apply(&VitalShift {
            hunger: -20,
            happiness: 10,
            energy: -5,
            health: -1,
            cleanliness: 3,
        });
        assert_eq!(vitals.hunger, 0);
        assert_eq!(vitals.happiness, 100);
        assert_eq!(vitals.energy, 45);
        assert_eq!(vitals.health, 0);
        assert_eq!(vitals.cleanliness, 100);
    }

    #[test]
    fn test_stats_raise_caps_at_max() {
        let mut stats = Stats::new();
        stats.set(StatKind::Luck, 99);
        stats.raise_all(2);
        assert_eq!(stats.get(StatKind::Luck), 100);
        assert_eq!(stats.get(StatKind::Agility), 12);

        stats.adjust(StatKind::Agility, -50);
        assert_eq!(stats.get(StatKind::Agility), 0);
    }

    #[test]
    fn test_normalize_pulls_out_of_range_values_back() {
        let mut vitals: Vitals = serde_json::from_str(
            r#"{"hunger":250,"happiness":10,"energy":100,"health":101,"cleanliness":0}"#,
        )
        .unwrap();
        vitals.normalize();
        assert_eq!(vitals.hunger, 100);
        assert_eq!(vitals.health, 100);
        assert_eq!(vitals.happiness, 10);
    }
}
