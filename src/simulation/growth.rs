//! Experience, level-ups, and growth stages.
//!
//! This is the one level-up routine in the crate. Care actions, item use,
//! the autonomy pass and the elapsed-time tick all resolve through
//! [`resolve_level_ups`], so a single large experience gain can cross several
//! thresholds at once.

use crate::core::constants::{LEVEL_UP_STAT_GAIN, XP_PER_LEVEL};
use crate::spiritling::{GrowthStage, Spiritling};

/// Experience required to advance from `level` to `level + 1`.
pub fn required_experience(level: u32) -> u64 {
    level as u64 * XP_PER_LEVEL
}

/// Growth stage derived from level alone.
pub fn growth_stage_for_level(level: u32) -> GrowthStage {
    GrowthStage::for_level(level)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub level_before: u32,
    pub level_after: u32,
    pub stage_before: GrowthStage,
    pub stage_after: GrowthStage,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }

    pub fn stage_changed(&self) -> bool {
        self.stage_before != self.stage_after
    }
}

/// Log line for a spiritling that just reached its current level.
pub fn level_up_message(spiritling: &Spiritling) -> String {
    format!("{} grew to level {}!", spiritling.name, spiritling.level)
}

/// Adds experience, then resolves level-ups.
pub fn gain_experience(spiritling: &mut Spiritling, amount: u64) -> LevelUpReport {
    spiritling.experience = spiritling.experience.saturating_add(amount);
    resolve_level_ups(spiritling)
}

/// Spends banked experience on as many levels as it covers.
///
/// Each level costs `level * 100`, carries the remainder over, and raises all
/// six stats by one (capped). The growth stage is re-derived from the final
/// level every time, whether or not a level was gained.
pub fn resolve_level_ups(spiritling: &mut Spiritling) -> LevelUpReport {
    let level_before = spiritling.level.max(1);
    let stage_before = spiritling.growth_stage;
    spiritling.level = level_before;

    let mut levels_gained = 0;
    let mut required = required_experience(spiritling.level);
    while spiritling.experience >= required {
        spiritling.experience -= required;
        spiritling.level += 1;
        levels_gained += 1;
        spiritling.stats.raise_all(LEVEL_UP_STAT_GAIN);
        required = required_experience(spiritling.level);
    }

    spiritling.growth_stage = growth_stage_for_level(spiritling.level);

    LevelUpReport {
        levels_gained,
        level_before,
        level_after: spiritling.level,
        stage_before,
        stage_after: spiritling.growth_stage,
    }
}
