//! Random status drift and spontaneous actions.
//!
//! This pass is flavor. It does not read or move `updated_at` and is never
//! composed into the elapsed-time simulation. Every roll goes through the
//! caller's RNG so a seeded generator reproduces a pass exactly.

use super::types::{AutonomousAction, AutonomyOutcome, AutonomyReport};
use crate::core::config::AutonomyConfig;
use crate::core::constants::*;
use crate::core::error::SimError;
use crate::core::time::TimeSource;
use crate::simulation::growth::{level_up_message, resolve_level_ups};
use crate::spiritling::{ActionLog, ActionType, Spiritling, VitalKind, VitalShift, Vitals};
use crate::store::{SpiritStore, SpiritlingUpdate};
use rand::Rng;
use std::sync::Arc;

const ACTIVITIES: [&str; 4] = [
    "went for a run.",
    "jumped around.",
    "rolled a ball.",
    "is watching the clouds.",
];

fn chance<R: Rng>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

fn roll<R: Rng>(rng: &mut R, (min, max): (u32, u32)) -> i64 {
    rng.gen_range(min..=max) as i64
}

fn diff(before: &Vitals, after: &Vitals) -> VitalShift {
    let mut shift = VitalShift::default();
    for vital in VitalKind::ALL {
        shift.add(vital, after.get(vital) as i64 - before.get(vital) as i64);
    }
    shift
}

/// Small random decays and recoveries. Returns the change actually applied.
///
/// Hunger drops first; the happiness loss is larger when the creature is
/// hungry after that drop. Low cleanliness also wears on health.
pub fn status_drift<R: Rng>(vitals: &mut Vitals, rng: &mut R) -> VitalShift {
    let before = *vitals;

    if vitals.hunger > 0 {
        vitals.adjust(VitalKind::Hunger, -roll(rng, DRIFT_HUNGER_LOSS));
    }

    let happiness_loss = if vitals.hunger < DRIFT_HUNGRY_BELOW {
        roll(rng, DRIFT_HUNGRY_HAPPINESS_LOSS)
    } else {
        roll(rng, DRIFT_HAPPINESS_LOSS)
    };
    vitals.adjust(VitalKind::Happiness, -happiness_loss);

    if vitals.energy < VITAL_MAX {
        vitals.adjust(VitalKind::Energy, roll(rng, DRIFT_ENERGY_GAIN));
    }

    if vitals.cleanliness < DRIFT_DIRTY_BELOW {
        vitals.adjust(VitalKind::Health, -roll(rng, DRIFT_DIRTY_HEALTH_LOSS));
    }

    if vitals.cleanliness > 0 {
        vitals.adjust(VitalKind::Cleanliness, -roll(rng, DRIFT_CLEANLINESS_LOSS));
    }

    diff(&before, vitals)
}

/// Rolls the three spontaneous actions, each against its own condition and chance.
///
/// Any number may fire. Experience is banked as they go and resolved once at
/// the end; gaining one or more levels adds a single `level_up` action.
pub fn autonomous_actions<R: Rng>(
    spiritling: &mut Spiritling,
    config: &AutonomyConfig,
    rng: &mut R,
) -> (Vec<AutonomousAction>, u32) {
    let mut actions = Vec::new();
    let name = spiritling.name.clone();

    if spiritling.vitals.hunger < AUTO_EAT_HUNGER_BELOW && chance(rng, config.eat_chance) {
        let gain = roll(rng, AUTO_EAT_HUNGER_GAIN);
        spiritling.vitals.adjust(VitalKind::Hunger, gain);
        spiritling.experience += AUTO_ACTION_XP;
        actions.push(AutonomousAction::new(
            ActionType::AutoEat,
            format!("{} found some food and ate it.", name),
        ));
    }

    if spiritling.vitals.happiness < AUTO_PLAY_HAPPINESS_BELOW && chance(rng, config.play_chance) {
        let happiness = roll(rng, AUTO_PLAY_HAPPINESS_GAIN);
        let energy = roll(rng, AUTO_PLAY_ENERGY_GAIN);
        spiritling.vitals.adjust(VitalKind::Happiness, happiness);
        spiritling.vitals.adjust(VitalKind::Energy, energy);
        spiritling.experience += AUTO_ACTION_XP;
        actions.push(AutonomousAction::new(
            ActionType::AutoPlay,
            format!("{} is playing on its own.", name),
        ));
    }

    if spiritling.vitals.energy > AUTO_ACTIVITY_ENERGY_ABOVE && chance(rng, config.activity_chance)
    {
        let cost = roll(rng, AUTO_ACTIVITY_ENERGY_COST);
        spiritling.vitals.adjust(VitalKind::Energy, -cost);
        let (min_xp, max_xp) = AUTO_ACTIVITY_XP;
        spiritling.experience += rng.gen_range(min_xp..=max_xp);
        let activity = ACTIVITIES[rng.gen_range(0..ACTIVITIES.len())];
        actions.push(AutonomousAction::new(
            ActionType::AutoActivity,
            format!("{} {}", name, activity),
        ));
    }

    let mut levels_gained = 0;
    if !actions.is_empty() {
        let report = resolve_level_ups(spiritling);
        levels_gained = report.levels_gained;
        if report.leveled_up() {
            actions.push(AutonomousAction::new(
                ActionType::LevelUp,
                level_up_message(spiritling),
            ));
        }
    }

    (actions, levels_gained)
}

/// One creature's share of an autonomy pass: maybe drift, maybe act.
pub fn process_spiritling<R: Rng>(
    spiritling: &mut Spiritling,
    config: &AutonomyConfig,
    rng: &mut R,
) -> AutonomyOutcome {
    let mut outcome = AutonomyOutcome::default();

    if chance(rng, config.drift_chance) {
        outcome.drift = Some(status_drift(&mut spiritling.vitals, rng));
    }

    if chance(rng, config.action_chance) {
        let (actions, levels_gained) = autonomous_actions(spiritling, config, rng);
        outcome.actions = actions;
        outcome.levels_gained = levels_gained;
    }

    outcome
}

/// The periodic autonomy pass over every spiritling.
pub struct AutonomyPass {
    store: Arc<dyn SpiritStore>,
    clock: Arc<dyn TimeSource>,
    config: AutonomyConfig,
}

impl AutonomyPass {
    pub fn new(
        store: Arc<dyn SpiritStore>,
        clock: Arc<dyn TimeSource>,
        config: AutonomyConfig,
    ) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Rolls every spiritling once and saves the ones that changed.
    ///
    /// Best effort: a lost version race or a failed save drops that creature's
    /// changes for this pass. Action log entries commit with the save.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<AutonomyReport, SimError> {
        let spiritlings = self.store.all_spiritlings()?;
        let mut report = AutonomyReport {
            examined: spiritlings.len(),
            ..Default::default()
        };

        for mut spiritling in spiritlings {
            let outcome = process_spiritling(&mut spiritling, &self.config, rng);
            if outcome.drift.is_some() {
                report.drifted += 1;
            }
            if !outcome.changed() {
                continue;
            }

            let now = self.clock.now();
            let id = spiritling.id;
            let action_count = outcome.actions.len();
            let mut update = SpiritlingUpdate::new(spiritling);
            for action in outcome.actions {
                update
                    .logs
                    .push(ActionLog::new(id, action.action_type, action.message, now));
            }

            match self.store.commit_update(&update) {
                Ok(()) => {
                    report.saved += 1;
                    report.actions += action_count;
                    report.levels_gained += outcome.levels_gained;
                }
                Err(e) if e.is_conflict() || e.is_not_found() => {
                    tracing::debug!(spiritling_id = %id, error = %e, "Dropping autonomy changes");
                    report.conflicts += 1;
                }
                Err(e) => {
                    tracing::warn!(spiritling_id = %id, error = %e, "Failed to save autonomy changes");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            examined = report.examined,
            drifted = report.drifted,
            actions = report.actions,
            saved = report.saved,
            conflicts = report.conflicts,
            failed = report.failed,
            "Autonomy pass complete"
        );
        Ok(report)
    }
}
