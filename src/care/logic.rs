//! Owner-driven care: feeding, play, healing, cleaning, training, task
//! assignment, and item use.
//!
//! These share the clamped vitals and the looping level-up routine with the
//! elapsed-time simulation. None of them moves `updated_at`; that timestamp
//! only tracks how far elapsed time has been simulated.

use super::types::{CareAction, CareOutcome, ItemEffect};
use crate::core::constants::*;
use crate::core::error::SimError;
use crate::core::time::TimeSource;
use crate::simulation::growth::{gain_experience, level_up_message, LevelUpReport};
use crate::spiritling::{
    ActionLog, ActionType, Owner, Personality, Spiritling, StatKind, Task, VitalKind,
};
use crate::store::{SpiritStore, SpiritlingUpdate};
use std::sync::Arc;
use uuid::Uuid;

/// Applies a care action in place and returns its log message.
pub fn apply_care(
    spiritling: &mut Spiritling,
    action: CareAction,
) -> Result<(String, LevelUpReport), SimError> {
    let vitals = &mut spiritling.vitals;
    let (message, experience) = match action {
        CareAction::Feed => {
            vitals.adjust(VitalKind::Hunger, FEED_HUNGER);
            vitals.adjust(VitalKind::Happiness, FEED_HAPPINESS);
            (
                format!(
                    "Fed {}. Hunger +{}, happiness +{}",
                    spiritling.name, FEED_HUNGER, FEED_HAPPINESS
                ),
                FEED_XP,
            )
        }
        CareAction::Play => {
            vitals.adjust(VitalKind::Happiness, PLAY_HAPPINESS);
            vitals.adjust(VitalKind::Energy, PLAY_ENERGY);
            spiritling
                .stats
                .raise(StatKind::Friendliness, PLAY_FRIENDLINESS);
            (
                format!(
                    "Played with {}. Happiness +{}, energy {}",
                    spiritling.name, PLAY_HAPPINESS, PLAY_ENERGY
                ),
                PLAY_XP,
            )
        }
        CareAction::Heal => {
            vitals.adjust(VitalKind::Health, HEAL_HEALTH);
            vitals.adjust(VitalKind::Happiness, HEAL_HAPPINESS);
            spiritling.stats.raise(StatKind::Health, HEAL_HEALTH_STAT);
            (
                format!("Healed {}. Health +{}", spiritling.name, HEAL_HEALTH),
                HEAL_XP,
            )
        }
        CareAction::Clean => {
            vitals.adjust(VitalKind::Cleanliness, CLEAN_CLEANLINESS);
            vitals.adjust(VitalKind::Happiness, CLEAN_HAPPINESS);
            vitals.adjust(VitalKind::Health, CLEAN_HEALTH);
            (
                format!(
                    "Cleaned {}. Cleanliness +{}, happiness +{}",
                    spiritling.name, CLEAN_CLEANLINESS, CLEAN_HAPPINESS
                ),
                CLEAN_XP,
            )
        }
        CareAction::Train(stat) => {
            if vitals.energy < TRAIN_ENERGY_COST {
                return Err(SimError::InsufficientEnergy {
                    required: TRAIN_ENERGY_COST,
                    current: vitals.energy,
                });
            }
            vitals.adjust(VitalKind::Energy, -(TRAIN_ENERGY_COST as i64));
            spiritling.stats.raise(stat, TRAIN_STAT_GAIN);
            (
                format!(
                    "{} trained {}. +{}, energy -{}",
                    spiritling.name, stat, TRAIN_STAT_GAIN, TRAIN_ENERGY_COST
                ),
                TRAIN_XP,
            )
        }
    };

    let growth = gain_experience(spiritling, experience);
    Ok((message, growth))
}

/// Sets the current task from its stored name. Unknown names are rejected.
pub fn assign_task(spiritling: &mut Spiritling, task: &str) -> Result<String, SimError> {
    let task: Task = task.parse()?;
    spiritling.current_action = task;
    Ok(format!(
        "Assigned '{}' to {}.",
        task.display_name(),
        spiritling.name
    ))
}

/// Applies `quantity` units of an item.
pub fn apply_item(
    spiritling: &mut Spiritling,
    effect: &ItemEffect,
    quantity: u32,
) -> Result<(String, LevelUpReport), SimError> {
    if quantity == 0 {
        return Err(SimError::InvalidQuantity);
    }
    let units = quantity as i64;

    if let Some((stat, value)) = effect.stat {
        spiritling.stats.adjust(stat, value.saturating_mul(units));
    }
    if let Some((vital, value)) = effect.vital {
        spiritling.vitals.adjust(vital, value.saturating_mul(units));
    }

    let growth = gain_experience(spiritling, ITEM_XP_PER_UNIT * quantity as u64);
    let message = format!(
        "Used {} {} on {}.",
        quantity, effect.name, spiritling.name
    );
    Ok((message, growth))
}

/// Request-path entry points for care, scoped to the calling owner.
pub struct CareService {
    store: Arc<dyn SpiritStore>,
    clock: Arc<dyn TimeSource>,
}

impl CareService {
    pub fn new(store: Arc<dyn SpiritStore>, clock: Arc<dyn TimeSource>) -> Self {
        Self { store, clock }
    }

    pub fn create_spiritling(
        &self,
        owner_id: Uuid,
        name: &str,
        element: &str,
        personality: Personality,
    ) -> Result<Spiritling, SimError> {
        if self.store.owner(owner_id)?.is_none() {
            return Err(SimError::OwnerNotFound(owner_id));
        }
        let now = self.clock.now();
        let spiritling = Spiritling::new(owner_id, name, element, personality, now);
        self.store.insert_spiritling(&spiritling)?;
        self.record(
            &spiritling,
            ActionType::Create,
            format!("{} was born!", spiritling.name),
        );
        tracing::info!(spiritling_id = %spiritling.id, owner_id = %owner_id, "Spiritling created");
        Ok(spiritling)
    }

    pub fn create_owner(&self, username: &str) -> Result<Owner, SimError> {
        let owner = Owner::new(username, self.clock.now());
        self.store.insert_owner(&owner)?;
        Ok(owner)
    }

    /// The owner's creature, or not-found if it belongs to someone else.
    pub fn owned(&self, owner_id: Uuid, spiritling_id: Uuid) -> Result<Spiritling, SimError> {
        match self.store.spiritling(spiritling_id)? {
            Some(s) if s.owner_id == owner_id => Ok(s),
            _ => Err(SimError::SpiritlingNotFound(spiritling_id)),
        }
    }

    pub fn care(
        &self,
        owner_id: Uuid,
        spiritling_id: Uuid,
        action: CareAction,
    ) -> Result<CareOutcome, SimError> {
        let mut spiritling = self.owned(owner_id, spiritling_id)?;
        let (message, growth) = apply_care(&mut spiritling, action)?;
        self.commit(spiritling, action.action_type(), message, Some(growth))
    }

    pub fn feed(&self, owner_id: Uuid, spiritling_id: Uuid) -> Result<CareOutcome, SimError> {
        self.care(owner_id, spiritling_id, CareAction::Feed)
    }

    pub fn play(&self, owner_id: Uuid, spiritling_id: Uuid) -> Result<CareOutcome, SimError> {
        self.care(owner_id, spiritling_id, CareAction::Play)
    }

    pub fn heal(&self, owner_id: Uuid, spiritling_id: Uuid) -> Result<CareOutcome, SimError> {
        self.care(owner_id, spiritling_id, CareAction::Heal)
    }

    pub fn clean(&self, owner_id: Uuid, spiritling_id: Uuid) -> Result<CareOutcome, SimError> {
        self.care(owner_id, spiritling_id, CareAction::Clean)
    }

    /// Trains one stat, named as stored (e.g. `"agility"`).
    pub fn train(
        &self,
        owner_id: Uuid,
        spiritling_id: Uuid,
        stat: &str,
    ) -> Result<CareOutcome, SimError> {
        let stat: StatKind = stat.parse()?;
        self.care(owner_id, spiritling_id, CareAction::Train(stat))
    }

    pub fn assign_task(
        &self,
        owner_id: Uuid,
        spiritling_id: Uuid,
        task: &str,
    ) -> Result<CareOutcome, SimError> {
        let mut spiritling = self.owned(owner_id, spiritling_id)?;
        let message = assign_task(&mut spiritling, task)?;
        self.commit(spiritling, ActionType::AssignTask, message, None)
    }

    pub fn use_item(
        &self,
        owner_id: Uuid,
        spiritling_id: Uuid,
        effect: &ItemEffect,
        quantity: u32,
    ) -> Result<CareOutcome, SimError> {
        let mut spiritling = self.owned(owner_id, spiritling_id)?;
        let (message, growth) = apply_item(&mut spiritling, effect, quantity)?;
        self.commit(spiritling, ActionType::UseItem, message, Some(growth))
    }

    /// Saves the mutated creature together with its log entries.
    fn commit(
        &self,
        spiritling: Spiritling,
        action_type: ActionType,
        message: String,
        growth: Option<LevelUpReport>,
    ) -> Result<CareOutcome, SimError> {
        let now = self.clock.now();
        let id = spiritling.id;
        let mut update = SpiritlingUpdate::new(spiritling)
            .with_log(ActionLog::new(id, action_type, message.clone(), now));
        if growth.is_some_and(|g| g.leveled_up()) {
            let entry = ActionLog::new(
                id,
                ActionType::LevelUp,
                level_up_message(&update.spiritling),
                now,
            );
            update.logs.push(entry);
        }
        self.store.commit_update(&update)?;

        let mut spiritling = update.spiritling;
        spiritling.version += 1;
        tracing::debug!(spiritling_id = %spiritling.id, action = %action_type, "Care action applied");

        Ok(CareOutcome {
            spiritling,
            action_type,
            message,
            growth,
        })
    }

    fn record(&self, spiritling: &Spiritling, action_type: ActionType, message: String) {
        let entry = ActionLog::new(spiritling.id, action_type, message, self.clock.now());
        if let Err(e) = self.store.append_action_log(&entry) {
            tracing::warn!(spiritling_id = %spiritling.id, error = %e, "Failed to record action");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn creature() -> Spiritling {
        Spiritling::new(Uuid::new_v4(), "Pebble", "earth", Personality::Normal, Utc::now())
    }

    #[test]
    fn test_feed_clamps_at_full() {
        let mut s = creature();
        s.vitals.hunger = 90;
        let (message, _) = apply_care(&mut s, CareAction::Feed).unwrap();
        assert_eq!(s.vitals.hunger, 100);
        assert_eq!(s.experience, 2);
        assert!(message.contains("Pebble"));
    }

    #[test]
    fn test_play_costs_energy_and_builds_friendliness() {
        let mut s = creature();
        apply_care(&mut s, CareAction::Play).unwrap();
        assert_eq!(s.vitals.energy, 90);
        assert_eq!(s.stats.get(StatKind::Friendliness), 11);
        assert_eq!(s.experience, 3);
    }

    #[test]
    fn test_heal_raises_status_and_stat() {
        let mut s = creature();
        s.vitals.health = 50;
        apply_care(&mut s, CareAction::Heal).unwrap();
        assert_eq!(s.vitals.health, 75);
        assert_eq!(s.stats.get(StatKind::Health), 12);
    }

    #[test]
    fn test_clean_touches_three_vitals() {
        let mut s = creature();
        s.vitals.cleanliness = 10;
        s.vitals.happiness = 50;
        s.vitals.health = 50;
        apply_care(&mut s, CareAction::Clean).unwrap();
        assert_eq!(s.vitals.cleanliness, 40);
        assert_eq!(s.vitals.happiness, 60);
        assert_eq!(s.vitals.health, 55);
    }

    #[test]
    fn test_train_requires_energy() {
        let mut s = creature();
        s.vitals.energy = 19;
        let err = apply_care(&mut s, CareAction::Train(StatKind::Agility)).unwrap_err();
        assert!(matches!(
            err,
            SimError::InsufficientEnergy {
                required: 20,
                current: 19
            }
        ));
        assert_eq!(s.stats.get(StatKind::Agility), 10, "failed training changes nothing");

        s.vitals.energy = 20;
        apply_care(&mut s, CareAction::Train(StatKind::Agility)).unwrap();
        assert_eq!(s.vitals.energy, 0);
        assert_eq!(s.stats.get(StatKind::Agility), 12);
        assert_eq!(s.experience, 5);
    }

    #[test]
    fn test_assign_task_rejects_unknown() {
        let mut s = creature();
        assert!(matches!(
            assign_task(&mut s, "dancing"),
            Err(SimError::InvalidTask(_))
        ));
        assert_eq!(s.current_action, Task::Idle);
        assign_task(&mut s, "exploring").unwrap();
        assert_eq!(s.current_action, Task::Exploring);
    }

    #[test]
    fn test_item_scales_with_quantity() {
        let mut s = creature();
        s.vitals.hunger = 10;
        let snack = ItemEffect {
            name: "Sunberry".into(),
            stat: Some((StatKind::Luck, 3)),
            vital: Some((VitalKind::Hunger, 15)),
        };
        let (message, _) = apply_item(&mut s, &snack, 4).unwrap();
        assert_eq!(s.vitals.hunger, 70);
        assert_eq!(s.stats.get(StatKind::Luck), 22);
        assert_eq!(s.experience, 8);
        assert_eq!(message, "Used 4 Sunberry on Pebble.");
    }

    #[test]
    fn test_item_zero_quantity_rejected() {
        let mut s = creature();
        let effect = ItemEffect {
            name: "Dust".into(),
            stat: None,
            vital: None,
        };
        assert!(matches!(
            apply_item(&mut s, &effect, 0),
            Err(SimError::InvalidQuantity)
        ));
    }

    #[test]
    fn test_item_multi_level_up() {
        let mut s = creature();
        let tome = ItemEffect {
            name: "Tome".into(),
            stat: None,
            vital: None,
        };
        // 150 units = 300 experience: level 1 (100) + level 2 (200)
        let (_, growth) = apply_item(&mut s, &tome, 150).unwrap();
        assert_eq!(growth.levels_gained, 2);
        assert_eq!(s.level, 3);
        assert_eq!(s.experience, 0);
    }
}
