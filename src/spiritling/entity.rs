//! Persistent records: spiritlings, their owners, and the action log.

use super::types::{GrowthStage, Personality, Task};
use super::vitals::{Stats, Vitals};
use crate::core::constants::DEFAULT_OWNER_COINS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A player-raised creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spiritling {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub element: String,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub growth_stage: GrowthStage,
    pub level: u32,
    pub experience: u64,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub vitals: Vitals,
    #[serde(default)]
    pub current_action: Task,
    /// Free-form per-task payload owned by the client
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub action_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    /// Moment up to which elapsed time has been simulated
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency token, bumped by the store on every save
    #[serde(default)]
    pub version: u64,
}

impl Spiritling {
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        element: impl Into<String>,
        personality: Personality,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            element: element.into(),
            personality,
            growth_stage: GrowthStage::Egg,
            level: 1,
            experience: 0,
            stats: Stats::new(),
            vitals: Vitals::new(),
            current_action: Task::Idle,
            action_data: serde_json::Value::Null,
            created_at: now,
            updated_at: Some(now),
            version: 0,
        }
    }

    /// The later of `updated_at` and `created_at`; elapsed time is measured from here.
    pub fn simulation_basis(&self) -> DateTime<Utc> {
        match self.updated_at {
            Some(updated) if updated > self.created_at => updated,
            _ => self.created_at,
        }
    }

    /// Repairs a record loaded from outside: range-clamps vitals and stats,
    /// floors the level at 1, and re-derives the growth stage.
    pub fn normalize(&mut self) {
        self.vitals.normalize();
        self.stats.normalize();
        self.level = self.level.max(1);
        self.growth_stage = GrowthStage::for_level(self.level);
    }
}

/// A player account as far as the simulation cares: identity and currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub username: String,
    pub coins: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl Owner {
    pub fn new(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            coins: DEFAULT_OWNER_COINS,
            created_at: now,
            version: 0,
        }
    }
}

/// Tag of an action log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Create,
    Feed,
    Play,
    Heal,
    Clean,
    Train,
    AssignTask,
    UseItem,
    LevelUp,
    AutoEat,
    AutoPlay,
    AutoActivity,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Create => "create",
            ActionType::Feed => "feed",
            ActionType::Play => "play",
            ActionType::Heal => "heal",
            ActionType::Clean => "clean",
            ActionType::Train => "train",
            ActionType::AssignTask => "assign_task",
            ActionType::UseItem => "use_item",
            ActionType::LevelUp => "level_up",
            ActionType::AutoEat => "auto_eat",
            ActionType::AutoPlay => "auto_play",
            ActionType::AutoActivity => "auto_activity",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only audit record of something a spiritling did or had done to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    pub id: Uuid,
    pub spiritling_id: Uuid,
    pub action_type: ActionType,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ActionLog {
    pub fn new(
        spiritling_id: Uuid,
        action_type: ActionType,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            spiritling_id,
            action_type,
            message: message.into(),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spiritling::types::StatKind;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_new_spiritling_defaults() {
        let s = Spiritling::new(Uuid::new_v4(), "Mochi", "water", Personality::Glutton, start());
        assert_eq!(s.level, 1);
        assert_eq!(s.experience, 0);
        assert_eq!(s.growth_stage, GrowthStage::Egg);
        assert_eq!(s.current_action, Task::Idle);
        assert_eq!(s.vitals, Vitals::new());
        for stat in StatKind::ALL {
            assert_eq!(s.stats.get(stat), 10);
        }
        assert_eq!(s.updated_at, Some(start()));
    }

    #[test]
    fn test_simulation_basis_uses_later_timestamp() {
        let mut s = Spiritling::new(Uuid::new_v4(), "Pip", "fire", Personality::Normal, start());
        s.updated_at = None;
        assert_eq!(s.simulation_basis(), start());

        s.updated_at = Some(start() - Duration::hours(2));
        assert_eq!(s.simulation_basis(), start(), "stale updated_at must not win");

        s.updated_at = Some(start() + Duration::minutes(30));
        assert_eq!(s.simulation_basis(), start() + Duration::minutes(30));
    }

    #[test]
    fn test_legacy_record_deserializes_with_fallbacks() {
        let json = format!(
            r#"{{
                "id": "{}",
                "owner_id": "{}",
                "name": "Old",
                "element": "earth",
                "personality": "mysterious",
                "level": 3,
                "experience": 12,
                "current_action": "dancing",
                "created_at": "2024-01-01T00:00:00Z"
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let s: Spiritling = serde_json::from_str(&json).unwrap();
        assert_eq!(s.personality, Personality::Normal);
        assert_eq!(s.current_action, Task::Idle);
        assert_eq!(s.updated_at, None);
        assert_eq!(s.version, 0);
    }

    #[test]
    fn test_normalize_rederives_stage() {
        let mut s = Spiritling::new(Uuid::new_v4(), "Rex", "wind", Personality::Loner, start());
        s.level = 27;
        s.growth_stage = GrowthStage::Egg;
        s.normalize();
        assert_eq!(s.growth_stage, GrowthStage::Adult);
    }
}
