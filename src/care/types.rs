use crate::simulation::growth::LevelUpReport;
use crate::spiritling::{ActionType, Spiritling, StatKind, VitalKind};
use serde::{Deserialize, Serialize};

/// A hands-on care action from the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareAction {
    Feed,
    Play,
    Heal,
    Clean,
    Train(StatKind),
}

impl CareAction {
    pub fn action_type(&self) -> ActionType {
        match self {
            CareAction::Feed => ActionType::Feed,
            CareAction::Play => ActionType::Play,
            CareAction::Heal => ActionType::Heal,
            CareAction::Clean => ActionType::Clean,
            CareAction::Train(_) => ActionType::Train,
        }
    }
}

/// What consuming one unit of an item does.
///
/// `value` in either line is per unit and scaled by the quantity used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub name: String,
    #[serde(default)]
    pub stat: Option<(StatKind, i64)>,
    #[serde(default)]
    pub vital: Option<(VitalKind, i64)>,
}

/// The result of a care action, task change, or item use.
#[derive(Debug, Clone, PartialEq)]
pub struct CareOutcome {
    pub spiritling: Spiritling,
    pub action_type: ActionType,
    pub message: String,
    /// None for actions that award no experience
    pub growth: Option<LevelUpReport>,
}
