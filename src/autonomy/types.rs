use crate::spiritling::{ActionType, VitalShift};

/// Something a spiritling did on its own, ready to become an action log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutonomousAction {
    pub action_type: ActionType,
    pub message: String,
}

impl AutonomousAction {
    pub fn new(action_type: ActionType, message: impl Into<String>) -> Self {
        Self {
            action_type,
            message: message.into(),
        }
    }
}

/// Result of one autonomy roll for one spiritling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutonomyOutcome {
    /// The status drift actually applied, after clamping
    pub drift: Option<VitalShift>,
    pub actions: Vec<AutonomousAction>,
    pub levels_gained: u32,
}

impl AutonomyOutcome {
    /// Whether the spiritling needs saving.
    pub fn changed(&self) -> bool {
        self.drift.is_some_and(|d| !d.is_zero()) || !self.actions.is_empty()
    }
}

/// Summary of one autonomy pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutonomyReport {
    pub examined: usize,
    pub drifted: usize,
    pub actions: usize,
    pub saved: usize,
    pub conflicts: usize,
    pub failed: usize,
    pub levels_gained: u32,
}
