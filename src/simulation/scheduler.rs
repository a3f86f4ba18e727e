//! Bulk tick and login catch-up.
//!
//! Both modes are functions of elapsed time, measured from
//! [`Spiritling::simulation_basis`]. A creature whose basis is already "now"
//! is skipped, so repeated invocation with a frozen clock changes nothing.
//!
//! Writes go through the store's version check, and a creature's coins and
//! level-up entry commit with it. A bulk tick that loses a race drops that
//! creature for this pass; the elapsed time stays on the clock and is picked
//! up next time. Catch-up re-reads and retries.

use super::growth::level_up_message;
use super::pipeline::{simulate_minutes, SimulationOutcome};
use crate::core::config::SimulationConfig;
use crate::core::error::{RecordKind, SimError, StoreError};
use crate::core::time::{whole_minutes_between, TimeSource};
use crate::spiritling::{ActionLog, ActionType, Spiritling};
use crate::store::{SpiritStore, SpiritlingUpdate};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Summary of one bulk tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkTickReport {
    pub examined: usize,
    /// Skipped because no whole minute had elapsed
    pub idle: usize,
    pub saved: usize,
    /// Lost a version race; retried on the next tick
    pub conflicts: usize,
    /// Deleted between read and write
    pub vanished: usize,
    pub failed: usize,
    pub levels_gained: u32,
    pub coins_credited: u64,
}

/// Summary of one login catch-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatchUpReport {
    pub owner_id: Uuid,
    pub examined: usize,
    pub simulated: usize,
    pub idle: usize,
    pub failed: usize,
    pub minutes_simulated: u64,
    /// Creatures whose backlog exceeded the catch-up cap
    pub clamped: usize,
    pub levels_gained: u32,
    pub coins_credited: u64,
}

pub struct SimulationScheduler {
    store: Arc<dyn SpiritStore>,
    clock: Arc<dyn TimeSource>,
    config: SimulationConfig,
}

/// Where the basis moves after simulating `minutes` from `basis`.
///
/// Unclamped runs advance by exactly the minutes consumed, so the sub-minute
/// remainder and any uncovered backlog carry forward. A clamped catch-up jumps
/// to `now` and discards whatever exceeded the cap.
fn next_basis(basis: DateTime<Utc>, minutes: u32, now: DateTime<Utc>, clamped: bool) -> DateTime<Utc> {
    if clamped {
        now
    } else {
        basis + Duration::minutes(minutes as i64)
    }
}

impl SimulationScheduler {
    pub fn new(
        store: Arc<dyn SpiritStore>,
        clock: Arc<dyn TimeSource>,
        config: SimulationConfig,
    ) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates up to `bulk_tick_minutes` of elapsed time for every creature.
    ///
    /// All mutated creatures are committed in one batch, each together with
    /// its owner's coins and its level-up entry. Per-creature failures are
    /// logged and counted; only a failure to list creatures fails the pass.
    pub fn bulk_tick(&self) -> Result<BulkTickReport, SimError> {
        let now = self.clock.now();
        let spiritlings = self.store.all_spiritlings()?;
        let mut report = BulkTickReport {
            examined: spiritlings.len(),
            ..Default::default()
        };

        let mut batch = Vec::new();
        let mut outcomes = Vec::new();
        for mut spiritling in spiritlings {
            let basis = spiritling.simulation_basis();
            let minutes = whole_minutes_between(basis, now).min(self.config.bulk_tick_minutes);
            if minutes == 0 {
                report.idle += 1;
                continue;
            }

            let outcome = simulate_minutes(&mut spiritling, minutes);
            spiritling.updated_at = Some(next_basis(basis, minutes, now, false));
            batch.push(simulated_update(spiritling, &outcome, now));
            outcomes.push(outcome);
        }

        let results = self.store.commit_updates(&batch);
        for ((update, outcome), result) in batch.iter().zip(&outcomes).zip(results) {
            let id = update.spiritling.id;
            match result {
                Ok(()) => {
                    report.saved += 1;
                    report.levels_gained += outcome.growth.levels_gained;
                    report.coins_credited += outcome.coins_earned;
                }
                Err(e) if e.is_not_found() => {
                    tracing::debug!(spiritling_id = %id, error = %e, "Record vanished mid-tick");
                    report.vanished += 1;
                }
                Err(e) if e.is_conflict() => {
                    tracing::debug!(spiritling_id = %id, error = %e, "Bulk tick lost a write race");
                    report.conflicts += 1;
                }
                Err(e) => {
                    tracing::warn!(spiritling_id = %id, error = %e, "Failed to save simulated spiritling");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            examined = report.examined,
            saved = report.saved,
            conflicts = report.conflicts,
            failed = report.failed,
            levels = report.levels_gained,
            coins = report.coins_credited,
            "Bulk tick complete"
        );
        Ok(report)
    }

    /// Replays offline time for every creature of `owner_id`.
    ///
    /// Each creature's backlog is capped at `max_catch_up_minutes` and run
    /// through the pipeline once, then committed with the coins it earned, so
    /// a later error never strands currency from time already consumed.
    /// Unknown owners and records that vanish mid-request are errors. Other
    /// per-creature failures are logged and counted without stopping the rest.
    pub fn catch_up(&self, owner_id: Uuid) -> Result<CatchUpReport, SimError> {
        if self.store.owner(owner_id)?.is_none() {
            return Err(SimError::OwnerNotFound(owner_id));
        }

        let spiritlings = self.store.spiritlings_by_owner(owner_id)?;
        let mut report = CatchUpReport {
            owner_id,
            examined: spiritlings.len(),
            ..Default::default()
        };

        for spiritling in spiritlings {
            let id = spiritling.id;
            match self.catch_up_one(spiritling) {
                Ok(Some((outcome, clamped))) => {
                    report.simulated += 1;
                    report.minutes_simulated += outcome.minutes as u64;
                    report.levels_gained += outcome.growth.levels_gained;
                    report.coins_credited += outcome.coins_earned;
                    if clamped {
                        report.clamped += 1;
                    }
                }
                Ok(None) => report.idle += 1,
                Err(e @ (SimError::SpiritlingNotFound(_) | SimError::OwnerNotFound(_))) => {
                    return Err(e)
                }
                Err(e) => {
                    tracing::warn!(spiritling_id = %id, error = %e, "Catch-up failed for spiritling");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            owner_id = %owner_id,
            simulated = report.simulated,
            minutes = report.minutes_simulated,
            clamped = report.clamped,
            levels = report.levels_gained,
            coins = report.coins_credited,
            "Catch-up complete"
        );
        Ok(report)
    }

    /// Simulates one creature's backlog, re-reading after each lost race.
    ///
    /// Returns `None` when no whole minute has elapsed.
    fn catch_up_one(
        &self,
        mut spiritling: Spiritling,
    ) -> Result<Option<(SimulationOutcome, bool)>, SimError> {
        let id = spiritling.id;
        let owner_id = spiritling.owner_id;
        let attempts = self.config.conflict_retries + 1;

        for attempt in 0..attempts {
            if attempt > 0 {
                spiritling = self
                    .store
                    .spiritling(id)?
                    .ok_or(SimError::SpiritlingNotFound(id))?;
            }

            let now = self.clock.now();
            let basis = spiritling.simulation_basis();
            let elapsed = whole_minutes_between(basis, now);
            if elapsed == 0 {
                return Ok(None);
            }
            let clamped = elapsed > self.config.max_catch_up_minutes;
            let minutes = elapsed.min(self.config.max_catch_up_minutes);
            if clamped {
                tracing::debug!(
                    spiritling_id = %id,
                    elapsed,
                    minutes,
                    "Clamping catch-up backlog"
                );
            }

            let mut simulated = spiritling.clone();
            let outcome = simulate_minutes(&mut simulated, minutes);
            simulated.updated_at = Some(next_basis(basis, minutes, now, clamped));

            match self.store.commit_update(&simulated_update(simulated, &outcome, now)) {
                Ok(()) => return Ok(Some((outcome, clamped))),
                Err(StoreError::NotFound {
                    kind: RecordKind::Owner,
                    ..
                }) => return Err(SimError::OwnerNotFound(owner_id)),
                Err(e) if e.is_not_found() => return Err(SimError::SpiritlingNotFound(id)),
                Err(e) if e.is_conflict() => {
                    tracing::debug!(spiritling_id = %id, attempt, "Catch-up conflict, re-reading");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(SimError::ContentionExhausted { id, attempts })
    }
}

/// Packages a simulated creature with its coins and, if it leveled, the log entry.
fn simulated_update(
    spiritling: Spiritling,
    outcome: &SimulationOutcome,
    now: DateTime<Utc>,
) -> SpiritlingUpdate {
    let level_up = outcome.growth.leveled_up().then(|| {
        ActionLog::new(
            spiritling.id,
            ActionType::LevelUp,
            level_up_message(&spiritling),
            now,
        )
    });
    let update = SpiritlingUpdate::new(spiritling).with_coins(outcome.coins_earned);
    match level_up {
        Some(entry) => update.with_log(entry),
        None => update,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::ManualClock;
    use crate::spiritling::{Owner, Personality, Task};
    use crate::store::InMemoryStore;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn setup(task: Task) -> (Arc<InMemoryStore>, Arc<ManualClock>, SimulationScheduler, Owner, Spiritling) {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(ManualClock::new(start()));
        let owner = Owner::new("sol", start());
        let mut s = Spiritling::new(owner.id, "Wisp", "light", Personality::Normal, start());
        s.current_action = task;
        store.insert_owner(&owner).unwrap();
        store.insert_spiritling(&s).unwrap();
        let scheduler = SimulationScheduler::new(store.clone(), clock.clone(), SimulationConfig::default());
        (store, clock, scheduler, owner, s)
    }

    #[test]
    fn test_next_basis_carries_remainder_unless_clamped() {
        let basis = start();
        let now = start() + Duration::seconds(330);
        assert_eq!(next_basis(basis, 5, now, false), start() + Duration::minutes(5));
        assert_eq!(next_basis(basis, 5, now, true), now);
    }

    #[test]
    fn test_bulk_tick_consumes_at_most_configured_minutes() {
        let (store, clock, scheduler, _, s) = setup(Task::Idle);
        clock.advance_minutes(12);

        let report = scheduler.bulk_tick().unwrap();
        assert_eq!(report.saved, 1);

        let stored = store.spiritling(s.id).unwrap().unwrap();
        assert_eq!(stored.updated_at, Some(start() + Duration::minutes(5)));
        // 5 minutes of idle decay touches nothing at 10/15/20/30 minute rates
        assert_eq!(stored.vitals.hunger, 100);
    }

    #[test]
    fn test_bulk_tick_with_frozen_clock_is_noop() {
        let (store, _, scheduler, _, s) = setup(Task::Exploring);
        let report = scheduler.bulk_tick().unwrap();
        assert_eq!(report.idle, 1);
        assert_eq!(report.saved, 0);
        assert_eq!(store.spiritling(s.id).unwrap().unwrap().version, 0);
    }

    #[test]
    fn test_catch_up_unknown_owner_is_not_found() {
        let (_, _, scheduler, _, _) = setup(Task::Idle);
        let missing = Uuid::new_v4();
        assert!(matches!(
            scheduler.catch_up(missing),
            Err(SimError::OwnerNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_catch_up_logs_level_up() {
        let (store, clock, scheduler, owner, s) = setup(Task::Exploring);
        clock.advance_minutes(60);

        let report = scheduler.catch_up(owner.id).unwrap();
        // 180 experience crosses level 1
        assert_eq!(report.levels_gained, 1);
        let logs = store.action_logs(s.id).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action_type, ActionType::LevelUp);
        assert_eq!(logs[0].message, "Wisp grew to level 2!");
    }
}
