//! The two periodic passes, on their own timers.
//!
//! The store is synchronous, so each pass runs on the blocking pool and the
//! timers only await it. `MissedTickBehavior::Delay` means a pass that
//! overruns its period pushes the next firing back instead of bunching up.

use crate::autonomy::{AutonomyPass, AutonomyReport};
use crate::core::config::SimulationConfig;
use crate::core::error::SimError;
use crate::core::time::TimeSource;
use crate::simulation::{BulkTickReport, SimulationScheduler};
use crate::store::SpiritStore;
use std::future::Future;
use std::sync::Arc;
use tokio::time::{self, Instant, MissedTickBehavior};

pub struct Daemon {
    scheduler: Arc<SimulationScheduler>,
    autonomy: Arc<AutonomyPass>,
    config: SimulationConfig,
}

impl Daemon {
    pub fn new(
        store: Arc<dyn SpiritStore>,
        clock: Arc<dyn TimeSource>,
        config: SimulationConfig,
    ) -> Self {
        let scheduler = SimulationScheduler::new(store.clone(), clock.clone(), config.clone());
        let autonomy = AutonomyPass::new(store, clock, config.autonomy.clone());
        Self {
            scheduler: Arc::new(scheduler),
            autonomy: Arc::new(autonomy),
            config,
        }
    }

    pub fn scheduler(&self) -> &SimulationScheduler {
        &self.scheduler
    }

    /// One bulk tick followed by one autonomy pass, on the calling thread.
    pub fn run_once(&self) -> Result<(BulkTickReport, AutonomyReport), SimError> {
        let bulk = self.scheduler.bulk_tick()?;
        let autonomy = self.autonomy.run(&mut rand::thread_rng())?;
        Ok((bulk, autonomy))
    }

    /// Runs both timers until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            bulk_every = ?self.config.bulk_interval(),
            autonomy_every = ?self.config.autonomy_interval(),
            autonomy_delay = ?self.config.autonomy_initial_delay(),
            "Simulation daemon started"
        );

        let bulk = tokio::spawn(bulk_loop(self.scheduler.clone(), self.config.clone()));
        let autonomy = tokio::spawn(autonomy_loop(self.autonomy.clone(), self.config.clone()));

        shutdown.await;
        bulk.abort();
        autonomy.abort();
        tracing::info!("Simulation daemon stopped");
    }
}

async fn bulk_loop(scheduler: Arc<SimulationScheduler>, config: SimulationConfig) {
    let mut interval = time::interval(config.bulk_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let scheduler = scheduler.clone();
        match tokio::task::spawn_blocking(move || scheduler.bulk_tick()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Bulk tick failed"),
            Err(e) => tracing::error!(error = %e, "Bulk tick panicked"),
        }
    }
}

async fn autonomy_loop(autonomy: Arc<AutonomyPass>, config: SimulationConfig) {
    let start = Instant::now() + config.autonomy_initial_delay();
    let mut interval = time::interval_at(start, config.autonomy_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let autonomy = autonomy.clone();
        match tokio::task::spawn_blocking(move || autonomy.run(&mut rand::thread_rng())).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Autonomy pass failed"),
            Err(e) => tracing::error!(error = %e, "Autonomy pass panicked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::ManualClock;
    use crate::spiritling::{Owner, Personality, Spiritling, Task};
    use crate::store::InMemoryStore;
    use chrono::{Duration, Utc};

    #[test]
    fn test_run_once_ticks_elapsed_creatures() {
        let now = Utc::now();
        let store = Arc::new(InMemoryStore::new());
        let owner = Owner::new("ren", now);
        let mut s = Spiritling::new(
            owner.id,
            "Ember",
            "fire",
            Personality::Normal,
            now - Duration::minutes(5),
        );
        s.current_action = Task::Farming;
        store.insert_owner(&owner).unwrap();
        store.insert_spiritling(&s).unwrap();

        let mut config = SimulationConfig::default();
        config.autonomy.drift_chance = 0.0;
        config.autonomy.action_chance = 0.0;
        let daemon = Daemon::new(store.clone(), Arc::new(ManualClock::new(now)), config);

        let (bulk, autonomy) = daemon.run_once().unwrap();
        assert_eq!(bulk.saved, 1);
        assert_eq!(bulk.coins_credited, 1);
        assert_eq!(autonomy.saved, 0);
        assert_eq!(store.owner(owner.id).unwrap().unwrap().coins, 1001);
    }
}
