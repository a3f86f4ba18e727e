//! Runtime configuration for the simulation daemon.

use super::constants::*;
use super::error::SimError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Roll probabilities for the autonomy pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomyConfig {
    /// Chance per creature per pass of a random status drift
    pub drift_chance: f64,
    /// Chance per creature per pass of running autonomous-action selection
    pub action_chance: f64,
    pub eat_chance: f64,
    pub play_chance: f64,
    pub activity_chance: f64,
}

impl Default for AutonomyConfig {
    fn default() -> Self {
        Self {
            drift_chance: AUTONOMY_DRIFT_CHANCE,
            action_chance: AUTONOMY_ACTION_CHANCE,
            eat_chance: AUTO_EAT_CHANCE,
            play_chance: AUTO_PLAY_CHANCE,
            activity_chance: AUTO_ACTIVITY_CHANCE,
        }
    }
}

impl AutonomyConfig {
    fn probabilities(&self) -> [(&'static str, f64); 5] {
        [
            ("drift_chance", self.drift_chance),
            ("action_chance", self.action_chance),
            ("eat_chance", self.eat_chance),
            ("play_chance", self.play_chance),
            ("activity_chance", self.activity_chance),
        ]
    }
}

/// Configuration for the simulation schedulers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Wall-clock period of the deterministic bulk tick
    pub bulk_interval_secs: u64,

    /// Most minutes a single bulk tick may simulate for one creature
    pub bulk_tick_minutes: u32,

    /// Upper bound on minutes replayed by one login catch-up
    pub max_catch_up_minutes: u32,

    /// Wall-clock period of the autonomy pass
    pub autonomy_interval_secs: u64,

    /// Delay before the first autonomy pass after startup
    pub autonomy_initial_delay_secs: u64,

    /// How many times catch-up re-reads a creature after a version conflict
    pub conflict_retries: u32,

    /// Snapshot file for the JSON store (None = platform data directory)
    pub store_path: Option<PathBuf>,

    /// tracing-subscriber filter directive, overridden by RUST_LOG
    pub log_filter: String,

    pub autonomy: AutonomyConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bulk_interval_secs: BULK_TICK_INTERVAL_SECONDS,
            bulk_tick_minutes: BULK_TICK_MINUTES,
            max_catch_up_minutes: MAX_CATCH_UP_MINUTES,
            autonomy_interval_secs: AUTONOMY_INTERVAL_SECONDS,
            autonomy_initial_delay_secs: AUTONOMY_INITIAL_DELAY_SECONDS,
            conflict_retries: CONFLICT_RETRIES,
            store_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            autonomy: AutonomyConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let json = fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: SimulationConfig = serde_json::from_str(&json)
            .map_err(|e| SimError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.bulk_interval_secs == 0 {
            return Err(SimError::Config("bulk_interval_secs must be positive".into()));
        }
        if self.autonomy_interval_secs == 0 {
            return Err(SimError::Config(
                "autonomy_interval_secs must be positive".into(),
            ));
        }
        if self.bulk_tick_minutes == 0 {
            return Err(SimError::Config("bulk_tick_minutes must be positive".into()));
        }
        if self.max_catch_up_minutes == 0 {
            return Err(SimError::Config(
                "max_catch_up_minutes must be positive".into(),
            ));
        }
        for (name, p) in self.autonomy.probabilities() {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::Config(format!(
                    "autonomy.{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }

    pub fn bulk_interval(&self) -> Duration {
        Duration::from_secs(self.bulk_interval_secs)
    }

    pub fn autonomy_interval(&self) -> Duration {
        Duration::from_secs(self.autonomy_interval_secs)
    }

    pub fn autonomy_initial_delay(&self) -> Duration {
        Duration::from_secs(self.autonomy_initial_delay_secs)
    }

    /// Where the JSON store lives: the configured path, else the platform data dir.
    pub fn resolve_store_path(&self) -> Result<PathBuf, SimError> {
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }
        let project_dirs = ProjectDirs::from("", "", "spiritling-sim").ok_or_else(|| {
            SimError::Config("could not determine the platform data directory".into())
        })?;
        Ok(project_dirs.data_dir().join(DEFAULT_STORE_FILENAME))
    }
}
