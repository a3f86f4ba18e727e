//! Constants, configuration, errors, and time shared by every subsystem.

pub mod config;
pub mod constants;
pub mod error;
pub mod time;

pub use config::{AutonomyConfig, SimulationConfig};
pub use error::{RecordKind, SimError, StoreError};
pub use time::{ManualClock, SystemClock, TimeSource};
