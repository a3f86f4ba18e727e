//! Error types shared by the store, the simulation engine, and the care actions.

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Which kind of record a store lookup was after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Spiritling,
    Owner,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Spiritling => write!(f, "spiritling"),
            RecordKind::Owner => write!(f, "owner"),
        }
    }
}

/// Failures reported by a [`crate::store::SpiritStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: Uuid },

    /// The record changed since it was read. The caller holds a stale copy.
    #[error("{kind} {id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        kind: RecordKind,
        id: Uuid,
        expected: u64,
        found: u64,
    },

    #[error("{kind} {id} already exists")]
    Duplicate { kind: RecordKind, id: Uuid },

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Errors surfaced to callers of the simulation and care entry points.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("owner {0} not found")]
    OwnerNotFound(Uuid),

    #[error("spiritling {0} not found")]
    SpiritlingNotFound(Uuid),

    #[error("invalid task: {0}")]
    InvalidTask(String),

    #[error("invalid stat: {0}")]
    InvalidStat(String),

    #[error("not enough energy (required: {required}, current: {current})")]
    InsufficientEnergy { required: u32, current: u32 },

    #[error("item quantity must be at least 1")]
    InvalidQuantity,

    #[error("gave up on spiritling {id} after {attempts} conflicting saves")]
    ContentionExhausted { id: Uuid, attempts: u32 },

    #[error("invalid configuration: {0}")]
    Config(String),
}
