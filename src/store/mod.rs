//! Persistence collaborator for the simulation.
//!
//! Records carry a `version`. A save succeeds only if the stored record still
//! has the version the caller read, and stores `version + 1`. Readers racing
//! on the same spiritling therefore cannot both commit a simulation of the
//! same elapsed stretch.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::{InMemoryStore, StoreSnapshot};

use crate::core::error::StoreError;
use crate::spiritling::{ActionLog, Owner, Spiritling};
use uuid::Uuid;

/// A mutated spiritling plus everything that must land with it.
///
/// The store applies an update as a unit: the version-checked creature save,
/// the credit to its owner, and the log entries all commit or none do.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiritlingUpdate {
    pub spiritling: Spiritling,
    /// Currency credited to `spiritling.owner_id`
    pub coins: u64,
    pub logs: Vec<ActionLog>,
}

impl SpiritlingUpdate {
    pub fn new(spiritling: Spiritling) -> Self {
        Self {
            spiritling,
            coins: 0,
            logs: Vec::new(),
        }
    }

    pub fn with_coins(mut self, coins: u64) -> Self {
        self.coins = coins;
        self
    }

    pub fn with_log(mut self, entry: ActionLog) -> Self {
        self.logs.push(entry);
        self
    }
}

pub trait SpiritStore: Send + Sync {
    fn all_spiritlings(&self) -> Result<Vec<Spiritling>, StoreError>;

    fn spiritlings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Spiritling>, StoreError>;

    fn spiritling(&self, id: Uuid) -> Result<Option<Spiritling>, StoreError>;

    fn owner(&self, id: Uuid) -> Result<Option<Owner>, StoreError>;

    /// Commits each update independently; one failure does not affect the others.
    ///
    /// An update with coins fails with `NotFound` for the owner if the owner
    /// is gone, and then nothing of it is applied.
    fn commit_updates(&self, batch: &[SpiritlingUpdate]) -> Vec<Result<(), StoreError>>;

    fn commit_update(&self, update: &SpiritlingUpdate) -> Result<(), StoreError> {
        self.commit_updates(std::slice::from_ref(update))
            .pop()
            .unwrap_or(Ok(()))
    }

    fn save_spiritlings(&self, batch: &[Spiritling]) -> Vec<Result<(), StoreError>> {
        let updates: Vec<SpiritlingUpdate> =
            batch.iter().cloned().map(SpiritlingUpdate::new).collect();
        self.commit_updates(&updates)
    }

    fn save_spiritling(&self, spiritling: &Spiritling) -> Result<(), StoreError> {
        self.commit_update(&SpiritlingUpdate::new(spiritling.clone()))
    }

    fn save_owner(&self, owner: &Owner) -> Result<(), StoreError>;

    fn insert_spiritling(&self, spiritling: &Spiritling) -> Result<(), StoreError>;

    fn insert_owner(&self, owner: &Owner) -> Result<(), StoreError>;

    /// Appends all entries at once, in order.
    fn append_action_logs(&self, entries: &[ActionLog]) -> Result<(), StoreError>;

    fn append_action_log(&self, entry: &ActionLog) -> Result<(), StoreError> {
        self.append_action_logs(std::slice::from_ref(entry))
    }

    /// Entries for one spiritling, oldest first.
    fn action_logs(&self, spiritling_id: Uuid) -> Result<Vec<ActionLog>, StoreError>;
}
