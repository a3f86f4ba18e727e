//! In-process store, also the backing table set for [`super::JsonFileStore`].

use super::{SpiritStore, SpiritlingUpdate};
use crate::core::error::{RecordKind, StoreError};
use crate::spiritling::{ActionLog, Owner, Spiritling};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Serializable image of every table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub spiritlings: Vec<Spiritling>,
    #[serde(default)]
    pub action_logs: Vec<ActionLog>,
    /// Bumped by [`super::JsonFileStore`] on every write to disk
    #[serde(default)]
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Tables {
    owners: HashMap<Uuid, Owner>,
    spiritlings: HashMap<Uuid, Spiritling>,
    action_logs: Vec<ActionLog>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

fn sorted(mut spiritlings: Vec<Spiritling>) -> Vec<Spiritling> {
    spiritlings.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    spiritlings
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot, repairing out-of-range vitals and derived stages.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            tables: RwLock::new(Tables::from_snapshot(snapshot)),
        }
    }

    /// Swaps every table for the contents of `snapshot`.
    pub fn replace(&self, snapshot: StoreSnapshot) {
        *self.tables.write() = Tables::from_snapshot(snapshot);
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let tables = self.tables.read();
        let mut owners: Vec<Owner> = tables.owners.values().cloned().collect();
        owners.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        StoreSnapshot {
            owners,
            spiritlings: sorted(tables.spiritlings.values().cloned().collect()),
            action_logs: tables.action_logs.clone(),
            generation: 0,
        }
    }

    pub fn spiritling_count(&self) -> usize {
        self.tables.read().spiritlings.len()
    }

    /// Removes a spiritling outright; the simulation never calls this.
    pub fn remove_spiritling(&self, id: Uuid) -> Option<Spiritling> {
        self.tables.write().spiritlings.remove(&id)
    }

    /// Records the current state of the given rows and the log length.
    pub(crate) fn checkpoint(&self, spiritling_ids: &[Uuid], owner_ids: &[Uuid]) -> Checkpoint {
        let tables = self.tables.read();
        Checkpoint {
            spiritlings: spiritling_ids
                .iter()
                .map(|id| (*id, tables.spiritlings.get(id).cloned()))
                .collect(),
            owners: owner_ids
                .iter()
                .map(|id| (*id, tables.owners.get(id).cloned()))
                .collect(),
            log_len: tables.action_logs.len(),
        }
    }

    /// Puts the checkpointed rows back and drops logs appended since.
    pub(crate) fn rollback(&self, checkpoint: Checkpoint) {
        let mut tables = self.tables.write();
        for (id, row) in checkpoint.spiritlings {
            match row {
                Some(spiritling) => tables.spiritlings.insert(id, spiritling),
                None => tables.spiritlings.remove(&id),
            };
        }
        for (id, row) in checkpoint.owners {
            match row {
                Some(owner) => tables.owners.insert(id, owner),
                None => tables.owners.remove(&id),
            };
        }
        tables.action_logs.truncate(checkpoint.log_len);
    }
}

/// Prior state of the rows a mutation may touch.
#[derive(Debug)]
pub(crate) struct Checkpoint {
    spiritlings: Vec<(Uuid, Option<Spiritling>)>,
    owners: Vec<(Uuid, Option<Owner>)>,
    log_len: usize,
}

impl Tables {
    fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut tables = Tables::default();
        for owner in snapshot.owners {
            tables.owners.insert(owner.id, owner);
        }
        for mut spiritling in snapshot.spiritlings {
            spiritling.normalize();
            tables.spiritlings.insert(spiritling.id, spiritling);
        }
        tables.action_logs = snapshot.action_logs;
        tables
    }

    /// Checks everything first, then applies the save, the credit and the logs.
    fn apply(&mut self, update: &SpiritlingUpdate) -> Result<(), StoreError> {
        let record = &update.spiritling;
        let stored = self.spiritlings.get(&record.id).ok_or(StoreError::NotFound {
            kind: RecordKind::Spiritling,
            id: record.id,
        })?;
        if stored.version != record.version {
            return Err(StoreError::Conflict {
                kind: RecordKind::Spiritling,
                id: record.id,
                expected: record.version,
                found: stored.version,
            });
        }
        if update.coins > 0 && !self.owners.contains_key(&record.owner_id) {
            return Err(StoreError::NotFound {
                kind: RecordKind::Owner,
                id: record.owner_id,
            });
        }

        let mut next = record.clone();
        next.version = record.version + 1;
        self.spiritlings.insert(record.id, next);

        if update.coins > 0 {
            if let Some(owner) = self.owners.get_mut(&record.owner_id) {
                owner.coins = owner.coins.saturating_add(update.coins);
                owner.version += 1;
            }
        }
        self.action_logs.extend(update.logs.iter().cloned());
        Ok(())
    }
}

impl SpiritStore for InMemoryStore {
    fn all_spiritlings(&self) -> Result<Vec<Spiritling>, StoreError> {
        Ok(sorted(self.tables.read().spiritlings.values().cloned().collect()))
    }

    fn spiritlings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Spiritling>, StoreError> {
        let tables = self.tables.read();
        Ok(sorted(
            tables
                .spiritlings
                .values()
                .filter(|s| s.owner_id == owner_id)
                .cloned()
                .collect(),
        ))
    }

    fn spiritling(&self, id: Uuid) -> Result<Option<Spiritling>, StoreError> {
        Ok(self.tables.read().spiritlings.get(&id).cloned())
    }

    fn owner(&self, id: Uuid) -> Result<Option<Owner>, StoreError> {
        Ok(self.tables.read().owners.get(&id).cloned())
    }

    fn commit_updates(&self, batch: &[SpiritlingUpdate]) -> Vec<Result<(), StoreError>> {
        let mut tables = self.tables.write();
        batch.iter().map(|update| tables.apply(update)).collect()
    }

    fn save_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        let stored = tables.owners.get_mut(&owner.id).ok_or(StoreError::NotFound {
            kind: RecordKind::Owner,
            id: owner.id,
        })?;
        if stored.version != owner.version {
            return Err(StoreError::Conflict {
                kind: RecordKind::Owner,
                id: owner.id,
                expected: owner.version,
                found: stored.version,
            });
        }
        let mut next = owner.clone();
        next.version = owner.version + 1;
        *stored = next;
        Ok(())
    }

    fn insert_spiritling(&self, spiritling: &Spiritling) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if tables.spiritlings.contains_key(&spiritling.id) {
            return Err(StoreError::Duplicate {
                kind: RecordKind::Spiritling,
                id: spiritling.id,
            });
        }
        tables.spiritlings.insert(spiritling.id, spiritling.clone());
        Ok(())
    }

    fn insert_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if tables.owners.contains_key(&owner.id) {
            return Err(StoreError::Duplicate {
                kind: RecordKind::Owner,
                id: owner.id,
            });
        }
        tables.owners.insert(owner.id, owner.clone());
        Ok(())
    }

    fn append_action_logs(&self, entries: &[ActionLog]) -> Result<(), StoreError> {
        self.tables.write().action_logs.extend_from_slice(entries);
        Ok(())
    }

    fn action_logs(&self, spiritling_id: Uuid) -> Result<Vec<ActionLog>, StoreError> {
        Ok(self
            .tables
            .read()
            .action_logs
            .iter()
            .filter(|entry| entry.spiritling_id == spiritling_id)
            .cloned()
            .collect())
    }
}
