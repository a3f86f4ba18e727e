//! Single-file JSON persistence.
//!
//! The whole store is one pretty-printed [`StoreSnapshot`]. Every successful
//! mutation rewrites it through a temp file and a rename, so a crash leaves
//! either the old snapshot or the new one on disk.
//!
//! Each write bumps the snapshot's `generation`. Before mutating, the store
//! re-reads the file and, if another process has written since, reloads it,
//! so version checks run against what is on disk rather than a stale copy.
//! A mutation whose write fails is rolled back in memory: `Err` means the
//! change was not applied.

use super::memory::{InMemoryStore, StoreSnapshot};
use super::{SpiritStore, SpiritlingUpdate};
use crate::core::error::StoreError;
use crate::spiritling::{ActionLog, Owner, Spiritling};
use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

fn read_snapshot(path: &Path) -> Result<StoreSnapshot, StoreError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub struct JsonFileStore {
    path: PathBuf,
    inner: InMemoryStore,
    /// Generation of the snapshot `inner` currently mirrors. Held for the
    /// whole of every mutation.
    generation: Mutex<u64>,
}

impl JsonFileStore {
    /// Opens the snapshot at `path`, starting empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let (inner, generation) = if path.exists() {
            let snapshot = read_snapshot(&path)?;
            tracing::debug!(
                path = %path.display(),
                spiritlings = snapshot.spiritlings.len(),
                owners = snapshot.owners.len(),
                generation = snapshot.generation,
                "Loaded store snapshot"
            );
            let generation = snapshot.generation;
            (InMemoryStore::from_snapshot(snapshot), generation)
        } else {
            tracing::info!(path = %path.display(), "Starting empty store");
            (InMemoryStore::new(), 0)
        };

        Ok(Self {
            path,
            inner,
            generation: Mutex::new(generation),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let mut snapshot = self.inner.snapshot();
        snapshot.generation = *self.generation.lock();
        snapshot
    }

    /// Reloads from disk if another writer has moved the file on.
    fn refresh(&self, generation: &mut u64) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        let snapshot = read_snapshot(&self.path)?;
        if snapshot.generation != *generation {
            tracing::debug!(
                path = %self.path.display(),
                ours = *generation,
                theirs = snapshot.generation,
                "Store changed on disk, reloading"
            );
            *generation = snapshot.generation;
            self.inner.replace(snapshot);
        }
        Ok(())
    }

    fn refresh_now(&self) -> Result<(), StoreError> {
        let mut generation = self.generation.lock();
        self.refresh(&mut generation)
    }

    fn persist(&self, generation: &mut u64) -> Result<(), StoreError> {
        let mut snapshot = self.inner.snapshot();
        snapshot.generation = *generation + 1;
        let json = serde_json::to_string_pretty(&snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        *generation = snapshot.generation;
        Ok(())
    }

    /// Runs `op` against fresh state and writes the result, undoing it if the
    /// write fails. `spiritling_ids` and `owner_ids` name the rows `op` may touch.
    fn mutate<T>(
        &self,
        spiritling_ids: &[Uuid],
        owner_ids: &[Uuid],
        op: impl FnOnce(&InMemoryStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut generation = self.generation.lock();
        self.refresh(&mut generation)?;
        let checkpoint = self.inner.checkpoint(spiritling_ids, owner_ids);
        let value = op(&self.inner)?;
        if let Err(e) = self.persist(&mut generation) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist, rolling back");
            self.inner.rollback(checkpoint);
            return Err(e);
        }
        Ok(value)
    }
}

impl SpiritStore for JsonFileStore {
    // Pass-level listings pick up other writers first. Point lookups read
    // the mirror; a stale one is caught by the version check on commit.
    fn all_spiritlings(&self) -> Result<Vec<Spiritling>, StoreError> {
        self.refresh_now()?;
        self.inner.all_spiritlings()
    }

    fn spiritlings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Spiritling>, StoreError> {
        self.refresh_now()?;
        self.inner.spiritlings_by_owner(owner_id)
    }

    fn spiritling(&self, id: Uuid) -> Result<Option<Spiritling>, StoreError> {
        self.inner.spiritling(id)
    }

    fn owner(&self, id: Uuid) -> Result<Option<Owner>, StoreError> {
        self.inner.owner(id)
    }

    fn commit_updates(&self, batch: &[SpiritlingUpdate]) -> Vec<Result<(), StoreError>> {
        let spiritling_ids: Vec<Uuid> = batch.iter().map(|u| u.spiritling.id).collect();
        let owner_ids: Vec<Uuid> = batch
            .iter()
            .filter(|u| u.coins > 0)
            .map(|u| u.spiritling.owner_id)
            .collect();

        let mut generation = self.generation.lock();
        if let Err(e) = self.refresh(&mut generation) {
            let message = e.to_string();
            return batch.iter().map(|_| Err(io_error(&message))).collect();
        }
        let checkpoint = self.inner.checkpoint(&spiritling_ids, &owner_ids);
        let mut results = self.inner.commit_updates(batch);
        if !results.iter().any(|r| r.is_ok()) {
            return results;
        }

        if let Err(e) = self.persist(&mut generation) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist batch, rolling back");
            self.inner.rollback(checkpoint);
            let message = e.to_string();
            for result in results.iter_mut().filter(|r| r.is_ok()) {
                *result = Err(io_error(&message));
            }
        }
        results
    }

    fn save_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        self.mutate(&[], &[owner.id], |inner| inner.save_owner(owner))
    }

    fn insert_spiritling(&self, spiritling: &Spiritling) -> Result<(), StoreError> {
        self.mutate(&[spiritling.id], &[], |inner| {
            inner.insert_spiritling(spiritling)
        })
    }

    fn insert_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        self.mutate(&[], &[owner.id], |inner| inner.insert_owner(owner))
    }

    fn append_action_logs(&self, entries: &[ActionLog]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        self.mutate(&[], &[], |inner| inner.append_action_logs(entries))
    }

    fn action_logs(&self, spiritling_id: Uuid) -> Result<Vec<ActionLog>, StoreError> {
        self.inner.action_logs(spiritling_id)
    }
}

fn io_error(message: &str) -> StoreError {
    StoreError::Io(io::Error::new(io::ErrorKind::Other, message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spiritling::{ActionType, Personality, Task};
    use chrono::Utc;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("spiritling-store-{}", Uuid::new_v4()))
            .join("store.json")
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let path = temp_path();
        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.all_spiritlings().unwrap().is_empty());
        assert!(!path.exists(), "nothing is written until the first mutation");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let path = temp_path();
        let owner = Owner::new("ada", Utc::now());
        let mut s = Spiritling::new(owner.id, "Fern", "earth", Personality::Lazy, Utc::now());
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.insert_owner(&owner).unwrap();
            store.insert_spiritling(&s).unwrap();
            s.current_action = Task::Resting;
            store.save_spiritling(&s).unwrap();
            store
                .append_action_log(&ActionLog::new(s.id, ActionType::AssignTask, "rest", Utc::now()))
                .unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        let loaded = reopened.spiritling(s.id).unwrap().unwrap();
        assert_eq!(loaded.current_action, Task::Resting);
        assert_eq!(loaded.version, 1);
        assert_eq!(reopened.action_logs(s.id).unwrap().len(), 1);
        assert!(reopened.owner(owner.id).unwrap().is_some());
        assert!(!path.with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_serde_error() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Serde(_))
        ));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_failed_write_is_rolled_back() {
        let path = temp_path();
        let store = JsonFileStore::open(&path).unwrap();
        let owner = Owner::new("bea", Utc::now());
        let mut s = Spiritling::new(owner.id, "Moss", "earth", Personality::Normal, Utc::now());
        store.insert_owner(&owner).unwrap();
        store.insert_spiritling(&s).unwrap();

        // a directory where the temp file should go makes every write fail
        let blocker = path.with_extension("json.tmp");
        fs::create_dir_all(&blocker).unwrap();

        s.experience = 25;
        let entry = ActionLog::new(s.id, ActionType::LevelUp, "up", Utc::now());
        let update = SpiritlingUpdate::new(s.clone()).with_coins(5).with_log(entry);
        assert!(matches!(store.commit_update(&update), Err(StoreError::Io(_))));
        let feed = ActionLog::new(s.id, ActionType::Feed, "fed", Utc::now());
        assert!(store.append_action_log(&feed).is_err());

        let stored = store.spiritling(s.id).unwrap().unwrap();
        assert_eq!(stored.version, 0, "a failed write must not leave the save applied");
        assert_eq!(stored.experience, 0);
        assert_eq!(store.owner(owner.id).unwrap().unwrap().coins, 1000);
        assert!(store.action_logs(s.id).unwrap().is_empty());

        fs::remove_dir_all(&blocker).unwrap();
        store.commit_update(&update).unwrap();
        assert_eq!(store.owner(owner.id).unwrap().unwrap().coins, 1005);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_second_handle_sees_writes_from_the_first() {
        let path = temp_path();
        let owner = Owner::new("cy", Utc::now());
        let s = Spiritling::new(owner.id, "Twin", "water", Personality::Normal, Utc::now());

        let daemon = JsonFileStore::open(&path).unwrap();
        daemon.insert_owner(&owner).unwrap();
        daemon.insert_spiritling(&s).unwrap();

        // separate handle on the same file, as a second process would open it
        let cli = JsonFileStore::open(&path).unwrap();
        let mut fresh = cli.spiritling(s.id).unwrap().unwrap();
        fresh.experience = 40;
        cli.commit_update(&SpiritlingUpdate::new(fresh).with_coins(8)).unwrap();

        // the first handle still holds version 0 in memory
        let mut stale = daemon.spiritling(s.id).unwrap().unwrap();
        assert_eq!(stale.version, 0);
        stale.experience = 3;
        let err = daemon.save_spiritling(&stale).unwrap_err();
        assert!(err.is_conflict(), "stale writer must lose: {}", err);

        let reread = daemon.spiritling(s.id).unwrap().unwrap();
        assert_eq!(reread.experience, 40);
        assert_eq!(reread.version, 1);
        assert_eq!(daemon.owner(owner.id).unwrap().unwrap().coins, 1008);

        let on_disk = read_snapshot(&path).unwrap();
        assert_eq!(on_disk.spiritlings[0].experience, 40);
        assert_eq!(on_disk.generation, 3);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_listing_picks_up_another_writer() {
        let path = temp_path();
        let owner = Owner::new("di", Utc::now());
        let s = Spiritling::new(owner.id, "Echo", "air", Personality::Normal, Utc::now());
        let daemon = JsonFileStore::open(&path).unwrap();
        daemon.insert_owner(&owner).unwrap();
        daemon.insert_spiritling(&s).unwrap();

        let cli = JsonFileStore::open(&path).unwrap();
        let mut moved = s.clone();
        moved.experience = 12;
        cli.save_spiritling(&moved).unwrap();

        let listed = daemon.all_spiritlings().unwrap();
        assert_eq!(listed[0].experience, 12);
        assert_eq!(listed[0].version, 1);
        assert_eq!(daemon.spiritlings_by_owner(owner.id).unwrap()[0].version, 1);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_batch_of_logs_is_one_write() {
        let path = temp_path();
        let store = JsonFileStore::open(&path).unwrap();
        let id = Uuid::new_v4();
        let entries: Vec<ActionLog> = (0..10)
            .map(|i| ActionLog::new(id, ActionType::LevelUp, format!("entry {}", i), Utc::now()))
            .collect();
        store.append_action_logs(&entries).unwrap();
        assert_eq!(store.snapshot().generation, 1);
        assert_eq!(store.action_logs(id).unwrap().len(), 10);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
