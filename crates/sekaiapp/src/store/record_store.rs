use super::backend::{RecordIndex, StorageBackend, SCHEMA_VERSION};
use crate::error::{Result, SekaiError};
use crate::model::{title_order, MangaRecord, RecordId};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;
use tracing::{debug, warn};

/// The full ordered record list at one point in time.
pub type Snapshot = Arc<Vec<MangaRecord>>;

#[derive(Debug, Clone)]
struct RecordSet {
    next_id: RecordId,
    records: BTreeMap<RecordId, MangaRecord>,
}

impl RecordSet {
    fn from_index(index: RecordIndex) -> Self {
        let mut records = BTreeMap::new();
        for record in index.records {
            if record.is_unassigned() {
                warn!(title = %record.title, "skipping stored record without an id");
                continue;
            }
            records.insert(record.id, record);
        }

        // A hand-edited or truncated counter must never collide with a stored id.
        let floor = records
            .keys()
            .next_back()
            .map_or(1, |max| max.saturating_add(1));

        Self {
            next_id: index.next_id.max(floor),
            records,
        }
    }

    fn to_index(&self) -> RecordIndex {
        RecordIndex {
            schema_version: SCHEMA_VERSION,
            next_id: self.next_id,
            records: self.records.values().cloned().collect(),
        }
    }

    fn snapshot(&self) -> Snapshot {
        let mut ordered: Vec<MangaRecord> = self.records.values().cloned().collect();
        ordered.sort_by(title_order);
        Arc::new(ordered)
    }
}

/// Durable, uniquely keyed storage for manga records.
///
/// Reads share a read lock; every mutation holds the write lock from the
/// backend write until the new snapshot is published, so observers see
/// commits one at a time and in order.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
    state: RwLock<RecordSet>,
    snapshots: watch::Sender<Snapshot>,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Opens a store over whatever the backend has persisted.
    pub fn open(backend: B) -> Result<Self> {
        let index = backend.load_index()?;
        Ok(Self::with_index(backend, index))
    }

    pub(crate) fn with_index(backend: B, index: RecordIndex) -> Self {
        let state = RecordSet::from_index(index);
        let (snapshots, _) = watch::channel(state.snapshot());
        Self {
            backend,
            state: RwLock::new(state),
            snapshots,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Subscribes to the ordered record list.
    ///
    /// The receiver holds the current snapshot immediately and is marked
    /// changed after every committed insert, update or delete.
    pub fn observe_all(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    /// The latest committed snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn get_by_id(&self, id: RecordId) -> Result<Option<MangaRecord>> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.records.is_empty())
    }

    /// Stores a new record and returns its id.
    ///
    /// An unassigned record gets the next id. A record that already carries an
    /// id keeps it, unless that id is taken, which is a [`SekaiError::Conflict`].
    /// Once the id counter is used up, unassigned inserts fail with
    /// [`SekaiError::Store`].
    pub fn insert(&self, mut record: MangaRecord) -> Result<RecordId> {
        let mut state = self.write()?;
        let mut next = state.clone();

        let id = if record.is_unassigned() {
            // The counter stops at RecordId::MAX; once that id is taken there is none left.
            if next.records.contains_key(&next.next_id) {
                warn!(next_id = next.next_id, "record id space exhausted");
                return Err(SekaiError::Store("record id space exhausted".to_string()));
            }
            next.next_id
        } else if next.records.contains_key(&record.id) {
            return Err(SekaiError::Conflict(record.id));
        } else {
            record.id
        };
        record.id = id;
        next.next_id = next.next_id.max(id.checked_add(1).unwrap_or(RecordId::MAX));
        next.records.insert(id, record);

        self.commit(&mut state, next)?;
        debug!(id, "inserted manga record");
        Ok(id)
    }

    /// Replaces the record with the same id. Returns the number of rows
    /// affected: `0` when no such record exists, `1` otherwise.
    pub fn update(&self, record: MangaRecord) -> Result<usize> {
        let mut state = self.write()?;
        if !state.records.contains_key(&record.id) {
            debug!(id = record.id, "update skipped, no such record");
            return Ok(0);
        }

        let id = record.id;
        let mut next = state.clone();
        next.records.insert(id, record);

        self.commit(&mut state, next)?;
        debug!(id, "updated manga record");
        Ok(1)
    }

    /// Removes a record. Returns whether it existed.
    pub fn delete(&self, id: RecordId) -> Result<bool> {
        let mut state = self.write()?;
        if !state.records.contains_key(&id) {
            debug!(id, "delete skipped, no such record");
            return Ok(false);
        }

        let mut next = state.clone();
        next.records.remove(&id);

        self.commit(&mut state, next)?;
        debug!(id, "deleted manga record");
        Ok(true)
    }

    /// Persists `next`, then swaps it in and publishes it.
    /// On a backend failure the current state is left untouched.
    fn commit(&self, state: &mut RecordSet, next: RecordSet) -> Result<()> {
        if let Err(e) = self.backend.save_index(&next.to_index()) {
            warn!(error = %e, "failed to persist record index, mutation dropped");
            return Err(e);
        }
        *state = next;
        self.snapshots.send_replace(state.snapshot());
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RecordSet>> {
        self.state
            .read()
            .map_err(|_| SekaiError::Store("record store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RecordSet>> {
        self.state
            .write()
            .map_err(|_| SekaiError::Store("record store lock poisoned".to_string()))
    }
}
