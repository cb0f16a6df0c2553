use super::backend::{RecordIndex, StorageBackend};
use crate::error::{Result, SekaiError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory storage backend for testing.
///
/// The store is shared across threads, so the index sits behind a `Mutex`
/// rather than a `RefCell`.
#[derive(Default)]
pub struct MemBackend {
    index: Mutex<RecordIndex>,
    simulate_write_error: AtomicBool,
    saves: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing index, as if it had been persisted earlier.
    pub fn with_index(index: RecordIndex) -> Self {
        Self {
            index: Mutex::new(index),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful `save_index` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl StorageBackend for MemBackend {
    fn load_index(&self) -> Result<RecordIndex> {
        let index = self
            .index
            .lock()
            .map_err(|_| SekaiError::Store("memory backend lock poisoned".to_string()))?;
        Ok(index.clone())
    }

    fn save_index(&self, new_index: &RecordIndex) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(SekaiError::Store("Simulated write error".to_string()));
        }
        let mut index = self
            .index
            .lock()
            .map_err(|_| SekaiError::Store("memory backend lock poisoned".to_string()))?;
        *index = new_index.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://mangas")
    }
}
