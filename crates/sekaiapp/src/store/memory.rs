use super::backend::RecordIndex;
use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_index(MemBackend::new(), RecordIndex::default())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{MangaRecord, RecordId};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_mangas(self, count: usize) -> Self {
            for i in 0..count {
                let record = MangaRecord::new(format!("Test Manga {}", i + 1), "Test Author")
                    .with_year(2000 + i as i32);
                self.store.insert(record).unwrap();
            }
            self
        }

        pub fn with_manga(self, title: &str, author: &str) -> Self {
            self.store.insert(MangaRecord::new(title, author)).unwrap();
            self
        }

        /// Inserts under a fixed id, for tests that address a record directly.
        pub fn with_record(self, record: MangaRecord) -> Self {
            self.store.insert(record).unwrap();
            self
        }

        pub fn ids(&self) -> Vec<RecordId> {
            self.store.snapshot().iter().map(|r| r.id).collect()
        }
    }
}
