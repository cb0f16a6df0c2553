use crate::error::Result;
use crate::model::{MangaRecord, RecordId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bumped whenever the persisted record layout changes. An index written
/// under any other version is discarded on load.
pub const SCHEMA_VERSION: u32 = 2;

/// Everything the store persists: the records plus the id counter.
///
/// `next_id` is stored rather than derived from the records so that ids of
/// deleted mangas are never handed out again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIndex {
    pub schema_version: u32,
    pub next_id: RecordId,
    pub records: Vec<MangaRecord>,
}

impl Default for RecordIndex {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            next_id: 1,
            records: Vec::new(),
        }
    }
}

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (ids, ordering, publishing).
pub trait StorageBackend: Send + Sync {
    /// Load the record index. A missing index is an empty collection.
    fn load_index(&self) -> Result<RecordIndex>;

    /// Save the record index.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_index(&self, index: &RecordIndex) -> Result<()>;

    /// Where the index lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
