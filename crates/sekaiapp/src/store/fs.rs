use super::fs_backend::FsBackend;
use super::record_store::RecordStore;
use crate::error::Result;
use std::path::PathBuf;

pub type FileStore = RecordStore<FsBackend>;

impl FileStore {
    /// Opens (or lazily creates) the collection file `file_name` under `root`.
    pub fn open_fs(root: PathBuf, file_name: &str) -> Result<Self> {
        RecordStore::open(FsBackend::new(root).with_file_name(file_name))
    }
}
