use crate::repository::DurableRepository;
use crate::store::fs::FileStore;
use crate::store::fs_backend::DEFAULT_FILE_NAME;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub repo: Arc<DurableRepository>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store =
            FileStore::open_fs(root.clone(), DEFAULT_FILE_NAME).expect("failed to open store");
        Self {
            _temp_dir: temp_dir,
            repo: Arc::new(DurableRepository::new(store)),
            root,
        }
    }

    /// Opens a second handle on the same file, as a restarted process would.
    pub fn reopen(&self) -> Arc<DurableRepository> {
        let store = FileStore::open_fs(self.root.clone(), DEFAULT_FILE_NAME)
            .expect("failed to reopen store");
        Arc::new(DurableRepository::new(store))
    }

    pub fn collection_file(&self) -> PathBuf {
        self.root.join(DEFAULT_FILE_NAME)
    }
}
