use super::backend::{RecordIndex, StorageBackend, SCHEMA_VERSION};
use crate::error::{Result, SekaiError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

pub const DEFAULT_FILE_NAME: &str = "mangas.json";

pub struct FsBackend {
    root: PathBuf,
    file_name: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SekaiError::Io)?;
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let stem = Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        self.root.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn load_index(&self) -> Result<RecordIndex> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(RecordIndex::default());
        }
        let content = fs::read_to_string(&path).map_err(SekaiError::Io)?;
        let raw: serde_json::Value =
            serde_json::from_str(&content).map_err(SekaiError::Serialization)?;

        // Older layouts are replaced wholesale; the next save overwrites the file.
        let version = raw.get("schema_version").and_then(|v| v.as_u64());
        if version != Some(u64::from(SCHEMA_VERSION)) {
            warn!(
                path = %path.display(),
                found = ?version,
                expected = SCHEMA_VERSION,
                "discarding record index written under another schema version"
            );
            return Ok(RecordIndex::default());
        }

        let index: RecordIndex = serde_json::from_value(raw).map_err(SekaiError::Serialization)?;
        Ok(index)
    }

    fn save_index(&self, index: &RecordIndex) -> Result<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(index).map_err(SekaiError::Serialization)?;

        // Atomic write
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content).map_err(SekaiError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, self.index_path()) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SekaiError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.index_path()
    }
}
