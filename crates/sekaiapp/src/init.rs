//! # Process Start
//!
//! [`initialize`] runs once per process. It resolves where data lives, loads
//! the configuration and opens the one repository every form and view model
//! shares. The handle is returned to the caller and passed along explicitly;
//! nothing is stored globally.
//!
//! ## Base Directory Resolution
//!
//! 1. `data_override` (the CLI's `--data` flag), if given.
//! 2. `SEKAI_HOME` environment variable, if set (primarily for tests).
//! 3. The OS data directory from the `directories` crate.
//!
//! `sekai.toml` is read from the base directory. Its `data_dir` setting may move
//! the collection file elsewhere.

use crate::config::SekaiConfig;
use crate::error::{Result, SekaiError};
use crate::repository::DurableRepository;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub const HOME_ENV: &str = "SEKAI_HOME";

pub struct SekaiContext {
    pub repo: Arc<DurableRepository>,
    pub config: SekaiConfig,
    pub base_dir: PathBuf,
}

pub fn resolve_base_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "sekainomanga", "sekai")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SekaiError::Config("Could not determine data directory".to_string()))
}

/// Builds the shared repository handle.
///
/// # Examples
///
/// ```ignore
/// let ctx = initialize(None)?;
/// let list = ListViewModel::new(Arc::clone(&ctx.repo));
/// let form = FormSession::create(Arc::clone(&ctx.repo));
/// ```
pub fn initialize(data_override: Option<PathBuf>) -> Result<SekaiContext> {
    let base_dir = resolve_base_dir(data_override)?;
    let config = SekaiConfig::load(&base_dir)?;
    let collection_dir = config.collection_dir(&base_dir);

    debug!(
        base = %base_dir.display(),
        collection = %collection_dir.display(),
        "opening manga collection"
    );
    let store = FileStore::open_fs(collection_dir, &config.file_name)?;

    Ok(SekaiContext {
        repo: Arc::new(DurableRepository::new(store)),
        config,
        base_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MangaRepository;
    use crate::store::backend::StorageBackend;
    use std::fs;

    #[test]
    fn test_override_wins() {
        let path = PathBuf::from("/tmp/explicit-sekai");
        assert_eq!(resolve_base_dir(Some(path.clone())).unwrap(), path);
    }

    #[test]
    fn test_initialize_opens_collection_in_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(ctx.base_dir, dir.path());
        assert_eq!(
            ctx.repo.store().backend().location(),
            dir.path().join("mangas.json")
        );
        assert!(ctx.repo.observe_all().peek().is_empty());
    }

    #[test]
    fn test_initialize_honours_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = dir.path().join("elsewhere");
        fs::write(
            dir.path().join("sekai.toml"),
            format!(
                "data_dir = \"{}\"\nfile_name = \"shelf.json\"\n",
                elsewhere.display()
            ),
        )
        .unwrap();

        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(
            ctx.repo.store().backend().location(),
            elsewhere.join("shelf.json")
        );
    }
}
