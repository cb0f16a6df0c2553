//! # Configuration
//!
//! Sekai configuration is loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `SEKAI_DATA_DIR`, `SEKAI_FILE_NAME`, `SEKAI_MIN_YEAR`.
//! 2. **Config file**: `sekai.toml` in the base data directory.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | *(base data dir)* | Where the collection file lives |
//! | `file_name` | `mangas.json` | Name of the collection file |
//! | `min_year` | `1400` | Earliest accepted publication year |

use crate::error::{Result, SekaiError};
use crate::store::fs_backend::DEFAULT_FILE_NAME;
use crate::validation::{YearRange, MIN_YEAR};
use confique::Config;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "sekai.toml";

/// Configuration for sekai, stored in `sekai.toml`.
#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct SekaiConfig {
    /// Directory holding the collection file. Defaults to the base data directory.
    #[config(env = "SEKAI_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Name of the collection file inside the data directory.
    #[config(env = "SEKAI_FILE_NAME", default = "mangas.json")]
    pub file_name: String,

    /// Earliest publication year the form accepts.
    #[config(env = "SEKAI_MIN_YEAR", default = 1400)]
    pub min_year: i32,
}

impl Default for SekaiConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            min_year: MIN_YEAR,
        }
    }
}

impl SekaiConfig {
    /// Loads environment overrides on top of `sekai.toml` in `base_dir`.
    /// A missing file just means defaults.
    pub fn load(base_dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(base_dir.join(CONFIG_FILE_NAME))
            .load()
            .map_err(|e| SekaiError::Config(e.to_string()))
    }

    /// The directory the collection file lives in.
    pub fn collection_dir(&self, base_dir: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| base_dir.to_path_buf())
    }

    pub fn year_range(&self) -> YearRange {
        YearRange::up_to_next_year(self.min_year)
    }
}
