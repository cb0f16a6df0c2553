//! # Storage Layer
//!
//! Storage is split in two, the way the record set is both kept in memory and
//! persisted:
//!
//! 1. **Backend** ([`backend::StorageBackend`]): the "how". Loads and saves the
//!    whole [`backend::RecordIndex`]. Knows nothing about ids or ordering.
//! 2. **Record store** ([`record_store::RecordStore`]): the "what". Owns the
//!    authoritative record set, assigns ids, serializes writes and publishes
//!    snapshots to observers.
//!
//! ## Write Path
//!
//! Every mutation runs under the store's write lock:
//!
//! 1. Clone the current state and apply the change to the copy.
//! 2. Persist the copy through the backend.
//! 3. Swap the copy in and publish the new snapshot.
//!
//! If step 2 fails, nothing was committed: readers and observers still see the
//! previous state. No-op mutations (update or delete of a missing id) skip
//! steps 2 and 3 entirely.
//!
//! ## Observers
//!
//! Snapshots travel on a `tokio::sync::watch` channel. A new subscriber holds the
//! latest committed snapshot right away; later commits mark it as changed. The
//! channel keeps only the newest value, so a slow observer skips straight to
//! the latest state instead of replaying every intermediate one.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store over [`fs_backend::FsBackend`].
//! - [`memory::InMemoryStore`]: volatile store over [`mem_backend::MemBackend`], for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── mangas.json   # Record index: schema version, next id, records
//! └── sekai.toml    # Optional configuration
//! ```

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

pub use record_store::{RecordStore, Snapshot};
