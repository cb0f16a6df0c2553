//! # Collection Repository
//!
//! The repository is the read/write contract that forms and view models use.
//! It sits on top of a [`RecordStore`] and hides the storage key type: ids cross
//! this boundary as opaque strings.
//!
//! ## Id Handling
//!
//! | operation   | unparsable id          | unknown id     |
//! |-------------|------------------------|----------------|
//! | `get_by_id` | `Ok(None)`             | `Ok(None)`     |
//! | `update`    | `Ok(false)`, no write  | `Ok(false)`    |
//! | `delete`    | `Ok(false)`, no write  | `Ok(false)`    |
//!
//! `insert` ignores whatever id the manga carries and returns the id the store
//! minted. Storage failures are passed through as `Err`.
//!
//! ## Variants
//!
//! [`MangaRepository`] is object safe, so consumers can hold an
//! `Arc<dyn MangaRepository>` or stay generic. Both variants are the same
//! [`StoreRepository`] over a different backend:
//!
//! - [`VolatileRepository`]: memory only, for tests.
//! - [`DurableRepository`]: backed by the collection file on disk.

use crate::error::Result;
use crate::model::{parse_record_id, Manga, MangaRecord};
use crate::store::backend::StorageBackend;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::memory::InMemoryStore;
use crate::store::{RecordStore, Snapshot};
use tokio::sync::watch;

/// The capability set every repository implementation provides.
pub trait MangaRepository: Send + Sync {
    /// Live, title-ordered view of the whole collection.
    fn observe_all(&self) -> MangaFeed;

    fn get_by_id(&self, id: &str) -> Result<Option<Manga>>;

    /// Stores a new manga and returns its freshly minted id.
    fn insert(&self, manga: &Manga) -> Result<String>;

    /// Replaces the manga with the same id. `false` means nothing was updated.
    fn update(&self, manga: &Manga) -> Result<bool>;

    /// `true` if a manga was found and removed.
    fn delete(&self, id: &str) -> Result<bool>;
}

/// A subscription to the collection.
///
/// Holds the latest snapshot; records are converted to [`Manga`] when read.
pub struct MangaFeed {
    rx: watch::Receiver<Snapshot>,
}

impl MangaFeed {
    pub fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// The latest snapshot, marking it as seen.
    pub fn latest(&mut self) -> Vec<Manga> {
        let snapshot = self.rx.borrow_and_update();
        snapshot.iter().map(Manga::from).collect()
    }

    /// The latest snapshot, without marking it as seen.
    pub fn peek(&self) -> Vec<Manga> {
        self.rx.borrow().iter().map(Manga::from).collect()
    }

    /// Whether a commit happened since the last [`latest`](Self::latest).
    /// A feed whose store is gone never changes again.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Waits for the next commit. Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

pub struct StoreRepository<B: StorageBackend> {
    store: RecordStore<B>,
}

pub type VolatileRepository = StoreRepository<MemBackend>;
pub type DurableRepository = StoreRepository<FsBackend>;

impl<B: StorageBackend> StoreRepository<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }
}

impl VolatileRepository {
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new())
    }
}

impl Default for VolatileRepository {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<B: StorageBackend> MangaRepository for StoreRepository<B> {
    fn observe_all(&self) -> MangaFeed {
        MangaFeed::new(self.store.observe_all())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Manga>> {
        let Some(record_id) = parse_record_id(id) else {
            return Ok(None);
        };
        Ok(self.store.get_by_id(record_id)?.map(Manga::from))
    }

    fn insert(&self, manga: &Manga) -> Result<String> {
        let id = self
            .store
            .insert(manga.to_record(MangaRecord::UNASSIGNED))?;
        Ok(id.to_string())
    }

    fn update(&self, manga: &Manga) -> Result<bool> {
        let Some(record_id) = parse_record_id(&manga.id) else {
            return Ok(false);
        };
        let rows = self.store.update(manga.to_record(record_id))?;
        Ok(rows > 0)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let Some(record_id) = parse_record_id(id) else {
            return Ok(false);
        };
        self.store.delete(record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn naruto() -> Manga {
        Manga {
            title: "Naruto".to_string(),
            author: "Kishimoto".to_string(),
            year: Some(1999),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_ignores_domain_id() {
        let repo = VolatileRepository::in_memory();
        let manga = Manga {
            id: "not-a-number".to_string(),
            ..naruto()
        };

        let id = repo.insert(&manga).unwrap();
        assert_eq!(id, "1");

        let stored = repo.get_by_id(&id).unwrap().unwrap();
        assert_eq!(stored, Manga { id, ..naruto() });
    }

    #[test]
    fn test_insert_with_existing_numeric_id_still_mints_new_one() {
        let repo = VolatileRepository::in_memory();
        let first = repo.insert(&naruto()).unwrap();
        let second = repo
            .insert(&Manga {
                id: first.clone(),
                ..naruto()
            })
            .unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_get_by_id_with_unparsable_id() {
        let repo = VolatileRepository::in_memory();
        repo.insert(&naruto()).unwrap();
        assert_eq!(repo.get_by_id("abc").unwrap(), None);
        assert_eq!(repo.get_by_id("").unwrap(), None);
        assert_eq!(repo.get_by_id("99").unwrap(), None);
    }

    #[test]
    fn test_update_and_delete_with_unparsable_id_are_noops() {
        let repo = VolatileRepository::in_memory();
        repo.insert(&naruto()).unwrap();
        let saves = repo.store().backend().save_count();

        let bogus = Manga {
            id: "abc".to_string(),
            ..naruto()
        };
        assert!(!repo.update(&bogus).unwrap());
        assert!(!repo.delete("abc").unwrap());
        assert_eq!(repo.store().backend().save_count(), saves);
    }

    #[test]
    fn test_update_reports_missing_record() {
        let repo = VolatileRepository::in_memory();
        let ghost = Manga {
            id: "42".to_string(),
            ..naruto()
        };
        assert!(!repo.update(&ghost).unwrap());
        assert!(repo.store().is_empty().unwrap());
    }

    #[test]
    fn test_update_keeps_id_and_description() {
        let repo = VolatileRepository::in_memory();
        let id = repo.insert(&naruto()).unwrap();

        let edited = Manga {
            id: id.clone(),
            title: "Boruto".to_string(),
            description: "The next generation".to_string(),
            ..naruto()
        };
        assert!(repo.update(&edited).unwrap());
        assert_eq!(repo.get_by_id(&id).unwrap().unwrap(), edited);
    }

    #[test]
    fn test_delete_missing_on_empty_repository() {
        let repo = VolatileRepository::in_memory();
        let feed = repo.observe_all();
        assert!(!repo.delete("999").unwrap());
        assert!(!feed.has_changed());
        assert!(feed.peek().is_empty());
    }

    #[test]
    fn test_feed_maps_records_to_mangas() {
        let repo = VolatileRepository::in_memory();
        let mut feed = repo.observe_all();

        repo.insert(&naruto()).unwrap();
        repo.insert(&Manga {
            title: "akira".to_string(),
            author: "Otomo".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert!(feed.has_changed());
        let mangas = feed.latest();
        assert!(!feed.has_changed());
        let titles: Vec<_> = mangas.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["akira", "Naruto"]);
        assert_eq!(mangas[0].id, "2");
    }

    #[test]
    fn test_works_behind_trait_object() {
        let repo: Arc<dyn MangaRepository> = Arc::new(VolatileRepository::in_memory());
        let id = repo.insert(&naruto()).unwrap();
        assert!(repo.delete(&id).unwrap());
        assert!(!repo.delete(&id).unwrap());
    }

    #[tokio::test]
    async fn test_feed_wakes_on_commit() {
        let repo = Arc::new(VolatileRepository::in_memory());
        let mut feed = repo.observe_all();

        let writer = Arc::clone(&repo);
        let handle = tokio::spawn(async move { writer.insert(&naruto()).unwrap() });

        assert!(feed.changed().await);
        let id = handle.await.unwrap();
        let mangas = feed.latest();
        assert_eq!(mangas.len(), 1);
        assert_eq!(mangas[0].id, id);
    }
}
