//! # Domain Model: Records and Mangas
//!
//! Two shapes describe the same manga:
//!
//! - [`MangaRecord`]: the persisted shape. Keyed by a numeric [`RecordId`] that the
//!   store assigns on insert and that never changes afterwards.
//! - [`Manga`]: the domain shape handed to view models and forms. The id is an
//!   opaque string so nothing above the repository depends on the storage key type.
//!
//! ## Ordering
//!
//! Every snapshot of the collection is sorted with [`title_order`]: title ascending,
//! case-insensitive, ties broken by id. The tie-breaker keeps the order stable when
//! two mangas share a title.
//!
//! ## Unassigned Ids
//!
//! A record built with [`MangaRecord::new`] carries [`MangaRecord::UNASSIGNED`] (`0`).
//! Inserting it lets the store pick the next id. Ids handed out by the store are
//! always positive.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub type RecordId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MangaRecord {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_uri: Option<String>,
}

impl MangaRecord {
    pub const UNASSIGNED: RecordId = 0;

    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Self::UNASSIGNED,
            title: title.into(),
            author: author.into(),
            year: None,
            description: String::new(),
            cover_uri: None,
        }
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cover_uri(mut self, cover_uri: impl Into<String>) -> Self {
        self.cover_uri = Some(cover_uri.into());
        self
    }

    pub fn is_unassigned(&self) -> bool {
        self.id == Self::UNASSIGNED
    }
}

/// A manga as seen by everything above the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manga {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub description: String,
    pub cover_uri: Option<String>,
}

impl Manga {
    /// Builds the persisted shape under the given id, dropping the string id.
    pub fn to_record(&self, id: RecordId) -> MangaRecord {
        MangaRecord {
            id,
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
            description: self.description.clone(),
            cover_uri: self.cover_uri.clone(),
        }
    }
}

impl From<&MangaRecord> for Manga {
    fn from(record: &MangaRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            author: record.author.clone(),
            year: record.year,
            description: record.description.clone(),
            cover_uri: record.cover_uri.clone(),
        }
    }
}

impl From<MangaRecord> for Manga {
    fn from(record: MangaRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            author: record.author,
            year: record.year,
            description: record.description,
            cover_uri: record.cover_uri,
        }
    }
}

/// Parses an opaque domain id back into a storage key.
///
/// Returns `None` for anything that is not a positive integer, including the
/// blank id carried by mangas that were never stored.
pub fn parse_record_id(id: &str) -> Option<RecordId> {
    id.parse::<RecordId>()
        .ok()
        .filter(|id| *id != MangaRecord::UNASSIGNED)
}

pub fn title_order(a: &MangaRecord, b: &MangaRecord) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then(a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unassigned() {
        let record = MangaRecord::new("Naruto", "Kishimoto");
        assert!(record.is_unassigned());
        assert_eq!(record.description, "");
        assert_eq!(record.year, None);
        assert_eq!(record.cover_uri, None);
    }

    #[test]
    fn test_record_to_manga_keeps_every_field() {
        let record = MangaRecord::new("Monster", "Urasawa")
            .with_id(7)
            .with_year(1994)
            .with_description("A doctor chases a killer")
            .with_cover_uri("content://covers/7");

        let manga = Manga::from(&record);
        assert_eq!(manga.id, "7");
        assert_eq!(manga.title, "Monster");
        assert_eq!(manga.author, "Urasawa");
        assert_eq!(manga.year, Some(1994));
        assert_eq!(manga.description, "A doctor chases a killer");
        assert_eq!(manga.cover_uri.as_deref(), Some("content://covers/7"));

        assert_eq!(manga.to_record(7), record);
    }

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("5"), Some(5));
        assert_eq!(parse_record_id("0"), None);
        assert_eq!(parse_record_id(""), None);
        assert_eq!(parse_record_id("abc"), None);
        assert_eq!(parse_record_id("-3"), None);
        assert_eq!(parse_record_id(" 5"), None);
    }

    #[test]
    fn test_title_order_is_case_insensitive() {
        let a = MangaRecord::new("berserk", "Miura").with_id(2);
        let b = MangaRecord::new("Akira", "Otomo").with_id(1);
        let c = MangaRecord::new("Claymore", "Yagi").with_id(3);

        let mut records = vec![c.clone(), a.clone(), b.clone()];
        records.sort_by(title_order);
        assert_eq!(records, vec![b, a, c]);
    }

    #[test]
    fn test_title_order_breaks_ties_by_id() {
        let first = MangaRecord::new("Pluto", "Urasawa").with_id(4);
        let second = MangaRecord::new("PLUTO", "Tezuka").with_id(9);

        let mut records = vec![second.clone(), first.clone()];
        records.sort_by(title_order);
        assert_eq!(records, vec![first, second]);
    }
}
