//! List and detail view models.
//!
//! Both take the repository handle explicitly and never hold a UI reference.
//! Actions report back through result enums instead of callbacks; storage
//! errors are logged and turned into failure messages.

use crate::messages::{self, Message};
use crate::model::Manga;
use crate::repository::{MangaFeed, MangaRepository};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// No snapshot observed yet.
    Loading,
    Empty,
    Content(Vec<Manga>),
}

impl ListState {
    fn from_snapshot(mangas: Vec<Manga>) -> Self {
        if mangas.is_empty() {
            ListState::Empty
        } else {
            ListState::Content(mangas)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Done(Message),
    Failed(Message),
}

impl ActionResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ActionResult::Done(_))
    }

    pub fn message(&self) -> &Message {
        match self {
            ActionResult::Done(m) | ActionResult::Failed(m) => m,
        }
    }
}

pub struct ListViewModel<R: MangaRepository + ?Sized> {
    repo: Arc<R>,
    feed: MangaFeed,
    state: ListState,
}

impl<R: MangaRepository + ?Sized> ListViewModel<R> {
    pub fn new(repo: Arc<R>) -> Self {
        let feed = repo.observe_all();
        Self {
            repo,
            feed,
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Pulls the latest snapshot if it has not been seen yet.
    /// Returns whether the state was recomputed.
    pub fn refresh(&mut self) -> bool {
        if self.state != ListState::Loading && !self.feed.has_changed() {
            return false;
        }
        self.state = ListState::from_snapshot(self.feed.latest());
        true
    }

    /// Waits for the next commit and recomputes the state.
    /// Returns `false` once the store is gone.
    pub async fn next_change(&mut self) -> bool {
        if !self.feed.changed().await {
            return false;
        }
        self.state = ListState::from_snapshot(self.feed.latest());
        true
    }

    /// Deletes a manga. The list itself is not touched here; the removal
    /// shows up with the next snapshot.
    pub fn delete(&self, id: &str) -> ActionResult {
        match self.repo.delete(id) {
            Ok(true) => ActionResult::Done(Message::success(messages::MANGA_DELETED)),
            Ok(false) => ActionResult::Failed(Message::error(messages::DELETE_FAILED)),
            Err(e) => {
                warn!(id = %id, error = %e, "delete failed");
                ActionResult::Failed(Message::error(messages::DELETE_FAILED))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailResult {
    Found(Manga),
    /// The UI should notify and go back to the list.
    NotFound(Message),
    Failed(Message),
}

pub struct DetailViewModel<R: MangaRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: MangaRepository + ?Sized> DetailViewModel<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn fetch(&self, id: &str) -> DetailResult {
        match self.repo.get_by_id(id) {
            Ok(Some(manga)) => DetailResult::Found(manga),
            Ok(None) => DetailResult::NotFound(Message::error(messages::MANGA_NOT_FOUND)),
            Err(e) => {
                warn!(id = %id, error = %e, "detail fetch failed");
                DetailResult::Failed(Message::error(e.to_string()))
            }
        }
    }
}
