//! # Form State Machine
//!
//! A [`FormSession`] owns one [`FormDraft`]: the in-progress edits for a single
//! manga. It validates on every change and performs exactly one repository
//! write per accepted submit.
//!
//! ## Phases
//!
//! ```text
//!  create() ─────────────────────────┐
//!                                    ▼
//!  edit(id) ─► Loading ──found──► Editing ◄──────────── failed write
//!                 │                  │ begin_submit()        ▲
//!              missing               ▼                       │
//!                 ▼              Submitting ── finish_submit()┤
//!             Abandoned                                      ▼
//!                                                    Succeeded(id)
//! ```
//!
//! - Field changes are only accepted while `Editing`. Each one marks the draft
//!   dirty and re-runs validation synchronously.
//! - `begin_submit` is ignored unless the phase is `Editing` and the draft is
//!   valid. A second submit while `Submitting` is ignored too; the write already
//!   in flight is never cancelled or queued behind.
//! - A failed write (storage error, or an update whose record vanished) returns
//!   to `Editing` with the message kept in [`FormSession::last_error`], so the
//!   user can retry.
//!
//! Submitting is split into [`FormSession::begin_submit`] and
//! [`FormSession::finish_submit`] so a UI can show the saving state between
//! the two; [`FormSession::submit`] runs both back to back.

use crate::messages::{self, Message};
use crate::model::Manga;
use crate::repository::MangaRepository;
use crate::validation::{validate, FieldErrors, YearRange};
use std::sync::Arc;
use tracing::{debug, warn};

/// In-progress form state for one manga. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    /// Set only when editing an existing manga.
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    /// Raw text as typed; parsed on submit.
    pub year: String,
    pub description: String,
    pub cover_uri: Option<String>,
    pub field_errors: FieldErrors,
    pub is_valid: bool,
    pub is_saving: bool,
    pub is_dirty: bool,
}

impl FormDraft {
    pub fn from_manga(manga: &Manga) -> Self {
        Self {
            id: Some(manga.id.clone()),
            title: manga.title.clone(),
            author: manga.author.clone(),
            year: manga.year.map(|y| y.to_string()).unwrap_or_default(),
            description: manga.description.clone(),
            cover_uri: manga.cover_uri.clone(),
            ..Default::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// The manga this draft would save: names trimmed, year parsed,
    /// description and cover carried through untouched.
    pub fn to_manga(&self) -> Manga {
        Manga {
            id: self.id.clone().unwrap_or_default(),
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            year: self.year.trim().parse().ok(),
            description: self.description.clone(),
            cover_uri: self.cover_uri.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Loading,
    Editing,
    Submitting,
    Succeeded(String),
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The draft is editable (either just loaded, or nothing needed loading).
    Ready,
    /// The manga to edit does not exist; the form should close.
    NotFound(Message),
    /// Reading the manga failed; the form should close.
    Failed(Message),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not accepted: invalid draft, wrong phase, or already submitting.
    Ignored,
    Succeeded { id: String, message: Message },
    Failed(Message),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Insert,
    Update,
}

/// A write accepted by [`FormSession::begin_submit`], waiting to be performed.
#[derive(Debug)]
pub struct SubmitRequest {
    manga: Manga,
    mode: WriteMode,
}

impl SubmitRequest {
    pub fn manga(&self) -> &Manga {
        &self.manga
    }

    pub fn is_update(&self) -> bool {
        self.mode == WriteMode::Update
    }
}

pub struct FormSession<R: MangaRepository + ?Sized> {
    repo: Arc<R>,
    draft: FormDraft,
    phase: FormPhase,
    target: Option<String>,
    years: YearRange,
    last_error: Option<Message>,
    /// Why loading gave up; repeated on every later `load`.
    abandoned: Option<LoadOutcome>,
}

impl<R: MangaRepository + ?Sized> FormSession<R> {
    /// A blank form for a new manga, ready for edits.
    pub fn create(repo: Arc<R>) -> Self {
        Self {
            repo,
            draft: FormDraft::default(),
            phase: FormPhase::Editing,
            target: None,
            years: YearRange::default(),
            last_error: None,
            abandoned: None,
        }
    }

    /// A form for an existing manga. Call [`load`](Self::load) before editing.
    pub fn edit(repo: Arc<R>, id: impl Into<String>) -> Self {
        Self {
            repo,
            draft: FormDraft::default(),
            phase: FormPhase::Loading,
            target: Some(id.into()),
            years: YearRange::default(),
            last_error: None,
            abandoned: None,
        }
    }

    pub fn with_year_range(mut self, years: YearRange) -> Self {
        self.years = years;
        self
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn last_error(&self) -> Option<&Message> {
        self.last_error.as_ref()
    }

    /// Fetches the manga being edited and fills the draft with it.
    ///
    /// Calling it again is harmless: an abandoned form reports the same
    /// outcome, anything else is `Ready`.
    pub fn load(&mut self) -> LoadOutcome {
        match self.phase {
            FormPhase::Loading => {}
            FormPhase::Abandoned => {
                return self.abandoned.clone().unwrap_or_else(|| {
                    LoadOutcome::NotFound(Message::error(messages::MANGA_NOT_FOUND))
                })
            }
            _ => return LoadOutcome::Ready,
        }
        let id = self.target.clone().unwrap_or_default();

        match self.repo.get_by_id(&id) {
            Ok(Some(manga)) => {
                self.draft = FormDraft::from_manga(&manga);
                self.phase = FormPhase::Editing;
                self.revalidate();
                LoadOutcome::Ready
            }
            Ok(None) => {
                debug!(id = %id, "manga to edit not found, abandoning form");
                self.abandon(LoadOutcome::NotFound(Message::error(
                    messages::MANGA_NOT_FOUND,
                )))
            }
            Err(e) => {
                warn!(id = %id, error = %e, "failed to load manga for editing");
                self.abandon(LoadOutcome::Failed(Message::error(e.to_string())))
            }
        }
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.change(|d| d.title = value);
    }

    pub fn set_author(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.change(|d| d.author = value);
    }

    pub fn set_year(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.change(|d| d.year = value);
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.change(|d| d.description = value);
    }

    pub fn set_cover_uri(&mut self, value: Option<String>) {
        self.change(|d| d.cover_uri = value);
    }

    pub fn clear_cover_uri(&mut self) {
        self.change(|d| d.cover_uri = None);
    }

    /// Accepts the draft for writing and locks it, or returns `None` when the
    /// submit has to be ignored.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.phase != FormPhase::Editing || !self.draft.is_valid || self.draft.is_saving {
            return None;
        }
        let mode = if self.draft.is_editing() {
            WriteMode::Update
        } else {
            WriteMode::Insert
        };
        self.phase = FormPhase::Submitting;
        self.draft.is_saving = true;
        self.last_error = None;
        Some(SubmitRequest {
            manga: self.draft.to_manga(),
            mode,
        })
    }

    /// Performs the accepted write and settles the phase.
    pub fn finish_submit(&mut self, request: SubmitRequest) -> SubmitOutcome {
        if self.phase != FormPhase::Submitting {
            return SubmitOutcome::Ignored;
        }

        let result = match request.mode {
            WriteMode::Insert => self.repo.insert(&request.manga).map(|id| {
                Some(SubmitOutcome::Succeeded {
                    id,
                    message: Message::success(messages::MANGA_CREATED),
                })
            }),
            WriteMode::Update => self.repo.update(&request.manga).map(|updated| {
                updated.then(|| SubmitOutcome::Succeeded {
                    id: request.manga.id.clone(),
                    message: Message::success(messages::MANGA_UPDATED),
                })
            }),
        };
        self.draft.is_saving = false;

        match result {
            Ok(Some(outcome)) => {
                if let SubmitOutcome::Succeeded { id, .. } = &outcome {
                    debug!(id = %id, "form submitted");
                    self.draft.id = Some(id.clone());
                    self.phase = FormPhase::Succeeded(id.clone());
                }
                outcome
            }
            Ok(None) => self.fail(Message::error(messages::MANGA_NOT_FOUND)),
            Err(e) => {
                warn!(error = %e, "form submit failed");
                self.fail(Message::save_failed(e))
            }
        }
    }

    /// [`begin_submit`](Self::begin_submit) and [`finish_submit`](Self::finish_submit) in one go.
    pub fn submit(&mut self) -> SubmitOutcome {
        match self.begin_submit() {
            Some(request) => self.finish_submit(request),
            None => SubmitOutcome::Ignored,
        }
    }

    fn abandon(&mut self, outcome: LoadOutcome) -> LoadOutcome {
        self.phase = FormPhase::Abandoned;
        self.abandoned = Some(outcome.clone());
        outcome
    }

    fn fail(&mut self, message: Message) -> SubmitOutcome {
        self.phase = FormPhase::Editing;
        self.last_error = Some(message.clone());
        SubmitOutcome::Failed(message)
    }

    fn change(&mut self, apply: impl FnOnce(&mut FormDraft)) {
        if self.phase != FormPhase::Editing {
            return;
        }
        apply(&mut self.draft);
        self.draft.is_dirty = true;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        let outcome = validate(&self.draft, self.years);
        self.draft.field_errors = outcome.errors;
        self.draft.is_valid = outcome.is_valid;
    }
}
