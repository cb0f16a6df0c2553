//! Leveled status messages for the notification collaborator.
//!
//! Forms and view models never print. They hand back [`Message`] values and the
//! UI decides how to show them (the CLI styles them by level).

use std::fmt;

pub const MANGA_CREATED: &str = "Manga creado";
pub const MANGA_UPDATED: &str = "Manga actualizado";
pub const MANGA_DELETED: &str = "Manga eliminado";
pub const DELETE_FAILED: &str = "No se pudo eliminar";
pub const MANGA_NOT_FOUND: &str = "Manga no encontrado";
pub const EMPTY_COLLECTION: &str = "Crea tu primer manga para comenzar.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: MessageLevel,
    pub content: String,
}

impl Message {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }

    /// "No se pudo guardar: {reason}"
    pub fn save_failed(reason: impl fmt::Display) -> Self {
        Self::error(format!("No se pudo guardar: {}", reason))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
