//! # Rendering
//!
//! Plain string builders over `sekaiapp` values. Styling goes through named
//! `console::Style`s below, so a non-terminal stdout gets unstyled text.

use console::Style;
use sekaiapp::messages::{Message, MessageLevel};
use sekaiapp::model::Manga;
use sekaiapp::validation::FieldErrors;
use std::fmt::Write;

const ID_WIDTH: usize = 4;
const MISSING: &str = "-";

mod styles {
    use console::Style;

    pub fn id() -> Style {
        Style::new().yellow()
    }

    pub fn title() -> Style {
        Style::new().bold()
    }

    pub fn muted() -> Style {
        Style::new().color256(246).italic()
    }

    pub fn label() -> Style {
        Style::new().dim()
    }
}

fn level_style(level: MessageLevel) -> Style {
    match level {
        MessageLevel::Info => Style::new().cyan(),
        MessageLevel::Success => Style::new().green(),
        MessageLevel::Warning => Style::new().yellow(),
        MessageLevel::Error => Style::new().red(),
    }
}

fn year_text(manga: &Manga) -> String {
    manga
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// One line per manga: id, title, then author and year.
pub fn render_list(mangas: &[Manga]) -> String {
    let mut out = String::new();
    for manga in mangas {
        let _ = writeln!(
            out,
            "{}. {}  {}",
            styles::id().apply_to(format!("{:>width$}", manga.id, width = ID_WIDTH)),
            styles::title().apply_to(&manga.title),
            styles::muted().apply_to(format!("{} ({})", manga.author, year_text(manga))),
        );
    }
    out
}

pub fn render_detail(manga: &Manga) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        styles::id().apply_to(format!("#{}", manga.id)),
        styles::title().apply_to(&manga.title)
    );
    let mut field = |label: &str, value: &str| {
        let _ = writeln!(
            out,
            "  {} {}",
            styles::label().apply_to(format!("{:<12}", label)),
            value
        );
    };
    field("Autor", &manga.author);
    field("Año", &year_text(manga));
    if let Some(cover) = &manga.cover_uri {
        field("Portada", cover);
    }
    if !manga.description.trim().is_empty() {
        let _ = writeln!(out);
        for line in manga.description.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}

pub fn render_message(message: &Message) -> String {
    format!("{}\n", level_style(message.level).apply_to(&message.content))
}

/// Field errors in field order, one per line.
pub fn render_field_errors(errors: &FieldErrors) -> String {
    let error = level_style(MessageLevel::Error);
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(
            out,
            "  {} {}",
            styles::label().apply_to(format!("{}:", field)),
            error.apply_to(message)
        );
    }
    out
}
