//! Field validation for the manga form.
//!
//! Rules:
//! - **title**, **author**: required; at least 2 characters once trimmed
//! - **year**: required; an integer within [`YearRange`] (inclusive)
//! - **description**: optional; when present, at least 5 characters once trimmed
//!
//! Validation is a pure function of the draft. Errors are data, collected per
//! field in [`FieldErrors`]; nothing here returns `Err`.
//!
//! # Examples
//! ```
//! use sekaiapp::form::FormDraft;
//! use sekaiapp::validation::{validate, Field, YearRange};
//!
//! let years = YearRange::new(1400, 2025);
//! let draft = FormDraft {
//!     title: "a".to_string(),
//!     author: "Kishimoto".to_string(),
//!     year: "1999".to_string(),
//!     ..Default::default()
//! };
//!
//! let outcome = validate(&draft, years);
//! assert!(!outcome.is_valid);
//! assert_eq!(outcome.errors.get(Field::Title), Some("Mínimo 2 caracteres"));
//! assert_eq!(outcome.errors.get(Field::Year), None);
//! ```

use crate::form::FormDraft;
use chrono::Datelike;
use std::collections::BTreeMap;
use std::fmt;

pub const MIN_YEAR: i32 = 1400;

const MIN_NAME_CHARS: usize = 2;
const MIN_DESCRIPTION_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Author,
    Year,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Year => "year",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field error messages. A field with no entry has no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn set(&mut self, field: Field, message: Option<String>) {
        if let Some(message) = message {
            self.0.insert(field, message);
        }
    }
}

/// Accepted publication years, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// `[min, current_year + 1]`, with the current year taken from the local clock.
    pub fn up_to_next_year(min: i32) -> Self {
        Self::for_current_year(min, chrono::Local::now().year())
    }

    pub fn for_current_year(min: i32, current_year: i32) -> Self {
        Self::new(min, current_year + 1)
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::up_to_next_year(MIN_YEAR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub errors: FieldErrors,
    pub is_valid: bool,
}

pub fn validate(draft: &FormDraft, years: YearRange) -> Validation {
    let mut errors = FieldErrors::default();

    errors.set(
        Field::Title,
        validate_name(&draft.title, "El título es obligatorio"),
    );
    errors.set(
        Field::Author,
        validate_name(&draft.author, "El autor es obligatorio"),
    );
    errors.set(Field::Year, validate_year(&draft.year, years));
    errors.set(Field::Description, validate_description(&draft.description));

    // Blank required fields already carry an error; checked again so an
    // untouched draft can never count as valid.
    let is_valid = errors.is_empty()
        && !draft.title.trim().is_empty()
        && !draft.author.trim().is_empty()
        && !draft.year.trim().is_empty();

    Validation { errors, is_valid }
}

fn validate_name(value: &str, required: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(required.to_string());
    }
    if trimmed.chars().count() < MIN_NAME_CHARS {
        return Some(format!("Mínimo {} caracteres", MIN_NAME_CHARS));
    }
    None
}

/// Returns the error for a raw year string, if any.
pub fn validate_year(value: &str, years: YearRange) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("El año es obligatorio".to_string());
    }
    let Ok(year) = trimmed.parse::<i32>() else {
        return Some("Debe ser numérico".to_string());
    };
    if years.contains(year) {
        None
    } else {
        Some(format!("Debe estar entre {} y {}", years.min, years.max))
    }
}

fn validate_description(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() < MIN_DESCRIPTION_CHARS {
        return Some(format!(
            "Si agregas descripción, usa al menos {} caracteres",
            MIN_DESCRIPTION_CHARS
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: i32 = 2024;

    fn years() -> YearRange {
        YearRange::for_current_year(MIN_YEAR, CURRENT)
    }

    fn draft(title: &str, author: &str, year: &str) -> FormDraft {
        FormDraft {
            title: title.to_string(),
            author: author.to_string(),
            year: year.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        let outcome = validate(&draft("Naruto", "Kishimoto", "1999"), years());
        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_empty_draft_is_invalid() {
        let outcome = validate(&FormDraft::default(), years());
        assert!(!outcome.is_valid);
        assert_eq!(
            outcome.errors.get(Field::Title),
            Some("El título es obligatorio")
        );
        assert_eq!(
            outcome.errors.get(Field::Author),
            Some("El autor es obligatorio")
        );
        assert_eq!(outcome.errors.get(Field::Year), Some("El año es obligatorio"));
        assert_eq!(outcome.errors.get(Field::Description), None);
    }

    #[test]
    fn test_title_length_boundary() {
        let short = validate(&draft("a", "Kishimoto", "1999"), years());
        assert_eq!(short.errors.get(Field::Title), Some("Mínimo 2 caracteres"));
        assert!(!short.is_valid);

        let ok = validate(&draft("ab", "Kishimoto", "1999"), years());
        assert_eq!(ok.errors.get(Field::Title), None);
        assert!(ok.is_valid);
    }

    #[test]
    fn test_names_are_measured_after_trimming() {
        let outcome = validate(&draft("  a  ", " b ", "1999"), years());
        assert_eq!(outcome.errors.get(Field::Title), Some("Mínimo 2 caracteres"));
        assert_eq!(outcome.errors.get(Field::Author), Some("Mínimo 2 caracteres"));

        let blank = validate(&draft("   ", "Kishimoto", "1999"), years());
        assert_eq!(
            blank.errors.get(Field::Title),
            Some("El título es obligatorio")
        );
    }

    #[test]
    fn test_names_count_characters_not_bytes() {
        let outcome = validate(&draft("鬼", "Gotouge", "2016"), years());
        assert_eq!(outcome.errors.get(Field::Title), Some("Mínimo 2 caracteres"));

        let ok = validate(&draft("鬼滅", "Gotouge", "2016"), years());
        assert!(ok.is_valid);
    }

    #[test]
    fn test_year_boundaries() {
        let range = years();
        assert_eq!(
            validate_year("1399", range),
            Some(format!("Debe estar entre 1400 y {}", CURRENT + 1))
        );
        assert_eq!(validate_year("1400", range), None);
        assert_eq!(validate_year(&(CURRENT + 1).to_string(), range), None);
        assert!(validate_year(&(CURRENT + 2).to_string(), range).is_some());
    }

    #[test]
    fn test_year_must_be_numeric() {
        assert_eq!(
            validate_year("nineteen", years()),
            Some("Debe ser numérico".to_string())
        );
        assert_eq!(
            validate_year("19.5", years()),
            Some("Debe ser numérico".to_string())
        );
        assert_eq!(validate_year(" 1999 ", years()), None);
    }

    #[test]
    fn test_description_is_optional_but_not_tiny() {
        let mut d = draft("Naruto", "Kishimoto", "1999");

        d.description = "abcd".to_string();
        let short = validate(&d, years());
        assert!(!short.is_valid);
        assert_eq!(
            short.errors.get(Field::Description),
            Some("Si agregas descripción, usa al menos 5 caracteres")
        );

        d.description = "abcde".to_string();
        assert!(validate(&d, years()).is_valid);

        d.description = "   ".to_string();
        assert!(validate(&d, years()).is_valid);
    }

    #[test]
    fn test_year_range_from_clock_includes_next_year() {
        let range = YearRange::up_to_next_year(MIN_YEAR);
        let current = chrono::Local::now().year();
        assert!(range.contains(current + 1));
        assert!(!range.contains(current + 2));
        assert!(range.contains(MIN_YEAR));
        assert!(!range.contains(MIN_YEAR - 1));
    }

    #[test]
    fn test_field_errors_iterate_in_field_order() {
        let outcome = validate(&draft("", "", "x"), years());
        let fields: Vec<Field> = outcome.errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Title, Field::Author, Field::Year]);
        assert_eq!(outcome.errors.len(), 3);
    }
}
