//! Raw form submissions and their field-level validation.
//!
//! Forms hold exactly what the client sent (as strings) so a rejected
//! submission can be re-rendered with the submitted values. `clean()` performs
//! the checks that need no database; uniqueness and capacity are checked by
//! the service layer and reported through the same [`FieldErrors`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_QUOTE_WEIGHT, SOURCE_TITLE_MAX_CHARS};
use crate::quote::NewQuote;
use crate::source::{NewSource, SourceType};

/// Key for errors that belong to the form as a whole.
pub const NON_FIELD_ERRORS: &str = "__all__";

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NOT_INTEGER: &str = "Enter a whole number.";
pub const MSG_INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a set holding one message.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn non_field(&self) -> &[String] {
        self.get(NON_FIELD_ERRORS)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn merge(&mut self, other: Self) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(value)` when no error has been recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

fn parse_integer(raw: &str) -> Result<Option<i64>, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some).map_err(|_| MSG_NOT_INTEGER)
}

/// Submitted quote form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub weight: String,
}

impl QuoteForm {
    /// Blank form with the default weight filled in.
    #[must_use]
    pub fn initial() -> Self {
        Self { weight: DEFAULT_QUOTE_WEIGHT.to_string(), ..Self::default() }
    }

    pub fn clean(&self) -> Result<NewQuote, FieldErrors> {
        let mut errors = FieldErrors::new();

        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", MSG_REQUIRED);
        }

        let source_id = match parse_integer(&self.source) {
            Ok(Some(id)) => id,
            Ok(None) => {
                errors.add("source", MSG_REQUIRED);
                0
            },
            Err(_) => {
                errors.add("source", MSG_INVALID_CHOICE);
                0
            },
        };

        let weight = match parse_integer(&self.weight) {
            Ok(Some(w)) if w >= 1 => w,
            Ok(Some(_)) => {
                errors.add("weight", "Ensure this value is greater than or equal to 1.");
                DEFAULT_QUOTE_WEIGHT
            },
            Ok(None) => DEFAULT_QUOTE_WEIGHT,
            Err(msg) => {
                errors.add("weight", msg);
                DEFAULT_QUOTE_WEIGHT
            },
        };

        errors.into_result(NewQuote { text: text.to_owned(), source_id, weight })
    }
}

/// Submitted source form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source_type: String,
    #[serde(default)]
    pub year: String,
}

impl SourceForm {
    pub fn clean(&self) -> Result<NewSource, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        let title_len = title.chars().count();
        if title.is_empty() {
            errors.add("title", MSG_REQUIRED);
        } else if title_len > SOURCE_TITLE_MAX_CHARS {
            errors.add(
                "title",
                format!(
                    "Ensure this value has at most {SOURCE_TITLE_MAX_CHARS} characters (it has {title_len})."
                ),
            );
        }

        let source_type = if self.source_type.trim().is_empty() {
            errors.add("source_type", MSG_REQUIRED);
            None
        } else {
            match self.source_type.parse::<SourceType>() {
                Ok(t) => Some(t),
                Err(_) => {
                    errors.add(
                        "source_type",
                        format!(
                            "Select a valid choice. {} is not one of the available choices.",
                            self.source_type.trim()
                        ),
                    );
                    None
                },
            }
        };

        let year = match parse_integer(&self.year) {
            Ok(None) => None,
            Ok(Some(y)) => match i32::try_from(y) {
                Ok(y) => Some(y),
                Err(_) => {
                    errors.add("year", MSG_NOT_INTEGER);
                    None
                },
            },
            Err(msg) => {
                errors.add("year", msg);
                None
            },
        };

        match source_type {
            Some(source_type) if errors.is_empty() => {
                Ok(NewSource { title: title.to_owned(), source_type, year })
            },
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_form(text: &str, source: &str, weight: &str) -> QuoteForm {
        QuoteForm { text: text.to_owned(), source: source.to_owned(), weight: weight.to_owned() }
    }

    #[test]
    fn quote_form_cleans_valid_input() {
        let cleaned = quote_form("  Hello there  ", "4", "3").clean().unwrap();
        assert_eq!(cleaned, NewQuote { text: "Hello there".to_owned(), source_id: 4, weight: 3 });
    }

    #[test]
    fn quote_form_defaults_blank_weight() {
        let cleaned = quote_form("Hi", "1", " ").clean().unwrap();
        assert_eq!(cleaned.weight, DEFAULT_QUOTE_WEIGHT);
    }

    #[test]
    fn quote_form_reports_every_field() {
        let errors = quote_form("   ", "", "-2").clean().unwrap_err();
        assert_eq!(errors.get("text"), [MSG_REQUIRED]);
        assert_eq!(errors.get("source"), [MSG_REQUIRED]);
        assert_eq!(errors.get("weight"), ["Ensure this value is greater than or equal to 1."]);
    }

    #[test]
    fn quote_form_rejects_non_numeric_values() {
        let errors = quote_form("Hi", "abc", "heavy").clean().unwrap_err();
        assert_eq!(errors.get("source"), [MSG_INVALID_CHOICE]);
        assert_eq!(errors.get("weight"), [MSG_NOT_INTEGER]);
        assert!(!errors.has("text"));
    }

    #[test]
    fn quote_form_rejects_zero_weight() {
        let errors = quote_form("Hi", "1", "0").clean().unwrap_err();
        assert!(errors.has("weight"));
    }

    #[test]
    fn source_form_cleans_valid_input() {
        let form = SourceForm {
            title: " Matrix ".to_owned(),
            source_type: "movie".to_owned(),
            year: "1999".to_owned(),
        };
        assert_eq!(
            form.clean().unwrap(),
            NewSource { title: "Matrix".to_owned(), source_type: SourceType::Movie, year: Some(1999) }
        );
    }

    #[test]
    fn source_form_year_is_optional() {
        let form = SourceForm {
            title: "Dune".to_owned(),
            source_type: "book".to_owned(),
            year: String::new(),
        };
        assert_eq!(form.clean().unwrap().year, None);
    }

    #[test]
    fn source_form_reports_missing_and_invalid_fields() {
        let form = SourceForm {
            title: String::new(),
            source_type: "podcast".to_owned(),
            year: "nineteen".to_owned(),
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(errors.get("title"), [MSG_REQUIRED]);
        assert_eq!(
            errors.get("source_type"),
            ["Select a valid choice. podcast is not one of the available choices."]
        );
        assert_eq!(errors.get("year"), [MSG_NOT_INTEGER]);
    }

    #[test]
    fn source_form_limits_title_length() {
        let form = SourceForm {
            title: "x".repeat(201),
            source_type: "game".to_owned(),
            year: String::new(),
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(
            errors.get("title"),
            ["Ensure this value has at most 200 characters (it has 201)."]
        );
    }

    #[test]
    fn field_errors_merge_and_display() {
        let mut errors = FieldErrors::single("text", "first");
        errors.merge(FieldErrors::single(NON_FIELD_ERRORS, "whole form"));
        errors.add("text", "second");
        assert_eq!(errors.get("text"), ["first", "second"]);
        assert_eq!(errors.non_field(), ["whole form"]);
        assert_eq!(errors.to_string(), "__all__: whole form; text: first; text: second");
    }
}
