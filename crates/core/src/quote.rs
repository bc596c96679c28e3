//! Quotes and the text normalization rule used for duplicate detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::QUOTE_PREVIEW_CHARS;
use crate::ranking::like_ratio;
use crate::source::SourceType;

/// Normalized form of quote text: surrounding whitespace trimmed, lowercased.
///
/// Two quotes whose normalized texts are equal are duplicates. Storage keeps
/// this value in an indexed unique column.
#[must_use]
pub fn normalize_quote_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether two quote texts collide under [`normalize_quote_text`].
#[must_use]
pub fn is_duplicate_text(a: &str, b: &str) -> bool {
    normalize_quote_text(a) == normalize_quote_text(b)
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
#[must_use]
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_owned(),
    }
}

/// Source fields carried along with every quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteSource {
    pub id: i64,
    pub title: String,
    pub source_type: SourceType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub id: i64,
    pub text: String,
    pub source: QuoteSource,
    /// Relative selection weight; 0 means never selected.
    pub weight: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    #[must_use]
    pub fn normalized_text(&self) -> String {
        normalize_quote_text(&self.text)
    }

    /// Short form of the text for listings.
    #[must_use]
    pub fn preview(&self) -> String {
        truncate_preview(&self.text, QUOTE_PREVIEW_CHARS)
    }

    #[must_use]
    pub fn total_votes(&self) -> i64 {
        self.likes.saturating_add(self.dislikes)
    }

    /// Integer like percentage, `None` when nobody voted.
    #[must_use]
    pub fn ratio(&self) -> Option<i64> {
        like_ratio(self.likes, self.dislikes)
    }
}

/// Validated input for creating a quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewQuote {
    pub text: String,
    pub source_id: i64,
    pub weight: i64,
}

impl NewQuote {
    #[must_use]
    pub fn normalized_text(&self) -> String {
        normalize_quote_text(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalize_quote_text("  Hello World \n"), "hello world");
        assert_eq!(normalize_quote_text("\tÉCOLE"), "école");
    }

    #[test]
    fn duplicates_ignore_case_and_outer_whitespace() {
        assert!(is_duplicate_text(" Hello ", "hello"));
        assert!(is_duplicate_text("I'll be back", "I'LL BE BACK  "));
        assert!(!is_duplicate_text("hello world", "hello  world"));
        assert!(!is_duplicate_text("hello", "hello!"));
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        let text = "ж".repeat(60);
        let preview = truncate_preview(&text, 50);
        assert_eq!(preview.chars().count(), 53);
        assert!(preview.ends_with("..."));
        assert_eq!(truncate_preview("short", 50), "short");
        assert_eq!(truncate_preview(&"a".repeat(50), 50), "a".repeat(50));
    }
}
