//! Sources: the works quotes are taken from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of work a source represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Movie,
    Book,
    Series,
    Game,
    Other,
}

impl SourceType {
    pub const ALL_VARIANTS: &'static [SourceType] =
        &[Self::Movie, Self::Book, Self::Series, Self::Game, Self::Other];

    /// Stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Movie => "movie",
            Self::Book => "book",
            Self::Series => "series",
            Self::Game => "game",
            Self::Other => "other",
        }
    }

    /// Human readable label used in pages and listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match *self {
            Self::Movie => "Movie",
            Self::Book => "Book",
            Self::Series => "Series",
            Self::Game => "Game",
            Self::Other => "Other",
        }
    }
}

impl FromStr for SourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "book" => Ok(Self::Book),
            "series" => Ok(Self::Series),
            "game" => Ok(Self::Game),
            "other" => Ok(Self::Other),
            _ => Err(CoreError::InvalidSourceType(s.to_owned())),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A movie, book, series, game or other work that owns quotes.
///
/// `(title, source_type)` is unique; title comparison is case-sensitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub id: i64,
    pub title: String,
    pub source_type: SourceType,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_type.label(), self.title)
    }
}

/// A source together with the number of quotes attached to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceListing {
    #[serde(flatten)]
    pub source: Source,
    pub quote_count: u32,
}

impl SourceListing {
    /// Whether another quote may still be attached under `limit`.
    #[must_use]
    pub fn has_capacity(&self, limit: u32) -> bool {
        self.quote_count < limit
    }
}

/// Validated input for creating a source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewSource {
    pub title: String,
    pub source_type: SourceType,
    pub year: Option<i32>,
}
