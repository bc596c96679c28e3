//! Like/dislike actions.

use serde::{Deserialize, Serialize};

use crate::quote::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    Like,
    Dislike,
}

impl VoteAction {
    /// Parse the `action` form value. Anything other than `like` or `dislike`
    /// is not an action and leaves counters untouched.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(Self::Like),
            "dislike" => Some(Self::Dislike),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// Column incremented by this action.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match *self {
            Self::Like => "likes",
            Self::Dislike => "dislikes",
        }
    }
}

/// Counters returned to the client after a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub likes: i64,
    pub dislikes: i64,
    /// Like percentage (see [`crate::like_ratio`]), 0 without votes.
    pub popularity: i64,
}

impl From<&Quote> for VoteOutcome {
    fn from(quote: &Quote) -> Self {
        Self {
            likes: quote.likes,
            dislikes: quote.dislikes,
            popularity: popularity(quote.likes, quote.dislikes),
        }
    }
}

/// Popularity reported by the vote endpoint.
#[must_use]
pub fn popularity(likes: i64, dislikes: i64) -> i64 {
    crate::like_ratio(likes, dislikes).unwrap_or(0)
}
