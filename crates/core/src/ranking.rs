//! Popularity rankings derived from vote and view counters.
//!
//! All rankings are read-only projections. Sorting is stable, so quotes with
//! equal scores keep insertion order (ascending id).

use serde::{Deserialize, Serialize};

use crate::quote::Quote;

/// Integer like percentage: `likes * 100 / (likes + dislikes)`, truncated.
///
/// `None` when the quote has no votes at all.
#[must_use]
pub fn like_ratio(likes: i64, dislikes: i64) -> Option<i64> {
    let total = likes.saturating_add(dislikes);
    if total <= 0 {
        return None;
    }
    Some(likes.saturating_mul(100) / total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMetric {
    Likes,
    Ratio,
    Views,
}

impl RankingMetric {
    /// Score of `quote` under this metric, `None` if the quote is excluded.
    #[must_use]
    pub fn score(&self, quote: &Quote) -> Option<i64> {
        match *self {
            Self::Likes => Some(quote.likes),
            Self::Ratio => quote.ratio(),
            Self::Views => Some(quote.views),
        }
    }
}

/// Top `limit` quotes under `metric`, highest first.
///
/// `quotes` must be in insertion order for ties to resolve correctly.
#[must_use]
pub fn rank<'a>(quotes: &'a [Quote], metric: RankingMetric, limit: usize) -> Vec<&'a Quote> {
    let mut scored: Vec<(i64, &Quote)> =
        quotes.iter().filter_map(|q| metric.score(q).map(|s| (s, q))).collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, q)| q).collect()
}

/// The three rankings shown on the popular page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopularQuotes {
    pub by_likes: Vec<Quote>,
    pub by_ratio: Vec<Quote>,
    pub by_views: Vec<Quote>,
}

impl PopularQuotes {
    #[must_use]
    pub fn from_quotes(quotes: &[Quote], limit: usize) -> Self {
        let collect =
            |metric| rank(quotes, metric, limit).into_iter().cloned().collect::<Vec<_>>();
        Self {
            by_likes: collect(RankingMetric::Likes),
            by_ratio: collect(RankingMetric::Ratio),
            by_views: collect(RankingMetric::Views),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{QuoteSource, SourceType};

    fn quote(id: i64, likes: i64, dislikes: i64, views: i64) -> Quote {
        let now = Utc::now();
        Quote {
            id,
            text: format!("quote {id}"),
            source: QuoteSource {
                id: 1,
                title: "Source".to_owned(),
                source_type: SourceType::Book,
            },
            weight: 1,
            likes,
            dislikes,
            views,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(ranked: &[&Quote]) -> Vec<i64> {
        ranked.iter().map(|q| q.id).collect()
    }

    #[test]
    fn ratio_truncates() {
        assert_eq!(like_ratio(3, 1), Some(75));
        assert_eq!(like_ratio(2, 1), Some(66));
        assert_eq!(like_ratio(0, 4), Some(0));
        assert_eq!(like_ratio(0, 0), None);
    }

    #[test]
    fn likes_ranking_is_stable_on_ties() {
        let quotes = vec![quote(1, 2, 0, 0), quote(2, 5, 0, 0), quote(3, 2, 9, 0), quote(4, 5, 1, 0)];
        assert_eq!(ids(&rank(&quotes, RankingMetric::Likes, 10)), vec![2, 4, 1, 3]);
    }

    #[test]
    fn ratio_ranking_excludes_unvoted_quotes() {
        let quotes = vec![quote(1, 0, 0, 50), quote(2, 3, 1, 0), quote(3, 2, 0, 0), quote(4, 0, 2, 0)];
        let ranked = rank(&quotes, RankingMetric::Ratio, 10);
        assert_eq!(ids(&ranked), vec![3, 2, 4]);
    }

    #[test]
    fn views_ranking_respects_limit() {
        let quotes: Vec<Quote> = (1..=15).map(|i| quote(i, 0, 0, i % 4)).collect();
        let ranked = rank(&quotes, RankingMetric::Views, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ids(&ranked)[..4], [3, 7, 11, 15]);
    }

    #[test]
    fn popular_quotes_builds_all_three_views() {
        let quotes = vec![quote(1, 1, 0, 3), quote(2, 0, 0, 8)];
        let popular = PopularQuotes::from_quotes(&quotes, 10);
        assert_eq!(popular.by_likes.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(popular.by_ratio.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(popular.by_views.iter().map(|q| q.id).collect::<Vec<_>>(), vec![2, 1]);
    }
}
