use async_trait::async_trait;
use quotebook_core::{NewQuote, Quote, VoteAction};

use crate::error::StorageError;

/// Quote store operations.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Insert a quote.
    ///
    /// Counting the source's quotes and inserting happen in one transaction
    /// that excludes concurrent writers for that source. Fails with
    /// `NotFound` (unknown source), `CapacityExceeded` (source already owns
    /// `max_per_source` quotes) or `Duplicate` (normalized text collision).
    async fn create_quote(
        &self,
        input: &NewQuote,
        max_per_source: u32,
    ) -> Result<Quote, StorageError>;

    async fn get_quote(&self, id: i64) -> Result<Option<Quote>, StorageError>;

    /// Indexed lookup by [`quotebook_core::normalize_quote_text`] output.
    async fn find_quote_by_normalized_text(
        &self,
        normalized: &str,
    ) -> Result<Option<Quote>, StorageError>;

    /// All quotes in insertion order.
    async fn list_quotes(&self) -> Result<Vec<Quote>, StorageError>;

    /// Pick a quote by weight for the uniform `draw` in `[0, 1)` and increment
    /// its view counter in the same transaction. Returns the updated quote,
    /// or `None` when no quote can be selected.
    async fn select_and_view(&self, draw: f64) -> Result<Option<Quote>, StorageError>;

    /// Atomically increment the counter for `action`. Unknown id → `NotFound`.
    async fn record_vote(&self, id: i64, action: VoteAction) -> Result<Quote, StorageError>;

    /// Replace the selection weight. Negative weights → `InvalidInput`.
    async fn set_weight(&self, id: i64, weight: i64) -> Result<Quote, StorageError>;
}
