//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use quotebook_core::{NewQuote, NewSource, Quote, Source, SourceListing, VoteAction};

use crate::error::StorageError;
use crate::traits::{QuoteStore, SourceStore};
use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── SourceStore ──────────────────────────────────────────────────

#[async_trait]
impl SourceStore for Storage {
    async fn create_source(&self, input: &NewSource) -> Result<Source, StorageError> {
        delegate!(self, create_source, @ref input)
    }

    async fn get_source(&self, id: i64) -> Result<Option<Source>, StorageError> {
        delegate!(self, get_source, @val id)
    }

    async fn get_source_listing(&self, id: i64) -> Result<Option<SourceListing>, StorageError> {
        delegate!(self, get_source_listing, @val id)
    }

    async fn list_sources(&self) -> Result<Vec<SourceListing>, StorageError> {
        delegate!(self, list_sources)
    }

    async fn list_sources_with_capacity(
        &self,
        limit: u32,
    ) -> Result<Vec<SourceListing>, StorageError> {
        delegate!(self, list_sources_with_capacity, @val limit)
    }

    async fn delete_source(&self, id: i64) -> Result<bool, StorageError> {
        delegate!(self, delete_source, @val id)
    }
}

// ── QuoteStore ───────────────────────────────────────────────────

#[async_trait]
impl QuoteStore for Storage {
    async fn create_quote(
        &self,
        input: &NewQuote,
        max_per_source: u32,
    ) -> Result<Quote, StorageError> {
        delegate!(self, create_quote, @ref input, @val max_per_source)
    }

    async fn get_quote(&self, id: i64) -> Result<Option<Quote>, StorageError> {
        delegate!(self, get_quote, @val id)
    }

    async fn find_quote_by_normalized_text(
        &self,
        normalized: &str,
    ) -> Result<Option<Quote>, StorageError> {
        delegate!(self, find_quote_by_normalized_text, @str normalized)
    }

    async fn list_quotes(&self) -> Result<Vec<Quote>, StorageError> {
        delegate!(self, list_quotes)
    }

    async fn select_and_view(&self, draw: f64) -> Result<Option<Quote>, StorageError> {
        delegate!(self, select_and_view, @val draw)
    }

    async fn record_vote(&self, id: i64, action: VoteAction) -> Result<Quote, StorageError> {
        delegate!(self, record_vote, @val id, @val action)
    }

    async fn set_weight(&self, id: i64, weight: i64) -> Result<Quote, StorageError> {
        delegate!(self, set_weight, @val id, @val weight)
    }
}
