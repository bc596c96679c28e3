//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use quotebook_core::{NewQuote, NewSource, Quote, Source, SourceListing, VoteAction};

use crate::error::StorageError;
use crate::traits::{QuoteStore, SourceStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::new(db_path)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    /// Short backend name for logs and the version endpoint.
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── SourceStore ──────────────────────────────────────────────────

#[async_trait]
impl SourceStore for StorageBackend {
    async fn create_source(&self, input: &NewSource) -> Result<Source, StorageError> {
        dispatch!(self, SourceStore, create_source(input))
    }

    async fn get_source(&self, id: i64) -> Result<Option<Source>, StorageError> {
        dispatch!(self, SourceStore, get_source(id))
    }

    async fn get_source_listing(&self, id: i64) -> Result<Option<SourceListing>, StorageError> {
        dispatch!(self, SourceStore, get_source_listing(id))
    }

    async fn list_sources(&self) -> Result<Vec<SourceListing>, StorageError> {
        dispatch!(self, SourceStore, list_sources())
    }

    async fn list_sources_with_capacity(
        &self,
        limit: u32,
    ) -> Result<Vec<SourceListing>, StorageError> {
        dispatch!(self, SourceStore, list_sources_with_capacity(limit))
    }

    async fn delete_source(&self, id: i64) -> Result<bool, StorageError> {
        dispatch!(self, SourceStore, delete_source(id))
    }
}

// ── QuoteStore ───────────────────────────────────────────────────

#[async_trait]
impl QuoteStore for StorageBackend {
    async fn create_quote(
        &self,
        input: &NewQuote,
        max_per_source: u32,
    ) -> Result<Quote, StorageError> {
        dispatch!(self, QuoteStore, create_quote(input, max_per_source))
    }

    async fn get_quote(&self, id: i64) -> Result<Option<Quote>, StorageError> {
        dispatch!(self, QuoteStore, get_quote(id))
    }

    async fn find_quote_by_normalized_text(
        &self,
        normalized: &str,
    ) -> Result<Option<Quote>, StorageError> {
        dispatch!(self, QuoteStore, find_quote_by_normalized_text(normalized))
    }

    async fn list_quotes(&self) -> Result<Vec<Quote>, StorageError> {
        dispatch!(self, QuoteStore, list_quotes())
    }

    async fn select_and_view(&self, draw: f64) -> Result<Option<Quote>, StorageError> {
        dispatch!(self, QuoteStore, select_and_view(draw))
    }

    async fn record_vote(&self, id: i64, action: VoteAction) -> Result<Quote, StorageError> {
        dispatch!(self, QuoteStore, record_vote(id, action))
    }

    async fn set_weight(&self, id: i64, weight: i64) -> Result<Quote, StorageError> {
        dispatch!(self, QuoteStore, set_weight(id, weight))
    }
}
