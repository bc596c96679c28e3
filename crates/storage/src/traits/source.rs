use async_trait::async_trait;
use quotebook_core::{NewSource, Source, SourceListing};

use crate::error::StorageError;

/// Source registry operations.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Insert a source. A `(title, source_type)` collision returns `Duplicate`.
    async fn create_source(&self, input: &NewSource) -> Result<Source, StorageError>;

    async fn get_source(&self, id: i64) -> Result<Option<Source>, StorageError>;

    /// One source with its quote count.
    async fn get_source_listing(&self, id: i64) -> Result<Option<SourceListing>, StorageError>;

    /// All sources ordered by title, with their quote counts.
    async fn list_sources(&self) -> Result<Vec<SourceListing>, StorageError>;

    /// Sources owning fewer than `limit` quotes, ordered by title.
    async fn list_sources_with_capacity(
        &self,
        limit: u32,
    ) -> Result<Vec<SourceListing>, StorageError>;

    /// Delete a source and, through the foreign key, its quotes.
    /// Returns `true` if a row was deleted.
    async fn delete_source(&self, id: i64) -> Result<bool, StorageError>;
}
