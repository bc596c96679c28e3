//! SourceStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;
use quotebook_core::NewSource;

use crate::traits::SourceStore;

impl PgStorage {
    async fn query_listings(&self, below: Option<u32>) -> Result<Vec<SourceListing>, StorageError> {
        let having = if below.is_some() { "HAVING COUNT(q.id) < $1" } else { "" };
        let sql = format!(
            "SELECT {SOURCE_COLUMNS}, COUNT(q.id) AS quote_count
             FROM sources s LEFT JOIN quotes q ON q.source_id = s.id
             GROUP BY s.id
             {having}
             ORDER BY s.title, s.id"
        );
        let mut query = sqlx::query(&sql);
        if let Some(limit) = below {
            query = query.bind(i64::from(limit));
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_listing).collect()
    }
}

#[async_trait]
impl SourceStore for PgStorage {
    async fn create_source(&self, input: &NewSource) -> Result<Source, StorageError> {
        let row = sqlx::query(
            "INSERT INTO sources (title, source_type, year)
             VALUES ($1, $2, $3)
             RETURNING id, title, source_type, year, created_at",
        )
        .bind(&input.title)
        .bind(input.source_type.as_str())
        .bind(input.year)
        .fetch_one(&self.pool)
        .await?;
        let source = row_to_source(&row)?;
        tracing::debug!(id = source.id, title = %source.title, "source created");
        Ok(source)
    }

    async fn get_source(&self, id: i64) -> Result<Option<Source>, StorageError> {
        let row = sqlx::query(&format!("SELECT {SOURCE_COLUMNS} FROM sources s WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_source).transpose()
    }

    async fn get_source_listing(&self, id: i64) -> Result<Option<SourceListing>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {SOURCE_COLUMNS}, COUNT(q.id) AS quote_count
             FROM sources s LEFT JOIN quotes q ON q.source_id = s.id
             WHERE s.id = $1
             GROUP BY s.id"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_listing).transpose()
    }

    async fn list_sources(&self) -> Result<Vec<SourceListing>, StorageError> {
        self.query_listings(None).await
    }

    async fn list_sources_with_capacity(
        &self,
        limit: u32,
    ) -> Result<Vec<SourceListing>, StorageError> {
        self.query_listings(Some(limit)).await
    }

    async fn delete_source(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(id, "source deleted with its quotes");
        }
        Ok(deleted)
    }
}
