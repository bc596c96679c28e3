//! QuoteStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;
use quotebook_core::{pick_weighted, NewQuote, VoteAction, WeightedCandidate};
use sqlx::{Postgres, Transaction};

use crate::traits::QuoteStore;

async fn fetch_quote_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
) -> Result<Quote, StorageError> {
    let row = sqlx::query(&format!("{QUOTE_SELECT} WHERE q.id = $1"))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| StorageError::not_found("quote", id))?;
    row_to_quote(&row)
}

#[async_trait]
impl QuoteStore for PgStorage {
    async fn create_quote(
        &self,
        input: &NewQuote,
        max_per_source: u32,
    ) -> Result<Quote, StorageError> {
        if input.text.trim().is_empty() {
            return Err(StorageError::InvalidInput("quote text must not be empty".to_owned()));
        }
        if input.weight < 0 {
            return Err(StorageError::InvalidInput(format!(
                "weight must not be negative (got {})",
                input.weight
            )));
        }

        let mut tx = self.pool.begin().await?;

        // Row lock on the source serializes concurrent inserts for it.
        let locked: Option<i64> = sqlx::query_scalar("SELECT id FROM sources WHERE id = $1 FOR UPDATE")
            .bind(input.source_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(StorageError::not_found("source", input.source_id));
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes WHERE source_id = $1")
            .bind(input.source_id)
            .fetch_one(&mut *tx)
            .await?;
        if count >= i64::from(max_per_source) {
            return Err(StorageError::CapacityExceeded {
                source_id: input.source_id,
                limit: max_per_source,
            });
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO quotes (text, text_normalized, source_id, weight)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.text)
        .bind(input.normalized_text())
        .bind(input.source_id)
        .bind(input.weight)
        .fetch_one(&mut *tx)
        .await?;

        let quote = fetch_quote_tx(&mut tx, id).await?;
        tx.commit().await?;
        tracing::debug!(id, source_id = input.source_id, "quote created");
        Ok(quote)
    }

    async fn get_quote(&self, id: i64) -> Result<Option<Quote>, StorageError> {
        let row = sqlx::query(&format!("{QUOTE_SELECT} WHERE q.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_quote).transpose()
    }

    async fn find_quote_by_normalized_text(
        &self,
        normalized: &str,
    ) -> Result<Option<Quote>, StorageError> {
        let row = sqlx::query(&format!("{QUOTE_SELECT} WHERE q.text_normalized = $1"))
            .bind(normalized)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_quote).transpose()
    }

    async fn list_quotes(&self) -> Result<Vec<Quote>, StorageError> {
        let rows = sqlx::query(&format!("{QUOTE_SELECT} ORDER BY q.id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_quote).collect()
    }

    async fn select_and_view(&self, draw: f64) -> Result<Option<Quote>, StorageError> {
        let mut tx = self.pool.begin().await?;
        let rows: Vec<(i64, i64)> = sqlx::query_as("SELECT id, weight FROM quotes ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;
        let candidates: Vec<WeightedCandidate> =
            rows.into_iter().map(|(id, weight)| WeightedCandidate::new(id, weight)).collect();

        let Some(id) = pick_weighted(&candidates, draw) else {
            tracing::debug!(candidates = candidates.len(), "no quote available for selection");
            return Ok(None);
        };

        let updated = sqlx::query("UPDATE quotes SET views = views + 1, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            // Deleted between the candidate read and the update.
            return Ok(None);
        }
        let quote = fetch_quote_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(quote))
    }

    async fn record_vote(&self, id: i64, action: VoteAction) -> Result<Quote, StorageError> {
        let column = action.column();
        let row = sqlx::query(&format!(
            "UPDATE quotes SET {column} = {column} + 1, updated_at = NOW()
             WHERE id = $1 RETURNING id"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        if row.is_none() {
            return Err(StorageError::not_found("quote", id));
        }
        self.get_quote(id).await?.ok_or_else(|| StorageError::not_found("quote", id))
    }

    async fn set_weight(&self, id: i64, weight: i64) -> Result<Quote, StorageError> {
        if weight < 0 {
            return Err(StorageError::InvalidInput(format!(
                "weight must not be negative (got {weight})"
            )));
        }
        let result = sqlx::query("UPDATE quotes SET weight = $1, updated_at = NOW() WHERE id = $2")
            .bind(weight)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("quote", id));
        }
        self.get_quote(id).await?.ok_or_else(|| StorageError::not_found("quote", id))
    }
}
