use quotebook_core::{pick_weighted, NewQuote, Quote, VoteAction, WeightedCandidate};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::{get_conn, map_quote, now_rfc3339, Storage, QUOTE_SELECT};
use crate::error::StorageError;

fn fetch_quote(conn: &Connection, id: i64) -> Result<Option<Quote>, StorageError> {
    let quote = conn
        .query_row(&format!("{QUOTE_SELECT} WHERE q.id = ?1"), params![id], map_quote)
        .optional()?;
    Ok(quote)
}

fn require_quote(conn: &Connection, id: i64) -> Result<Quote, StorageError> {
    fetch_quote(conn, id)?.ok_or_else(|| StorageError::not_found("quote", id))
}

impl Storage {
    /// Insert a quote under the per-source cap.
    ///
    /// `BEGIN IMMEDIATE` takes the database write lock before the count, so
    /// no other writer can insert between the check and the insert.
    ///
    /// # Errors
    /// `NotFound`, `CapacityExceeded` or `Duplicate`, see
    /// [`crate::traits::QuoteStore::create_quote`].
    pub fn create_quote(&self, input: &NewQuote, max_per_source: u32) -> Result<Quote, StorageError> {
        if input.text.trim().is_empty() {
            return Err(StorageError::InvalidInput("quote text must not be empty".to_owned()));
        }
        if input.weight < 0 {
            return Err(StorageError::InvalidInput(format!(
                "weight must not be negative (got {})",
                input.weight
            )));
        }

        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let source_exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM sources WHERE id = ?1)",
            params![input.source_id],
            |row| row.get(0),
        )?;
        if !source_exists {
            return Err(StorageError::not_found("source", input.source_id));
        }

        let count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM quotes WHERE source_id = ?1",
            params![input.source_id],
            |row| row.get(0),
        )?;
        if count >= i64::from(max_per_source) {
            return Err(StorageError::CapacityExceeded {
                source_id: input.source_id,
                limit: max_per_source,
            });
        }

        let now = now_rfc3339();
        tx.execute(
            "INSERT INTO quotes
                (text, text_normalized, source_id, weight, likes, dislikes, views, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 0, 0, 0, ?5, ?5)",
            params![input.text, input.normalized_text(), input.source_id, input.weight, now],
        )?;
        let id = tx.last_insert_rowid();
        let quote = require_quote(&tx, id)?;
        tx.commit()?;

        tracing::debug!(id, source_id = input.source_id, "quote created");
        Ok(quote)
    }

    pub fn get_quote(&self, id: i64) -> Result<Option<Quote>, StorageError> {
        let conn = get_conn(&self.pool)?;
        fetch_quote(&conn, id)
    }

    pub fn find_quote_by_normalized_text(&self, normalized: &str) -> Result<Option<Quote>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let quote = conn
            .query_row(
                &format!("{QUOTE_SELECT} WHERE q.text_normalized = ?1"),
                params![normalized],
                map_quote,
            )
            .optional()?;
        Ok(quote)
    }

    pub fn list_quotes(&self) -> Result<Vec<Quote>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!("{QUOTE_SELECT} ORDER BY q.id"))?;
        let rows = stmt.query_map([], map_quote)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Weighted pick plus view increment in one immediate transaction.
    pub fn select_and_view(&self, draw: f64) -> Result<Option<Quote>, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let candidates = {
            let mut stmt = tx.prepare("SELECT id, weight FROM quotes ORDER BY id")?;
            let rows =
                stmt.query_map([], |row| Ok(WeightedCandidate::new(row.get(0)?, row.get(1)?)))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let Some(id) = pick_weighted(&candidates, draw) else {
            tracing::debug!(candidates = candidates.len(), "no quote available for selection");
            return Ok(None);
        };

        tx.execute(
            "UPDATE quotes SET views = views + 1, updated_at = ?1 WHERE id = ?2",
            params![now_rfc3339(), id],
        )?;
        let quote = require_quote(&tx, id)?;
        tx.commit()?;
        Ok(Some(quote))
    }

    pub fn record_vote(&self, id: i64, action: VoteAction) -> Result<Quote, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let column = action.column();
        let updated = tx.execute(
            &format!("UPDATE quotes SET {column} = {column} + 1, updated_at = ?1 WHERE id = ?2"),
            params![now_rfc3339(), id],
        )?;
        if updated == 0 {
            return Err(StorageError::not_found("quote", id));
        }
        let quote = require_quote(&tx, id)?;
        tx.commit()?;
        Ok(quote)
    }

    pub fn set_weight(&self, id: i64, weight: i64) -> Result<Quote, StorageError> {
        if weight < 0 {
            return Err(StorageError::InvalidInput(format!(
                "weight must not be negative (got {weight})"
            )));
        }
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let updated = tx.execute(
            "UPDATE quotes SET weight = ?1, updated_at = ?2 WHERE id = ?3",
            params![weight, now_rfc3339(), id],
        )?;
        if updated == 0 {
            return Err(StorageError::not_found("quote", id));
        }
        let quote = require_quote(&tx, id)?;
        tx.commit()?;
        Ok(quote)
    }
}
