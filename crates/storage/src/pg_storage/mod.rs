//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod quotes;
mod sources;

use chrono::{DateTime, Utc};
use quotebook_core::{
    Quote, QuoteSource, Source, SourceListing, SourceType, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Parse `SourceType` from a PostgreSQL text column.
pub(crate) fn parse_pg_source_type(s: &str) -> Result<SourceType, StorageError> {
    s.parse::<SourceType>().map_err(|e| StorageError::DataCorruption {
        context: format!("source_type column holds {s:?}"),
        source: Box::new(e),
    })
}

pub(crate) fn row_to_source(row: &sqlx::postgres::PgRow) -> Result<Source, StorageError> {
    let source_type = parse_pg_source_type(&row.try_get::<String, _>("source_type")?)?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(Source {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        source_type,
        year: row.try_get("year")?,
        created_at,
    })
}

pub(crate) fn row_to_listing(row: &sqlx::postgres::PgRow) -> Result<SourceListing, StorageError> {
    let count: i64 = row.try_get("quote_count")?;
    Ok(SourceListing { source: row_to_source(row)?, quote_count: u32::try_from(count).unwrap_or(0) })
}

pub(crate) fn row_to_quote(row: &sqlx::postgres::PgRow) -> Result<Quote, StorageError> {
    let source_type = parse_pg_source_type(&row.try_get::<String, _>("source_type")?)?;
    Ok(Quote {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
        source: QuoteSource {
            id: row.try_get("source_id")?,
            title: row.try_get("source_title")?,
            source_type,
        },
        weight: row.try_get("weight")?,
        likes: row.try_get("likes")?,
        dislikes: row.try_get("dislikes")?,
        views: row.try_get("views")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) const SOURCE_COLUMNS: &str = "s.id, s.title, s.source_type, s.year, s.created_at";

pub(crate) const QUOTE_SELECT: &str =
    "SELECT q.id, q.text, q.source_id, s.title AS source_title, s.source_type, q.weight,
            q.likes, q.dislikes, q.views, q.created_at, q.updated_at
     FROM quotes q JOIN sources s ON s.id = q.source_id";
