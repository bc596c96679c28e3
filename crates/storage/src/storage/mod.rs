//! `SQLite` storage implementation.
//!
//! All methods are synchronous; `sqlite_async` exposes them through the async
//! store traits via `spawn_blocking`.

// SQLite uses i64 for counts, the domain uses u32 - conversions are bounded by row counts
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust u32 conversions are safe within DB row counts"
)]

mod quotes;
mod sources;

use std::path::Path;

use chrono::{DateTime, Utc};
use quotebook_core::{
    env_parse_with_default, Quote, QuoteSource, Source, SourceListing, SourceType,
    DEFAULT_SQLITE_POOL_SIZE,
};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Type;
use rusqlite::Connection;

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    pool.get().map_err(|e| StorageError::Pool(format!("failed to get connection from pool: {e}")))
}

pub(crate) fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Parse an RFC 3339 timestamp column.
pub(crate) fn get_timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

pub(crate) fn get_source_type(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<SourceType> {
    let raw: String = row.get(idx)?;
    raw.parse::<SourceType>().map_err(|e| conversion_error(idx, e))
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) const SOURCE_COLUMNS: &str = "s.id, s.title, s.source_type, s.year, s.created_at";

pub(crate) const QUOTE_SELECT: &str =
    "SELECT q.id, q.text, q.source_id, s.title, s.source_type, q.weight,
            q.likes, q.dislikes, q.views, q.created_at, q.updated_at
     FROM quotes q JOIN sources s ON s.id = q.source_id";

/// Map a row selected with [`SOURCE_COLUMNS`].
pub(crate) fn map_source(row: &rusqlite::Row<'_>) -> rusqlite::Result<Source> {
    Ok(Source {
        id: row.get(0)?,
        title: row.get(1)?,
        source_type: get_source_type(row, 2)?,
        year: row.get(3)?,
        created_at: get_timestamp(row, 4)?,
    })
}

/// Map a row selected with [`SOURCE_COLUMNS`] followed by a count column.
pub(crate) fn map_source_listing(row: &rusqlite::Row<'_>) -> rusqlite::Result<SourceListing> {
    let count: i64 = row.get(5)?;
    Ok(SourceListing { source: map_source(row)?, quote_count: u32::try_from(count).unwrap_or(0) })
}

/// Map a row selected with [`QUOTE_SELECT`].
pub(crate) fn map_quote(row: &rusqlite::Row<'_>) -> rusqlite::Result<Quote> {
    Ok(Quote {
        id: row.get(0)?,
        text: row.get(1)?,
        source: QuoteSource {
            id: row.get(2)?,
            title: row.get(3)?,
            source_type: get_source_type(row, 4)?,
        },
        weight: row.get(5)?,
        likes: row.get(6)?,
        dislikes: row.get(7)?,
        views: row.get(8)?,
        created_at: get_timestamp(row, 9)?,
        updated_at: get_timestamp(row, 10)?,
    })
}

/// Per-connection settings: foreign keys are off by default in SQLite and are
/// required for the source → quotes cascade.
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;",
    )?;
    Ok(())
}

fn db_pool_size() -> u32 {
    env_parse_with_default("QUOTEBOOK_DB_POOL_SIZE", DEFAULT_SQLITE_POOL_SIZE).max(1)
}

impl Storage {
    /// Create new storage instance with `SQLite` connection pool
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = db_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        let conn = get_conn(&pool)?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(pool_size = pool_size, path = %db_path.display(), "Storage initialized with connection pool");

        Ok(Self { pool })
    }
}
