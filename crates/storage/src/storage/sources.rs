use quotebook_core::{NewSource, Source, SourceListing};
use rusqlite::{params, Connection, OptionalExtension};

use super::{get_conn, map_source, map_source_listing, now_rfc3339, Storage, SOURCE_COLUMNS};
use crate::error::StorageError;

impl Storage {
    /// Insert a source.
    ///
    /// # Errors
    /// `Duplicate` when the `(title, source_type)` pair already exists.
    pub fn create_source(&self, input: &NewSource) -> Result<Source, StorageError> {
        let conn = get_conn(&self.pool)?;
        let created_at = now_rfc3339();
        conn.execute(
            "INSERT INTO sources (title, source_type, year, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![input.title, input.source_type.as_str(), input.year, created_at],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, title = %input.title, source_type = %input.source_type, "source created");
        fetch_source(&conn, id)?.ok_or_else(|| StorageError::not_found("source", id))
    }

    pub fn get_source(&self, id: i64) -> Result<Option<Source>, StorageError> {
        let conn = get_conn(&self.pool)?;
        fetch_source(&conn, id)
    }

    pub fn get_source_listing(&self, id: i64) -> Result<Option<SourceListing>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let listing = conn
            .query_row(
                &format!(
                    "SELECT {SOURCE_COLUMNS}, COUNT(q.id)
                     FROM sources s LEFT JOIN quotes q ON q.source_id = s.id
                     WHERE s.id = ?1
                     GROUP BY s.id"
                ),
                params![id],
                map_source_listing,
            )
            .optional()?;
        Ok(listing)
    }

    pub fn list_sources(&self) -> Result<Vec<SourceListing>, StorageError> {
        self.query_listings(None)
    }

    pub fn list_sources_with_capacity(&self, limit: u32) -> Result<Vec<SourceListing>, StorageError> {
        self.query_listings(Some(limit))
    }

    fn query_listings(&self, below: Option<u32>) -> Result<Vec<SourceListing>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let having = if below.is_some() { "HAVING COUNT(q.id) < ?1" } else { "" };
        let sql = format!(
            "SELECT {SOURCE_COLUMNS}, COUNT(q.id)
             FROM sources s LEFT JOIN quotes q ON q.source_id = s.id
             GROUP BY s.id
             {having}
             ORDER BY s.title, s.id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = match below {
            Some(limit) => stmt.query_map(params![limit], map_source_listing)?,
            None => stmt.query_map([], map_source_listing)?,
        };
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn delete_source(&self, id: i64) -> Result<bool, StorageError> {
        let conn = get_conn(&self.pool)?;
        let deleted = conn.execute("DELETE FROM sources WHERE id = ?1", params![id])?;
        if deleted > 0 {
            tracing::info!(id, "source deleted with its quotes");
        }
        Ok(deleted > 0)
    }
}

fn fetch_source(conn: &Connection, id: i64) -> Result<Option<Source>, StorageError> {
    let source = conn
        .query_row(
            &format!("SELECT {SOURCE_COLUMNS} FROM sources s WHERE s.id = ?1"),
            params![id],
            map_source,
        )
        .optional()?;
    Ok(source)
}
