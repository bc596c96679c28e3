//! Shared constants for quotebook.
//!
//! Centralizes limits that the storage, service and HTTP layers all agree on.

/// A source may own at most this many quotes.
pub const MAX_QUOTES_PER_SOURCE: u32 = 3;

/// Weight assigned to a quote when the form leaves it blank.
pub const DEFAULT_QUOTE_WEIGHT: i64 = 1;

/// Number of entries in each popularity ranking.
pub const DEFAULT_POPULAR_LIMIT: usize = 10;

/// Upper bound for a caller-supplied ranking size.
pub const MAX_POPULAR_LIMIT: usize = 100;

/// Characters shown in quote previews and duplicate messages.
pub const QUOTE_PREVIEW_CHARS: usize = 50;

/// Maximum length of a source title, in characters.
pub const SOURCE_TITLE_MAX_CHARS: usize = 200;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default size of the SQLite connection pool.
pub const DEFAULT_SQLITE_POOL_SIZE: u32 = 8;
