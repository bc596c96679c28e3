//! Storage layer for quotebook
//!
//! SQLite (rusqlite + r2d2) is the default backend; PostgreSQL (sqlx) is
//! available behind the `postgres` feature. Both implement the async
//! [`SourceStore`] and [`QuoteStore`] traits, and [`StorageBackend`]
//! dispatches between them at runtime.

mod backend;
mod error;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
pub mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::{QuoteStore, SourceStore};
