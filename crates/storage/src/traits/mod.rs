//! Storage backend trait abstraction
//!
//! Async domain traits implemented by the SQLite and PostgreSQL backends.

pub mod quote;
pub mod source;

pub use quote::QuoteStore;
pub use source::SourceStore;
