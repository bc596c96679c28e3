//! Core types and rules for quotebook
//!
//! This crate contains domain types shared across all other crates, plus the
//! three pieces of actual logic: text normalization for duplicate detection,
//! weighted random selection, and popularity ranking.

pub mod constants;
mod env_config;
mod error;
mod forms;
mod quote;
mod ranking;
mod selection;
mod source;
mod vote;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use forms::*;
pub use quote::*;
pub use ranking::*;
pub use selection::*;
pub use source::*;
pub use vote::*;
