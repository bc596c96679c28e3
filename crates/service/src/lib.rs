//! Service layer for quotebook
//!
//! Centralizes business rules between the HTTP/CLI front ends and storage:
//! form validation with field-attributed messages, duplicate and capacity
//! checks, weighted selection and popularity rankings.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]

mod error;
mod quote_service;
mod source_service;

pub use error::ServiceError;
pub use quote_service::QuoteService;
pub use source_service::SourceService;
