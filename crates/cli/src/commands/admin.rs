//! One-shot commands that print JSON to stdout.

use std::sync::Arc;

use anyhow::Result;
use quotebook_core::{QuoteForm, SourceForm};
use quotebook_service::{QuoteService, SourceService};
use quotebook_storage::StorageBackend;
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn list_sources(storage: Arc<StorageBackend>) -> Result<()> {
    let sources = SourceService::new(storage).list_sources().await?;
    print_json(&sources)
}

pub(crate) async fn list_quotes(storage: Arc<StorageBackend>) -> Result<()> {
    let quotes = QuoteService::new(storage).list_quotes().await?;
    print_json(&quotes)
}

pub(crate) async fn random(storage: Arc<StorageBackend>) -> Result<()> {
    let quote = QuoteService::new(storage).random_quote().await?;
    print_json(&quote)
}

pub(crate) async fn popular(storage: Arc<StorageBackend>, limit: Option<usize>) -> Result<()> {
    let popular = QuoteService::new(storage).popular(limit).await?;
    print_json(&popular)
}

pub(crate) async fn add_source(
    storage: Arc<StorageBackend>,
    title: String,
    source_type: String,
    year: Option<i32>,
) -> Result<()> {
    let form = SourceForm { title, source_type, year: year.map(|y| y.to_string()).unwrap_or_default() };
    let source = SourceService::new(storage).create_source(&form).await?;
    print_json(&source)
}

pub(crate) async fn add_quote(
    storage: Arc<StorageBackend>,
    text: String,
    source: i64,
    weight: i64,
) -> Result<()> {
    let form = QuoteForm { text, source: source.to_string(), weight: weight.to_string() };
    let quote = QuoteService::new(storage).create_quote(&form).await?;
    print_json(&quote)
}

pub(crate) async fn set_weight(storage: Arc<StorageBackend>, id: i64, weight: i64) -> Result<()> {
    let quote = QuoteService::new(storage).set_weight(id, weight).await?;
    print_json(&quote)
}

pub(crate) async fn delete_source(storage: Arc<StorageBackend>, id: i64) -> Result<()> {
    let deleted = SourceService::new(storage).delete_source(id).await?;
    if !deleted {
        anyhow::bail!("source {id} not found");
    }
    print_json(&serde_json::json!({ "deleted": id }))
}
