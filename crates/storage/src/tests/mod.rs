//! Test utilities and module declarations for storage tests.

use crate::Storage;
use quotebook_core::{NewQuote, NewSource, Quote, Source, SourceType};
use tempfile::TempDir;

mod selection_tests;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn new_source(title: &str, source_type: SourceType) -> NewSource {
    NewSource { title: title.to_owned(), source_type, year: None }
}

pub fn new_quote(text: &str, source_id: i64) -> NewQuote {
    NewQuote { text: text.to_owned(), source_id, weight: 1 }
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_source(storage: &Storage, title: &str) -> Source {
    storage.create_source(&new_source(title, SourceType::Movie)).unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn seed_quote(storage: &Storage, text: &str, source_id: i64, weight: i64) -> Quote {
    storage.create_quote(&NewQuote { text: text.to_owned(), source_id, weight }, 3).unwrap()
}
