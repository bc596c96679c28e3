use std::sync::Arc;

use quotebook_core::{FieldErrors, Source, SourceForm, SourceListing, MAX_QUOTES_PER_SOURCE};
use quotebook_storage::traits::SourceStore;
use quotebook_storage::{StorageBackend, StorageError};

use crate::ServiceError;

/// Message attached to `title` when the `(title, source_type)` pair is taken.
pub const MSG_DUPLICATE_SOURCE: &str = "Source with this Title and Type already exists.";

pub struct SourceService {
    storage: Arc<StorageBackend>,
}

impl SourceService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Validate and insert a submitted source.
    pub async fn create_source(&self, form: &SourceForm) -> Result<Source, ServiceError> {
        let input = form.clean()?;
        match self.storage.create_source(&input).await {
            Ok(source) => {
                tracing::info!(id = source.id, title = %source.title, source_type = %source.source_type, "source added");
                Ok(source)
            },
            Err(StorageError::Duplicate(detail)) => {
                tracing::debug!(%detail, "source pair already exists");
                Err(FieldErrors::single("title", MSG_DUPLICATE_SOURCE).into())
            },
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_source(&self, id: i64) -> Result<Option<Source>, ServiceError> {
        Ok(self.storage.get_source(id).await?)
    }

    pub async fn list_sources(&self) -> Result<Vec<SourceListing>, ServiceError> {
        Ok(self.storage.list_sources().await?)
    }

    /// Sources that can still take another quote.
    pub async fn sources_with_capacity(&self) -> Result<Vec<SourceListing>, ServiceError> {
        Ok(self.storage.list_sources_with_capacity(MAX_QUOTES_PER_SOURCE).await?)
    }

    pub async fn delete_source(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.storage.delete_source(id).await?)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::test_support::create_test_backend;

    fn form(title: &str, source_type: &str, year: &str) -> SourceForm {
        SourceForm { title: title.to_owned(), source_type: source_type.to_owned(), year: year.to_owned() }
    }

    #[tokio::test]
    async fn test_create_source_trims_title() {
        let (backend, _dir) = create_test_backend();
        let service = SourceService::new(backend);

        let source = service.create_source(&form("  The Matrix ", "movie", "1999")).await.unwrap();
        assert_eq!(source.title, "The Matrix");
        assert_eq!(source.year, Some(1999));
    }

    #[tokio::test]
    async fn test_duplicate_pair_reports_title_error() {
        let (backend, _dir) = create_test_backend();
        let service = SourceService::new(backend);
        service.create_source(&form("Matrix", "movie", "")).await.unwrap();

        let err = service.create_source(&form("Matrix", "movie", "")).await.unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("title"), [MSG_DUPLICATE_SOURCE.to_owned()]);

        service.create_source(&form("Matrix", "book", "")).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_storage() {
        let (backend, _dir) = create_test_backend();
        let service = SourceService::new(backend);

        let err = service.create_source(&form("", "poem", "soon")).await.unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.has("title"));
        assert!(errors.has("source_type"));
        assert!(errors.has("year"));
        assert!(service.list_sources().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_source() {
        let (backend, _dir) = create_test_backend();
        let service = SourceService::new(backend);
        let source = service.create_source(&form("Gone", "game", "")).await.unwrap();

        assert!(service.delete_source(source.id).await.unwrap());
        assert!(service.get_source(source.id).await.unwrap().is_none());
        assert!(!service.delete_source(source.id).await.unwrap());
    }
}
