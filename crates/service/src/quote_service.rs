use std::sync::Arc;

use quotebook_core::{
    normalize_quote_text, FieldErrors, NewQuote, PopularQuotes, Quote, QuoteForm, VoteAction,
    VoteOutcome, DEFAULT_POPULAR_LIMIT, MAX_POPULAR_LIMIT, MAX_QUOTES_PER_SOURCE,
    MSG_INVALID_CHOICE, QUOTE_PREVIEW_CHARS,
};
use quotebook_storage::traits::{QuoteStore, SourceStore};
use quotebook_storage::{StorageBackend, StorageError};

use crate::ServiceError;

/// Fallback when a commit-time collision cannot be traced to a stored quote.
pub const MSG_DUPLICATE_QUOTE: &str = "This quote already exists.";

fn duplicate_message(existing: &Quote) -> String {
    let head: String = existing.text.chars().take(QUOTE_PREVIEW_CHARS).collect();
    format!("Quote '{head}...' already exists (source: {})", existing.source.title)
}

fn capacity_message(title: &str) -> String {
    format!(
        "Source '{title}' already has the maximum number of quotes ({MAX_QUOTES_PER_SOURCE}). \
         Choose another source."
    )
}

pub struct QuoteService {
    storage: Arc<StorageBackend>,
}

impl QuoteService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Validate and insert a submitted quote.
    ///
    /// Duplicate text is reported on `text`; an unknown or full source on
    /// `source`. Both checks run again inside the storage transaction, and a
    /// collision detected there is reported with the same messages.
    pub async fn create_quote(&self, form: &QuoteForm) -> Result<Quote, ServiceError> {
        let input = form.clean()?;
        let mut errors = FieldErrors::new();

        let normalized = input.normalized_text();
        if let Some(existing) = self.storage.find_quote_by_normalized_text(&normalized).await? {
            errors.add("text", duplicate_message(&existing));
        }

        match self.storage.get_source_listing(input.source_id).await? {
            None => errors.add("source", MSG_INVALID_CHOICE),
            Some(l) if !l.has_capacity(MAX_QUOTES_PER_SOURCE) => {
                errors.add("source", capacity_message(&l.source.title));
            },
            Some(_) => {},
        }

        if !errors.is_empty() {
            tracing::debug!(errors = %errors, "quote form rejected");
            return Err(errors.into());
        }

        match self.storage.create_quote(&input, MAX_QUOTES_PER_SOURCE).await {
            Ok(quote) => {
                tracing::info!(id = quote.id, source_id = quote.source.id, weight = quote.weight, "quote added");
                Ok(quote)
            },
            Err(e) => Err(self.translate_commit_error(e, &input).await),
        }
    }

    async fn translate_commit_error(&self, err: StorageError, input: &NewQuote) -> ServiceError {
        match err {
            StorageError::Duplicate(detail) => {
                tracing::warn!(%detail, "duplicate quote detected at commit");
                let message = match self
                    .storage
                    .find_quote_by_normalized_text(&normalize_quote_text(&input.text))
                    .await
                {
                    Ok(Some(existing)) => duplicate_message(&existing),
                    _ => MSG_DUPLICATE_QUOTE.to_owned(),
                };
                FieldErrors::single("text", message).into()
            },
            StorageError::CapacityExceeded { source_id, .. } => {
                tracing::warn!(source_id, "source filled up before commit");
                let title = match self.storage.get_source(source_id).await {
                    Ok(Some(source)) => source.title,
                    _ => source_id.to_string(),
                };
                FieldErrors::single("source", capacity_message(&title)).into()
            },
            StorageError::NotFound { entity: "source", .. } => {
                FieldErrors::single("source", MSG_INVALID_CHOICE).into()
            },
            other => other.into(),
        }
    }

    /// Pick a quote by weight and count the view. `None` when nothing is selectable.
    pub async fn random_quote(&self) -> Result<Option<Quote>, ServiceError> {
        let draw: f64 = rand::random();
        let quote = self.storage.select_and_view(draw).await?;
        if let Some(q) = &quote {
            tracing::debug!(id = q.id, views = q.views, "quote shown");
        }
        Ok(quote)
    }

    /// Apply a like or dislike. Unrecognized actions leave the counters as they are.
    pub async fn vote(&self, id: i64, action: &str) -> Result<VoteOutcome, ServiceError> {
        let quote = match VoteAction::parse(action) {
            Some(action) => {
                let quote = self.storage.record_vote(id, action).await?;
                tracing::debug!(id, action = action.as_str(), "vote recorded");
                quote
            },
            None => {
                tracing::debug!(id, action, "ignoring unknown vote action");
                self.storage
                    .get_quote(id)
                    .await?
                    .ok_or_else(|| StorageError::NotFound { entity: "quote", id: id.to_string() })?
            },
        };
        Ok(VoteOutcome::from(&quote))
    }

    /// The three rankings. `limit` defaults to 10 and is clamped to `1..=100`.
    pub async fn popular(&self, limit: Option<usize>) -> Result<PopularQuotes, ServiceError> {
        let limit = limit.unwrap_or(DEFAULT_POPULAR_LIMIT).clamp(1, MAX_POPULAR_LIMIT);
        let quotes = self.storage.list_quotes().await?;
        Ok(PopularQuotes::from_quotes(&quotes, limit))
    }

    pub async fn get_quote(&self, id: i64) -> Result<Option<Quote>, ServiceError> {
        Ok(self.storage.get_quote(id).await?)
    }

    pub async fn list_quotes(&self) -> Result<Vec<Quote>, ServiceError> {
        Ok(self.storage.list_quotes().await?)
    }

    /// Admin override of the selection weight. Zero takes a quote out of rotation.
    pub async fn set_weight(&self, id: i64, weight: i64) -> Result<Quote, ServiceError> {
        if weight < 0 {
            return Err(ServiceError::InvalidInput(format!(
                "weight must be zero or positive (got {weight})"
            )));
        }
        let quote = self.storage.set_weight(id, weight).await?;
        tracing::info!(id, weight, "quote weight updated");
        Ok(quote)
    }
}
