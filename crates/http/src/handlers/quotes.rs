use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use quotebook_core::{FieldErrors, QuoteForm};
use quotebook_service::ServiceError;

use crate::api_error::ApiError;
use crate::pages;
use crate::AppState;

pub async fn random_quote(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let quote = state.quote_service.random_quote().await?;
    Ok(Html(pages::random_quote_page(quote.as_ref())))
}

pub async fn add_quote_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let sources = state.source_service.sources_with_capacity().await?;
    Ok(Html(pages::quote_form_page(&QuoteForm::initial(), &FieldErrors::new(), &sources)))
}

pub async fn add_quote_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QuoteForm>,
) -> Result<Response, ApiError> {
    match state.quote_service.create_quote(&form).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(ServiceError::Validation(errors)) => {
            let sources = state.source_service.sources_with_capacity().await?;
            Ok(Html(pages::quote_form_page(&form, &errors, &sources)).into_response())
        },
        Err(e) => Err(e.into()),
    }
}
