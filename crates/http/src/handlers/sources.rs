use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use quotebook_core::{FieldErrors, SourceForm};
use quotebook_service::ServiceError;

use crate::api_error::ApiError;
use crate::pages;
use crate::AppState;

pub async fn add_source_page() -> Html<String> {
    Html(pages::source_form_page(&SourceForm::default(), &FieldErrors::new()))
}

pub async fn add_source_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SourceForm>,
) -> Result<Response, ApiError> {
    match state.source_service.create_source(&form).await {
        Ok(_) => Ok(Redirect::to("/add-quote/").into_response()),
        Err(ServiceError::Validation(errors)) => {
            Ok(Html(pages::source_form_page(&form, &errors)).into_response())
        },
        Err(e) => Err(e.into()),
    }
}
