use std::sync::Arc;

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Path, State};
use axum::Json;
use quotebook_core::VoteOutcome;

use crate::api_error::ApiError;
use crate::query_types::VoteForm;
use crate::AppState;

/// `POST /like/{id}/` with form field `action` (`like` or `dislike`).
///
/// A missing or unreadable body counts as an unknown action. An id that is
/// not a valid integer cannot name a quote and answers 404.
pub async fn vote(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> Result<Json<VoteOutcome>, ApiError> {
    let Path(id) = path.map_err(|rejection| {
        tracing::debug!(%rejection, "vote path not an integer id");
        ApiError::NotFound("quote not found".to_owned())
    })?;
    let action = match form {
        Ok(Form(VoteForm { action })) => action.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(id, %rejection, "vote body not readable");
            String::new()
        },
    };
    let outcome = state.quote_service.vote(id, &action).await?;
    Ok(Json(outcome))
}
