use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;

use crate::api_error::ApiError;
use crate::pages;
use crate::query_types::PopularQuery;
use crate::AppState;

pub async fn popular_page(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PopularQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(query) =
        query.map_err(|rejection| ApiError::BadRequest(format!("invalid limit: {}", rejection.body_text())))?;
    let popular = state.quote_service.popular(query.limit).await?;
    Ok(Html(pages::popular_page(&popular)))
}
