use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::search::pipeline::{search_candidates, SearchResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// POST /api/v1/search
///
/// Interprets a natural-language query, reads matching candidates and returns them ranked.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let response = search_candidates(
        &state.parser,
        state.candidates.as_ref(),
        state.ranker.as_ref(),
        query,
    )
    .await?;

    Ok(Json(response))
}
