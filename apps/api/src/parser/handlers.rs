use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::parser::{ParseMode, Parsed, StructuredResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InterpretRequest {
    pub mode: ParseMode,
    pub text: String,
}

/// POST /api/v1/parse
///
/// Previews what the structured parser extracts from a resume body or a search query.
/// Nothing is stored.
pub async fn handle_interpret(
    State(state): State<AppState>,
    Json(request): Json<InterpretRequest>,
) -> Result<Json<Parsed<StructuredResult>>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let parsed = state.parser.interpret(&request.text, request.mode).await?;
    Ok(Json(parsed))
}
