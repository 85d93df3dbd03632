//! Axum route handlers for the Candidate API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::candidates::ingest::{ingest_resume, IngestOutcome, UploadForm};
use crate::errors::AppError;
use crate::models::Candidate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// POST /api/v1/candidates
///
/// Multipart upload: `full_name`, `email`, optional `github` / `linkedin`, and a
/// `resume` PDF. Returns 201 for a new candidate, 200 when an existing email was updated.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<IngestOutcome>), AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                form.filename = field.file_name().map(String::from);
                form.document = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid resume file: {e}")))?,
                );
            }
            "full_name" | "email" | "github" | "linkedin" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {e}")))?;
                match name.as_str() {
                    "full_name" => form.full_name = Some(value),
                    "email" => form.email = Some(value),
                    "github" => form.github = Some(value),
                    _ => form.linkedin = Some(value),
                }
            }
            _ => {}
        }
    }

    let submission = form.into_submission()?;
    let outcome = ingest_resume(
        state.extractor.as_ref(),
        &state.parser,
        state.candidates.as_ref(),
        state.resume_archive.as_ref(),
        submission,
    )
    .await?;

    let status = if outcome.was_update {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(outcome)))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = state
        .candidates
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(candidate))
}

/// GET /api/v1/candidates?email=
pub async fn handle_find_candidate(
    State(state): State<AppState>,
    Query(params): Query<EmailQuery>,
) -> Result<Json<Candidate>, AppError> {
    let email = params.email.trim().to_lowercase();
    let candidate = state
        .candidates
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No candidate with email {email}")))?;
    Ok(Json(candidate))
}
