//! Resume ingest pipeline: extract → parse → assemble → upsert → archive.
//!
//! Extraction and parse failures abort before anything is written. The assembled
//! profile is owned by the request and returned to the caller; nothing is cached.

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::archive::ResumeArchive;
use crate::candidates::extract::TextExtractor;
use crate::errors::AppError;
use crate::models::CandidateProfile;
use crate::parser::schema::ParsedResume;
use crate::parser::StructuredParser;
use crate::store::CandidateRepository;

/// A validated resume upload.
#[derive(Debug, Clone)]
pub struct ResumeSubmission {
    pub full_name: String,
    pub email: String,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub filename: String,
    pub document: Bytes,
}

/// Raw upload form fields, before validation.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub filename: Option<String>,
    pub document: Option<Bytes>,
}

impl UploadForm {
    pub fn into_submission(self) -> Result<ResumeSubmission, AppError> {
        let full_name = non_blank(self.full_name)
            .ok_or_else(|| AppError::Validation("full_name is required".to_string()))?;
        let email = non_blank(self.email)
            .map(|e| normalize_email(&e))
            .ok_or_else(|| AppError::Validation("email is required".to_string()))?;
        if !looks_like_email(&email) {
            return Err(AppError::Validation(format!("'{email}' is not a valid email address")));
        }

        let document = self
            .document
            .ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
        let filename = non_blank(self.filename)
            .ok_or_else(|| AppError::Validation("No resume file selected".to_string()))?;
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation("Only PDF files are allowed".to_string()));
        }
        if document.is_empty() {
            return Err(AppError::Validation("Uploaded resume is empty".to_string()));
        }

        Ok(ResumeSubmission {
            full_name,
            email,
            github: non_blank(self.github),
            linkedin: non_blank(self.linkedin),
            filename,
            document,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct IngestOutcome {
    pub candidate_id: Uuid,
    pub was_update: bool,
    pub profile: CandidateProfile,
    pub parsed: ParsedResume,
    pub raw_response: String,
}

pub async fn ingest_resume(
    extractor: &dyn TextExtractor,
    parser: &StructuredParser,
    repository: &dyn CandidateRepository,
    archive: Option<&ResumeArchive>,
    submission: ResumeSubmission,
) -> Result<IngestOutcome, AppError> {
    let resume_text = extractor.extract(submission.document.clone()).await?;
    info!(
        "Extracted {} chars from resume '{}'",
        resume_text.len(),
        submission.filename
    );

    let parsed = parser.parse_resume(&resume_text).await?;
    let mut profile = assemble_profile(&submission, &parsed.value);

    let outcome = repository.upsert(&profile).await?;
    info!(
        "Saved candidate {} (update: {})",
        outcome.id, outcome.was_update
    );

    if let Some(archive) = archive {
        match archive
            .put_resume(outcome.id, &submission.filename, submission.document)
            .await
        {
            Ok(url) => {
                let patch = CandidateProfile {
                    resume_url: Some(url.clone()),
                    ..CandidateProfile::for_email(profile.email.clone())
                };
                match repository.upsert(&patch).await {
                    Ok(_) => profile.resume_url = Some(url),
                    Err(e) => warn!("Could not record resume URL for {}: {e}", outcome.id),
                }
            }
            Err(e) => warn!("Resume archive failed for {}: {e:?}", outcome.id),
        }
    }

    Ok(IngestOutcome {
        candidate_id: outcome.id,
        was_update: outcome.was_update,
        profile,
        parsed: parsed.value,
        raw_response: parsed.raw_response,
    })
}

/// Builds the profile to store. Form values win for identity and profile links;
/// everything else comes from the parsed resume. An empty skill list is treated as
/// absent so a re-upload never clears stored skills.
pub fn assemble_profile(submission: &ResumeSubmission, parsed: &ParsedResume) -> CandidateProfile {
    CandidateProfile {
        name: Some(submission.full_name.clone()),
        email: submission.email.clone(),
        phone: parsed.phone.clone(),
        skills: (!parsed.skills.is_empty()).then(|| parsed.skills.clone()),
        experience_years: parsed.experience_years,
        education: parsed.education.clone(),
        location: parsed.location.clone(),
        linkedin_url: submission.linkedin.clone().or_else(|| parsed.linkedin.clone()),
        github_url: submission.github.clone().or_else(|| parsed.github.clone()),
        resume_url: None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}
