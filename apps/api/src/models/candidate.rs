use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored candidate record. `email` is the unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The write shape of a candidate. `None` fields are left untouched on update
/// and stored as NULL on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub resume_url: Option<String>,
}

impl CandidateProfile {
    /// A profile that only identifies the record; every other field is absent.
    pub fn for_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Applies the present fields of this profile onto an existing record.
    pub fn apply_to(&self, candidate: &mut Candidate) {
        fn merge<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        merge(&mut candidate.name, &self.name);
        merge(&mut candidate.phone, &self.phone);
        merge(&mut candidate.experience_years, &self.experience_years);
        merge(&mut candidate.education, &self.education);
        merge(&mut candidate.location, &self.location);
        merge(&mut candidate.linkedin_url, &self.linkedin_url);
        merge(&mut candidate.github_url, &self.github_url);
        merge(&mut candidate.resume_url, &self.resume_url);
        if let Some(skills) = &self.skills {
            candidate.skills = skills.clone();
        }
    }
}

/// Result of an insert-or-update keyed by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpsertOutcome {
    pub id: Uuid,
    pub was_update: bool,
}
