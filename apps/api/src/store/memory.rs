use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{CandidateRepository, StoreError};
use crate::models::{Candidate, CandidateProfile, UpsertOutcome};
use crate::search::filter::CandidateFilter;

/// Process-local candidate table. Used when no database is configured.
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemoryCandidateRepository {
    rows: RwLock<Vec<Candidate>>,
}

impl MemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateRepository for MemoryCandidateRepository {
    async fn upsert(&self, profile: &CandidateProfile) -> Result<UpsertOutcome, StoreError> {
        let mut rows = self.rows.write().await;

        if let Some(existing) = rows.iter_mut().find(|c| c.email == profile.email) {
            profile.apply_to(existing);
            existing.updated_at = Utc::now();
            info!("Updated candidate {} ({})", existing.id, existing.email);
            return Ok(UpsertOutcome {
                id: existing.id,
                was_update: true,
            });
        }

        let now = Utc::now();
        let mut candidate = Candidate {
            id: Uuid::new_v4(),
            name: None,
            email: profile.email.clone(),
            phone: None,
            skills: Vec::new(),
            experience_years: None,
            education: None,
            location: None,
            linkedin_url: None,
            github_url: None,
            resume_url: None,
            created_at: now,
            updated_at: now,
        };
        profile.apply_to(&mut candidate);
        let id = candidate.id;
        info!("Inserted candidate {id} ({})", candidate.email);
        rows.push(candidate);

        Ok(UpsertOutcome {
            id,
            was_update: false,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn query(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|c| filter.matches(c)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str, years: Option<i32>) -> CandidateProfile {
        CandidateProfile {
            name: Some("John Doe".to_string()),
            phone: Some("+1-234-567-8901".to_string()),
            skills: Some(vec!["Python".to_string(), "SQL".to_string()]),
            experience_years: years,
            education: Some("M.Sc. in Computer Science".to_string()),
            location: Some("New York, NY".to_string()),
            ..CandidateProfile::for_email(email)
        }
    }

    #[tokio::test]
    async fn test_new_email_inserts() {
        let repo = MemoryCandidateRepository::new();
        let outcome = repo.upsert(&profile("john@example.com", Some(5))).await.unwrap();
        assert!(!outcome.was_update);

        let stored = repo.find_by_email("john@example.com").await.unwrap().unwrap();
        assert_eq!(stored.id, outcome.id);
        assert_eq!(stored.skills, vec!["Python", "SQL"]);
    }

    #[tokio::test]
    async fn test_existing_email_updates_in_place() {
        let repo = MemoryCandidateRepository::new();
        let first = repo.upsert(&profile("john@example.com", Some(5))).await.unwrap();
        let second = repo.upsert(&profile("john@example.com", Some(6))).await.unwrap();

        assert!(second.was_update);
        assert_eq!(second.id, first.id);
        let all = repo.query(&CandidateFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].experience_years, Some(6));
    }

    #[tokio::test]
    async fn test_update_is_sparse() {
        let repo = MemoryCandidateRepository::new();
        repo.upsert(&profile("john@example.com", Some(5))).await.unwrap();

        let patch = CandidateProfile {
            resume_url: Some("s3://bucket/resumes/john.pdf".to_string()),
            ..CandidateProfile::for_email("john@example.com")
        };
        repo.upsert(&patch).await.unwrap();

        let stored = repo.find_by_email("john@example.com").await.unwrap().unwrap();
        assert_eq!(stored.experience_years, Some(5));
        assert_eq!(stored.phone.as_deref(), Some("+1-234-567-8901"));
        assert_eq!(stored.resume_url.as_deref(), Some("s3://bucket/resumes/john.pdf"));
    }

    #[tokio::test]
    async fn test_query_min_experience_boundary() {
        let repo = MemoryCandidateRepository::new();
        for (email, years) in [("a@x.io", 3), ("b@x.io", 5), ("c@x.io", 8), ("d@x.io", 4)] {
            repo.upsert(&profile(email, Some(years))).await.unwrap();
        }
        let filter = CandidateFilter {
            min_experience_years: Some(5),
            ..Default::default()
        };
        let emails: Vec<String> = repo
            .query(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.email)
            .collect();
        assert_eq!(emails, vec!["b@x.io", "c@x.io"]);
    }

    #[tokio::test]
    async fn test_find_by_id_and_missing() {
        let repo = MemoryCandidateRepository::new();
        let outcome = repo.upsert(&profile("john@example.com", None)).await.unwrap();
        assert!(repo.find_by_id(outcome.id).await.unwrap().is_some());
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }
}
