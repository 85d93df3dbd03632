use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use super::{CandidateRepository, StoreError};
use crate::models::{Candidate, CandidateProfile, UpsertOutcome};
use crate::search::filter::CandidateFilter;

/// Candidate table in PostgreSQL. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateRepository for PgCandidateRepository {
    async fn upsert(&self, profile: &CandidateProfile) -> Result<UpsertOutcome, StoreError> {
        if self.find_by_email(&profile.email).await?.is_some() {
            // COALESCE keeps the stored value wherever the profile has none
            let id: Option<Uuid> = sqlx::query_scalar(
                r#"
                UPDATE candidates SET
                    name             = COALESCE($2, name),
                    phone            = COALESCE($3, phone),
                    skills           = COALESCE($4, skills),
                    experience_years = COALESCE($5, experience_years),
                    education        = COALESCE($6, education),
                    location         = COALESCE($7, location),
                    linkedin_url     = COALESCE($8, linkedin_url),
                    github_url       = COALESCE($9, github_url),
                    resume_url       = COALESCE($10, resume_url),
                    updated_at       = NOW()
                WHERE email = $1
                RETURNING id
                "#,
            )
            .bind(&profile.email)
            .bind(&profile.name)
            .bind(&profile.phone)
            .bind(&profile.skills)
            .bind(profile.experience_years)
            .bind(&profile.education)
            .bind(&profile.location)
            .bind(&profile.linkedin_url)
            .bind(&profile.github_url)
            .bind(&profile.resume_url)
            .fetch_optional(&self.pool)
            .await?;

            let id = id.ok_or(StoreError::NoRowsReturned)?;
            info!("Updated candidate {id} ({})", profile.email);
            return Ok(UpsertOutcome {
                id,
                was_update: true,
            });
        }

        let id: Option<Uuid> = sqlx::query_scalar(
            r#"
            INSERT INTO candidates
                (email, name, phone, skills, experience_years, education,
                 location, linkedin_url, github_url, resume_url)
            VALUES ($1, $2, $3, COALESCE($4, '{}'::TEXT[]), $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.phone)
        .bind(&profile.skills)
        .bind(profile.experience_years)
        .bind(&profile.education)
        .bind(&profile.location)
        .bind(&profile.linkedin_url)
        .bind(&profile.github_url)
        .bind(&profile.resume_url)
        .fetch_optional(&self.pool)
        .await?;

        let id = id.ok_or(StoreError::NoRowsReturned)?;
        info!("Inserted candidate {id} ({})", profile.email);
        Ok(UpsertOutcome {
            id,
            was_update: false,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, StoreError> {
        Ok(
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        Ok(
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn query(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, StoreError> {
        let mut builder = build_filter_query(filter);
        Ok(builder
            .build_query_as::<Candidate>()
            .fetch_all(&self.pool)
            .await?)
    }
}

/// Translates a filter into a SELECT. Unset fields add no predicate.
fn build_filter_query(filter: &CandidateFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT * FROM candidates WHERE TRUE");

    let skills = filter.normalized_skills();
    if !skills.is_empty() {
        builder
            .push(" AND EXISTS (SELECT 1 FROM unnest(skills) AS s WHERE lower(s) = ANY(")
            .push_bind(skills)
            .push("))");
    }
    if let Some(min) = filter.min_experience_years {
        builder.push(" AND experience_years >= ").push_bind(min);
    }
    if let Some(location) = &filter.location {
        builder
            .push(" AND location ILIKE ")
            .push_bind(format!("%{}%", escape_like(location)));
    }

    builder.push(" ORDER BY created_at, id");
    builder
}

/// Escapes LIKE metacharacters so user text matches literally (default escape is `\`).
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconstrained_filter_has_no_predicates() {
        let builder = build_filter_query(&CandidateFilter::default());
        assert_eq!(
            builder.sql(),
            "SELECT * FROM candidates WHERE TRUE ORDER BY created_at, id"
        );
    }

    #[test]
    fn test_all_predicates_are_bound() {
        let filter = CandidateFilter {
            skills: vec!["Rust".to_string()],
            min_experience_years: Some(5),
            location: Some("Berlin".to_string()),
            job_title: Some("ignored".to_string()),
            industry: None,
        };
        let builder = build_filter_query(&filter);
        let sql = builder.sql();
        assert!(sql.contains("lower(s) = ANY($1)"));
        assert!(sql.contains("experience_years >= $2"));
        assert!(sql.contains("location ILIKE $3"));
        assert!(!sql.contains("ignored"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_remote\\"), "100\\%\\_remote\\\\");
        assert_eq!(escape_like("São Paulo"), "São Paulo");
    }
}
