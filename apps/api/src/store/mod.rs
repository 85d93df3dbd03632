//! Record Store Adapter: candidate persistence keyed by email.
//!
//! `CandidateRepository` is the only path to stored candidates. Writes are sparse:
//! absent profile fields never overwrite stored values. Concurrent upserts on the
//! same email are left to the backend's own consistency guarantees.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Candidate, CandidateProfile, UpsertOutcome};
use crate::search::filter::CandidateFilter;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCandidateRepository;
pub use postgres::PgCandidateRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("write returned no rows")]
    NoRowsReturned,
}

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Updates the record with the profile's email if one exists, else inserts.
    async fn upsert(&self, profile: &CandidateProfile) -> Result<UpsertOutcome, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, StoreError>;

    /// All candidates satisfying the filter, oldest first.
    async fn query(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, StoreError>;
}
