//! Background Scorer: heuristic reputation estimate from public profile signals.
//!
//! Three independent 0–100 sub-scores blended as
//! `round(code_hosting*0.4 + network*0.3 + presence*0.3)`.
//! Scores are recomputed on every call; nothing is cached.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::Candidate;

pub mod github;
pub mod presence;

use github::{code_hosting_score, CodeHostLookup};
use presence::{professional_network_score, public_presence_score};

const CODE_HOSTING_WEIGHT: u32 = 4;
const NETWORK_WEIGHT: u32 = 3;
const PRESENCE_WEIGHT: u32 = 3;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("profile API returned status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundScore {
    pub code_hosting: u8,
    pub professional_network: u8,
    pub public_presence: u8,
    pub combined: u8,
}

impl BackgroundScore {
    pub fn new(code_hosting: u8, professional_network: u8, public_presence: u8) -> Self {
        Self {
            code_hosting,
            professional_network,
            public_presence,
            combined: combine(code_hosting, professional_network, public_presence),
        }
    }
}

/// Weighted blend in tenths, rounded half-up, clamped to [0, 100].
pub fn combine(code_hosting: u8, professional_network: u8, public_presence: u8) -> u8 {
    let tenths = u32::from(code_hosting) * CODE_HOSTING_WEIGHT
        + u32::from(professional_network) * NETWORK_WEIGHT
        + u32::from(public_presence) * PRESENCE_WEIGHT;
    ((tenths + 5) / 10).min(100) as u8
}

#[derive(Clone)]
pub struct BackgroundScorer {
    code_host: Arc<dyn CodeHostLookup>,
}

impl BackgroundScorer {
    pub fn new(code_host: Arc<dyn CodeHostLookup>) -> Self {
        Self { code_host }
    }

    /// Scores one candidate. A failed profile lookup contributes 0; it never fails the call.
    pub async fn score(&self, candidate: &Candidate) -> BackgroundScore {
        let github = candidate.github_url.as_deref();
        let linkedin = candidate.linkedin_url.as_deref();

        let code_hosting = code_hosting_score(github, self.code_host.as_ref())
            .await
            .unwrap_or_else(|e| {
                warn!(
                    "Code-hosting lookup failed for candidate {}: {e}",
                    candidate.id
                );
                0
            });
        let network = professional_network_score(linkedin);
        let presence = public_presence_score(candidate.name.as_deref().unwrap_or(""), github, linkedin);

        BackgroundScore::new(code_hosting, network, presence)
    }
}
