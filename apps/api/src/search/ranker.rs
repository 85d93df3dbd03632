//! Candidate Ranker: pluggable ordering of a filtered candidate list.
//!
//! Default: `BackgroundRanker`, a stable descending sort on the blended background
//! score. A relevance ranker (query vs. skills/experience similarity) can replace
//! it behind the same trait without touching the search pipeline or handlers.
//!
//! `AppState` holds an `Arc<dyn CandidateRanker>`.

use async_trait::async_trait;
use serde::Serialize;

use crate::background::{BackgroundScore, BackgroundScorer};
use crate::models::Candidate;

/// A candidate with the scores attached for one ranking pass.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub background: BackgroundScore,
    pub rank_score: u8,
}

#[async_trait]
pub trait CandidateRanker: Send + Sync {
    /// Returns every input candidate exactly once, best first. Equal scores keep input order.
    async fn rank(&self, query: &str, candidates: Vec<Candidate>) -> Vec<RankedCandidate>;
}

pub struct BackgroundRanker {
    scorer: BackgroundScorer,
}

impl BackgroundRanker {
    pub fn new(scorer: BackgroundScorer) -> Self {
        Self { scorer }
    }
}

#[async_trait]
impl CandidateRanker for BackgroundRanker {
    async fn rank(&self, _query: &str, candidates: Vec<Candidate>) -> Vec<RankedCandidate> {
        let mut ranked = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let background = self.scorer.score(&candidate).await;
            ranked.push(RankedCandidate {
                rank_score: background.combined,
                background,
                candidate,
            });
        }
        sort_by_rank(&mut ranked);
        ranked
    }
}

/// Stable descending sort on `rank_score`.
pub fn sort_by_rank(ranked: &mut [RankedCandidate]) {
    ranked.sort_by(|a, b| b.rank_score.cmp(&a.rank_score));
}
