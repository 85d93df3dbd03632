//! Search pipeline: interpret → filtered read → rank.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::parser::StructuredParser;
use crate::search::filter::CandidateFilter;
use crate::search::ranker::{CandidateRanker, RankedCandidate};
use crate::store::CandidateRepository;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub filter: CandidateFilter,
    pub results: Vec<RankedCandidate>,
}

/// Runs one recruiter search. A failed interpretation aborts; a failed store read
/// yields an empty result list.
pub async fn search_candidates(
    parser: &StructuredParser,
    repository: &dyn CandidateRepository,
    ranker: &dyn CandidateRanker,
    query: &str,
) -> Result<SearchResponse, AppError> {
    let filter = parser.interpret_query(query).await?.value;
    if filter.is_unconstrained() {
        info!("Query '{query}' set no filter constraints; reading all candidates");
    }

    let candidates = match repository.query(&filter).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Candidate query failed, returning no results: {e}");
            Vec::new()
        }
    };

    let results = ranker.rank(query, candidates).await;
    info!("Search matched {} candidates", results.len());

    Ok(SearchResponse {
        query: query.to_string(),
        filter,
        results,
    })
}
