use std::sync::Arc;

use crate::candidates::archive::ResumeArchive;
use crate::candidates::extract::TextExtractor;
use crate::parser::StructuredParser;
use crate::search::ranker::CandidateRanker;
use crate::store::CandidateRepository;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds collaborator handles only; no request data lives here.
#[derive(Clone)]
pub struct AppState {
    pub candidates: Arc<dyn CandidateRepository>,
    pub parser: StructuredParser,
    pub extractor: Arc<dyn TextExtractor>,
    /// Pluggable ranker. Default: BackgroundRanker.
    pub ranker: Arc<dyn CandidateRanker>,
    /// Present only when object storage is configured.
    pub resume_archive: Option<ResumeArchive>,
    pub max_upload_bytes: usize,
}
