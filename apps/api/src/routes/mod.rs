pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::parser::handlers as parser;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate API
        .route(
            "/api/v1/candidates",
            post(candidates::handle_upload_resume)
                .layer(DefaultBodyLimit::max(upload_limit))
                .get(candidates::handle_find_candidate),
        )
        .route("/api/v1/candidates/:id", get(candidates::handle_get_candidate))
        // Recruiter API
        .route("/api/v1/search", post(search::handle_search))
        .route("/api/v1/parse", post(parser::handle_interpret))
        .with_state(state)
}
