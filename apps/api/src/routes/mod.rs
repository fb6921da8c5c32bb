pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::generation::handlers as generation;
use crate::matching::handlers as matching;
use crate::state::AppState;

/// Headroom over the file limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Extraction
        .route("/parse-cv", post(extraction::handle_parse_cv))
        .route(
            "/parse-cv/upload",
            post(extraction::handle_upload_cv).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/skill-gap", post(extraction::handle_skill_gap))
        // Job matching
        .route("/job-matching", post(matching::handle_job_matching))
        .route(
            "/job-matching/health",
            get(matching::handle_job_matching_health),
        )
        // Generation
        .route("/ai-generate", post(generation::handle_ai_generate))
        .with_state(state)
}
