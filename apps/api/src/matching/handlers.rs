//! Axum route handlers for the Job Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::matching::ranking::rank_jobs;
use crate::models::jobs::{JobMatch, JobPosting};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobMatchRequest {
    pub cv_text: String,
    pub jobs: Vec<JobPosting>,
    /// Overrides the configured number of results.
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobMatchResponse {
    pub matches: Vec<JobMatch>,
}

/// POST /job-matching
pub async fn handle_job_matching(
    State(state): State<AppState>,
    Json(request): Json<JobMatchRequest>,
) -> Result<Json<JobMatchResponse>, AppError> {
    if request.cv_text.trim().is_empty() {
        return Err(AppError::InvalidInput("CV text cannot be empty".to_string()));
    }
    if request.jobs.is_empty() {
        return Err(AppError::InvalidInput("Job list cannot be empty".to_string()));
    }
    let k = request.top_k.unwrap_or(state.config.job_match_top_k);
    if k == 0 {
        return Err(AppError::InvalidInput("top_k must be at least 1".to_string()));
    }

    let embedder = state.embedder.get()?;
    let matches = rank_jobs(embedder, &request.cv_text, &request.jobs, k).await?;

    Ok(Json(JobMatchResponse { matches }))
}

/// GET /job-matching/health
pub async fn handle_job_matching_health() -> Json<Value> {
    Json(json!({ "message": "Job Matching API is ready!" }))
}
