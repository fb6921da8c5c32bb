//! Axum route handlers for résumé extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::contact::extract_contact;
use crate::extraction::upload::{extract_pdf_text, read_resume_field};
use crate::extraction::{analyze_gap, parse_cv, require_text};
use crate::models::cv::{ContactInfo, CvProfile, SkillGap};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseCvRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    pub cv_text: String,
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadCvResponse {
    #[serde(flatten)]
    pub profile: CvProfile,
    pub contact: ContactInfo,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /parse-cv
pub async fn handle_parse_cv(
    State(state): State<AppState>,
    Json(request): Json<ParseCvRequest>,
) -> Result<Json<CvProfile>, AppError> {
    let profile = parse_cv(&state.recognizer, &request.text).await?;
    Ok(Json(profile))
}

/// POST /skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<SkillGap>, AppError> {
    let gap = analyze_gap(&state.recognizer, &request.cv_text, &request.job_text).await?;
    Ok(Json(gap))
}

/// POST /parse-cv/upload
///
/// Multipart upload with a `resume` PDF field. Returns the parse-cv payload plus
/// scraped contact details. Nothing is stored.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadCvResponse>, AppError> {
    let data = read_resume_field(multipart, state.config.max_upload_bytes).await?;
    let text = extract_pdf_text(data).await?;
    require_text("Extracted PDF text", &text)?;

    let profile = parse_cv(&state.recognizer, &text).await?;
    Ok(Json(UploadCvResponse {
        profile,
        contact: extract_contact(&text),
    }))
}
