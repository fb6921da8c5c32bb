//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::{generate_advice, GenerateRequest, Generators};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

/// POST /ai-generate
///
/// Builds the task prompt and returns the raw generated text from either the
/// local model (`gpt-2`) or the hosted completion API (`openai`).
pub async fn handle_ai_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let generators = Generators {
        local: &state.local_generator,
        hosted: &state.completions,
        settings: &state.config.generation,
    };
    let result = generate_advice(&generators, &request).await?;
    Ok(Json(GenerateResponse { result }))
}
