//! Job ranking: embed résumé and postings, score by cosine similarity, keep the top k.

use std::cmp::Ordering;

use tracing::debug;

use crate::errors::AppError;
use crate::matching::embedder::SentenceEmbedder;
use crate::models::jobs::{JobMatch, JobPosting};

pub const DEFAULT_TOP_K: usize = 5;

/// `dot(a, b) / (|a| * |b|)`. A zero-length vector scores 0. Never returns `-0.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b) + 0.0
}

/// Scores every candidate against `query` and returns `(index, score)` for the best `k`.
///
/// Sorting is stable, so equal scores keep their input order. Scores compare by
/// value, so `0.0` and `-0.0` are a tie.
pub fn top_k_by_similarity(query: &[f32], candidates: &[Vec<f32>], k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .map(|(idx, v)| (idx, cosine_similarity(query, v)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}

/// Ranks `jobs` against `resume_text`. Blank résumé or no jobs yields an empty list.
pub async fn rank_jobs(
    embedder: &dyn SentenceEmbedder,
    resume_text: &str,
    jobs: &[JobPosting],
    k: usize,
) -> Result<Vec<JobMatch>, AppError> {
    if resume_text.trim().is_empty() || jobs.is_empty() {
        return Ok(Vec::new());
    }

    let mut texts = Vec::with_capacity(jobs.len() + 1);
    texts.push(resume_text.to_string());
    texts.extend(jobs.iter().map(|j| j.description.clone()));

    let mut vectors = embedder.embed(texts).await?;
    if vectors.len() != jobs.len() + 1 {
        return Err(AppError::Processing(format!(
            "embedder returned {} vectors for {} inputs",
            vectors.len(),
            jobs.len() + 1
        )));
    }
    let job_vectors = vectors.split_off(1);
    let resume_vector = &vectors[0];

    if let Some(bad) = job_vectors.iter().find(|v| v.len() != resume_vector.len()) {
        return Err(AppError::Processing(format!(
            "embedding dimension mismatch: {} vs {}",
            resume_vector.len(),
            bad.len()
        )));
    }

    let ranked = top_k_by_similarity(resume_vector, &job_vectors, k);
    debug!("Ranked {} jobs, returning top {}", jobs.len(), ranked.len());

    Ok(ranked
        .into_iter()
        .map(|(idx, score)| JobMatch {
            job_id: jobs[idx].id.clone(),
            job: jobs[idx].description.clone(),
            score,
            matched_skills: Vec::new(),
        })
        .collect())
}
