use serde::{Deserialize, Serialize};

/// A job posting supplied by the caller for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub description: String,
}

/// One ranked posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_id: String,
    pub job: String,
    /// Cosine similarity in [-1, 1], unrounded.
    pub score: f32,
    /// Reserved for skill-overlap enrichment; always empty for now.
    pub matched_skills: Vec<String>,
}
