// Résumé extraction: NER-backed organisation split, vocabulary skill scan,
// skill-gap set algebra and PDF intake for uploads.

pub mod contact;
pub mod document;
pub mod handlers;
#[cfg(feature = "local-models")]
pub mod ner;
pub mod sections;
pub mod skill_gap;
pub mod skills;
pub mod upload;

use crate::errors::AppError;
use crate::extraction::document::{EntityRecognizer, ResumeDocument};
use crate::extraction::sections::partition_organizations;
use crate::extraction::skill_gap::compute_gap;
use crate::extraction::skills::extract_skills;
use crate::inference::ModelHandle;
use crate::models::cv::{CvProfile, SkillGap};

/// Derives skills, experience and education from an annotated document.
pub fn extract_profile(doc: &ResumeDocument) -> CvProfile {
    let (experience, education) = partition_organizations(doc);
    CvProfile {
        skills: extract_skills(doc).into_iter().collect(),
        experience,
        education,
    }
}

/// Validates the text, runs it through the recognizer and extracts the profile.
/// Blank input is rejected before the model handle is consulted.
pub async fn parse_cv(
    recognizer: &ModelHandle<dyn EntityRecognizer>,
    text: &str,
) -> Result<CvProfile, AppError> {
    require_text("CV text", text)?;
    let recognizer = recognizer.get()?;
    let doc = recognizer.annotate(text).await?;
    Ok(extract_profile(&doc))
}

pub async fn analyze_gap(
    recognizer: &ModelHandle<dyn EntityRecognizer>,
    cv_text: &str,
    job_text: &str,
) -> Result<SkillGap, AppError> {
    require_text("CV text", cv_text)?;
    require_text("Job text", job_text)?;
    let recognizer = recognizer.get()?;

    let cv_doc = recognizer.annotate(cv_text).await?;
    let job_doc = recognizer.annotate(job_text).await?;

    Ok(compute_gap(&extract_skills(&cv_doc), &extract_skills(&job_doc)))
}

pub(crate) fn require_text(what: &str, text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{what} cannot be empty")));
    }
    Ok(())
}
