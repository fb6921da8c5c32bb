use serde::{Deserialize, Serialize};

/// Placeholder for role/degree fields that are not parsed yet.
pub const NOT_YET_EXTRACTED: &str = "Extracted from CV";
/// Placeholder for duration/year fields that are not parsed yet.
pub const TO_BE_EXTRACTED: &str = "To be extracted";

/// An organisation entity classified as a past employer.
/// Only `company` is real; the other fields are fixed placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
}

impl ExperienceEntry {
    pub fn from_company(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            position: NOT_YET_EXTRACTED.to_string(),
            duration: TO_BE_EXTRACTED.to_string(),
        }
    }
}

/// An organisation entity classified as an educational institution.
/// Only `institution` is real; the other fields are fixed placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

impl EducationEntry {
    pub fn from_institution(institution: impl Into<String>) -> Self {
        Self {
            institution: institution.into(),
            degree: NOT_YET_EXTRACTED.to_string(),
            year: TO_BE_EXTRACTED.to_string(),
        }
    }
}

/// Structured fields extracted from one résumé.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvProfile {
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

/// Contact details scraped from an uploaded résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Skill overlap between a résumé and a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}
