use crate::extraction::document::ResumeDocument;
use crate::models::cv::{EducationEntry, ExperienceEntry};

pub const MAX_EXPERIENCE: usize = 5;
pub const MAX_EDUCATION: usize = 3;

const EDUCATION_KEYWORDS: [&str; 4] = ["university", "college", "institute", "school"];

/// Splits organisation entities into experience and education buckets.
///
/// An organisation whose text names an educational keyword goes to education,
/// everything else to experience. Each bucket keeps scan order and is capped.
pub fn partition_organizations(doc: &ResumeDocument) -> (Vec<ExperienceEntry>, Vec<EducationEntry>) {
    let mut experience = Vec::new();
    let mut education = Vec::new();

    for org in doc.organizations() {
        if is_educational(&org.text) {
            education.push(EducationEntry::from_institution(org.text.clone()));
        } else {
            experience.push(ExperienceEntry::from_company(org.text.clone()));
        }
    }

    experience.truncate(MAX_EXPERIENCE);
    education.truncate(MAX_EDUCATION);
    (experience, education)
}

fn is_educational(org_text: &str) -> bool {
    let lowered = org_text.to_lowercase();
    EDUCATION_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
