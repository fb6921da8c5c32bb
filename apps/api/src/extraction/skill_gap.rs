use std::collections::BTreeSet;

use crate::models::cv::SkillGap;

/// matched = cv ∩ job, missing = job − cv. Both lists come out sorted.
pub fn compute_gap(cv_skills: &BTreeSet<String>, job_skills: &BTreeSet<String>) -> SkillGap {
    SkillGap {
        matched_skills: job_skills.intersection(cv_skills).cloned().collect(),
        missing_skills: job_skills.difference(cv_skills).cloned().collect(),
    }
}
