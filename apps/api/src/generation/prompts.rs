// Prompt templates for the career-advice generator.
// Every task shares the same layout; only the persona and closing instruction differ.

use crate::errors::AppError;

/// Advice categories accepted by `/ai-generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    CvOptimization,
    CoverLetter,
    InterviewPrep,
    SkillEnhancement,
}

impl TaskKind {
    pub fn parse(tag: &str) -> Result<Self, AppError> {
        match tag {
            "cv_optimization" => Ok(TaskKind::CvOptimization),
            "cover_letter" => Ok(TaskKind::CoverLetter),
            "interview_prep" => Ok(TaskKind::InterviewPrep),
            "skill_enhancement" => Ok(TaskKind::SkillEnhancement),
            other => Err(AppError::InvalidInput(format!("Invalid task type: '{other}'"))),
        }
    }

    pub fn persona(self) -> &'static str {
        match self {
            TaskKind::CvOptimization | TaskKind::CoverLetter => "an expert career coach",
            TaskKind::InterviewPrep => "an expert interview coach",
            TaskKind::SkillEnhancement => "a career development advisor",
        }
    }

    pub fn closing_instruction(self) -> &'static str {
        match self {
            TaskKind::CvOptimization => CV_OPTIMIZATION_CLOSING,
            TaskKind::CoverLetter => COVER_LETTER_CLOSING,
            TaskKind::InterviewPrep => INTERVIEW_PREP_CLOSING,
            TaskKind::SkillEnhancement => SKILL_ENHANCEMENT_CLOSING,
        }
    }
}

pub const CV_OPTIMIZATION_CLOSING: &str =
    "Suggest specific improvements to the CV so it better matches the job description.";

pub const COVER_LETTER_CLOSING: &str =
    "Write a personalized cover letter draft for this job application.";

pub const INTERVIEW_PREP_CLOSING: &str = "Generate a list of likely interview questions for this job, \
    and provide suggested answers based on the candidate's CV.";

pub const SKILL_ENHANCEMENT_CLOSING: &str = "List the most important skills the candidate should learn \
    or improve to be a better fit for this job, and suggest resources for each skill.";

/// Assembles the prompt. A missing job text leaves its line empty; the user
/// instruction line only appears when the message is non-empty.
pub fn build_prompt(
    task: TaskKind,
    cv_text: &str,
    job_text: Option<&str>,
    user_message: Option<&str>,
) -> String {
    let mut prompt = format!(
        "You are {}. Here is a job description:\n{}\nAnd here is a candidate's CV:\n{}\n",
        task.persona(),
        job_text.unwrap_or_default(),
        cv_text
    );
    if let Some(message) = user_message.filter(|m| !m.is_empty()) {
        prompt.push_str(&format!("\nUser instruction: {message}\n"));
    }
    prompt.push('\n');
    prompt.push_str(task.closing_instruction());
    prompt
}
