// Criterion extraction prompt templates.
// Each instruction is sent verbatim ahead of the CV text; see `build_prompt`.

use crate::models::criterion::Criterion;

pub const AWARDS_INSTRUCTION: &str =
    "Extract any nationally or internationally recognized awards mentioned in this CV.";

pub const MEMBERSHIP_INSTRUCTION: &str =
    "Extract memberships in associations that require outstanding achievements.";

pub const PRESS_INSTRUCTION: &str = "Extract any published material in professional or major \
    trade publications about the beneficiary.";

pub const JUDGING_INSTRUCTION: &str =
    "Extract evidence of participation as a judge of the work of others.";

pub const ORIGINAL_CONTRIBUTION_INSTRUCTION: &str = "Extract evidence of original scientific, \
    scholarly, or business-related contributions of major significance.";

pub const SCHOLARLY_ARTICLES_INSTRUCTION: &str =
    "Extract evidence of authorship of scholarly articles.";

pub const CRITICAL_EMPLOYMENT_INSTRUCTION: &str = "Extract evidence of employment in a critical \
    or essential capacity for distinguished organizations.";

pub const HIGH_REMUNERATION_INSTRUCTION: &str =
    "Extract evidence of commanding a high salary or other remuneration.";

pub fn default_instruction(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Awards => AWARDS_INSTRUCTION,
        Criterion::Membership => MEMBERSHIP_INSTRUCTION,
        Criterion::Press => PRESS_INSTRUCTION,
        Criterion::Judging => JUDGING_INSTRUCTION,
        Criterion::OriginalContribution => ORIGINAL_CONTRIBUTION_INSTRUCTION,
        Criterion::ScholarlyArticles => SCHOLARLY_ARTICLES_INSTRUCTION,
        Criterion::CriticalEmployment => CRITICAL_EMPLOYMENT_INSTRUCTION,
        Criterion::HighRemuneration => HIGH_REMUNERATION_INSTRUCTION,
    }
}

/// `{instruction}\n\nCV:\n{cv_text}`
pub fn build_prompt(instruction: &str, cv_text: &str) -> String {
    format!("{instruction}\n\nCV:\n{cv_text}")
}
