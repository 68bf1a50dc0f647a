//! Graduation eligibility analysis.
//!
//! A fixed rule set evaluated against a classified transcript: mandatory
//! coverage, elective counts, credit total, GPA floor. Pure function:
//! identical inputs always produce an identical verdict, which is what
//! makes batch re-runs auditable. Evaluation never fails; an incomplete
//! transcript just yields more missing-requirement messages.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::course::ParsedCourse;
use crate::models::transcript::ClassifiedTranscript;
use crate::models::verdict::EligibilityVerdict;

use super::grading::classify::normalize_code;

/// Institution policy thresholds. Defaults reflect the observed policy;
/// every value is overridable per institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Course codes every graduate must have passed.
    pub required_mandatory_course_codes: BTreeSet<String>,
    pub min_technical_electives: usize,
    pub min_non_technical_electives: usize,
    pub min_total_credits: u32,
    pub min_gpa: f64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            required_mandatory_course_codes: BTreeSet::new(),
            min_technical_electives: 6,
            min_non_technical_electives: 3,
            min_total_credits: 240,
            min_gpa: 2.0,
        }
    }
}

/// Evaluate every rule independently; `is_eligible` is the AND of all five.
/// Message order follows rule order and is stable across runs.
pub fn evaluate(
    transcript: &ClassifiedTranscript,
    config: &EligibilityConfig,
) -> EligibilityVerdict {
    let mut missing_requirements = Vec::new();

    // Rule 1: mandatory coverage
    let passed_codes: BTreeSet<String> = transcript
        .mandatory
        .iter()
        .filter(|c| c.is_passed())
        .map(|c| normalize_code(&c.record.code))
        .collect();
    let missing_codes: Vec<&String> = config
        .required_mandatory_course_codes
        .iter()
        .filter(|required| !passed_codes.contains(&normalize_code(required)))
        .collect();
    let mandatory_complete = missing_codes.is_empty();
    if !mandatory_complete {
        let codes: Vec<&str> = missing_codes.iter().map(|c| c.as_str()).collect();
        missing_requirements.push(format!(
            "Missing mandatory courses: {}",
            codes.join(", ")
        ));
    }

    // Rule 2: technical electives
    let technical_passed = passed_count(&transcript.technical_electives);
    let technical_electives_complete = technical_passed >= config.min_technical_electives;
    if !technical_electives_complete {
        missing_requirements.push(format!(
            "Needs {} more technical elective(s) ({} of {} completed)",
            config.min_technical_electives - technical_passed,
            technical_passed,
            config.min_technical_electives
        ));
    }

    // Rule 3: non-technical electives
    let non_technical_passed = passed_count(&transcript.non_technical_electives);
    let non_technical_electives_complete =
        non_technical_passed >= config.min_non_technical_electives;
    if !non_technical_electives_complete {
        missing_requirements.push(format!(
            "Needs {} more non-technical elective(s) ({} of {} completed)",
            config.min_non_technical_electives - non_technical_passed,
            non_technical_passed,
            config.min_non_technical_electives
        ));
    }

    // Rule 4: credit minimum
    let credits_complete = transcript.total_credits >= f64::from(config.min_total_credits);
    if !credits_complete {
        missing_requirements.push(format!(
            "Needs {} more credits ({} of {} earned)",
            f64::from(config.min_total_credits) - transcript.total_credits,
            transcript.total_credits,
            config.min_total_credits
        ));
    }

    // Rule 5: GPA floor (compared unrounded)
    let gpa_complete = transcript.calculated_gpa >= config.min_gpa;
    if !gpa_complete {
        missing_requirements.push(format!(
            "GPA {:.2} is below the required {:.2}",
            transcript.gpa_display(),
            config.min_gpa
        ));
    }

    let is_eligible = mandatory_complete
        && technical_electives_complete
        && non_technical_electives_complete
        && credits_complete
        && gpa_complete;

    tracing::info!(
        student = %transcript.student_id,
        eligible = is_eligible,
        missing = missing_requirements.len(),
        "Eligibility evaluated"
    );

    EligibilityVerdict {
        mandatory_complete,
        technical_electives_complete,
        non_technical_electives_complete,
        credits_complete,
        gpa_complete,
        is_eligible,
        missing_requirements,
    }
}

fn passed_count(courses: &[ParsedCourse]) -> usize {
    courses.iter().filter(|c| c.is_passed()).count()
}
