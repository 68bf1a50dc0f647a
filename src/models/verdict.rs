use serde::{Deserialize, Serialize};

/// Outcome of graduation eligibility analysis: one boolean per rule plus
/// human-readable messages for every requirement still missing.
///
/// Plain serializable record; presentation and storage live outside the
/// engine. Message order follows rule order and is stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub mandatory_complete: bool,
    pub technical_electives_complete: bool,
    pub non_technical_electives_complete: bool,
    pub credits_complete: bool,
    pub gpa_complete: bool,
    pub is_eligible: bool,
    pub missing_requirements: Vec<String>,
}

impl EligibilityVerdict {
    pub fn rule_flags(&self) -> [bool; 5] {
        [
            self.mandatory_complete,
            self.technical_electives_complete,
            self.non_technical_electives_complete,
            self.credits_complete,
            self.gpa_complete,
        ]
    }
}
