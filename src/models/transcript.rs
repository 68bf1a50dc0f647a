use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::course::{CourseEntry, ParsedCourse};

/// An extracted field that may have survived extraction or not.
///
/// Partially-unreadable documents degrade gracefully: a field the rule
/// table never matched is carried as `Unresolved` (with a warning recorded
/// at extraction time) instead of being filled with a fabricated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Resolved(String),
    Unresolved,
}

impl FieldValue {
    pub fn resolved(value: impl Into<String>) -> Self {
        Self::Resolved(value.into())
    }

    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Self::Resolved(v),
            _ => Self::Unresolved,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Resolved(v) => Some(v),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(v) => write!(f, "{v}"),
            Self::Unresolved => write!(f, "(unresolved)"),
        }
    }
}

/// Per-student academic record produced by extraction.
/// `student_id` is the natural key across the pipeline. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentTranscriptDraft {
    pub student_id: FieldValue,
    pub student_name: FieldValue,
    pub department: FieldValue,
    pub faculty: Option<String>,
    pub program: Option<String>,
    pub education_level: Option<String>,
    pub education_language: Option<String>,
    pub registration_date: Option<NaiveDate>,
    pub registration_period: Option<String>,
    pub registration_type: Option<String>,
    pub graduation_date: Option<NaiveDate>,
    pub courses: Vec<CourseEntry>,
    /// GPA as printed on the source document. Retained for cross-check and
    /// conflict detection only — derived metrics always recompute.
    pub declared_gpa: Option<f64>,
    /// 1-based source row for batch-ingested submissions (conflict provenance).
    pub source_row: Option<usize>,
}

impl StudentTranscriptDraft {
    /// A draft with only the identity fields set; ingestion paths fill the rest.
    pub fn new(student_id: FieldValue, student_name: FieldValue, department: FieldValue) -> Self {
        Self {
            student_id,
            student_name,
            department,
            faculty: None,
            program: None,
            education_level: None,
            education_language: None,
            registration_date: None,
            registration_period: None,
            registration_type: None,
            graduation_date: None,
            courses: Vec::new(),
            declared_gpa: None,
            source_row: None,
        }
    }
}

/// A draft with derived metrics computed and courses sorted into the three
/// eligibility categories. `calculated_gpa` is always recomputed from the
/// course list, never trusted from `declared_gpa`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTranscript {
    pub student_id: FieldValue,
    pub student_name: FieldValue,
    pub department: FieldValue,
    pub declared_gpa: Option<f64>,
    /// Unrounded; use `gpa_display()` for the 2-decimal presentation value.
    pub calculated_gpa: f64,
    /// Sum of credits over passed courses.
    pub total_credits: f64,
    pub mandatory: Vec<ParsedCourse>,
    pub technical_electives: Vec<ParsedCourse>,
    pub non_technical_electives: Vec<ParsedCourse>,
}

impl ClassifiedTranscript {
    /// GPA rounded to 2 decimal places for display.
    pub fn gpa_display(&self) -> f64 {
        (self.calculated_gpa * 100.0).round() / 100.0
    }

    /// Whether the document's printed GPA agrees with the recomputed one.
    /// None when the source declared no GPA.
    pub fn matches_declared_gpa(&self, epsilon: f64) -> Option<bool> {
        self.declared_gpa
            .map(|declared| (declared - self.gpa_display()).abs() <= epsilon)
    }

    pub fn course_count(&self) -> usize {
        self.mandatory.len() + self.technical_electives.len() + self.non_technical_electives.len()
    }
}
