use serde::{Deserialize, Serialize};

/// Non-fatal events accumulated during ingestion and returned alongside
/// successful output so callers can audit partial-confidence extractions.
///
/// Fatal conditions (missing headers, unreadable documents, unclassified
/// courses, unknown conflicts) are module errors, not warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestWarning {
    /// A delimited row whose field count did not match the header count.
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A grade token outside the known vocabulary; the course was skipped.
    UnknownGrade {
        line: usize,
        course_code: String,
        grade: String,
    },
    /// A required transcript field the rule table never matched.
    MissingField { field: String },
    /// A value that failed numeric/date coercion; the field was left unset.
    UnparsableValue { field: String, value: String },
}

impl std::fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "Row at line {line} skipped: expected {expected} fields, found {found}"
            ),
            Self::UnknownGrade {
                line,
                course_code,
                grade,
            } => write!(
                f,
                "Course {course_code} at line {line} skipped: unknown grade '{grade}'"
            ),
            Self::MissingField { field } => {
                write!(f, "Field '{field}' not found in document; left unresolved")
            }
            Self::UnparsableValue { field, value } => {
                write!(f, "Could not parse '{value}' for field '{field}'")
            }
        }
    }
}
