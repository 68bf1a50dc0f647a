use serde::{Deserialize, Serialize};

use super::enums::{CourseType, Grade};

/// One course line as recovered from a transcript source.
/// Immutable once produced by a parse call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCourseRecord {
    pub code: String,
    pub name: String,
    /// Academic-load units for the course; never negative.
    pub credit: f64,
    pub grade: Grade,
    /// Semester/term label the course was taken in, e.g. "2021-2022 Güz".
    pub semester: String,
}

/// A course inside a transcript draft: the raw record plus the course type
/// the source declared, when it declared one. Document-extracted transcripts
/// carry no type column, so `declared_type` stays None until classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub record: RawCourseRecord,
    pub declared_type: Option<CourseType>,
}

impl CourseEntry {
    pub fn untyped(record: RawCourseRecord) -> Self {
        Self {
            record,
            declared_type: None,
        }
    }

    pub fn typed(record: RawCourseRecord, course_type: CourseType) -> Self {
        Self {
            record,
            declared_type: Some(course_type),
        }
    }
}

/// A fully classified course: raw record + resolved type + derived points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCourse {
    pub record: RawCourseRecord,
    pub course_type: CourseType,
    pub grade_points: f64,
}

impl ParsedCourse {
    /// Build from a raw record; grade points come from the fixed grade table.
    pub fn from_record(record: RawCourseRecord, course_type: CourseType) -> Self {
        let grade_points = record.grade.points();
        Self {
            record,
            course_type,
            grade_points,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.record.grade.is_passing()
    }
}
