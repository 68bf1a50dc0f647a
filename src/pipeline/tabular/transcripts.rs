//! Front ends that turn header-validated rows into transcript drafts.
//!
//! Two upload shapes exist in the wild: the eligibility table (one course
//! per row, rows grouped by student) and the conflict batch (one submission
//! line per row, each with its own declared GPA). Both coerce primitives
//! here; the raw parser stays string-only.

use crate::models::{
    course::{CourseEntry, RawCourseRecord},
    enums::{CourseType, Grade},
    transcript::{FieldValue, StudentTranscriptDraft},
};
use crate::pipeline::structuring::locale::parse_locale_f64;
use crate::pipeline::warnings::IngestWarning;

use super::{TableParse, TableRow};

/// Build one draft per student from eligibility-oriented rows.
///
/// Rows sharing a `Student ID` merge into a single draft; identity fields
/// come from the first row seen for that student. Returns drafts in
/// first-seen order plus coercion warnings.
pub fn drafts_from_eligibility_rows(
    parse: &TableParse,
) -> (Vec<StudentTranscriptDraft>, Vec<IngestWarning>) {
    let mut drafts: Vec<StudentTranscriptDraft> = Vec::new();
    let mut warnings = Vec::new();

    for row in &parse.rows {
        let student_id = row.get("Student ID").unwrap_or_default().to_string();
        if student_id.is_empty() {
            warnings.push(IngestWarning::UnparsableValue {
                field: "Student ID".into(),
                value: String::new(),
            });
            continue;
        }

        let course = match course_from_row(
            row,
            "Course Code",
            "Course Name",
            "Credits",
            "Semester",
            &mut warnings,
        ) {
            Some(record) => record,
            None => continue,
        };

        let declared_type = match row.get("Course Type") {
            Some(label) if !label.is_empty() => {
                let parsed = CourseType::from_label(label);
                if parsed.is_none() {
                    warnings.push(IngestWarning::UnparsableValue {
                        field: "Course Type".into(),
                        value: label.to_string(),
                    });
                }
                parsed
            }
            _ => None,
        };

        let entry = CourseEntry {
            record: course,
            declared_type,
        };

        let existing = drafts
            .iter()
            .position(|d| d.student_id.as_str() == Some(student_id.as_str()));
        match existing {
            Some(index) => drafts[index].courses.push(entry),
            None => {
                let mut draft = StudentTranscriptDraft::new(
                    FieldValue::resolved(student_id),
                    FieldValue::from_option(row.get("Student Name").map(str::to_string)),
                    FieldValue::from_option(row.get("Department").map(str::to_string)),
                );
                draft.source_row = Some(row.line_number);
                draft.courses.push(entry);
                drafts.push(draft);
            }
        }
    }

    tracing::info!(
        students = drafts.len(),
        warnings = warnings.len(),
        "Eligibility rows ingested"
    );
    (drafts, warnings)
}

/// Build one draft per row from conflict-oriented batch rows.
///
/// Each row is a distinct submission line carrying its own declared GPA and
/// source-row provenance; grouping and merging happen in conflict detection.
pub fn drafts_from_conflict_rows(
    parse: &TableParse,
) -> (Vec<StudentTranscriptDraft>, Vec<IngestWarning>) {
    let mut drafts = Vec::new();
    let mut warnings = Vec::new();

    for row in &parse.rows {
        let student_id = row.get("StudentID").unwrap_or_default().to_string();
        if student_id.is_empty() {
            warnings.push(IngestWarning::UnparsableValue {
                field: "StudentID".into(),
                value: String::new(),
            });
            continue;
        }

        let course = match course_from_row(
            row,
            "CourseCode",
            "CourseName",
            "Credit",
            "Semester",
            &mut warnings,
        ) {
            Some(record) => record,
            None => continue,
        };

        let declared_gpa = match row.get("GPA") {
            Some(raw) if !raw.is_empty() => {
                let parsed = parse_locale_f64(raw);
                if parsed.is_none() {
                    warnings.push(IngestWarning::UnparsableValue {
                        field: "GPA".into(),
                        value: raw.to_string(),
                    });
                }
                parsed
            }
            _ => None,
        };

        let mut draft = StudentTranscriptDraft::new(
            FieldValue::resolved(student_id),
            FieldValue::from_option(row.get("StudentName").map(str::to_string)),
            FieldValue::from_option(row.get("Department").map(str::to_string)),
        );
        draft.courses.push(CourseEntry::untyped(course));
        draft.declared_gpa = declared_gpa;
        draft.source_row = Some(row.line_number);
        drafts.push(draft);
    }

    tracing::info!(
        submissions = drafts.len(),
        warnings = warnings.len(),
        "Conflict batch rows ingested"
    );
    (drafts, warnings)
}

/// Coerce one row's course columns into a raw record.
/// Unknown grade or bad credit skips the course with a warning, not fatally.
fn course_from_row(
    row: &TableRow,
    code_col: &str,
    name_col: &str,
    credit_col: &str,
    semester_col: &str,
    warnings: &mut Vec<IngestWarning>,
) -> Option<RawCourseRecord> {
    let code = row.get(code_col).unwrap_or_default().to_string();
    let grade_raw = row.get("Grade").unwrap_or_default();

    let grade = match Grade::from_token(grade_raw) {
        Some(grade) => grade,
        None => {
            warnings.push(IngestWarning::UnknownGrade {
                line: row.line_number,
                course_code: code,
                grade: grade_raw.to_string(),
            });
            return None;
        }
    };

    let credit_raw = row.get(credit_col).unwrap_or_default();
    let credit = match parse_locale_f64(credit_raw).filter(|c| *c >= 0.0) {
        Some(credit) => credit,
        None => {
            warnings.push(IngestWarning::UnparsableValue {
                field: credit_col.into(),
                value: credit_raw.to_string(),
            });
            return None;
        }
    };

    Some(RawCourseRecord {
        code,
        name: row.get(name_col).unwrap_or_default().to_string(),
        credit,
        grade,
        semester: row.get(semester_col).unwrap_or_default().to_string(),
    })
}
