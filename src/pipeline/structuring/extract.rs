//! Unified field extraction over a line-oriented text stream.
//!
//! Both ingestion paths feed lines through `extract_fields`: document text
//! split on newlines, or tabular rows flattened to "label: value" lines.
//! The hard logic lives here once, parameterized by the rule table.

use std::collections::BTreeMap;

use crate::models::course::{CourseEntry, RawCourseRecord};
use crate::models::transcript::{FieldValue, StudentTranscriptDraft};
use crate::pipeline::warnings::IngestWarning;

use super::courses::{parse_course_row, parse_semester_header, SemesterHeader};
use super::locale::{parse_locale_date, parse_locale_f64};
use super::rules::{default_rules, FieldRule, TranscriptField};

/// Raw extraction output: matched fields, recovered course rows, warnings.
#[derive(Debug, Default)]
pub struct FieldExtraction {
    pub fields: BTreeMap<TranscriptField, String>,
    pub courses: Vec<RawCourseRecord>,
    pub warnings: Vec<IngestWarning>,
}

/// Apply the rule table over a line stream.
///
/// Per line, the first matching rule wins and the line is consumed; for a
/// field matched on several lines the first occurrence is kept. A semester
/// header switches into course-table mode: following lines are matched
/// against the course-row shapes and append records tagged with the current
/// semester. A header with a different year range rolls the mode over to
/// the new semester. Lines that are neither course rows nor headers still
/// run through the rule table, so trailing label lines (a GANO footer, a
/// graduation date) are recovered from within the table region.
pub fn extract_fields<'a, I>(lines: I, rules: &[FieldRule]) -> FieldExtraction
where
    I: IntoIterator<Item = &'a str>,
{
    let mut extraction = FieldExtraction::default();
    let mut current_semester: Option<SemesterHeader> = None;

    for line in lines {
        if let Some(header) = parse_semester_header(line) {
            current_semester = Some(header);
            continue;
        }

        if let Some(semester) = &current_semester {
            if let Some(record) = parse_course_row(line, &semester.label()) {
                extraction.courses.push(record);
                continue;
            }
        }

        for rule in rules {
            if extraction.fields.contains_key(&rule.field) {
                continue;
            }
            if let Some(caps) = rule.pattern.captures(line) {
                extraction
                    .fields
                    .insert(rule.field, caps[1].trim().to_string());
                break;
            }
        }
    }

    extraction
}

/// Run the default rule table over a line stream and assemble a draft.
///
/// Required identity fields (student id, name, department) that were never
/// matched become `FieldValue::Unresolved` with a warning, the degrade-
/// rather-than-fail policy for partially-unreadable documents. Values that
/// match but fail coercion (dates, GPA) also warn and stay unset.
pub fn extract_transcript<'a, I>(lines: I) -> (StudentTranscriptDraft, Vec<IngestWarning>)
where
    I: IntoIterator<Item = &'a str>,
{
    let extraction = extract_fields(lines, default_rules());
    draft_from_extraction(extraction)
}

fn draft_from_extraction(
    mut extraction: FieldExtraction,
) -> (StudentTranscriptDraft, Vec<IngestWarning>) {
    let mut warnings = std::mem::take(&mut extraction.warnings);
    let fields = &extraction.fields;

    let student_id = required_field(fields, TranscriptField::StudentId, &mut warnings);
    let student_name = resolve_name(fields, &mut warnings);
    let department = required_field(fields, TranscriptField::Department, &mut warnings);

    let mut draft = StudentTranscriptDraft::new(student_id, student_name, department);
    draft.faculty = fields.get(&TranscriptField::Faculty).cloned();
    draft.program = fields.get(&TranscriptField::Program).cloned();
    draft.education_level = fields.get(&TranscriptField::EducationLevel).cloned();
    draft.education_language = fields.get(&TranscriptField::EducationLanguage).cloned();
    draft.registration_period = fields.get(&TranscriptField::RegistrationPeriod).cloned();
    draft.registration_type = fields.get(&TranscriptField::RegistrationType).cloned();

    draft.registration_date =
        coerce_date(fields, TranscriptField::RegistrationDate, &mut warnings);
    draft.graduation_date = coerce_date(fields, TranscriptField::GraduationDate, &mut warnings);

    if let Some(raw) = fields.get(&TranscriptField::DeclaredGpa) {
        draft.declared_gpa = parse_locale_f64(raw);
        if draft.declared_gpa.is_none() {
            warnings.push(IngestWarning::UnparsableValue {
                field: TranscriptField::DeclaredGpa.as_str().into(),
                value: raw.clone(),
            });
        }
    }

    draft.courses = extraction
        .courses
        .into_iter()
        .map(CourseEntry::untyped)
        .collect();

    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        student = %draft.student_id,
        courses = draft.courses.len(),
        warnings = warnings.len(),
        "Transcript draft extracted"
    );

    (draft, warnings)
}

/// A required field: unresolved marker plus warning when never matched.
fn required_field(
    fields: &BTreeMap<TranscriptField, String>,
    field: TranscriptField,
    warnings: &mut Vec<IngestWarning>,
) -> FieldValue {
    match fields.get(&field) {
        Some(value) if !value.trim().is_empty() => FieldValue::resolved(value.trim()),
        _ => {
            warnings.push(IngestWarning::MissingField {
                field: field.as_str().into(),
            });
            FieldValue::Unresolved
        }
    }
}

/// Student name: a combined label wins; otherwise given name and surname
/// concatenate; a single half is better than nothing.
fn resolve_name(
    fields: &BTreeMap<TranscriptField, String>,
    warnings: &mut Vec<IngestWarning>,
) -> FieldValue {
    if let Some(full) = fields.get(&TranscriptField::FullName) {
        return FieldValue::resolved(full.trim());
    }

    let given = fields.get(&TranscriptField::GivenName).map(|s| s.trim());
    let surname = fields.get(&TranscriptField::Surname).map(|s| s.trim());
    match (given, surname) {
        (Some(g), Some(s)) => FieldValue::resolved(format!("{g} {s}")),
        (Some(g), None) => FieldValue::resolved(g),
        (None, Some(s)) => FieldValue::resolved(s),
        (None, None) => {
            warnings.push(IngestWarning::MissingField {
                field: "student_name".into(),
            });
            FieldValue::Unresolved
        }
    }
}

fn coerce_date(
    fields: &BTreeMap<TranscriptField, String>,
    field: TranscriptField,
    warnings: &mut Vec<IngestWarning>,
) -> Option<chrono::NaiveDate> {
    let raw = fields.get(&field)?;
    let parsed = parse_locale_date(raw);
    if parsed.is_none() {
        warnings.push(IngestWarning::UnparsableValue {
            field: field.as_str().into(),
            value: raw.clone(),
        });
    }
    parsed
}
