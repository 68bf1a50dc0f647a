//! Course classification and derived-metric computation.
//!
//! Turns a transcript draft into a `ClassifiedTranscript`: every course
//! resolved to one of the three eligibility categories, GPA and passed
//! credits recomputed from the course list. Classification is a pure
//! lookup — a per-row declared type wins, then the institution's code→type
//! map; an unresolvable course is an error unless the caller explicitly
//! opted into defaulting, so eligibility totals are never silently skewed.

use std::collections::HashMap;

use crate::models::course::ParsedCourse;
use crate::models::enums::CourseType;
use crate::models::transcript::{ClassifiedTranscript, StudentTranscriptDraft};

use super::gpa::{compute_gpa, total_passed_credits};
use super::ClassifyError;

/// Institution-supplied course-code → course-type map.
/// Codes are normalized (uppercased, inner whitespace stripped) so "BLM 101"
/// and "blm101" resolve identically.
#[derive(Debug, Clone, Default)]
pub struct CourseTypeMap {
    by_code: HashMap<String, CourseType>,
}

impl CourseTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: &str, course_type: CourseType) {
        self.by_code.insert(normalize_code(code), course_type);
    }

    pub fn get(&self, code: &str) -> Option<CourseType> {
        self.by_code.get(&normalize_code(code)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl FromIterator<(String, CourseType)> for CourseTypeMap {
    fn from_iter<T: IntoIterator<Item = (String, CourseType)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (code, course_type) in iter {
            map.insert(&code, course_type);
        }
        map
    }
}

pub(crate) fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Classification policy knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyOptions {
    /// Treat courses with no declared or mapped type as Mandatory instead
    /// of failing. Off by default.
    pub default_unclassified_to_mandatory: bool,
}

/// Classify every course of a draft and recompute derived metrics.
///
/// `declared_gpa` is carried over for audit only; `calculated_gpa` always
/// comes from the course list.
pub fn classify_transcript(
    draft: &StudentTranscriptDraft,
    type_map: &CourseTypeMap,
    options: &ClassifyOptions,
) -> Result<ClassifiedTranscript, ClassifyError> {
    let mut mandatory = Vec::new();
    let mut technical = Vec::new();
    let mut non_technical = Vec::new();
    let mut all_courses = Vec::with_capacity(draft.courses.len());

    for entry in &draft.courses {
        let course_type = match entry.declared_type.or_else(|| type_map.get(&entry.record.code)) {
            Some(found) => found,
            None if options.default_unclassified_to_mandatory => CourseType::Mandatory,
            None => {
                return Err(ClassifyError::UnclassifiedCourse {
                    code: entry.record.code.clone(),
                })
            }
        };

        let course = ParsedCourse::from_record(entry.record.clone(), course_type);
        all_courses.push(course.clone());
        match course_type {
            CourseType::Mandatory => mandatory.push(course),
            CourseType::TechnicalElective => technical.push(course),
            CourseType::NonTechnicalElective => non_technical.push(course),
        }
    }

    let calculated_gpa = compute_gpa(&all_courses);
    let total_credits = total_passed_credits(&all_courses);

    tracing::info!(
        student = %draft.student_id,
        gpa = calculated_gpa,
        credits = total_credits,
        courses = all_courses.len(),
        "Transcript classified"
    );

    Ok(ClassifiedTranscript {
        student_id: draft.student_id.clone(),
        student_name: draft.student_name.clone(),
        department: draft.department.clone(),
        declared_gpa: draft.declared_gpa,
        calculated_gpa,
        total_credits,
        mandatory,
        technical_electives: technical,
        non_technical_electives: non_technical,
    })
}
