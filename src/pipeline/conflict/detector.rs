use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::transcript::{FieldValue, StudentTranscriptDraft};

/// Two declared GPAs closer than this are the same submission.
pub const GPA_EPSILON: f64 = 1e-3;

/// A student with more than one distinct submission in a batch.
/// Transient: exists only until a resolution decision consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictGroup {
    pub id: Uuid,
    pub student_id: String,
    pub student_name: FieldValue,
    pub department: FieldValue,
    /// Distinct submissions, verbatim, with their source-row provenance.
    pub entries: Vec<StudentTranscriptDraft>,
}

/// Result of one batch-level conflict pass.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Single-submission students: ready to persist.
    pub valid: Vec<StudentTranscriptDraft>,
    /// Students with disagreeing submissions, awaiting review.
    pub conflicts: Vec<ConflictGroup>,
}

/// Group a batch by student id and split same-vs-distinct submissions.
///
/// Within a student's rows, entries whose declared GPAs agree within
/// `GPA_EPSILON` merge their course lists (first entry's metadata wins);
/// disagreeing entries stay separate. One resulting entry → valid record;
/// several → a `ConflictGroup` for human review. Drafts without a resolved
/// student id cannot be grouped and pass through as singletons. Output
/// order follows first appearance in the batch.
pub fn detect_conflicts(batch: Vec<StudentTranscriptDraft>) -> BatchOutcome {
    let mut groups: Vec<(Option<String>, Vec<StudentTranscriptDraft>)> = Vec::new();

    for draft in batch {
        let key = draft.student_id.as_str().map(str::to_string);
        let slot = match &key {
            Some(id) => groups
                .iter()
                .position(|(k, _)| k.as_deref() == Some(id.as_str())),
            // Unresolved ids never merge with anything
            None => None,
        };
        match slot {
            Some(index) => merge_or_append(&mut groups[index].1, draft),
            None => groups.push((key, vec![draft])),
        }
    }

    let mut outcome = BatchOutcome::default();
    for (key, mut entries) in groups {
        if entries.len() == 1 {
            outcome.valid.push(entries.remove(0));
            continue;
        }
        let first = &entries[0];
        let group = ConflictGroup {
            id: Uuid::new_v4(),
            student_id: key.unwrap_or_default(),
            student_name: first.student_name.clone(),
            department: first.department.clone(),
            entries,
        };
        tracing::warn!(
            student = %group.student_id,
            submissions = group.entries.len(),
            "Conflicting submissions detected"
        );
        outcome.conflicts.push(group);
    }

    tracing::info!(
        valid = outcome.valid.len(),
        conflicts = outcome.conflicts.len(),
        "Batch conflict pass complete"
    );
    outcome
}

/// Merge a draft into the entry whose declared GPA agrees, or append it as
/// a new distinct entry.
fn merge_or_append(entries: &mut Vec<StudentTranscriptDraft>, draft: StudentTranscriptDraft) {
    match entries
        .iter_mut()
        .find(|e| gpa_agrees(e.declared_gpa, draft.declared_gpa))
    {
        Some(existing) => existing.courses.extend(draft.courses),
        None => entries.push(draft),
    }
}

fn gpa_agrees(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() <= GPA_EPSILON,
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::{CourseEntry, RawCourseRecord};
    use crate::models::enums::Grade;

    fn submission(id: &str, gpa: f64, course_code: &str, row: usize) -> StudentTranscriptDraft {
        let mut draft = StudentTranscriptDraft::new(
            FieldValue::resolved(id),
            FieldValue::resolved("Ann"),
            FieldValue::resolved("CE"),
        );
        draft.courses.push(CourseEntry::untyped(RawCourseRecord {
            code: course_code.into(),
            name: format!("{course_code} name"),
            credit: 4.0,
            grade: Grade::AA,
            semester: "F23".into(),
        }));
        draft.declared_gpa = Some(gpa);
        draft.source_row = Some(row);
        draft
    }

    // ── Merging within epsilon ──────────────────────────────────────

    #[test]
    fn gpas_within_epsilon_merge_course_lists() {
        let outcome = detect_conflicts(vec![
            submission("123", 3.4000, "CS101", 2),
            submission("123", 3.4005, "CS102", 3),
        ]);
        assert!(outcome.conflicts.is_empty());
        assert_eq!(outcome.valid.len(), 1);
        let merged = &outcome.valid[0];
        assert_eq!(merged.courses.len(), 2);
        assert_eq!(merged.courses[0].record.code, "CS101");
        assert_eq!(merged.courses[1].record.code, "CS102");
        // First entry's metadata wins
        assert_eq!(merged.declared_gpa, Some(3.4000));
        assert_eq!(merged.source_row, Some(2));
    }

    #[test]
    fn disagreeing_gpas_form_a_conflict_group() {
        let outcome = detect_conflicts(vec![
            submission("123", 3.40, "CS101", 2),
            submission("123", 3.80, "CS102", 3),
        ]);
        assert!(outcome.valid.is_empty());
        assert_eq!(outcome.conflicts.len(), 1);
        let group = &outcome.conflicts[0];
        assert_eq!(group.student_id, "123");
        assert_eq!(group.entries.len(), 2);
        assert_eq!(group.entries[0].declared_gpa, Some(3.40));
        assert_eq!(group.entries[1].declared_gpa, Some(3.80));
        // Provenance survives verbatim
        assert_eq!(group.entries[0].source_row, Some(2));
        assert_eq!(group.entries[1].source_row, Some(3));
    }

    #[test]
    fn rows_of_same_submission_still_merge_inside_a_conflict() {
        let outcome = detect_conflicts(vec![
            submission("123", 3.40, "CS101", 2),
            submission("123", 3.80, "CS201", 3),
            submission("123", 3.40, "CS102", 4),
        ]);
        let group = &outcome.conflicts[0];
        assert_eq!(group.entries.len(), 2);
        assert_eq!(group.entries[0].courses.len(), 2, "3.40 rows merged");
        assert_eq!(group.entries[1].courses.len(), 1);
    }

    // ── Grouping ────────────────────────────────────────────────────

    #[test]
    fn different_students_never_interact() {
        let outcome = detect_conflicts(vec![
            submission("123", 3.40, "CS101", 2),
            submission("456", 3.80, "CS102", 3),
        ]);
        assert_eq!(outcome.valid.len(), 2);
        assert!(outcome.conflicts.is_empty());
    }

    #[test]
    fn output_order_follows_first_appearance() {
        let outcome = detect_conflicts(vec![
            submission("9", 3.0, "A101", 2),
            submission("1", 3.0, "B101", 3),
            submission("5", 3.0, "C101", 4),
        ]);
        let ids: Vec<_> = outcome
            .valid
            .iter()
            .map(|d| d.student_id.as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["9", "1", "5"]);
    }

    #[test]
    fn missing_gpas_agree_with_each_other() {
        let mut a = submission("123", 0.0, "CS101", 2);
        a.declared_gpa = None;
        let mut b = submission("123", 0.0, "CS102", 3);
        b.declared_gpa = None;
        let outcome = detect_conflicts(vec![a, b]);
        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.valid[0].courses.len(), 2);
    }

    #[test]
    fn missing_gpa_conflicts_with_declared_gpa() {
        let mut a = submission("123", 0.0, "CS101", 2);
        a.declared_gpa = None;
        let b = submission("123", 3.40, "CS102", 3);
        let outcome = detect_conflicts(vec![a, b]);
        assert_eq!(outcome.conflicts.len(), 1);
    }

    #[test]
    fn unresolved_ids_pass_through_as_singletons() {
        let mut a = submission("x", 3.40, "CS101", 2);
        a.student_id = FieldValue::Unresolved;
        let mut b = submission("x", 3.80, "CS102", 3);
        b.student_id = FieldValue::Unresolved;
        let outcome = detect_conflicts(vec![a, b]);
        assert_eq!(outcome.valid.len(), 2, "unresolved ids never merge");
        assert!(outcome.conflicts.is_empty());
    }

    #[test]
    fn empty_batch_is_empty_outcome() {
        let outcome = detect_conflicts(vec![]);
        assert!(outcome.valid.is_empty());
        assert!(outcome.conflicts.is_empty());
    }
}
