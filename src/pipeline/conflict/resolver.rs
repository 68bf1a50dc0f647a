use uuid::Uuid;

use crate::models::transcript::{FieldValue, StudentTranscriptDraft};

use super::detector::ConflictGroup;
use super::ConflictError;

/// Holds unresolved conflict groups until a human commits a decision.
///
/// Resolution is one-shot: the chosen entry becomes the canonical record
/// and the group is gone; a second attempt on the same id fails with
/// `UnknownConflict`. The registry is a plain owned value — hosts that
/// accept concurrent resolution requests serialize them per conflict id.
#[derive(Debug, Default)]
pub struct ConflictRegistry {
    groups: Vec<ConflictGroup>,
}

impl ConflictRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, group: ConflictGroup) {
        self.groups.push(group);
    }

    pub fn register_all(&mut self, groups: impl IntoIterator<Item = ConflictGroup>) {
        self.groups.extend(groups);
    }

    /// Unresolved groups, in registration order.
    pub fn list(&self) -> &[ConflictGroup] {
        &self.groups
    }

    pub fn get(&self, id: Uuid) -> Option<&ConflictGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Commit a human decision: the chosen entry becomes the one canonical
    /// transcript, tagged with the group's shared identity, and the group
    /// is consumed.
    pub fn resolve(
        &mut self,
        id: Uuid,
        chosen_index: usize,
    ) -> Result<StudentTranscriptDraft, ConflictError> {
        let position = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(ConflictError::UnknownConflict { id })?;

        if chosen_index >= self.groups[position].entries.len() {
            return Err(ConflictError::InvalidEntry {
                id,
                index: chosen_index,
                available: self.groups[position].entries.len(),
            });
        }

        let group = self.groups.remove(position);
        let mut canonical = group.entries[chosen_index].clone();
        canonical.student_id = FieldValue::resolved(group.student_id.clone());
        canonical.student_name = group.student_name;
        canonical.department = group.department;

        tracing::info!(
            conflict = %id,
            student = %group.student_id,
            chosen = chosen_index,
            "Conflict resolved"
        );

        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::{CourseEntry, RawCourseRecord};
    use crate::models::enums::Grade;
    use crate::pipeline::conflict::detect_conflicts;

    fn submission(gpa: f64, course_code: &str) -> StudentTranscriptDraft {
        let mut draft = StudentTranscriptDraft::new(
            FieldValue::resolved("123"),
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
        draft
    }

    fn registry_with_one_conflict() -> (ConflictRegistry, Uuid) {
        let outcome = detect_conflicts(vec![submission(3.40, "CS101"), submission(3.80, "CS102")]);
        let mut registry = ConflictRegistry::new();
        registry.register_all(outcome.conflicts);
        let id = registry.list()[0].id;
        (registry, id)
    }

    #[test]
    fn resolving_returns_chosen_entry_verbatim() {
        let (mut registry, id) = registry_with_one_conflict();
        let canonical = registry.resolve(id, 1).unwrap();
        assert_eq!(canonical.courses.len(), 1);
        assert_eq!(canonical.courses[0].record.code, "CS102");
        assert_eq!(canonical.declared_gpa, Some(3.80));
        assert_eq!(canonical.student_id, FieldValue::resolved("123"));
    }

    #[test]
    fn resolution_consumes_the_group() {
        let (mut registry, id) = registry_with_one_conflict();
        registry.resolve(id, 0).unwrap();
        assert!(registry.is_empty());
        let err = registry.resolve(id, 0).unwrap_err();
        assert!(matches!(err, ConflictError::UnknownConflict { id: e } if e == id));
    }

    #[test]
    fn unknown_id_rejected() {
        let mut registry = ConflictRegistry::new();
        let err = registry.resolve(Uuid::new_v4(), 0).unwrap_err();
        assert!(matches!(err, ConflictError::UnknownConflict { .. }));
    }

    #[test]
    fn out_of_range_index_rejected_without_consuming() {
        let (mut registry, id) = registry_with_one_conflict();
        let err = registry.resolve(id, 5).unwrap_err();
        assert!(matches!(
            err,
            ConflictError::InvalidEntry {
                index: 5,
                available: 2,
                ..
            }
        ));
        // The group must survive a bad index so the human can retry
        assert_eq!(registry.len(), 1);
        assert!(registry.resolve(id, 0).is_ok());
    }

    #[test]
    fn canonical_record_tagged_with_group_identity() {
        let outcome = detect_conflicts(vec![
            {
                let mut d = submission(3.40, "CS101");
                d.student_name = FieldValue::resolved("Ann Other");
                d
            },
            submission(3.80, "CS102"),
        ]);
        let mut registry = ConflictRegistry::new();
        registry.register_all(outcome.conflicts);
        let id = registry.list()[0].id;

        // Entry 1 had a different name field, but the group's shared
        // identity (taken from the first submission) wins
        let canonical = registry.resolve(id, 1).unwrap();
        assert_eq!(canonical.student_name, FieldValue::resolved("Ann Other"));
        assert_eq!(canonical.department, FieldValue::resolved("CE"));
    }

    #[test]
    fn other_groups_untouched_by_resolution() {
        let mut a = submission(3.40, "CS101");
        a.student_id = FieldValue::resolved("111");
        let mut a2 = submission(3.80, "CS102");
        a2.student_id = FieldValue::resolved("111");
        let mut b = submission(2.40, "EE101");
        b.student_id = FieldValue::resolved("222");
        let mut b2 = submission(2.80, "EE102");
        b2.student_id = FieldValue::resolved("222");

        let outcome = detect_conflicts(vec![a, a2, b, b2]);
        let mut registry = ConflictRegistry::new();
        registry.register_all(outcome.conflicts);
        assert_eq!(registry.len(), 2);

        let first_id = registry.list()[0].id;
        registry.resolve(first_id, 0).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list()[0].student_id, "222");
    }
}
