//! Storage seam.
//!
//! The engine itself is storage-agnostic and side-effect-free; hosts inject
//! a repository into their own orchestration for persisting canonical
//! records. The in-memory implementation backs tests and hosts that have no
//! backend yet.

use thiserror::Error;

use crate::models::transcript::StudentTranscriptDraft;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("A transcript for student '{student_id}' already exists")]
    AlreadyExists { student_id: String },

    #[error("No transcript found for student '{student_id}'")]
    NotFound { student_id: String },

    #[error("Transcript has no resolved student id and cannot be stored")]
    MissingStudentId,
}

/// Create/list/delete over canonical transcript records, keyed by student id.
pub trait TranscriptRepository {
    fn create(&mut self, draft: StudentTranscriptDraft) -> Result<(), RepositoryError>;
    fn list(&self) -> Vec<StudentTranscriptDraft>;
    fn delete(&mut self, student_id: &str) -> Result<(), RepositoryError>;
}

/// Vec-backed repository: insertion order preserved, no persistence.
#[derive(Debug, Default)]
pub struct InMemoryTranscriptRepository {
    records: Vec<StudentTranscriptDraft>,
}

impl InMemoryTranscriptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranscriptRepository for InMemoryTranscriptRepository {
    fn create(&mut self, draft: StudentTranscriptDraft) -> Result<(), RepositoryError> {
        let student_id = draft
            .student_id
            .as_str()
            .ok_or(RepositoryError::MissingStudentId)?
            .to_string();

        if self
            .records
            .iter()
            .any(|r| r.student_id.as_str() == Some(student_id.as_str()))
        {
            return Err(RepositoryError::AlreadyExists { student_id });
        }

        self.records.push(draft);
        Ok(())
    }

    fn list(&self) -> Vec<StudentTranscriptDraft> {
        self.records.clone()
    }

    fn delete(&mut self, student_id: &str) -> Result<(), RepositoryError> {
        let position = self
            .records
            .iter()
            .position(|r| r.student_id.as_str() == Some(student_id));
        match position {
            Some(index) => {
                self.records.remove(index);
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                student_id: student_id.to_string(),
            }),
        }
    }
}
