pub mod course;
pub mod enums;
pub mod transcript;
pub mod verdict;

use thiserror::Error;

pub use course::{CourseEntry, ParsedCourse, RawCourseRecord};
pub use enums::{CourseType, Grade};
pub use transcript::{ClassifiedTranscript, FieldValue, StudentTranscriptDraft};
pub use verdict::EligibilityVerdict;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
