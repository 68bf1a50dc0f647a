pub mod classify;
pub mod gpa;

pub use classify::{classify_transcript, ClassifyOptions, CourseTypeMap};
pub use gpa::{compute_gpa, round_gpa, total_passed_credits};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Course '{code}' has no course type and default classification is disabled")]
    UnclassifiedCourse { code: String },
}
