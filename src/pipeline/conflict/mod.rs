//! Duplicate-submission detection and human-driven resolution.
//!
//! One uploaded batch can contain several submission lines for the same
//! student. Lines whose declared GPAs agree are the same submission split
//! across rows and merge; lines that disagree beyond tolerance are distinct
//! conflicting records that a human must choose between.

pub mod detector;
pub mod resolver;

pub use detector::{detect_conflicts, BatchOutcome, ConflictGroup, GPA_EPSILON};
pub use resolver::ConflictRegistry;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConflictError {
    #[error("Conflict {id} does not exist or was already resolved")]
    UnknownConflict { id: Uuid },

    #[error("Conflict {id} has {available} entries; entry index {index} is out of range")]
    InvalidEntry {
        id: Uuid,
        index: usize,
        available: usize,
    },
}
