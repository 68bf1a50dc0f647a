pub mod courses;
pub mod extract;
pub mod locale;
pub mod rules;

pub use extract::{extract_fields, extract_transcript, FieldExtraction};
pub use rules::{default_rules, FieldRule, TranscriptField};
