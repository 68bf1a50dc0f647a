//! End-to-end ingestion entry points.
//!
//! Thin orchestration over the pipeline stages; hosts call these with raw
//! bytes/text they already read into memory. Each document is independent,
//! so callers may run them in parallel, one worker per upload, with no
//! shared state.

use crate::models::transcript::StudentTranscriptDraft;
use crate::pipeline::conflict::{detect_conflicts, BatchOutcome};
use crate::pipeline::extraction::{extract_document_text, ExtractionError, ExtractionMethod};
use crate::pipeline::structuring::extract_transcript;
use crate::pipeline::tabular::{
    drafts_from_conflict_rows, drafts_from_eligibility_rows, parse_delimited, TabularError,
    CONFLICT_HEADERS, ELIGIBILITY_HEADERS, ROW_DELIMITER,
};
use crate::pipeline::warnings::IngestWarning;

/// Result of ingesting one binary transcript document.
#[derive(Debug, Clone)]
pub struct DocumentIngest {
    pub draft: StudentTranscriptDraft,
    pub method: ExtractionMethod,
    pub warnings: Vec<IngestWarning>,
}

/// Raw document bytes → transcript draft.
///
/// Fatal only when no readable text exists at all; every recoverable
/// problem degrades into warnings on the draft.
pub fn ingest_document(bytes: &[u8]) -> Result<DocumentIngest, ExtractionError> {
    let extracted = extract_document_text(bytes)?;
    let (draft, warnings) = extract_transcript(extracted.lines());
    Ok(DocumentIngest {
        draft,
        method: extracted.method,
        warnings,
    })
}

/// Eligibility-oriented delimited table → one draft per student.
pub fn ingest_eligibility_table(
    text: &str,
) -> Result<(Vec<StudentTranscriptDraft>, Vec<IngestWarning>), TabularError> {
    let parse = parse_delimited(text, &ELIGIBILITY_HEADERS, ROW_DELIMITER)?;
    let (drafts, mut warnings) = drafts_from_eligibility_rows(&parse);
    let mut all_warnings = parse.warnings;
    all_warnings.append(&mut warnings);
    Ok((drafts, all_warnings))
}

/// Conflict-oriented batch table → valid records plus conflict groups.
pub fn ingest_conflict_batch(
    text: &str,
) -> Result<(BatchOutcome, Vec<IngestWarning>), TabularError> {
    let parse = parse_delimited(text, &CONFLICT_HEADERS, ROW_DELIMITER)?;
    let (drafts, mut warnings) = drafts_from_conflict_rows(&parse);
    let mut all_warnings = parse.warnings;
    all_warnings.append(&mut warnings);
    Ok((detect_conflicts(drafts), all_warnings))
}
