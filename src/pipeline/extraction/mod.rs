pub mod content;
pub mod sanitize;

pub use content::{extract_document_text, ExtractedText, ExtractionMethod};
pub use sanitize::sanitize_text;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Document is empty")]
    EmptyDocument,

    #[error("No readable text could be recovered from the document")]
    NoReadableText,
}
