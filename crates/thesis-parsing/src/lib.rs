use std::path::Path;

use thiserror::Error;

pub mod advisor;
pub mod authors;
pub mod config;
pub mod extractor;
pub mod ner;
pub mod section;
pub mod text_processing;
pub mod title;
pub mod variant;

pub use advisor::{AdvisorStrategy, KeywordEntity, KeywordLine};
pub use authors::{AfterTitle, AuthorStrategy, EntityWindow, GrammarChunks};
pub use config::{
    ConfigError, ExtractionConfig, ExtractionConfigBuilder, ListOverride, ParagraphStrategy,
};
pub use extractor::ThesisExtractor;
pub use ner::{ChunkRecognizer, GazetteerRecognizer, find_person_names};
pub use variant::{ParseVariantError, Variant};
// Domain types live in core; re-exported so callers need one import.
pub use thesis_core::{BackendError, ExtractionRecord, Field, FieldValue, PdfBackend};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Extract thesis metadata from a PDF using the given backend for text
/// extraction and the default (regex) heuristics.
///
/// Pipeline:
/// 1. Load the text of every page via `backend`
/// 2. Title from the leading lines
/// 3. Author from the lines following the title
/// 4. Methodology passage
/// 5. Director line
/// 6. Conclusions passage
pub fn extract_record(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
) -> Result<ExtractionRecord, ParsingError> {
    ThesisExtractor::new().extract_from_path(pdf_path, backend)
}
