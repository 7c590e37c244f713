use std::path::Path;

use thesis_core::{
    AUTHOR_NOT_FOUND, DIRECTOR_NOT_FOUND, ExtractionRecord, FieldValue, PdfBackend,
    TITLE_NOT_FOUND,
};

use crate::advisor::{AdvisorStrategy, KeywordLine};
use crate::authors::{AfterTitle, AuthorStrategy};
use crate::config::ExtractionConfig;
use crate::text_processing::expand_ligatures;
use crate::{ParsingError, section, title};

/// A configurable thesis metadata extraction pipeline.
///
/// Holds an [`ExtractionConfig`] plus the author and advisor heuristics, and
/// exposes each field extraction as a method. [`ThesisExtractor::new`] uses
/// the defaults of the regex variant; see [`crate::Variant`] for the other
/// presets.
pub struct ThesisExtractor {
    config: ExtractionConfig,
    author: Box<dyn AuthorStrategy>,
    advisor: Box<dyn AdvisorStrategy>,
    page_separator: String,
}

impl Default for ThesisExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ThesisExtractor {
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create an extractor with a custom configuration and the keyword-based
    /// author and advisor heuristics built from it.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            author: Box::new(AfterTitle::from_config(&config)),
            advisor: Box::new(KeywordLine::from_config(&config)),
            config,
            page_separator: String::new(),
        }
    }

    pub fn with_author_strategy(mut self, strategy: Box<dyn AuthorStrategy>) -> Self {
        self.author = strategy;
        self
    }

    pub fn with_advisor_strategy(mut self, strategy: Box<dyn AdvisorStrategy>) -> Self {
        self.advisor = strategy;
        self
    }

    /// Text inserted after each page when a document is loaded.
    pub fn with_page_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = separator.into();
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn page_separator(&self) -> &str {
        &self.page_separator
    }

    pub fn author_strategy_name(&self) -> &'static str {
        self.author.name()
    }

    pub fn advisor_strategy_name(&self) -> &'static str {
        self.advisor.name()
    }

    pub fn extract_title(&self, text: &str) -> Option<String> {
        title::extract_title_with_config(text, &self.config)
    }

    pub fn extract_author(&self, text: &str, title: Option<&str>) -> Option<String> {
        self.author.find_author(text, title)
    }

    pub fn extract_director(&self, text: &str) -> Option<String> {
        self.advisor.find_advisor(text)
    }

    pub fn extract_methodology(&self, text: &str) -> FieldValue {
        section::extract_section(text, &self.config.methodology_keyword, &self.config)
    }

    pub fn extract_conclusions(&self, text: &str) -> FieldValue {
        section::extract_section(text, &self.config.conclusions_keyword, &self.config)
    }

    /// Run every field extractor once over already-loaded text.
    ///
    /// Never fails: fields that cannot be found carry their sentinel.
    pub fn extract_from_text(&self, text: &str) -> ExtractionRecord {
        let title = self.extract_title(text);
        let author = self.extract_author(text, title.as_deref());
        let methodology = self.extract_methodology(text);
        let director = self.extract_director(text);
        let conclusions = self.extract_conclusions(text);

        tracing::debug!(
            title = title.is_some(),
            author = author.is_some(),
            methodology = methodology.is_found(),
            director = director.is_some(),
            conclusions = conclusions.is_found(),
            author_strategy = self.author.name(),
            advisor_strategy = self.advisor.name(),
            "extracted fields"
        );

        ExtractionRecord {
            title: FieldValue::from_option(title, TITLE_NOT_FOUND),
            author: FieldValue::from_option(author, AUTHOR_NOT_FOUND),
            methodology,
            director: FieldValue::from_option(director, DIRECTOR_NOT_FOUND),
            conclusions,
        }
    }

    /// Load the whole document through `backend`, pages joined by this
    /// extractor's page separator and ligatures expanded.
    pub fn load_text(&self, path: &Path, backend: &dyn PdfBackend) -> Result<String, ParsingError> {
        let text = backend.extract_text(path, &self.page_separator)?;
        tracing::debug!(path = %path.display(), chars = text.len(), "loaded document text");
        Ok(expand_ligatures(&text))
    }

    /// Like [`load_text`](Self::load_text) but only reads the first page.
    pub fn load_first_page(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<String, ParsingError> {
        let text = backend.extract_first_page(path)?;
        Ok(expand_ligatures(&text))
    }

    /// Load the whole document through `backend` and extract from it.
    pub fn extract_from_path(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<ExtractionRecord, ParsingError> {
        Ok(self.extract_from_text(&self.load_text(path, backend)?))
    }

    /// Extract from the first page only.
    pub fn extract_first_page_from_path(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<ExtractionRecord, ParsingError> {
        Ok(self.extract_from_text(&self.load_first_page(path, backend)?))
    }
}
