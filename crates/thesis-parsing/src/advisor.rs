//! Director/advisor heuristics.

use std::sync::Arc;

use thesis_core::{EntityRecognizer, capitalize};

use crate::config::ExtractionConfig;
use crate::text_processing::contains_any;

pub const DEFAULT_ADVISOR_KEYWORDS: &[&str] = &["director", "tutor", "asesor"];

/// A way of finding the thesis director in the document text.
pub trait AdvisorStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn find_advisor(&self, text: &str) -> Option<String>;
}

/// The first line mentioning an advisor keyword, trimmed and capitalised.
///
/// The line is lowercased before capitalising, so `"Director: Maria Gomez"`
/// comes back as `"Director: maria gomez"`.
#[derive(Debug, Clone)]
pub struct KeywordLine {
    keywords: Vec<String>,
}

impl KeywordLine {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.advisor_keywords())
    }
}

impl Default for KeywordLine {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl AdvisorStrategy for KeywordLine {
    fn name(&self) -> &'static str {
        "keyword-line"
    }

    fn find_advisor(&self, text: &str) -> Option<String> {
        text.to_lowercase()
            .lines()
            .find(|line| contains_any(line, &self.keywords))
            .map(|line| capitalize(line.trim()))
    }
}

/// The first person named on a keyword line.
///
/// Keyword lines are matched case-insensitively but handed to the
/// recogniser in their original case. Lines without a person are skipped.
#[derive(Clone)]
pub struct KeywordEntity {
    keywords: Vec<String>,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl KeywordEntity {
    pub fn new(keywords: Vec<String>, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            recognizer,
        }
    }

    pub fn from_config(config: &ExtractionConfig, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self::new(config.advisor_keywords(), recognizer)
    }
}

impl AdvisorStrategy for KeywordEntity {
    fn name(&self) -> &'static str {
        "keyword-entity"
    }

    fn find_advisor(&self, text: &str) -> Option<String> {
        text.lines()
            .filter(|line| contains_any(&line.to_lowercase(), &self.keywords))
            .find_map(|line| self.recognizer.first_person(line))
    }
}
