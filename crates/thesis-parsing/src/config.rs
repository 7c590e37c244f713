use thiserror::Error;

use crate::advisor::DEFAULT_ADVISOR_KEYWORDS;
use crate::authors::DEFAULT_AUTHOR_KEYWORDS;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// How the text following a section keyword is cut into paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphStrategy {
    /// Accumulate non-empty lines until the line budget is reached or a line
    /// ends with a period. Always produces something from run-on text.
    #[default]
    LineChunks,
    /// Split on blank lines and keep blocks longer than the word threshold.
    /// Only useful when the PDF text keeps real paragraph breaks.
    BlankLineBlocks,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    #[error("{0} must not be empty")]
    EmptyKeyword(&'static str),
}

/// Configuration for the extraction pipeline.
///
/// Use [`ExtractionConfigBuilder`] to construct a validated non-default config.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    // ── title.rs ──
    /// Maximum number of non-empty lines joined into the title.
    pub(crate) title_lines: usize,
    /// End the title at the first blank line after its first line. Off by
    /// default, so the title is a plain count of non-empty lines.
    pub(crate) title_stop_at_blank_line: bool,

    // ── authors.rs ──
    pub(crate) author_keywords: ListOverride<String>,
    /// Lines joined as the author when no keyword line appears.
    pub(crate) author_fallback_lines: usize,
    /// Leading lines handed to the entity recogniser.
    pub(crate) author_window_lines: usize,
    /// Leading sentences handed to the grammar chunker.
    pub(crate) author_sentence_window: usize,
    /// Minimum tokens a grammar chunk needs to count as a name.
    pub(crate) min_author_tokens: usize,

    // ── advisor.rs ──
    pub(crate) advisor_keywords: ListOverride<String>,

    // ── section.rs ──
    pub(crate) methodology_keyword: String,
    pub(crate) conclusions_keyword: String,
    pub(crate) paragraphs: usize,
    pub(crate) max_lines_per_paragraph: usize,
    pub(crate) min_block_words: usize,
    pub(crate) paragraph_strategy: ParagraphStrategy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            title_lines: 5,
            title_stop_at_blank_line: false,
            author_keywords: ListOverride::Default,
            author_fallback_lines: 2,
            author_window_lines: 20,
            author_sentence_window: 5,
            min_author_tokens: 2,
            advisor_keywords: ListOverride::Default,
            methodology_keyword: "Metodología".to_string(),
            conclusions_keyword: "Conclusiones".to_string(),
            paragraphs: 2,
            max_lines_per_paragraph: 5,
            min_block_words: 10,
            paragraph_strategy: ParagraphStrategy::LineChunks,
        }
    }
}

impl ExtractionConfig {
    pub fn title_lines(&self) -> usize {
        self.title_lines
    }

    pub fn title_stop_at_blank_line(&self) -> bool {
        self.title_stop_at_blank_line
    }

    /// Author keywords, lowercased.
    pub fn author_keywords(&self) -> Vec<String> {
        let defaults: Vec<String> = DEFAULT_AUTHOR_KEYWORDS
            .iter()
            .map(|s| s.to_string())
            .collect();
        lowercase_all(self.author_keywords.resolve(&defaults))
    }

    pub fn author_fallback_lines(&self) -> usize {
        self.author_fallback_lines
    }

    pub fn author_window_lines(&self) -> usize {
        self.author_window_lines
    }

    pub fn author_sentence_window(&self) -> usize {
        self.author_sentence_window
    }

    pub fn min_author_tokens(&self) -> usize {
        self.min_author_tokens
    }

    /// Advisor keywords, lowercased.
    pub fn advisor_keywords(&self) -> Vec<String> {
        let defaults: Vec<String> = DEFAULT_ADVISOR_KEYWORDS
            .iter()
            .map(|s| s.to_string())
            .collect();
        lowercase_all(self.advisor_keywords.resolve(&defaults))
    }

    pub fn methodology_keyword(&self) -> &str {
        &self.methodology_keyword
    }

    pub fn conclusions_keyword(&self) -> &str {
        &self.conclusions_keyword
    }

    pub fn paragraphs(&self) -> usize {
        self.paragraphs
    }

    pub fn max_lines_per_paragraph(&self) -> usize {
        self.max_lines_per_paragraph
    }

    pub fn min_block_words(&self) -> usize {
        self.min_block_words
    }

    pub fn paragraph_strategy(&self) -> ParagraphStrategy {
        self.paragraph_strategy
    }
}

fn lowercase_all(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

/// Builder for [`ExtractionConfig`].
///
/// Unset values fall back to [`ExtractionConfig::default`]. [`build()`](Self::build)
/// rejects zero counts and empty keywords.
#[derive(Debug, Clone, Default)]
pub struct ExtractionConfigBuilder {
    title_lines: Option<usize>,
    title_stop_at_blank_line: Option<bool>,
    author_keywords: ListOverride<String>,
    author_fallback_lines: Option<usize>,
    author_window_lines: Option<usize>,
    author_sentence_window: Option<usize>,
    min_author_tokens: Option<usize>,
    advisor_keywords: ListOverride<String>,
    methodology_keyword: Option<String>,
    conclusions_keyword: Option<String>,
    paragraphs: Option<usize>,
    max_lines_per_paragraph: Option<usize>,
    min_block_words: Option<usize>,
    paragraph_strategy: Option<ParagraphStrategy>,
}

impl ExtractionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Title ──

    pub fn title_lines(mut self, n: usize) -> Self {
        self.title_lines = Some(n);
        self
    }

    pub fn title_stop_at_blank_line(mut self, stop: bool) -> Self {
        self.title_stop_at_blank_line = Some(stop);
        self
    }

    // ── Author ──

    pub fn set_author_keywords(mut self, keywords: Vec<String>) -> Self {
        self.author_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_author_keyword(mut self, keyword: String) -> Self {
        match &mut self.author_keywords {
            ListOverride::Extend(v) => v.push(keyword),
            _ => self.author_keywords = ListOverride::Extend(vec![keyword]),
        }
        self
    }

    pub fn author_fallback_lines(mut self, n: usize) -> Self {
        self.author_fallback_lines = Some(n);
        self
    }

    pub fn author_window_lines(mut self, n: usize) -> Self {
        self.author_window_lines = Some(n);
        self
    }

    pub fn author_sentence_window(mut self, n: usize) -> Self {
        self.author_sentence_window = Some(n);
        self
    }

    pub fn min_author_tokens(mut self, n: usize) -> Self {
        self.min_author_tokens = Some(n);
        self
    }

    // ── Advisor ──

    pub fn set_advisor_keywords(mut self, keywords: Vec<String>) -> Self {
        self.advisor_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_advisor_keyword(mut self, keyword: String) -> Self {
        match &mut self.advisor_keywords {
            ListOverride::Extend(v) => v.push(keyword),
            _ => self.advisor_keywords = ListOverride::Extend(vec![keyword]),
        }
        self
    }

    // ── Sections ──

    pub fn methodology_keyword(mut self, keyword: &str) -> Self {
        self.methodology_keyword = Some(keyword.to_string());
        self
    }

    pub fn conclusions_keyword(mut self, keyword: &str) -> Self {
        self.conclusions_keyword = Some(keyword.to_string());
        self
    }

    pub fn paragraphs(mut self, n: usize) -> Self {
        self.paragraphs = Some(n);
        self
    }

    pub fn max_lines_per_paragraph(mut self, n: usize) -> Self {
        self.max_lines_per_paragraph = Some(n);
        self
    }

    pub fn min_block_words(mut self, n: usize) -> Self {
        self.min_block_words = Some(n);
        self
    }

    pub fn paragraph_strategy(mut self, strategy: ParagraphStrategy) -> Self {
        self.paragraph_strategy = Some(strategy);
        self
    }

    /// Validate and produce an [`ExtractionConfig`].
    pub fn build(self) -> Result<ExtractionConfig, ConfigError> {
        let d = ExtractionConfig::default();

        let count = |value: Option<usize>, default: usize, name: &'static str| {
            match value.unwrap_or(default) {
                0 => Err(ConfigError::ZeroCount(name)),
                n => Ok(n),
            }
        };
        let keyword = |value: Option<String>, default: String, name: &'static str| {
            let k = value.unwrap_or(default);
            if k.trim().is_empty() {
                Err(ConfigError::EmptyKeyword(name))
            } else {
                Ok(k.trim().to_string())
            }
        };
        let check_list = |list: &ListOverride<String>, name: &'static str| {
            let values = match list {
                ListOverride::Default => return Ok(()),
                ListOverride::Replace(v) | ListOverride::Extend(v) => v,
            };
            if values.is_empty() || values.iter().any(|k| k.trim().is_empty()) {
                Err(ConfigError::EmptyKeyword(name))
            } else {
                Ok(())
            }
        };

        check_list(&self.author_keywords, "author_keywords")?;
        check_list(&self.advisor_keywords, "advisor_keywords")?;

        Ok(ExtractionConfig {
            title_lines: count(self.title_lines, d.title_lines, "title_lines")?,
            title_stop_at_blank_line: self
                .title_stop_at_blank_line
                .unwrap_or(d.title_stop_at_blank_line),
            author_keywords: self.author_keywords,
            // Zero fallback lines is meaningful: no fallback at all.
            author_fallback_lines: self.author_fallback_lines.unwrap_or(d.author_fallback_lines),
            author_window_lines: count(
                self.author_window_lines,
                d.author_window_lines,
                "author_window_lines",
            )?,
            author_sentence_window: count(
                self.author_sentence_window,
                d.author_sentence_window,
                "author_sentence_window",
            )?,
            min_author_tokens: count(
                self.min_author_tokens,
                d.min_author_tokens,
                "min_author_tokens",
            )?,
            advisor_keywords: self.advisor_keywords,
            methodology_keyword: keyword(
                self.methodology_keyword,
                d.methodology_keyword,
                "methodology_keyword",
            )?,
            conclusions_keyword: keyword(
                self.conclusions_keyword,
                d.conclusions_keyword,
                "conclusions_keyword",
            )?,
            paragraphs: count(self.paragraphs, d.paragraphs, "paragraphs")?,
            max_lines_per_paragraph: count(
                self.max_lines_per_paragraph,
                d.max_lines_per_paragraph,
                "max_lines_per_paragraph",
            )?,
            // Zero keeps every non-empty block.
            min_block_words: self.min_block_words.unwrap_or(d.min_block_words),
            paragraph_strategy: self.paragraph_strategy.unwrap_or(d.paragraph_strategy),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.title_lines(), 5);
        assert!(!config.title_stop_at_blank_line());
        assert_eq!(config.paragraphs(), 2);
        assert_eq!(config.max_lines_per_paragraph(), 5);
        assert_eq!(config.min_block_words(), 10);
        assert_eq!(config.paragraph_strategy(), ParagraphStrategy::LineChunks);
        assert_eq!(
            config.author_keywords(),
            vec!["autor", "autores", "presentado por"]
        );
        assert_eq!(config.advisor_keywords(), vec!["director", "tutor", "asesor"]);
    }

    #[test]
    fn test_builder_basic() {
        let config = ExtractionConfigBuilder::new()
            .title_lines(3)
            .paragraphs(1)
            .paragraph_strategy(ParagraphStrategy::BlankLineBlocks)
            .methodology_keyword("  Métodos ")
            .build()
            .unwrap();
        assert_eq!(config.title_lines(), 3);
        assert_eq!(config.paragraphs(), 1);
        assert_eq!(config.paragraph_strategy(), ParagraphStrategy::BlankLineBlocks);
        assert_eq!(config.methodology_keyword(), "Métodos");
        assert_eq!(config.conclusions_keyword(), "Conclusiones");
    }

    #[test]
    fn test_builder_rejects_zero_counts() {
        let result = ExtractionConfigBuilder::new().paragraphs(0).build();
        assert_eq!(result.unwrap_err(), ConfigError::ZeroCount("paragraphs"));

        let result = ExtractionConfigBuilder::new().title_lines(0).build();
        assert_eq!(result.unwrap_err(), ConfigError::ZeroCount("title_lines"));
    }

    #[test]
    fn test_builder_rejects_empty_keywords() {
        let result = ExtractionConfigBuilder::new()
            .conclusions_keyword("   ")
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::EmptyKeyword("conclusions_keyword")
        );

        let result = ExtractionConfigBuilder::new()
            .set_advisor_keywords(vec![])
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::EmptyKeyword("advisor_keywords")
        );
    }

    #[test]
    fn test_keyword_overrides_are_lowercased() {
        let config = ExtractionConfigBuilder::new()
            .add_advisor_keyword("Codirector".to_string())
            .set_author_keywords(vec!["Elaborado por".to_string()])
            .build()
            .unwrap();
        assert_eq!(
            config.advisor_keywords(),
            vec!["director", "tutor", "asesor", "codirector"]
        );
        assert_eq!(config.author_keywords(), vec!["elaborado por"]);
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<String> = ListOverride::Replace(vec!["x".to_string()]);
        assert_eq!(r.resolve(&defaults), vec!["x".to_string()]);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(
            e.resolve(&defaults),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
