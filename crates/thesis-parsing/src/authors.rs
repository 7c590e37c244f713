//! Author heuristics.
//!
//! Each heuristic implements [`AuthorStrategy`] so the extractor can be
//! composed with whichever one fits the document collection.

use std::sync::Arc;

use regex::Regex;
use thesis_core::EntityRecognizer;

use crate::config::ExtractionConfig;
use crate::ner::ChunkRecognizer;
use crate::text_processing::{contains_any, non_empty_lines};

/// Lines containing one of these (lowercased) introduce the author's name.
pub const DEFAULT_AUTHOR_KEYWORDS: &[&str] = &["autor", "autores", "presentado por"];

/// A way of guessing the author of a document.
pub trait AuthorStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Guess the author. `title` is the already-extracted title, if any.
    fn find_author(&self, text: &str, title: Option<&str>) -> Option<String>;
}

/// Look for an author keyword in the lines that follow the title.
#[derive(Debug, Clone)]
pub struct AfterTitle {
    keywords: Vec<String>,
    fallback_lines: usize,
}

impl AfterTitle {
    pub fn new(keywords: Vec<String>, fallback_lines: usize) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            fallback_lines,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.author_keywords(), config.author_fallback_lines)
    }
}

impl Default for AfterTitle {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl AuthorStrategy for AfterTitle {
    fn name(&self) -> &'static str {
        "after-title"
    }

    fn find_author(&self, text: &str, title: Option<&str>) -> Option<String> {
        find_author_after_title(text, title?, &self.keywords, self.fallback_lines)
    }
}

/// Locate `title` in `text` and read the author from the lines after it.
///
/// The title's words may be separated by any whitespace in `text`, so a
/// title joined from several lines is still found. After the title, the
/// line following the first keyword line is the author; a keyword on the
/// last line gives `None`. Without any keyword line, the first
/// `fallback_lines` lines are joined instead.
///
/// `keywords` must already be lowercase.
pub fn find_author_after_title(
    text: &str,
    title: &str,
    keywords: &[String],
    fallback_lines: usize,
) -> Option<String> {
    let pattern = title
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    if pattern.is_empty() {
        return None;
    }
    // Escaped input always forms a valid pattern; a size-limit failure just
    // means no match.
    let title_re = Regex::new(&pattern).ok()?;
    let after = &text[title_re.find(text)?.end()..];

    let lines: Vec<&str> = non_empty_lines(after).collect();
    let mut collected = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if contains_any(&line.to_lowercase(), keywords) {
            return lines.get(i + 1).map(|next| next.to_string());
        }
        if collected.len() < fallback_lines {
            collected.push(*line);
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join(" "))
    }
}

/// First person found by a recogniser in the opening lines of the text.
#[derive(Clone)]
pub struct EntityWindow {
    recognizer: Arc<dyn EntityRecognizer>,
    window_lines: usize,
}

impl EntityWindow {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, window_lines: usize) -> Self {
        Self {
            recognizer,
            window_lines,
        }
    }
}

impl AuthorStrategy for EntityWindow {
    fn name(&self) -> &'static str {
        "entity-window"
    }

    fn find_author(&self, text: &str, _title: Option<&str>) -> Option<String> {
        let window = text
            .split('\n')
            .take(self.window_lines)
            .collect::<Vec<_>>()
            .join(" ");
        self.recognizer.first_person(&window)
    }
}

/// First multi-word person chunk within the opening sentences.
#[derive(Debug, Clone)]
pub struct GrammarChunks {
    recognizer: ChunkRecognizer,
    sentence_window: usize,
    min_tokens: usize,
}

impl GrammarChunks {
    pub fn new(sentence_window: usize, min_tokens: usize) -> Self {
        Self {
            recognizer: ChunkRecognizer,
            sentence_window,
            min_tokens,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.author_sentence_window, config.min_author_tokens)
    }
}

impl AuthorStrategy for GrammarChunks {
    fn name(&self) -> &'static str {
        "grammar-chunks"
    }

    fn find_author(&self, text: &str, _title: Option<&str>) -> Option<String> {
        self.recognizer
            .recognize_sentences(text, self.sentence_window)
            .into_iter()
            .find(|e| e.is_person() && e.token_count() >= self.min_tokens)
            .map(|e| e.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::GazetteerRecognizer;

    fn keywords() -> Vec<String> {
        DEFAULT_AUTHOR_KEYWORDS.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_after_title_returns_line_after_keyword() {
        let text = "Redes Neuronales\nUniversidad X\nAutor:\nAna Torres\nBogotá\n";
        assert_eq!(
            find_author_after_title(text, "Redes Neuronales", &keywords(), 2),
            Some("Ana Torres".to_string())
        );
    }

    #[test]
    fn test_after_title_keyword_is_case_insensitive() {
        let text = "Redes\nTRABAJO PRESENTADO POR\nAna Torres\n";
        assert_eq!(
            find_author_after_title(text, "Redes", &keywords(), 2),
            Some("Ana Torres".to_string())
        );
    }

    #[test]
    fn test_after_title_keyword_on_last_line() {
        let text = "Redes Neuronales\nAutor";
        assert_eq!(
            find_author_after_title(text, "Redes Neuronales", &keywords(), 2),
            None
        );
    }

    #[test]
    fn test_after_title_fallback_lines() {
        let text = "Redes Neuronales\n\nAna Torres\nLuis Gil\nBogotá 2020\n";
        assert_eq!(
            find_author_after_title(text, "Redes Neuronales", &keywords(), 2),
            Some("Ana Torres Luis Gil".to_string())
        );
        assert_eq!(
            find_author_after_title(text, "Redes Neuronales", &keywords(), 0),
            None
        );
    }

    #[test]
    fn test_after_title_matches_title_split_across_lines() {
        let text = "Impact Of Rainfall\nJuan Perez\n\nAutores\nJuan Perez y Ana Ruiz\n";
        assert_eq!(
            find_author_after_title(text, "Impact Of Rainfall Juan Perez", &keywords(), 2),
            Some("Juan Perez y Ana Ruiz".to_string())
        );
    }

    #[test]
    fn test_after_title_title_missing_or_nothing_after() {
        assert_eq!(find_author_after_title("otra cosa", "Redes", &keywords(), 2), None);
        assert_eq!(find_author_after_title("Redes\n  \n", "Redes", &keywords(), 2), None);
        assert_eq!(find_author_after_title("Redes", "   ", &keywords(), 2), None);
    }

    #[test]
    fn test_after_title_escapes_title() {
        let text = "¿Qué es (x+1)?\nAutor\nEva Díaz\n";
        assert_eq!(
            find_author_after_title(text, "¿Qué es (x+1)?", &keywords(), 2),
            Some("Eva Díaz".to_string())
        );
    }

    #[test]
    fn test_after_title_strategy_needs_title() {
        let strategy = AfterTitle::default();
        assert_eq!(strategy.find_author("Autor\nAna Torres", None), None);
        assert_eq!(
            strategy.find_author("Redes\nAutor\nAna Torres", Some("Redes")),
            Some("Ana Torres".to_string())
        );
    }

    #[test]
    fn test_entity_window_finds_person() {
        let strategy = EntityWindow::new(Arc::new(GazetteerRecognizer::builtin()), 20);
        let text = "UNIVERSIDAD DE ANTIOQUIA\nEstudio de suelos\npor\nCarlos Andrés Ruiz\n";
        assert_eq!(
            strategy.find_author(text, None),
            Some("Carlos Andrés Ruiz".to_string())
        );
    }

    #[test]
    fn test_entity_window_respects_line_budget() {
        let strategy = EntityWindow::new(Arc::new(GazetteerRecognizer::builtin()), 2);
        let text = "Estudio de suelos\n\nCarlos Andrés Ruiz\n";
        assert_eq!(strategy.find_author(text, None), None);
    }

    #[test]
    fn test_grammar_chunks_skips_single_word_persons() {
        let strategy = GrammarChunks::new(5, 2);
        let text = "Tesis de grado. Elaborada por Laura Ríos Mejía. Bogotá.";
        assert_eq!(
            strategy.find_author(text, None),
            Some("Laura Ríos Mejía".to_string())
        );
    }

    #[test]
    fn test_grammar_chunks_sentence_window() {
        let strategy = GrammarChunks::new(1, 2);
        let text = "resumen del trabajo. Elaborada por Laura Ríos.";
        assert_eq!(strategy.find_author(text, None), None);
        assert_eq!(
            GrammarChunks::new(2, 2).find_author(text, None),
            Some("Laura Ríos".to_string())
        );
    }
}
