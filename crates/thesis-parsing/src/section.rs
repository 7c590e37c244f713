use thesis_core::{FieldValue, capitalize, section_not_found};

use crate::config::{ExtractionConfig, ParagraphStrategy};
use crate::text_processing::{non_empty_lines, word_count};

/// Extract the passage following `keyword`, or the keyword's sentinel.
///
/// Matching is case-insensitive and uses the first occurrence. The result
/// is lowercased text cut into at most `config.paragraphs` paragraphs
/// separated by blank lines.
pub fn extract_section(text: &str, keyword: &str, config: &ExtractionConfig) -> FieldValue {
    FieldValue::from_option(
        section_paragraphs(text, keyword, config),
        section_not_found(keyword),
    )
}

/// The paragraphs after `keyword` joined by `"\n\n"`, if there are any.
pub fn section_paragraphs(text: &str, keyword: &str, config: &ExtractionConfig) -> Option<String> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    let start = lower.find(&keyword)? + keyword.len();
    let body = lower[start..].trim();

    let paragraphs = match config.paragraph_strategy {
        ParagraphStrategy::LineChunks => {
            line_chunks(body, config.paragraphs, config.max_lines_per_paragraph)
        }
        ParagraphStrategy::BlankLineBlocks => {
            blank_line_blocks(body, config.paragraphs, config.min_block_words)
        }
    };

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}

/// Group lines into paragraphs of at most `max_lines`, closing a group early
/// at a line ending in `.`. A trailing group that never closes is dropped.
pub fn line_chunks(body: &str, limit: usize, max_lines: usize) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in non_empty_lines(body) {
        if paragraphs.len() >= limit {
            break;
        }
        current.push(line);
        if current.len() >= max_lines || line.ends_with('.') {
            paragraphs.push(capitalize(&current.join(" ")));
            current.clear();
        }
    }
    paragraphs
}

/// Blank-line separated blocks with more than `min_words` words, newlines
/// flattened to spaces.
pub fn blank_line_blocks(body: &str, limit: usize, min_words: usize) -> Vec<String> {
    body.split("\n\n")
        .map(|block| block.trim().replace('\n', " "))
        .filter(|block| word_count(block) > min_words)
        .take(limit)
        .collect()
}
