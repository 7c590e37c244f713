use crate::config::ExtractionConfig;

/// Guess the title from the leading lines of the document.
///
/// Takes up to five non-empty lines, trimmed and joined with single spaces.
/// Blank lines between them are skipped. Returns `None` when the text has no
/// non-empty line.
pub fn extract_title(text: &str) -> Option<String> {
    extract_title_with_config(text, &ExtractionConfig::default())
}

/// Config-aware version of [`extract_title`].
pub(crate) fn extract_title_with_config(text: &str, config: &ExtractionConfig) -> Option<String> {
    leading_lines(text, config.title_lines, config.title_stop_at_blank_line)
}

/// Join the first `max_lines` non-empty lines of `text`.
///
/// Leading blank lines are always skipped; when `stop_at_blank` is set, a
/// blank line met after collecting at least one line stops the scan.
pub fn leading_lines(text: &str, max_lines: usize, stop_at_blank: bool) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if stop_at_blank && !lines.is_empty() {
                break;
            }
            continue;
        }
        lines.push(trimmed);
        if lines.len() >= max_lines {
            break;
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" ").trim().to_string())
    }
}
