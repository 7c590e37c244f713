use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub extraction: Option<ExtractionSection>,
    pub ner: Option<NerSection>,
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSection {
    /// One of `regex`, `entity`, `grammar`.
    pub variant: Option<String>,
    pub title_lines: Option<usize>,
    pub paragraphs: Option<usize>,
    pub max_lines_per_paragraph: Option<usize>,
    pub min_block_words: Option<usize>,
    pub methodology_keyword: Option<String>,
    pub conclusions_keyword: Option<String>,
    pub author_keywords: Option<Vec<String>>,
    pub advisor_keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NerSection {
    /// Custom given-name list, one name per line.
    pub names_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    pub color: Option<bool>,
}

/// Platform config directory path: `<config_dir>/thesis/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("thesis").join("config.toml"))
}

/// Load config by cascading CWD `.thesis.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".thesis.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

fn pick<S, T>(
    overlay: &Option<S>,
    base: &Option<S>,
    field: impl Fn(&S) -> Option<T>,
) -> Option<T> {
    overlay
        .as_ref()
        .and_then(&field)
        .or_else(|| base.as_ref().and_then(&field))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let (be, oe) = (&base.extraction, &overlay.extraction);
    ConfigFile {
        extraction: Some(ExtractionSection {
            variant: pick(oe, be, |e| e.variant.clone()),
            title_lines: pick(oe, be, |e| e.title_lines),
            paragraphs: pick(oe, be, |e| e.paragraphs),
            max_lines_per_paragraph: pick(oe, be, |e| e.max_lines_per_paragraph),
            min_block_words: pick(oe, be, |e| e.min_block_words),
            methodology_keyword: pick(oe, be, |e| e.methodology_keyword.clone()),
            conclusions_keyword: pick(oe, be, |e| e.conclusions_keyword.clone()),
            author_keywords: pick(oe, be, |e| e.author_keywords.clone()),
            advisor_keywords: pick(oe, be, |e| e.advisor_keywords.clone()),
        }),
        ner: Some(NerSection {
            names_path: pick(&overlay.ner, &base.ner, |n| n.names_path.clone()),
        }),
        display: Some(DisplaySection {
            color: pick(&overlay.display, &base.display, |d| d.color),
        }),
    }
}
