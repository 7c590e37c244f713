use std::fmt;

pub mod backend;
pub mod config_file;
pub mod entity;

pub use backend::{BackendError, PdfBackend};
pub use entity::{Entity, EntityLabel, EntityRecognizer, ModelError};

/// The fixed set of fields extracted from every thesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Methodology,
    Director,
    Conclusions,
}

impl Field {
    /// All fields in report order.
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Author,
        Field::Methodology,
        Field::Director,
        Field::Conclusions,
    ];

    /// Label used when printing the field.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Título",
            Field::Author => "Autor",
            Field::Methodology => "Metodología",
            Field::Director => "Director",
            Field::Conclusions => "Conclusiones",
        }
    }

    /// Whether the value is a multi-line passage rather than a single line.
    pub fn is_passage(&self) -> bool {
        matches!(self, Field::Methodology | Field::Conclusions)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sentinel for a missing title.
pub const TITLE_NOT_FOUND: &str = "Título no encontrado";
/// Sentinel for a missing author.
pub const AUTHOR_NOT_FOUND: &str = "Autor no encontrado";
/// Sentinel for a missing director/advisor.
pub const DIRECTOR_NOT_FOUND: &str = "Director no encontrado";

/// Sentinel for a section whose keyword is absent or has no paragraphs,
/// e.g. `"Metodología no encontrada."`.
pub fn section_not_found(keyword: &str) -> String {
    format!("{} no encontrada.", capitalize(keyword))
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Result of a single field extraction.
///
/// A `NotFound` value carries the field's sentinel so that it can be told
/// apart from genuinely extracted content while still printing uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Found(String),
    NotFound { sentinel: String },
}

impl FieldValue {
    pub fn not_found(sentinel: impl Into<String>) -> Self {
        FieldValue::NotFound {
            sentinel: sentinel.into(),
        }
    }

    /// Wrap an extractor's output, substituting `sentinel` for `None`.
    pub fn from_option(value: Option<String>, sentinel: impl Into<String>) -> Self {
        match value {
            Some(v) => FieldValue::Found(v),
            None => FieldValue::not_found(sentinel),
        }
    }

    /// The extracted content, or the sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Found(v) => v,
            FieldValue::NotFound { sentinel } => sentinel,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    /// The extracted content, if any.
    pub fn found(&self) -> Option<&str> {
        match self {
            FieldValue::Found(v) => Some(v),
            FieldValue::NotFound { .. } => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRecord {
    pub title: FieldValue,
    pub author: FieldValue,
    pub methodology: FieldValue,
    pub director: FieldValue,
    pub conclusions: FieldValue,
}

impl ExtractionRecord {
    pub fn get(&self, field: Field) -> &FieldValue {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Methodology => &self.methodology,
            Field::Director => &self.director,
            Field::Conclusions => &self.conclusions,
        }
    }

    /// Fields and values in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn found_count(&self) -> usize {
        self.iter().filter(|(_, v)| v.is_found()).count()
    }
}
