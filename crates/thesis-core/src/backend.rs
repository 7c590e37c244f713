use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF {path}: {message}")]
    OpenError { path: String, message: String },
    #[error("failed to extract text from {path}: {message}")]
    ExtractionError { path: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    pub fn open(path: &Path, message: impl Into<String>) -> Self {
        Self::OpenError {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    pub fn extraction(path: &Path, message: impl Into<String>) -> Self {
        Self::ExtractionError {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide per-page text; the heuristics that turn the text
/// into an extraction record live in `thesis_parsing::ThesisExtractor`.
/// A missing file or an invalid PDF must surface as an error rather than
/// as empty text.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page, in page order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError>;

    /// Extract the whole document as one string, pages joined by `separator`.
    fn extract_text(&self, path: &Path, separator: &str) -> Result<String, BackendError> {
        let pages = self.extract_pages(path)?;
        let mut text = String::new();
        for page in pages {
            text.push_str(&page);
            text.push_str(separator);
        }
        Ok(text)
    }

    /// Extract only the first page. Documents with no pages yield an empty string.
    fn extract_first_page(&self, path: &Path) -> Result<String, BackendError> {
        Ok(self
            .extract_pages(path)?
            .into_iter()
            .next()
            .unwrap_or_default())
    }
}
