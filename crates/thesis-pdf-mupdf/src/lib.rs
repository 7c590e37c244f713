use std::path::Path;

use mupdf::{Document, Page, TextPageFlags};

use thesis_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the only one linking mupdf (AGPL-3.0), so the extraction
/// heuristics can be used with another backend without pulling it in.
/// Every text block is kept, including the top band where title pages put
/// the institution name.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, path: &Path) -> Result<Document, BackendError> {
        if !path.exists() {
            return Err(BackendError::open(path, "file does not exist"));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::open(path, "invalid path encoding"))?;
        Document::open(path_str).map_err(|e| BackendError::open(path, e.to_string()))
    }

    /// Text of one page, one output line per MuPDF text line.
    fn page_text(&self, page: &Page) -> Result<String, mupdf::Error> {
        let text_page = page.to_text_page(TextPageFlags::empty())?;

        let mut text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                text.extend(line.chars().map(|c| c.char().unwrap_or('\u{FFFD}')));
                text.push('\n');
            }
        }
        Ok(text)
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        // The document is released when it goes out of scope, including on
        // an error from a later page.
        let document = self.open(path)?;
        let extraction = |e: mupdf::Error| BackendError::extraction(path, e.to_string());

        let mut pages = Vec::new();
        for page in document.pages().map_err(extraction)? {
            let page = page.map_err(extraction)?;
            pages.push(self.page_text(&page).map_err(extraction)?);
        }

        tracing::debug!(path = %path.display(), pages = pages.len(), "extracted PDF text");
        Ok(pages)
    }

    fn extract_first_page(&self, path: &Path) -> Result<String, BackendError> {
        let document = self.open(path)?;
        let extraction = |e: mupdf::Error| BackendError::extraction(path, e.to_string());

        if document.page_count().map_err(extraction)? == 0 {
            return Ok(String::new());
        }
        let page = document.load_page(0).map_err(extraction)?;
        self.page_text(&page).map_err(extraction)
    }
}
