//! End-to-end extraction through a mocked PDF backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use thesis_core::{BackendError, PdfBackend};
use thesis_parsing::{GazetteerRecognizer, ParsingError, ThesisExtractor, Variant, extract_record};

/// A hand-rolled [`PdfBackend`] serving fixed pages per path.
///
/// Paths that were never registered fail with [`BackendError::OpenError`],
/// like a missing file would.
struct MockBackend {
    documents: HashMap<PathBuf, Vec<String>>,
    broken: Vec<PathBuf>,
    call_count: AtomicUsize,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            documents: HashMap::new(),
            broken: Vec::new(),
            call_count: AtomicUsize::new(0),
        }
    }

    fn with_document(mut self, path: &str, pages: &[&str]) -> Self {
        self.documents
            .insert(PathBuf::from(path), pages.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Register a path that opens but fails during text extraction.
    fn with_broken(mut self, path: &str) -> Self {
        self.broken.push(PathBuf::from(path));
        self
    }

    fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.broken.iter().any(|p| p == path) {
            return Err(BackendError::extraction(path, "page 2: corrupt content stream"));
        }
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| BackendError::open(path, "no such file"))
    }
}

const TITLE_PAGE: &str = "Impact Of Rainfall\nJuan Perez\n";
const METHODS_PAGE: &str = "Metodología\nSe aplico un enfoque cuantitativo con encuestas a 50 \
                            estudiantes de la universidad local durante dos meses.";
const RESULTS_PAGE: &str = "Conclusiones\nLos resultados muestran una correlacion positiva entre \
                            las variables estudiadas en este trabajo academico.";

fn build(variant: Variant) -> ThesisExtractor {
    let config = variant.config_builder().build().unwrap();
    variant.extractor(config, Arc::new(GazetteerRecognizer::builtin()))
}

#[test]
fn test_extract_record_with_default_heuristics() {
    let backend = MockBackend::new().with_document(
        "tesis.pdf",
        &["Redes Neuronales\nAutor:\nAna Torres\n\nDirector: Luis Gil\n"],
    );
    let record = extract_record(Path::new("tesis.pdf"), &backend).unwrap();
    assert_eq!(
        record.title.as_str(),
        "Redes Neuronales Autor: Ana Torres Director: Luis Gil"
    );
    assert_eq!(record.director.as_str(), "Director: luis gil");
    assert_eq!(backend.call_count(), 1);
}

#[test]
fn test_grammar_variant_joins_pages_with_blank_lines() {
    let backend = MockBackend::new().with_document(
        "lluvia.pdf",
        &["Impact Of Rainfall\nJuan Perez", METHODS_PAGE, RESULTS_PAGE],
    );
    let record = build(Variant::Grammar)
        .extract_from_path(Path::new("lluvia.pdf"), &backend)
        .unwrap();
    assert_eq!(record.title.as_str(), "Impact Of Rainfall Juan Perez Metodología");
    assert!(record.methodology.as_str().starts_with("se aplico un enfoque"));
    assert!(record.conclusions.as_str().contains("correlacion positiva"));
    assert_eq!(record.director.as_str(), "Director no encontrado");
    assert_eq!(record.found_count(), 4);
}

#[test]
fn test_first_page_only() {
    let backend =
        MockBackend::new().with_document("lluvia.pdf", &[TITLE_PAGE, METHODS_PAGE, RESULTS_PAGE]);
    let record = ThesisExtractor::new()
        .extract_first_page_from_path(Path::new("lluvia.pdf"), &backend)
        .unwrap();
    assert_eq!(record.title.as_str(), "Impact Of Rainfall Juan Perez");
    assert_eq!(record.methodology.as_str(), "Metodología no encontrada.");
    assert_eq!(record.conclusions.as_str(), "Conclusiones no encontrada.");
}

#[test]
fn test_ligatures_are_expanded() {
    let backend =
        MockBackend::new().with_document("suelos.pdf", &["Identi\u{FB01}cación de suelos\n"]);
    let record = extract_record(Path::new("suelos.pdf"), &backend).unwrap();
    assert_eq!(record.title.as_str(), "Identificación de suelos");
}

#[test]
fn test_backend_errors_propagate() {
    let backend = MockBackend::new().with_broken("roto.pdf");

    let err = extract_record(Path::new("falta.pdf"), &backend).unwrap_err();
    assert!(matches!(
        err,
        ParsingError::Backend(BackendError::OpenError { .. })
    ));
    assert!(err.to_string().contains("falta.pdf"));

    let err = extract_record(Path::new("roto.pdf"), &backend).unwrap_err();
    assert!(matches!(
        err,
        ParsingError::Backend(BackendError::ExtractionError { .. })
    ));
}

#[test]
fn test_batch_continues_after_failure() {
    let backend = MockBackend::new()
        .with_document("a.pdf", &[TITLE_PAGE, METHODS_PAGE])
        .with_broken("b.pdf")
        .with_document("c.pdf", &["Otra Tesis\n"]);
    let extractor = build(Variant::Regex);

    let results: Vec<_> = ["a.pdf", "b.pdf", "c.pdf"]
        .iter()
        .map(|p| extractor.extract_from_path(Path::new(p), &backend))
        .collect();

    assert_eq!(backend.call_count(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    let last = results[2].as_ref().unwrap();
    assert_eq!(last.title.as_str(), "Otra Tesis");
    assert_eq!(last.found_count(), 1);
}
