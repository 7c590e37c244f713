//! Rule-based named-entity recognition.
//!
//! Two recognisers implement [`EntityRecognizer`]:
//! - [`GazetteerRecognizer`]: capitalised word runs, labelled `Person` when
//!   they start at a known given name.
//! - [`ChunkRecognizer`]: sentence split, word tokenisation, capitalisation
//!   POS tags and proper-noun chunking (see [`grammar`]).

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use thesis_core::{Entity, EntityLabel, EntityRecognizer, ModelError};

use crate::text_processing::fold_accents;

pub mod grammar;

pub use grammar::ChunkRecognizer;

/// Words marking a capitalised run as an institution.
pub(crate) static ORG_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "universidad",
        "facultad",
        "instituto",
        "departamento",
        "escuela",
        "programa",
        "maestria",
        "doctorado",
        "especializacion",
        "corporacion",
        "fundacion",
        "centro",
        "colegio",
        "ministerio",
        "university",
        "institute",
        "department",
        "school",
        "college",
        "faculty",
    ]
    .into_iter()
    .collect()
});

/// Capitalised words that are never part of a personal name on a title page.
pub(crate) static NON_NAME_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "tesis",
        "trabajo",
        "grado",
        "proyecto",
        "titulo",
        "director",
        "directora",
        "codirector",
        "asesor",
        "asesora",
        "tutor",
        "tutora",
        "autor",
        "autora",
        "autores",
        "presentado",
        "presentada",
        "resumen",
        "abstract",
        "introduccion",
        "metodologia",
        "conclusiones",
        "capitulo",
        "ingenieria",
        "licenciatura",
        "magister",
        "doctor",
        "doctora",
        "ingeniero",
        "ingeniera",
        "profesor",
        "profesora",
        "dr",
        "dra",
        "ing",
        "lic",
        "mg",
        "msc",
        "phd",
        "analisis",
        "estudio",
        "sistema",
        "desarrollo",
        "evaluacion",
        "diseño",
        "implementacion",
        "modelo",
        "propuesta",
        "impacto",
        "efecto",
        "aplicacion",
    ]
    .into_iter()
    .collect()
});

/// Lowercase particles allowed inside a name, as in "Juan de la Cruz".
pub(crate) static NAME_CONNECTORS: &[&str] = &["de", "del", "la", "las", "los"];

static BUILTIN_NAMES: Lazy<Arc<HashSet<String>>> = Lazy::new(|| {
    let names = parse_name_list(include_str!("../../data/given_names.txt"));
    tracing::debug!(count = names.len(), "loaded built-in given names");
    Arc::new(names)
});

/// Parse a name list: one name per line, `#` starts a comment line.
fn parse_name_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(fold_accents)
        .collect()
}

/// Gazetteer-backed person recogniser.
///
/// Finds runs of two or more Title-case or ALL-CAPS words on one line
/// (lowercase `de`/`del`/`la`/`las`/`los` may sit between them). A run
/// containing an institution word is an `Organization`; otherwise the part
/// starting at the first known given name is a `Person` when it spans at
/// least two words. Everything else is `Misc`.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    names: Arc<HashSet<String>>,
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GazetteerRecognizer {
    /// Recogniser backed by the embedded given-name list.
    ///
    /// The list is parsed once per process on first use and shared.
    pub fn builtin() -> Self {
        Self {
            names: Arc::clone(&BUILTIN_NAMES),
        }
    }

    /// Load a custom given-name list. Fails if the file can't be read or
    /// holds no names.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let names = parse_name_list(&content);
        if names.is_empty() {
            return Err(ModelError::Empty(path.to_path_buf()));
        }
        tracing::info!(path = %path.display(), count = names.len(), "loaded given-name list");
        Ok(Self {
            names: Arc::new(names),
        })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: Arc::new(names.into_iter().map(|n| fold_accents(n.as_ref())).collect()),
        }
    }

    pub fn is_given_name(&self, word: &str) -> bool {
        self.names.contains(&fold_accents(word))
    }

    fn classify_run(&self, run: &str, out: &mut Vec<Entity>) {
        let words: Vec<&str> = run.split_whitespace().collect();
        let folded: Vec<String> = words.iter().map(|w| fold_accents(w)).collect();

        if folded.iter().any(|w| ORG_WORDS.contains(w.as_str())) {
            out.push(Entity::new(words.join(" "), EntityLabel::Organization));
            return;
        }

        let Some(start) = folded.iter().position(|w| self.names.contains(w)) else {
            out.push(Entity::new(words.join(" "), EntityLabel::Misc));
            return;
        };
        let end = folded[start..]
            .iter()
            .position(|w| NON_NAME_WORDS.contains(w.as_str()))
            .map_or(words.len(), |offset| start + offset);

        if end - start < 2 {
            out.push(Entity::new(words.join(" "), EntityLabel::Misc));
            return;
        }
        if start > 0 {
            out.push(Entity::new(words[..start].join(" "), EntityLabel::Misc));
        }
        out.push(Entity::new(words[start..end].join(" "), EntityLabel::Person));
        if end < words.len() {
            out.push(Entity::new(words[end..].join(" "), EntityLabel::Misc));
        }
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        static RUN_RE: Lazy<Regex> = Lazy::new(|| {
            let part = r"(?:\p{Lu}[\p{Ll}\p{M}]+|\p{Lu}{2,})";
            let word = format!(r"{part}(?:-{part})?");
            let connector = r"(?:(?:de|del|la|las|los|DE|DEL|LA|LAS|LOS)[ \t]+)*";
            Regex::new(&format!(r"\b{word}(?:[ \t]+{connector}{word})+\b")).unwrap()
        });

        let mut entities = Vec::new();
        for m in RUN_RE.find_iter(text) {
            self.classify_run(m.as_str(), &mut entities);
        }
        entities
    }
}

/// All distinct "Firstname Lastname" style sequences, in order of first
/// appearance.
pub fn find_person_names(text: &str) -> Vec<String> {
    static NAME_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\b\p{Lu}\p{Ll}+(?:\s\p{Lu}\p{Ll}+)+\b").unwrap());

    let mut seen = HashSet::new();
    NAME_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persons(entities: &[Entity]) -> Vec<&str> {
        entities
            .iter()
            .filter(|e| e.is_person())
            .map(|e| e.text.as_str())
            .collect()
    }

    #[test]
    fn test_builtin_recognizes_spanish_name() {
        let ner = GazetteerRecognizer::builtin();
        let entities = ner.recognize("Trabajo presentado por María Fernanda López para optar");
        assert_eq!(persons(&entities), vec!["María Fernanda López"]);
    }

    #[test]
    fn test_name_with_particles() {
        let ner = GazetteerRecognizer::builtin();
        let entities = ner.recognize("Autor: Juan de la Cruz Ramírez");
        assert_eq!(persons(&entities), vec!["Juan de la Cruz Ramírez"]);
    }

    #[test]
    fn test_all_caps_name() {
        let ner = GazetteerRecognizer::builtin();
        assert_eq!(
            ner.first_person("UNIVERSIDAD DEL CAUCA\nCARLOS ANDRES MUÑOZ\n"),
            Some("CARLOS ANDRES MUÑOZ".to_string())
        );
    }

    #[test]
    fn test_institution_is_organization() {
        let ner = GazetteerRecognizer::builtin();
        let entities = ner.recognize("Universidad Nacional de Colombia");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label, EntityLabel::Organization);
    }

    #[test]
    fn test_person_split_from_title_words() {
        let ner = GazetteerRecognizer::builtin();
        let entities = ner.recognize("Director Ricardo Gómez Doctor");
        let labels: Vec<_> = entities.iter().map(|e| (e.text.as_str(), e.label)).collect();
        assert_eq!(
            labels,
            vec![
                ("Director", EntityLabel::Misc),
                ("Ricardo Gómez", EntityLabel::Person),
                ("Doctor", EntityLabel::Misc),
            ]
        );
    }

    #[test]
    fn test_single_capitalized_word_is_ignored() {
        let ner = GazetteerRecognizer::builtin();
        assert!(ner.recognize("Juan llegó tarde").is_empty());
        assert_eq!(ner.first_person("director: maria gomez"), None);
    }

    #[test]
    fn test_unknown_first_name_is_misc() {
        let ner = GazetteerRecognizer::builtin();
        let entities = ner.recognize("Impact Of Rainfall");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label, EntityLabel::Misc);
    }

    #[test]
    fn test_custom_names() {
        let ner = GazetteerRecognizer::from_names(["Xiomara"]);
        assert!(ner.is_given_name("XIOMARA"));
        assert_eq!(
            ner.first_person("Xiomara Quintero y Juan Pérez"),
            Some("Xiomara Quintero".to_string())
        );
        assert!(!ner.is_given_name("Juan"));
    }

    #[test]
    fn test_from_path_loads_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "# nombres\nÉdgar\n\nyesenia\n").unwrap();
        let ner = GazetteerRecognizer::from_path(&path).unwrap();
        assert!(ner.is_given_name("Edgar"));
        assert!(ner.is_given_name("Yesenia"));
    }

    #[test]
    fn test_from_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            GazetteerRecognizer::from_path(&missing),
            Err(ModelError::Read { .. })
        ));

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "# only comments\n\n").unwrap();
        assert!(matches!(
            GazetteerRecognizer::from_path(&empty),
            Err(ModelError::Empty(_))
        ));
    }

    #[test]
    fn test_find_person_names_dedups_in_order() {
        let text = "Juan Perez y Maria Gomez. después, Juan Perez volvió.";
        assert_eq!(find_person_names(text), vec!["Juan Perez", "Maria Gomez"]);
        assert!(find_person_names("sin nombres aquí").is_empty());
    }
}
