use std::path::PathBuf;

use thiserror::Error;

/// Category assigned to a recognised span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Misc,
}

/// A span of text tagged by an [`EntityRecognizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Number of whitespace-separated tokens in the span.
    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn is_person(&self) -> bool {
        self.label == EntityLabel::Person
    }
}

/// Errors raised while loading a recogniser's resources.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read name list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("name list {0} contains no names")]
    Empty(PathBuf),
}

/// Named-entity recognition collaborator.
///
/// Given a string, returns the recognised entities in order of appearance.
/// Used only by the entity-based author and advisor strategies.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<Entity>;

    /// First entity labelled [`EntityLabel::Person`], if any.
    fn first_person(&self, text: &str) -> Option<String> {
        self.recognize(text)
            .into_iter()
            .find(Entity::is_person)
            .map(|e| e.text)
    }
}
