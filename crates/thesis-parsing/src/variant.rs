use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thesis_core::EntityRecognizer;
use thiserror::Error;

use crate::advisor::KeywordEntity;
use crate::authors::{EntityWindow, GrammarChunks};
use crate::config::{ExtractionConfig, ExtractionConfigBuilder, ParagraphStrategy};
use crate::extractor::ThesisExtractor;

/// Preset combinations of title, author, advisor and paragraph heuristics.
///
/// | variant | title lines | author | director | paragraphs | per section |
/// |---------|-------------|--------|----------|------------|-------------|
/// | regex   | 5 | after title   | keyword line   | line chunks  | 2 |
/// | entity  | 5 | entity window | keyword entity | line chunks  | 2 |
/// | grammar | 3 | grammar chunk | keyword line   | blank blocks | 1 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Regex,
    Entity,
    Grammar,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown variant {0:?} (expected regex, entity or grammar)")]
pub struct ParseVariantError(String);

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Regex, Variant::Entity, Variant::Grammar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Regex => "regex",
            Variant::Entity => "entity",
            Variant::Grammar => "grammar",
        }
    }

    /// Builder pre-filled with this variant's counts and paragraph strategy.
    pub fn config_builder(&self) -> ExtractionConfigBuilder {
        let builder = ExtractionConfigBuilder::new();
        match self {
            Variant::Regex | Variant::Entity => builder
                .title_lines(5)
                .paragraphs(2)
                .paragraph_strategy(ParagraphStrategy::LineChunks),
            Variant::Grammar => builder
                .title_lines(3)
                .paragraphs(1)
                .paragraph_strategy(ParagraphStrategy::BlankLineBlocks),
        }
    }

    /// Text placed after each page when joining a document's pages.
    pub fn page_separator(&self) -> &'static str {
        match self {
            Variant::Regex => "",
            Variant::Entity => "\n",
            Variant::Grammar => "\n\n",
        }
    }

    /// Assemble the extractor for this variant.
    ///
    /// `recognizer` is only used by the entity variant.
    pub fn extractor(
        &self,
        config: ExtractionConfig,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> ThesisExtractor {
        let extractor = match self {
            Variant::Regex => ThesisExtractor::with_config(config),
            Variant::Entity => {
                let author = EntityWindow::new(Arc::clone(&recognizer), config.author_window_lines);
                let advisor = KeywordEntity::from_config(&config, recognizer);
                ThesisExtractor::with_config(config)
                    .with_author_strategy(Box::new(author))
                    .with_advisor_strategy(Box::new(advisor))
            }
            Variant::Grammar => {
                let author = GrammarChunks::from_config(&config);
                ThesisExtractor::with_config(config).with_author_strategy(Box::new(author))
            }
        };
        extractor.with_page_separator(self.page_separator())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regex" => Ok(Variant::Regex),
            "entity" => Ok(Variant::Entity),
            "grammar" => Ok(Variant::Grammar),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::GazetteerRecognizer;

    const SCENARIO: &str = "Impact Of Rainfall\nJuan Perez\n\n\
        Metodología\nSe aplico un enfoque cuantitativo con encuestas a 50 estudiantes \
        de la universidad local durante dos meses.\n\n\
        Conclusiones\nLos resultados muestran una correlacion positiva entre las \
        variables estudiadas en este trabajo academico.\n";

    fn build(variant: Variant) -> ThesisExtractor {
        let config = variant.config_builder().build().unwrap();
        variant.extractor(config, Arc::new(GazetteerRecognizer::builtin()))
    }

    #[test]
    fn test_parse_and_display() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string().parse::<Variant>(), Ok(variant));
        }
        assert_eq!(" Entity ".parse::<Variant>(), Ok(Variant::Entity));
        assert!("fuzzy".parse::<Variant>().is_err());
    }

    #[test]
    fn test_presets_select_strategies() {
        let regex = build(Variant::Regex);
        assert_eq!(regex.author_strategy_name(), "after-title");
        assert_eq!(regex.advisor_strategy_name(), "keyword-line");
        assert_eq!(regex.config().title_lines(), 5);
        assert_eq!(regex.config().paragraphs(), 2);
        assert_eq!(regex.page_separator(), "");

        let entity = build(Variant::Entity);
        assert_eq!(entity.author_strategy_name(), "entity-window");
        assert_eq!(entity.advisor_strategy_name(), "keyword-entity");
        assert_eq!(entity.page_separator(), "\n");

        let grammar = build(Variant::Grammar);
        assert_eq!(grammar.author_strategy_name(), "grammar-chunks");
        assert_eq!(grammar.advisor_strategy_name(), "keyword-line");
        assert_eq!(grammar.config().title_lines(), 3);
        assert_eq!(grammar.config().paragraphs(), 1);
        assert_eq!(
            grammar.config().paragraph_strategy(),
            ParagraphStrategy::BlankLineBlocks
        );
    }

    #[test]
    fn test_grammar_variant_scenario() {
        let record = build(Variant::Grammar).extract_from_text(SCENARIO);
        assert_eq!(record.title.as_str(), "Impact Of Rainfall Juan Perez Metodología");
        assert_eq!(
            record.methodology.as_str(),
            "se aplico un enfoque cuantitativo con encuestas a 50 estudiantes \
             de la universidad local durante dos meses."
        );
        assert_eq!(
            record.conclusions.as_str(),
            "los resultados muestran una correlacion positiva entre las \
             variables estudiadas en este trabajo academico."
        );
        assert_eq!(record.director.as_str(), "Director no encontrado");
    }

    #[test]
    fn test_entity_variant_finds_people() {
        let text = "UNIVERSIDAD DEL VALLE\nAnálisis de suelos\nCarlos Andrés Ruiz\n\n\
                    Director: Ricardo Gómez\n";
        let record = build(Variant::Entity).extract_from_text(text);
        assert_eq!(record.author.as_str(), "Carlos Andrés Ruiz");
        assert_eq!(record.director.as_str(), "Ricardo Gómez");
    }

    #[test]
    fn test_grammar_variant_author() {
        let text = "Estudio de caso\nElaborado por Laura Ríos Mejía.\n";
        let record = build(Variant::Grammar).extract_from_text(text);
        assert_eq!(record.author.as_str(), "Laura Ríos Mejía");
    }
}
