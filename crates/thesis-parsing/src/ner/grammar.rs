//! Sentence splitting, word tokenisation, POS tagging and proper-noun
//! chunking.
//!
//! The tagger only looks at capitalisation and a closed list of function
//! words, which is enough to pull capitalised name chunks out of a title
//! page.

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use thesis_core::{Entity, EntityLabel, EntityRecognizer};

use super::{NAME_CONNECTORS, NON_NAME_WORDS, ORG_WORDS};
use crate::text_processing::fold_accents;

/// Abbreviations whose trailing period does not end a sentence.
static ABBREVIATIONS: &[&str] = &[
    "dr", "dra", "ing", "lic", "sr", "sra", "srta", "mg", "msc", "mtro", "mtra", "prof", "ph.d",
    "phd", "esp", "arq", "no", "vol", "pp", "al",
];

/// Closed-class words (articles, prepositions, conjunctions, pronouns).
static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "el", "la", "los", "las", "un", "una", "unos", "unas", "lo", "de", "del", "al", "a", "en",
        "por", "para", "con", "sin", "sobre", "entre", "desde", "hasta", "hacia", "y", "e", "o",
        "u", "que", "se", "su", "sus", "este", "esta", "estos", "estas", "ese", "esa", "como",
        "the", "of", "and", "or", "in", "on", "for", "to", "with", "by", "an", "at", "from",
    ]
    .into_iter()
    .collect()
});

/// Prepositions that make the following chunk a place.
static LOCATION_CUES: &[&str] = &["en", "in"];

/// Part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    ProperNoun,
    Noun,
    Number,
    Punct,
    Function,
}

/// A word with the index of the line it came from within its sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: Tag,
}

/// A maximal run of proper nouns (with inner name particles) on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub words: Vec<String>,
    pub label: EntityLabel,
}

impl Chunk {
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
///
/// Periods after single capital initials ("J.") and common abbreviations
/// ("Dr.", "Ing.", "Ph.D.") do not end a sentence. Line breaks don't either.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
        if !at_boundary {
            continue;
        }
        if c == '.' && ends_with_abbreviation(&text[start..i]) {
            continue;
        }
        let end = i + c.len_utf8();
        push_trimmed(&mut sentences, &text[start..end]);
        start = end;
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, s: &'a str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s);
    }
}

fn ends_with_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_uppercase();
    }
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

/// Split a sentence into word, number and punctuation tokens.
///
/// A capital letter followed by a period stays one token (an initial).
pub fn tokenize_words(sentence: &str) -> Vec<Token> {
    static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(concat!(
            r"\p{Lu}\.",
            r"|[\p{L}\p{M}]+(?:['’\-][\p{L}\p{M}]+)*",
            r"|\d+(?:[.,]\d+)*",
            r"|[^\s\p{L}\p{M}\d]",
        ))
        .unwrap()
    });

    sentence
        .lines()
        .enumerate()
        .flat_map(|(line, text)| {
            TOKEN_RE.find_iter(text).map(move |m| Token {
                text: m.as_str().to_string(),
                line,
            })
        })
        .collect()
}

fn tag_word(word: &str) -> Tag {
    let Some(first) = word.chars().next() else {
        return Tag::Punct;
    };
    if !word.chars().any(char::is_alphanumeric) {
        Tag::Punct
    } else if first.is_ascii_digit() {
        Tag::Number
    } else if FUNCTION_WORDS.contains(fold_accents(word).as_str()) {
        Tag::Function
    } else if first.is_uppercase() {
        Tag::ProperNoun
    } else {
        Tag::Noun
    }
}

/// Tag each token by capitalisation and the function-word list.
pub fn pos_tag(tokens: Vec<Token>) -> Vec<TaggedToken> {
    tokens
        .into_iter()
        .map(|token| {
            let tag = tag_word(&token.text);
            TaggedToken { token, tag }
        })
        .collect()
}

fn is_connector(t: &TaggedToken) -> bool {
    t.tag == Tag::Function && NAME_CONNECTORS.contains(&t.token.text.to_lowercase().as_str())
}

fn proper_noun_spans(tagged: &[TaggedToken]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tagged.len() {
        if tagged[i].tag != Tag::ProperNoun {
            i += 1;
            continue;
        }
        let line = tagged[i].token.line;
        let same_line = |t: &TaggedToken| t.token.line == line;
        let start = i;
        let mut end = i + 1;
        loop {
            let mut j = end;
            while j < tagged.len() && same_line(&tagged[j]) && is_connector(&tagged[j]) {
                j += 1;
            }
            if j < tagged.len() && same_line(&tagged[j]) && tagged[j].tag == Tag::ProperNoun {
                end = j + 1;
            } else {
                break;
            }
        }
        spans.push(start..end);
        i = end;
    }
    spans
}

fn label_span(tagged: &[TaggedToken], span: Range<usize>) -> Option<Chunk> {
    let preceding = span
        .start
        .checked_sub(1)
        .map(|p| fold_accents(&tagged[p].token.text));

    // Drop honorifics and role words ("Dr.", "Director") at the edges.
    let is_edge_noise = |t: &TaggedToken| {
        let w = fold_accents(t.token.text.trim_end_matches('.'));
        NON_NAME_WORDS.contains(w.as_str()) || is_connector(t)
    };
    let mut span = span;
    while span.start < span.end && is_edge_noise(&tagged[span.start]) {
        span.start += 1;
    }
    while span.end > span.start && is_edge_noise(&tagged[span.end - 1]) {
        span.end -= 1;
    }
    if span.is_empty() {
        return None;
    }

    let words: Vec<String> = tagged[span].iter().map(|t| t.token.text.clone()).collect();
    let folded: Vec<String> = words.iter().map(|w| fold_accents(w)).collect();

    let label = if folded.iter().any(|w| ORG_WORDS.contains(w.as_str())) {
        EntityLabel::Organization
    } else if preceding
        .as_deref()
        .is_some_and(|p| LOCATION_CUES.contains(&p))
    {
        EntityLabel::Location
    } else if folded.iter().any(|w| NON_NAME_WORDS.contains(w.as_str())) {
        EntityLabel::Misc
    } else {
        EntityLabel::Person
    };
    Some(Chunk { words, label })
}

/// Group tagged tokens into labelled proper-noun chunks.
pub fn chunk(tagged: &[TaggedToken]) -> Vec<Chunk> {
    proper_noun_spans(tagged)
        .into_iter()
        .filter_map(|span| label_span(tagged, span))
        .collect()
}

/// [`EntityRecognizer`] running the full sentence → token → tag → chunk
/// pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkRecognizer;

impl ChunkRecognizer {
    /// Entities from the first `max_sentences` sentences of `text`, in
    /// reading order.
    pub fn recognize_sentences(&self, text: &str, max_sentences: usize) -> Vec<Entity> {
        split_sentences(text)
            .into_iter()
            .take(max_sentences)
            .flat_map(|sentence| chunk(&pos_tag(tokenize_words(sentence))))
            .map(|c| Entity::new(c.text(), c.label))
            .collect()
    }
}

impl EntityRecognizer for ChunkRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        self.recognize_sentences(text, usize::MAX)
    }
}
