use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::model::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("word pair term cannot be empty")]
    EmptyTerm,

    #[error("translation for {term:?} cannot be empty")]
    EmptyTranslation { term: String },
}

//
// ─── WORD PAIR ─────────────────────────────────────────────────────────────────
//

/// A source-language term and its translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordPair {
    term: String,
    translation: String,
}

impl WordPair {
    /// Build a word pair, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if either side is empty after trimming.
    pub fn new(
        term: impl Into<String>,
        translation: impl Into<String>,
    ) -> Result<Self, LessonError> {
        let term = term.into().trim().to_owned();
        if term.is_empty() {
            return Err(LessonError::EmptyTerm);
        }
        let translation = translation.into().trim().to_owned();
        if translation.is_empty() {
            return Err(LessonError::EmptyTranslation { term });
        }
        Ok(Self { term, translation })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }
}

//
// ─── DIRECTION ─────────────────────────────────────────────────────────────────
//

/// Which side of a pair is asked and which is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Prompt with the term, answer with the translation.
    #[default]
    Forward,
    /// Prompt with the translation, answer with the term.
    Reverse,
}

impl Direction {
    #[must_use]
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse { Self::Reverse } else { Self::Forward }
    }

    #[must_use]
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::Reverse)
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    #[must_use]
    pub fn prompt_of(self, pair: &WordPair) -> &str {
        match self {
            Self::Forward => pair.term(),
            Self::Reverse => pair.translation(),
        }
    }

    #[must_use]
    pub fn answer_of(self, pair: &WordPair) -> &str {
        match self {
            Self::Forward => pair.translation(),
            Self::Reverse => pair.term(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "forward" => Some(Self::Forward),
            "reverse" => Some(Self::Reverse),
            _ => None,
        }
    }
}

//
// ─── WORD LIST ─────────────────────────────────────────────────────────────────
//

/// Ordered word pairs with unique terms.
///
/// Serializes as a JSON-style object `{ term: translation }` in insertion
/// order. A repeated term replaces the earlier translation in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList(Vec<WordPair>);

impl WordList {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, pair: WordPair) {
        match self.0.iter_mut().find(|p| p.term == pair.term) {
            Some(existing) => *existing = pair,
            None => self.0.push(pair),
        }
    }

    #[must_use]
    pub fn pairs(&self) -> &[WordPair] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn translation_of(&self, term: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.term == term)
            .map(WordPair::translation)
    }
}

impl FromIterator<WordPair> for WordList {
    fn from_iter<I: IntoIterator<Item = WordPair>>(iter: I) -> Self {
        let mut list = Self::new();
        for pair in iter {
            list.insert(pair);
        }
        list
    }
}

impl Serialize for WordList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|p| (p.term(), p.translation())))
    }
}

impl<'de> Deserialize<'de> for WordList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WordListVisitor;

        impl<'de> Visitor<'de> for WordListVisitor {
            type Value = WordList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping terms to translations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut list = WordList::new();
                while let Some((term, translation)) = map.next_entry::<String, String>()? {
                    let pair = WordPair::new(term, translation).map_err(serde::de::Error::custom)?;
                    list.insert(pair);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(WordListVisitor)
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// A named set of word pairs studied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    words: WordList,
}

impl Lesson {
    #[must_use]
    pub fn new(id: LessonId, words: WordList) -> Self {
        Self { id, words }
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn words(&self) -> &WordList {
        &self.words
    }

    #[must_use]
    pub fn pairs(&self) -> &[WordPair] {
        self.words.pairs()
    }

    #[must_use]
    pub fn into_parts(self) -> (LessonId, WordList) {
        (self.id, self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(term: &str, translation: &str) -> WordPair {
        WordPair::new(term, translation).unwrap()
    }

    #[test]
    fn word_pair_rejects_blank_sides() {
        assert_eq!(WordPair::new(" ", "dog"), Err(LessonError::EmptyTerm));
        assert_eq!(
            WordPair::new("犬", ""),
            Err(LessonError::EmptyTranslation {
                term: "犬".to_string()
            })
        );
    }

    #[test]
    fn direction_picks_sides() {
        let p = pair("犬", "dog");
        assert_eq!(Direction::Forward.prompt_of(&p), "犬");
        assert_eq!(Direction::Forward.answer_of(&p), "dog");
        assert_eq!(Direction::Reverse.prompt_of(&p), "dog");
        assert_eq!(Direction::Reverse.answer_of(&p), "犬");
        assert_eq!(Direction::from_reverse(true), Direction::Reverse);
        assert_eq!(Direction::Forward.toggled(), Direction::Reverse);
    }

    #[test]
    fn word_list_keeps_order_and_replaces_duplicates() {
        let json = r#"{"猫":"cat","犬":"dog","猫":"kitty"}"#;
        let list: WordList = serde_json::from_str(json).unwrap();
        let terms: Vec<_> = list.pairs().iter().map(WordPair::term).collect();
        assert_eq!(terms, vec!["猫", "犬"]);
        assert_eq!(list.translation_of("猫"), Some("kitty"));
    }

    #[test]
    fn word_list_serializes_as_object() {
        let list: WordList = [pair("水", "water"), pair("火", "fire")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"水":"water","火":"fire"}"#);
    }

    #[test]
    fn word_list_rejects_non_string_values() {
        let result = serde_json::from_str::<WordList>(r#"{"犬": 3}"#);
        assert!(result.is_err());
    }
}
