// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Keyword [`Vocabulary`] mapping surface words onto Gherkin [`Keyword`]s.
//!
//! A [`Vocabulary`] is a plain lookup table. Several of them (e.g. one per
//! spoken language, or project-specific synonyms) may be [merged] into one
//! before a run starts.
//!
//! [merged]: Vocabulary::merge

use std::collections::HashMap;

use derive_more::Display;
use once_cell::sync::Lazy;

/// Category of a feature file line.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Keyword {
    /// `Feature:` header.
    Feature,

    /// `Rule:` header.
    Rule,

    /// `Scenario:` header.
    Scenario,

    /// Executable step line (`Given`, `When`, `Then`, ...).
    Step,

    /// `Background:` header.
    Background,

    /// `Scenario Outline:` header.
    #[display("Scenario Outline")]
    ScenarioOutline,

    /// `Examples:` header.
    Examples,

    /// `"""` doc-string delimiter.
    #[display("Doc String")]
    DocString,

    /// `|`-delimited table row.
    #[display("Data Table")]
    DataTable,

    /// `@`-prefixed tag line.
    Tag,

    /// `#`-prefixed comment line.
    Comments,

    /// Manual verification line, answered by a [`Prompt`].
    ///
    /// [`Prompt`]: crate::Prompt
    Ask,

    /// Anything else: descriptions, blank lines, free text.
    Unknown,
}

impl Keyword {
    /// Indicates whether this [`Keyword`] opens a new block.
    #[must_use]
    pub const fn is_header(self) -> bool {
        matches!(
            self,
            Self::Feature
                | Self::Rule
                | Self::Scenario
                | Self::Background
                | Self::ScenarioOutline
                | Self::Examples,
        )
    }

    /// Indicates whether lines of this [`Keyword`] are executed.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Step | Self::Ask)
    }
}

/// Lookup table from surface words (or multi-word phrases) to [`Keyword`]s.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    words: HashMap<String, Keyword>,
}

static ENGLISH: Lazy<Vocabulary> = Lazy::new(|| {
    Vocabulary::new()
        .with(Keyword::Feature, ["Feature", "Business Need", "Ability"])
        .with(Keyword::Rule, ["Rule"])
        .with(Keyword::Scenario, ["Scenario", "Example"])
        .with(Keyword::Step, ["Given", "When", "Then", "And", "But", "*"])
        .with(Keyword::Background, ["Background"])
        .with(
            Keyword::ScenarioOutline,
            ["Scenario Outline", "Scenario Template"],
        )
        .with(Keyword::Examples, ["Examples", "Scenarios"])
        .with(Keyword::Ask, ["Ask", "Confirm"])
});

impl Vocabulary {
    /// Creates an empty [`Vocabulary`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stock English [`Vocabulary`].
    #[must_use]
    pub fn english() -> Self {
        ENGLISH.clone()
    }

    /// Adds all the `words` as synonyms of the given [`Keyword`].
    #[must_use]
    pub fn with<I, S>(mut self, keyword: Keyword, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            self.insert(word, keyword);
        }
        self
    }

    /// Maps a single `word` to the given [`Keyword`], returning the
    /// [`Keyword`] it was mapped to before, if any.
    pub fn insert(
        &mut self,
        word: impl Into<String>,
        keyword: Keyword,
    ) -> Option<Keyword> {
        self.words.insert(word.into(), keyword)
    }

    /// Unions `other` into this [`Vocabulary`].
    ///
    /// Words present in both are resolved in favour of `other`.
    pub fn merge(&mut self, other: Self) {
        self.words.extend(other.words);
    }

    /// Resolves the given `word`, defaulting to [`Keyword::Unknown`].
    #[must_use]
    pub fn resolve(&self, word: &str) -> Keyword {
        self.words.get(word).copied().unwrap_or(Keyword::Unknown)
    }

    /// Finds the longest word of this [`Vocabulary`] the `text` starts with.
    ///
    /// A word only matches at a boundary: it has to be followed by the end of
    /// the `text`, whitespace or a colon. Returns the matched word along with
    /// its [`Keyword`].
    #[must_use]
    pub fn longest_prefix<'t>(
        &self,
        text: &'t str,
    ) -> Option<(&'t str, Keyword)> {
        self.words
            .iter()
            .filter(|(word, _)| {
                !word.is_empty()
                    && text.starts_with(word.as_str())
                    && text[word.len()..]
                        .chars()
                        .next()
                        .map_or(true, |c| c.is_whitespace() || c == ':')
            })
            .max_by_key(|(word, _)| word.len())
            .map(|(word, keyword)| (&text[..word.len()], *keyword))
    }

    /// Returns the number of words in this [`Vocabulary`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Indicates whether this [`Vocabulary`] has no words at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
