// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line classification.

use crate::{Keyword, Vocabulary};

use super::Statement;

/// Marker opening and closing a doc-string.
pub const DOC_STRING_DELIMITER: &str = r#"""""#;

/// Turns raw lines into [`Statement`]s using a [`Vocabulary`].
#[derive(Clone, Copy, Debug)]
pub struct Lexer<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> Lexer<'v> {
    /// Creates a new [`Lexer`] resolving keywords with the given
    /// [`Vocabulary`].
    #[must_use]
    pub const fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Classifies a single `text` line found at the given 1-based `line`.
    ///
    /// Only the leading word (or the longest leading phrase) of the line is
    /// looked up, so a step like `Given Scenario: x is reached` stays a
    /// [`Keyword::Step`]. The colon is recorded but never changes the
    /// category: `Scenario one` still opens a scenario.
    #[must_use]
    pub fn lex(&self, line: usize, text: &str) -> Statement {
        let rest = text.trim_start();
        let indent = &text[..text.len() - rest.len()];

        let leading = self.vocabulary.longest_prefix(rest).map(|(word, kind)| {
            let after = rest[word.len()..].trim_start();
            let (colon, body) = after
                .strip_prefix(':')
                .map_or((false, after), |b| (true, b.trim_start()));
            (word, kind, colon, body)
        });
        let (keyword, kind, colon, body) =
            leading.unwrap_or_else(|| ("", fallback(rest), false, rest));

        Statement {
            line,
            text: text.to_owned(),
            indent: indent.to_owned(),
            keyword: keyword.to_owned(),
            kind,
            colon,
            body: body.trim_end().to_owned(),
            extras: Vec::new(),
        }
    }
}

/// Classifies a line not starting with a [`Vocabulary`] word by its leading
/// punctuation.
fn fallback(trimmed: &str) -> Keyword {
    if trimmed.starts_with(DOC_STRING_DELIMITER) {
        return Keyword::DocString;
    }
    match trimmed.chars().next() {
        Some('|') => Keyword::DataTable,
        Some('@') => Keyword::Tag,
        Some('#') => Keyword::Comments,
        _ => Keyword::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Statement {
        Lexer::new(&Vocabulary::english()).lex(1, text)
    }

    #[test]
    fn splits_header_line() {
        let st = lex("  Scenario Outline: eating <n> cucumbers ");

        assert_eq!(st.indent, "  ");
        assert_eq!(st.keyword, "Scenario Outline");
        assert_eq!(st.kind, Keyword::ScenarioOutline);
        assert!(st.colon);
        assert!(st.is_header());
        assert_eq!(st.body, "eating <n> cucumbers");
    }

    #[test]
    fn splits_step_line() {
        let st = lex("    Given there are 5 cucumbers");

        assert_eq!(st.indent, "    ");
        assert_eq!(st.keyword, "Given");
        assert_eq!(st.kind, Keyword::Step);
        assert!(!st.colon);
        assert_eq!(st.body, "there are 5 cucumbers");
    }

    #[test]
    fn step_starting_with_keyword_like_word_stays_step() {
        let st = lex("  When Examples: are shown");

        assert_eq!(st.kind, Keyword::Step);
        assert_eq!(st.keyword, "When");
        assert!(!st.is_header());
        assert_eq!(st.body, "Examples: are shown");
    }

    #[test]
    fn header_word_without_colon_keeps_its_category() {
        let st = lex("  Scenario one");

        assert_eq!(st.kind, Keyword::Scenario);
        assert_eq!(st.keyword, "Scenario");
        assert!(!st.colon);
        assert!(st.is_header());
        assert_eq!(st.body, "one");
    }

    #[test]
    fn falls_back_to_punctuation() {
        assert_eq!(lex(r#"    """"#).kind, Keyword::DocString);
        assert_eq!(lex("    | a | b |").kind, Keyword::DataTable);
        assert_eq!(lex("  @slow @db").kind, Keyword::Tag);
        assert_eq!(lex("  # a comment: really").kind, Keyword::Comments);
        assert_eq!(lex("   ").kind, Keyword::Unknown);
        assert_eq!(lex("free text").kind, Keyword::Unknown);
    }

    #[test]
    fn vocabulary_match_wins_over_punctuation() {
        let vocabulary = Vocabulary::new().with(Keyword::Step, ["#"]);
        let st = Lexer::new(&vocabulary).lex(3, "# not a comment");

        assert_eq!(st.kind, Keyword::Step);
        assert_eq!(st.line, 3);
        assert_eq!(st.body, "not a comment");
    }

    #[test]
    fn colon_inside_step_body_is_not_a_header() {
        let st = lex("Then the time is 10:30");

        assert_eq!(st.kind, Keyword::Step);
        assert!(!st.colon);
        assert_eq!(st.body, "the time is 10:30");
    }
}
