// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Single classified line of a feature file.

use std::fmt;

use crate::{DataTable, Keyword};

/// Classified line of a feature file, along with the doc-string and table
/// lines belonging to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statement {
    /// 1-based line number in the source.
    pub line: usize,

    /// Raw text of the line, exactly as read.
    pub text: String,

    /// Leading whitespace of the line.
    pub indent: String,

    /// Surface word (or phrase) this line starts with, empty if the line
    /// doesn't start with a [`Vocabulary`] word.
    ///
    /// [`Vocabulary`]: crate::Vocabulary
    pub keyword: String,

    /// Category of this line.
    pub kind: Keyword,

    /// Whether the [`keyword`](Self::keyword) is followed by a colon.
    pub colon: bool,

    /// Free text following the keyword and the optional colon.
    pub body: String,

    /// Doc-string and table lines attached to this [`Statement`], in source
    /// order.
    pub extras: Vec<Statement>,
}

impl Statement {
    /// Indicates whether this [`Statement`] opens a new block.
    #[must_use]
    pub fn is_header(&self) -> bool {
        self.kind.is_header()
    }

    /// Indicates whether the [`body`](Self::body) is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.kind == Keyword::Unknown && self.body.is_empty()
    }

    /// Returns the text of the attached doc-string, if any.
    ///
    /// Every body line loses as much leading whitespace as the opening
    /// delimiter is indented by; lines are joined with `\n`.
    #[must_use]
    pub fn doc_string(&self) -> Option<String> {
        let open = self
            .extras
            .iter()
            .position(|s| s.kind == Keyword::DocString)?;
        let margin = self.extras[open].indent.chars().count();
        let body = self.extras[open + 1..]
            .iter()
            .take_while(|s| s.kind != Keyword::DocString)
            .map(|s| strip_margin(&s.text, margin))
            .collect::<Vec<_>>();
        Some(body.join("\n"))
    }

    /// Returns the attached table lines, skipping anything inside a
    /// doc-string.
    pub fn table_lines(&self) -> impl Iterator<Item = &Statement> {
        let mut in_doc_string = false;
        self.extras.iter().filter(move |s| {
            if s.kind == Keyword::DocString {
                in_doc_string = !in_doc_string;
                return false;
            }
            !in_doc_string && s.kind == Keyword::DataTable
        })
    }

    /// Returns the attached [`DataTable`], if any.
    #[must_use]
    pub fn table(&self) -> Option<DataTable> {
        let table = DataTable::parse(self.table_lines().map(|s| &s.text));
        (!table.is_empty()).then_some(table)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.keyword, self.kind, self.body)
    }
}

/// Removes up to `margin` leading whitespace characters from the `line`.
fn strip_margin(line: &str, margin: usize) -> &str {
    let cut = line
        .char_indices()
        .take(margin)
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[cut..]
}
