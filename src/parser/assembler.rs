// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Grouping of doc-string and table lines under their owning statement.

use crate::Keyword;

use super::Statement;

/// Builds the flat top-level [`Statement`] sequence out of lexed lines.
///
/// Doc-string and table lines become [`Statement::extras`] of the step, `Ask`
/// or `Examples` statement right above them (the anchor). Any other line
/// pushed to the top level, comments and blank lines included, drops it.
#[derive(Debug, Default)]
pub struct Assembler {
    statements: Vec<Statement>,
    anchor: Option<usize>,
    in_doc_string: bool,
}

impl Assembler {
    /// Creates an empty [`Assembler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next lexed line.
    pub fn push(&mut self, statement: Statement) {
        if self.in_doc_string {
            let closing = statement.kind == Keyword::DocString;
            self.attach(statement);
            if closing {
                self.in_doc_string = false;
                if self
                    .anchor
                    .is_some_and(|at| self.statements[at].kind == Keyword::DocString)
                {
                    self.anchor = None;
                }
            }
            return;
        }

        match statement.kind {
            Keyword::DocString => {
                self.in_doc_string = true;
                self.attach(statement);
            }
            Keyword::DataTable => self.attach(statement),
            kind => {
                self.anchor = (kind.is_executable() || kind == Keyword::Examples)
                    .then_some(self.statements.len());
                self.statements.push(statement);
            }
        }
    }

    /// Returns the assembled top-level [`Statement`]s.
    #[must_use]
    pub fn finish(self) -> Vec<Statement> {
        self.statements
    }

    /// Attaches the `statement` to the anchor, or pushes it to the top level
    /// when there is none.
    ///
    /// An unanchored doc-string opener becomes the anchor of its own body.
    fn attach(&mut self, statement: Statement) {
        match self.anchor {
            Some(at) => self.statements[at].extras.push(statement),
            None => {
                if statement.kind == Keyword::DocString && self.in_doc_string {
                    self.anchor = Some(self.statements.len());
                }
                self.statements.push(statement);
            }
        }
    }
}
