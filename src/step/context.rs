// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Handle of a running interpretation, given to step callables asking for it.

use std::fmt;

use crate::{parser::Statement, writer::Output};

/// Handle of the running interpretation, passed to step callables declaring
/// [`Param::Context`].
///
/// [`Param::Context`]: crate::Param::Context
pub struct Context<'a> {
    output: &'a mut Output,
    statement: &'a Statement,
    text: &'a str,
    label: &'a str,
}

impl<'a> Context<'a> {
    /// Creates a new [`Context`] of the step at the given `statement`.
    #[must_use]
    pub fn new(
        output: &'a mut Output,
        statement: &'a Statement,
        text: &'a str,
        label: &'a str,
    ) -> Self {
        Self { output, statement, text, label }
    }

    /// 1-based line number of the step being executed.
    #[must_use]
    pub fn line(&self) -> usize {
        self.statement.line
    }

    /// Step text the callable was matched against, with `<placeholders>`
    /// already substituted.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text
    }

    /// [`Statement`] of the step being executed.
    #[must_use]
    pub fn statement(&self) -> &Statement {
        self.statement
    }

    /// Tag label the run is filtered by, empty if none.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label
    }

    /// Indicates whether an error has already been recorded in this run.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.output.is_failed()
    }

    /// Writes a free-form note into the transcript, right below the step.
    pub fn note(&mut self, text: impl AsRef<str>) {
        self.output.note(&self.statement.indent, text.as_ref());
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("line", &self.line())
            .field("text", &self.text)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
