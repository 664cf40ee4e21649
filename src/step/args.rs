// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Arguments supplied to step callables.

use crate::DataTable;

use super::Context;

/// Kind of a value a step callable declares it wants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Param {
    /// Capture groups of the matching pattern, in order.
    Captures,

    /// Text of the attached doc-string, empty if none.
    DocString,

    /// Attached [`DataTable`], empty if none.
    DataTable,

    /// [`Context`] of the running interpretation.
    Context,
}

/// Single supplied value of a [`Param`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Arg {
    /// Supplied for [`Param::Captures`].
    Captures(Vec<String>),

    /// Supplied for [`Param::DocString`].
    DocString(String),

    /// Supplied for [`Param::DataTable`].
    DataTable(DataTable),
}

static EMPTY_TABLE: DataTable = DataTable::new(Vec::new());

/// Values supplied to a step callable, one per declared [`Param`].
#[derive(Debug, Default)]
pub struct Args<'a> {
    values: Vec<Arg>,
    context: Option<Context<'a>>,
}

impl<'a> Args<'a> {
    /// Builds [`Args`] for the declared `params` out of what the step
    /// provides.
    ///
    /// Only the first [`Param::Context`] receives the [`Context`].
    #[must_use]
    pub fn supply(
        params: &[Param],
        captures: Vec<String>,
        doc_string: Option<String>,
        table: Option<DataTable>,
        context: Context<'a>,
    ) -> Self {
        let mut context = Some(context);
        let mut args = Self::default();
        for param in params {
            match param {
                Param::Captures => args.values.push(Arg::Captures(captures.clone())),
                Param::DocString => args
                    .values
                    .push(Arg::DocString(doc_string.clone().unwrap_or_default())),
                Param::DataTable => args
                    .values
                    .push(Arg::DataTable(table.clone().unwrap_or_default())),
                Param::Context => {
                    if args.context.is_none() {
                        args.context = context.take();
                    }
                }
            }
        }
        args
    }

    /// Returns the supplied values in declaration order, [`Context`] aside.
    #[must_use]
    pub fn values(&self) -> &[Arg] {
        &self.values
    }

    /// Returns the captured groups, empty if [`Param::Captures`] wasn't
    /// declared.
    ///
    /// Groups that didn't participate in the match are empty strings.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        self.values
            .iter()
            .find_map(|a| match a {
                Arg::Captures(c) => Some(c.as_slice()),
                Arg::DocString(_) | Arg::DataTable(_) => None,
            })
            .unwrap_or_default()
    }

    /// Returns the captured group at the given `index`, counting from `0`.
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures().get(index).map(String::as_str)
    }

    /// Returns the doc-string text, empty if none.
    #[must_use]
    pub fn doc_string(&self) -> &str {
        self.values
            .iter()
            .find_map(|a| match a {
                Arg::DocString(s) => Some(s.as_str()),
                Arg::Captures(_) | Arg::DataTable(_) => None,
            })
            .unwrap_or_default()
    }

    /// Returns the [`DataTable`], empty if none.
    #[must_use]
    pub fn table(&self) -> &DataTable {
        self.values
            .iter()
            .find_map(|a| match a {
                Arg::DataTable(t) => Some(t),
                Arg::Captures(_) | Arg::DocString(_) => None,
            })
            .unwrap_or(&EMPTY_TABLE)
    }

    /// Returns the [`Context`], if [`Param::Context`] was declared.
    pub fn context(&mut self) -> Option<&mut Context<'a>> {
        self.context.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        parser::Lexer,
        writer::{Coloring, Output},
        Vocabulary,
    };

    use super::*;

    #[test]
    fn supplies_only_declared_values() {
        let statement = Lexer::new(&Vocabulary::english()).lex(1, "Given x");
        let mut output = Output::new(Coloring::Never);
        let ctx = Context::new(&mut output, &statement, "x", "");

        let mut args = Args::supply(
            &[Param::DocString, Param::Captures],
            vec!["5".into()],
            None,
            Some(DataTable::from(vec![vec!["a"]])),
            ctx,
        );

        assert_eq!(
            args.values(),
            [Arg::DocString(String::new()), Arg::Captures(vec!["5".into()])],
        );
        assert_eq!(args.capture(0), Some("5"));
        assert_eq!(args.doc_string(), "");
        assert!(args.table().is_empty());
        assert!(args.context().is_none());
    }

    #[test]
    fn context_is_handed_out_once() {
        let statement = Lexer::new(&Vocabulary::english()).lex(3, "Then y");
        let mut output = Output::new(Coloring::Never);
        let ctx = Context::new(&mut output, &statement, "y", "");

        let mut args =
            Args::supply(&[Param::Context, Param::Context], vec![], None, None, ctx);

        assert!(args.values().is_empty());
        assert_eq!(args.context().map(|c| c.line()), Some(3));
    }
}
