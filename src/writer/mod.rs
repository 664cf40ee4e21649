// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Transcript [`Output`] of a run.

mod styles;

use std::{borrow::Cow, fmt::Write as _};

use crate::{parser::Statement, Error, Report};

pub use self::styles::{Coloring, Styles};

/// Visual treatment of a line written "as is".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tone {
    /// No styling.
    Plain,

    /// Line only recorded, not executed.
    Dim,

    /// Comment line.
    Comment,

    /// Tag line.
    Tag,
}

/// Accumulator of a human-readable transcript.
///
/// Records the first [`Error`] written into it. Once an [`Error`] is
/// recorded, every following line is dimmed regardless of its [`Tone`].
#[derive(Debug)]
pub struct Output {
    styles: Styles,
    transcript: String,
    lines: usize,
    error: Option<Error>,
    failed: bool,
}

impl Output {
    /// Creates an empty [`Output`] following the given [`Coloring`] policy.
    #[must_use]
    pub fn new(coloring: Coloring) -> Self {
        Self {
            styles: Styles::new(coloring),
            transcript: String::new(),
            lines: 0,
            error: None,
            failed: false,
        }
    }

    /// Indicates whether an [`Error`] has been recorded.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.failed
    }

    /// Returns the number of lines written so far.
    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Writes a header `statement` as `{keyword}: {body}`.
    pub fn header(&mut self, statement: &Statement) {
        let colon = if statement.colon { ":" } else { "" };
        let line = if self.failed {
            self.styles.dim(keyword_line(statement, colon, &statement.body))
        } else {
            let keyword = format!("{}{colon}", statement.keyword);
            let body = self.styles.keyword(statement.body.as_str());
            Cow::Owned(keyword_line_parts(
                &statement.indent,
                &self.styles.header(keyword),
                &body,
            ))
        };
        self.push(&line);
    }

    /// Writes an executable `statement` as `{keyword} {body}`, using the
    /// given `body` instead of the statement's own one.
    pub fn step(&mut self, statement: &Statement, body: &str) {
        let line = if self.failed {
            self.styles.dim(keyword_line(statement, "", body))
        } else {
            Cow::Owned(keyword_line_parts(
                &statement.indent,
                &self.styles.keyword(statement.keyword.as_str()),
                body,
            ))
        };
        self.push(&line);
    }

    /// Writes `text` "as is", styled with the given [`Tone`].
    pub fn raw(&mut self, text: &str, tone: Tone) {
        let line = match tone {
            _ if self.failed => self.styles.dim(text),
            Tone::Plain => Cow::Borrowed(text),
            Tone::Dim => self.styles.dim(text),
            Tone::Comment => self.styles.comment(text),
            Tone::Tag => self.styles.tag(text),
        };
        self.push(&line);
    }

    /// Writes a free-form note reported by a step.
    pub fn note(&mut self, indent: &str, text: &str) {
        let line = format!("{indent}  {}", self.styles.comment(text));
        self.push(&line);
    }

    /// Writes the `error` under the line it relates to and records it, unless
    /// another [`Error`] was recorded before.
    pub fn error(&mut self, indent: &str, error: Error) {
        let marker = format!("^^^^^^ {error} ^^^^^^");
        let line = format!("{indent}{}", self.styles.err(marker));
        self.push(&line);
        self.failed = true;
        _ = self.error.get_or_insert(error);
    }

    /// Finishes this [`Output`] into a [`Report`].
    #[must_use]
    pub fn into_report(self) -> Report {
        Report {
            success: self.error.is_none(),
            transcript: self.transcript,
            error: self.error,
        }
    }

    fn push(&mut self, line: &str) {
        _ = writeln!(self.transcript, "{line}");
        self.lines += 1;
    }
}

fn keyword_line(statement: &Statement, colon: &str, body: &str) -> String {
    keyword_line_parts(
        &statement.indent,
        &format!("{}{colon}", statement.keyword),
        body,
    )
}

fn keyword_line_parts(indent: &str, keyword: &str, body: &str) -> String {
    if body.is_empty() {
        format!("{indent}{keyword}")
    } else {
        format!("{indent}{keyword} {body}")
    }
}
