// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line-by-line interpretation of [`Statement`]s.
//!
//! The [`Engine`] walks a flat [`Statement`] list with a single cursor.
//! `Background` and `Scenario Outline` blocks are only recorded as line
//! ranges; they get executed by moving the cursor into the range and back
//! out once it reaches the range end.

use std::{
    mem,
    panic::{self, AssertUnwindSafe},
};

use futures::FutureExt as _;
use tracing::{debug, trace, warn};

use crate::{
    parser::Statement,
    step::{Args, Collection, Context, Signal},
    tag::Label,
    writer::{Output, Tone},
    Error, Keyword, Prompt, Report,
};

use super::outline::Examples;

/// Block the [`Engine`] is currently in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Feature,
    Scenario,
    Background,
    Outline,
    Examples,
}

/// Half-open range of statement indices.
#[derive(Clone, Copy, Debug, Default)]
struct Range {
    start: usize,
    len: usize,
}

impl Range {
    const fn end(self) -> usize {
        self.start + self.len
    }

    const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Tag texts in scope.
#[derive(Debug, Default)]
struct Tags {
    /// Tag lines seen since the last header.
    pending: Vec<String>,
    feature: String,
    rule: String,
    block: String,
    outline: String,
}

impl Tags {
    fn take_pending(&mut self) -> String {
        mem::take(&mut self.pending).join(" ")
    }
}

/// What to do once a [`Statement`] is visited.
enum Flow<'a> {
    /// Move to the next line.
    Next,

    /// Cursor was moved already.
    Jump,

    /// Wait for the step's [`Signal`] before moving on.
    Wait { signal: Signal, indent: &'a str },

    /// Wait for a [`Prompt`] answer before moving on.
    Ask { question: String, indent: &'a str },
}

/// Single interpretation of a [`Statement`] list.
pub(crate) struct Engine<'a> {
    statements: &'a [Statement],
    steps: &'a Collection,
    prompt: Option<&'a dyn Prompt>,
    label: &'a Label,
    out: Output,

    line: usize,
    saved: usize,
    end: Option<usize>,

    state: State,
    background: Range,
    outline: Range,
    open: Option<State>,
    tags: Tags,
    examples: Option<Examples<'a>>,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(
        statements: &'a [Statement],
        steps: &'a Collection,
        prompt: Option<&'a dyn Prompt>,
        label: &'a Label,
        out: Output,
    ) -> Self {
        Self {
            statements,
            steps,
            prompt,
            label,
            out,
            line: 0,
            saved: 0,
            end: None,
            state: State::Feature,
            background: Range::default(),
            outline: Range::default(),
            open: None,
            tags: Tags::default(),
            examples: None,
        }
    }

    /// Runs every [`Statement`] to the end, suspending on step completion
    /// signals and [`Prompt`]s.
    pub(crate) async fn drive(mut self) -> Report {
        let statements = self.statements;
        loop {
            if self.end == Some(self.line) {
                self.leave_range();
                continue;
            }
            let Some(statement) = statements.get(self.line) else {
                break;
            };
            trace!(line = statement.line, kind = %statement.kind, "visiting");

            match self.visit(statement) {
                Flow::Next => {}
                Flow::Jump => continue,
                Flow::Wait { signal, indent } => {
                    debug!(line = statement.line, "suspended on completion signal");
                    match AssertUnwindSafe(signal).catch_unwind().await {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => self.fail(indent, Error::Step(e)),
                        Err(p) => self.fail(indent, Error::from_panic(&*p)),
                    }
                    debug!(line = statement.line, "resumed");
                }
                Flow::Ask { question, indent } => match self.prompt {
                    None => self.fail(indent, Error::NoPrompt { question }),
                    Some(prompt) => {
                        debug!(line = statement.line, "waiting for an answer");
                        if !prompt.ask(&question).await {
                            self.fail(indent, Error::Declined { question });
                        }
                    }
                },
            }
            self.line += 1;
        }
        self.close_range();
        self.out.into_report()
    }

    fn visit(&mut self, statement: &'a Statement) -> Flow<'a> {
        if statement.is_header() || statement.kind == Keyword::Tag {
            self.close_range();
        }
        // Replays only touch executable lines.
        if self.end.is_some() && !statement.kind.is_executable() {
            return Flow::Next;
        }

        match statement.kind {
            Keyword::Feature | Keyword::Rule => self.feature(statement),
            Keyword::Background => self.open_range(statement, State::Background),
            Keyword::ScenarioOutline => self.open_range(statement, State::Outline),
            Keyword::Scenario => self.scenario(statement),
            Keyword::Examples => self.examples(statement),
            Keyword::Step | Keyword::Ask => self.step(statement),
            Keyword::Tag => {
                self.tags.pending.push(statement.body.clone());
                self.out.raw(&statement.text, Tone::Tag);
                Flow::Next
            }
            Keyword::DataTable => self.hanging(statement, Error::HangingDataTable),
            Keyword::DocString => self.hanging(statement, Error::HangingDocString),
            Keyword::Comments => self.print(statement, Tone::Comment),
            _ => self.print(statement, Tone::Plain),
        }
    }

    fn feature(&mut self, statement: &Statement) -> Flow<'a> {
        self.state = State::Feature;
        self.background = Range::default();
        self.outline = Range::default();

        let tags = self.tags.take_pending();
        if statement.kind == Keyword::Feature {
            self.tags.feature = tags;
            self.tags.rule.clear();
        } else {
            self.tags.rule = tags;
        }
        self.tags.block.clear();
        self.tags.outline.clear();

        if self.is_eligible() {
            self.out.header(statement);
        }
        Flow::Next
    }

    fn open_range(&mut self, statement: &Statement, state: State) -> Flow<'a> {
        self.state = state;
        let tags = self.tags.take_pending();
        let range = if state == State::Background {
            self.tags.block.clear();
            &mut self.background
        } else {
            self.tags.outline.clone_from(&tags);
            self.tags.block = tags;
            &mut self.outline
        };
        *range = Range { start: self.line + 1, len: 0 };
        self.open = Some(state);

        if self.is_eligible() {
            self.out.header(statement);
        }
        Flow::Next
    }

    fn close_range(&mut self) {
        let Some(state) = self.open.take() else {
            return;
        };
        let range = if state == State::Background {
            &mut self.background
        } else {
            &mut self.outline
        };
        range.len = self.line - range.start;
        debug!(?state, start = range.start, len = range.len, "range closed");
    }

    /// Moves the cursor back after a replayed range, or into the next
    /// `Examples` row.
    fn leave_range(&mut self) {
        if self.state == State::Examples {
            if let Some(examples) = &mut self.examples {
                if examples.advance() {
                    debug!(row = examples.row(), "replaying outline");
                    if let Some(row) = examples.line() {
                        self.out.raw(&row.text, Tone::Plain);
                    }
                    self.line = self.outline.start;
                    return;
                }
            }
            self.examples = None;
            self.state = State::Feature;
        }
        self.line = self.saved + 1;
        self.end = None;
    }

    fn enter_range(&mut self, range: Range) {
        self.saved = self.line;
        self.line = range.start;
        self.end = Some(range.end());
    }

    fn scenario(&mut self, statement: &Statement) -> Flow<'a> {
        self.state = State::Scenario;
        self.tags.block = self.tags.take_pending();
        if !self.is_eligible() {
            return Flow::Next;
        }

        self.out.header(statement);
        if self.background.is_empty() {
            return Flow::Next;
        }
        debug!(line = statement.line, "splicing background");
        self.enter_range(self.background);
        Flow::Jump
    }

    fn examples(&mut self, statement: &'a Statement) -> Flow<'a> {
        self.state = State::Examples;
        let own = self.tags.take_pending();
        self.tags.block = format!("{} {own}", self.tags.outline);
        if !self.is_eligible() {
            self.state = State::Feature;
            return Flow::Next;
        }

        self.out.header(statement);
        if self.outline.is_empty() {
            self.fail(&statement.indent, Error::ExamplesWithoutOutline);
            self.extras(statement, Tone::Plain);
            self.state = State::Feature;
            return Flow::Next;
        }
        let Some(mut examples) = Examples::collect(statement) else {
            self.fail(&statement.indent, Error::ExamplesWithoutTable);
            self.extras(statement, Tone::Plain);
            self.state = State::Feature;
            return Flow::Next;
        };

        if let Some(header) = examples.line() {
            self.out.raw(&header.text, Tone::Plain);
        }
        if !examples.advance() {
            self.state = State::Feature;
            return Flow::Next;
        }
        if let Some(row) = examples.line() {
            self.out.raw(&row.text, Tone::Plain);
        }
        debug!(row = examples.row(), "replaying outline");
        self.examples = Some(examples);
        self.enter_range(self.outline);
        Flow::Jump
    }

    fn step(&mut self, statement: &'a Statement) -> Flow<'a> {
        if !self.is_eligible() {
            return Flow::Next;
        }
        if !matches!(self.state, State::Scenario | State::Examples) {
            self.out.raw(&statement.text, Tone::Dim);
            self.extras(statement, Tone::Dim);
            return Flow::Next;
        }

        let substitute = |text: &str| match &self.examples {
            Some(examples) => examples.substitute(text).into_owned(),
            None => text.to_owned(),
        };
        let text = substitute(&statement.body);
        let extras = statement
            .extras
            .iter()
            .map(|s| substitute(&s.text))
            .collect::<Vec<_>>();
        let doc_string = statement.doc_string().map(|d| substitute(&d));
        let table = statement.table().map(|t| t.map_cells(|c| substitute(c)));

        self.out.step(statement, &text);
        for line in &extras {
            self.out.raw(line, Tone::Plain);
        }
        if self.out.is_failed() {
            return Flow::Next;
        }
        if statement.kind == Keyword::Ask {
            return Flow::Ask { question: text, indent: &statement.indent };
        }

        let steps = self.steps;
        let Some(found) = steps.find(&text) else {
            self.fail(&statement.indent, Error::NoMatch { text });
            return Flow::Next;
        };
        let args = Args::supply(
            found.definition.params(),
            found.captures,
            doc_string,
            table,
            Context::new(&mut self.out, statement, &text, self.label.as_str()),
        );
        let result =
            panic::catch_unwind(AssertUnwindSafe(|| found.definition.call(args)));

        match result {
            Ok(Ok(completion)) => match completion.into_signal() {
                Some(signal) => Flow::Wait { signal, indent: &statement.indent },
                None => Flow::Next,
            },
            Ok(Err(e)) => {
                self.fail(&statement.indent, Error::Step(e));
                Flow::Next
            }
            Err(p) => {
                self.fail(&statement.indent, Error::from_panic(&*p));
                Flow::Next
            }
        }
    }

    fn hanging(&mut self, statement: &Statement, error: Error) -> Flow<'a> {
        if self.is_eligible() {
            self.out.raw(&statement.text, Tone::Plain);
            self.extras(statement, Tone::Plain);
            self.fail(&statement.indent, error);
        }
        Flow::Next
    }

    fn print(&mut self, statement: &Statement, tone: Tone) -> Flow<'a> {
        if self.is_eligible() {
            let tone = match self.state {
                State::Background | State::Outline if tone == Tone::Plain => {
                    Tone::Dim
                }
                _ => tone,
            };
            self.out.raw(&statement.text, tone);
        }
        Flow::Next
    }

    fn extras(&mut self, statement: &Statement, tone: Tone) {
        for extra in &statement.extras {
            self.out.raw(&extra.text, tone);
        }
    }

    fn fail(&mut self, indent: &str, error: Error) {
        if self.out.is_failed() {
            debug!(%error, "error after failure");
        } else {
            warn!(%error, "run failed");
        }
        self.out.error(indent, error);
    }

    fn is_eligible(&self) -> bool {
        self.label
            .admits([&self.tags.feature, &self.tags.rule, &self.tags.block])
    }
}
