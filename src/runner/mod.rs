// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level [`Interpreter`] of feature files.

mod engine;
mod outline;

use std::{fmt, path::Path};

use tracing::{info, info_span, Instrument as _};

use crate::{
    parser::{self, Statement},
    step::Collection,
    tag::Label,
    writer::{Coloring, Output},
    Error, Prompt, Vocabulary,
};

use self::engine::Engine;

/// Settings of an [`Interpreter`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// [`Coloring`] policy of produced transcripts.
    pub coloring: Coloring,
}

impl Config {
    /// Sets the [`Coloring`] policy of produced transcripts.
    #[must_use]
    pub const fn coloring(mut self, coloring: Coloring) -> Self {
        self.coloring = coloring;
        self
    }
}

/// Result of a single run.
#[derive(Debug)]
pub struct Report {
    /// `true` if no error was recorded.
    pub success: bool,

    /// Human-readable account of the run, one line per written line.
    pub transcript: String,

    /// First recorded [`Error`], if any.
    pub error: Option<Error>,
}

impl Report {
    /// Returns the message of the first recorded [`Error`], if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Interpreter running feature files against a [`Collection`] of steps.
///
/// # Example
///
/// ```rust
/// use cornichon::{Collection, Interpreter, Param, Vocabulary};
/// use regex::Regex;
///
/// let steps = Collection::new().step(
///     Regex::new(r"^there are (\d+) cucumbers$").unwrap(),
///     &[Param::Captures],
///     |_| (),
/// );
/// let interpreter = Interpreter::new(Vocabulary::english(), steps);
///
/// let report = futures::executor::block_on(interpreter.run_text(
///     "Feature: eating\n  Scenario: one\n    Given there are 5 cucumbers",
///     "",
/// ));
///
/// assert!(report.success);
/// ```
pub struct Interpreter {
    vocabulary: Vocabulary,
    steps: Collection,
    prompt: Option<Box<dyn Prompt>>,
    config: Config,
}

impl Interpreter {
    /// Creates a new [`Interpreter`] recognizing the given [`Vocabulary`] and
    /// executing the given steps.
    #[must_use]
    pub fn new(vocabulary: Vocabulary, steps: Collection) -> Self {
        Self { vocabulary, steps, prompt: None, config: Config::default() }
    }

    /// Sets the [`Prompt`] answering manual checks.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Prompt + 'static) -> Self {
        self.prompt = Some(Box::new(prompt));
        self
    }

    /// Replaces the [`Config`] of this [`Interpreter`].
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Returns the [`Vocabulary`] of this [`Interpreter`].
    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Returns the steps of this [`Interpreter`].
    #[must_use]
    pub const fn steps(&self) -> &Collection {
        &self.steps
    }

    /// Runs the feature file at the given `path`, only executing blocks whose
    /// tags mention the given `label` (everything, if it's empty).
    ///
    /// A `path` without an extension gets the `.feature` one. Failures never
    /// escape: they're recorded into the returned [`Report`].
    pub async fn run(&self, path: impl AsRef<Path>, label: &str) -> Report {
        let path = parser::resolve(path.as_ref());
        let span = info_span!("feature", path = %path.display(), label);
        async {
            let report = match parser::read(&path, &self.vocabulary) {
                Ok(statements) => self.execute(&statements, label).await,
                Err(e) => {
                    let mut out = Output::new(self.config.coloring);
                    out.error("", e);
                    out.into_report()
                }
            };
            info!(success = report.success, "feature finished");
            report
        }
        .instrument(span)
        .await
    }

    /// Runs the given feature file `text` the same way [`Interpreter::run()`]
    /// does.
    pub async fn run_text(&self, text: &str, label: &str) -> Report {
        let statements = parser::parse(text, &self.vocabulary);
        self.execute(&statements, label)
            .instrument(info_span!("feature", label))
            .await
    }

    /// Runs the feature file at the given `path` to the end, blocking the
    /// current thread.
    ///
    /// Completion signals have to be fired from another thread (or be ready
    /// already), otherwise this never returns.
    pub fn run_blocking(&self, path: impl AsRef<Path>, label: &str) -> Report {
        futures::executor::block_on(self.run(path, label))
    }

    async fn execute(&self, statements: &[Statement], label: &str) -> Report {
        let label = Label::new(label);
        Engine::new(
            statements,
            &self.steps,
            self.prompt.as_deref(),
            &label,
            Output::new(self.config.coloring),
        )
        .drive()
        .await
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("vocabulary", &self.vocabulary)
            .field("steps", &self.steps)
            .field("prompt", &self.prompt.as_ref().map(|_| "dyn Prompt"))
            .field("config", &self.config)
            .finish()
    }
}
