// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ordered registry of step definitions.

use std::fmt;

use itertools::Itertools as _;
use regex::Regex;

use super::{Args, Completion, IntoCompletion, Param};

/// Type-erased step callable.
pub type Step = Box<dyn Fn(Args<'_>) -> anyhow::Result<Completion>>;

/// Registered pattern along with its callable and declared [`Param`]s.
pub struct Definition {
    regex: Regex,
    params: Vec<Param>,
    step: Step,
}

impl Definition {
    /// Returns the pattern of this [`Definition`].
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the [`Param`]s declared by this [`Definition`].
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Invokes the callable of this [`Definition`].
    ///
    /// # Errors
    ///
    /// If the callable fails.
    pub fn call(&self, args: Args<'_>) -> anyhow::Result<Completion> {
        (self.step)(args)
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("regex", &self.regex.as_str())
            .field("params", &self.params)
            .field("step", &format_args!("{:p}", &*self.step))
            .finish()
    }
}

/// [`Definition`] matched by [`Collection::find()`].
#[derive(Debug)]
pub struct Match<'me> {
    /// Matched [`Definition`].
    pub definition: &'me Definition,

    /// Captured groups, `0`th group (the whole match) excluded.
    pub captures: Vec<String>,
}

/// Ordered collection of step [`Definition`]s.
///
/// Matching is first-wins in registration order.
#[derive(Debug, Default)]
pub struct Collection {
    definitions: Vec<Definition>,
}

impl Collection {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a step callable under the given `regex`.
    ///
    /// The callable receives one value per declared [`Param`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use cornichon::{Collection, Param};
    /// use regex::Regex;
    ///
    /// let steps = Collection::new().step(
    ///     Regex::new(r"^I have (\d+) cucumbers$").unwrap(),
    ///     &[Param::Captures],
    ///     |args| -> anyhow::Result<()> {
    ///         let n: usize = args.capture(0).unwrap_or_default().parse()?;
    ///         anyhow::ensure!(n > 0, "no cucumbers");
    ///         Ok(())
    ///     },
    /// );
    ///
    /// assert!(steps.find("I have 5 cucumbers").is_some());
    /// ```
    #[must_use]
    pub fn step<F, R>(mut self, regex: Regex, params: &[Param], step: F) -> Self
    where
        F: Fn(Args<'_>) -> R + 'static,
        R: IntoCompletion,
    {
        self.definitions.push(Definition {
            regex,
            params: params.to_vec(),
            step: Box::new(move |args: Args<'_>| step(args).into_completion()),
        });
        self
    }

    /// Returns the first [`Definition`] whose pattern matches the given
    /// `text`, along with its captured groups.
    ///
    /// Groups that didn't participate in the match are empty strings.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<Match<'_>> {
        self.definitions.iter().find_map(|definition| {
            let captures = definition.regex.captures(text)?;
            let captures = captures
                .iter()
                .skip(1)
                .map(|m| m.map_or_else(String::new, |m| m.as_str().to_owned()))
                .collect_vec();
            tracing::trace!(
                pattern = definition.regex.as_str(),
                ?captures,
                "step matched",
            );
            Some(Match { definition, captures })
        })
    }

    /// Returns the registered patterns, in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.regex.as_str())
    }

    /// Returns the number of registered [`Definition`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Indicates whether no [`Definition`]s are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
