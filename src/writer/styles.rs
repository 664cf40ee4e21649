// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminal [`Styles`] and [`Coloring`] policy of a transcript.

use std::{borrow::Cow, str::FromStr};

use console::Style;

/// Possible policies of a transcript coloring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] decide whether the transcript
    /// should be colored.
    #[default]
    Auto,

    /// Forcing a colored transcript.
    Always,

    /// Forcing a plain transcript.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

/// [`Style`]s of transcript lines.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for header keywords (`Feature`, `Scenario`, ...).
    pub header: Style,

    /// [`Style`] for step keywords and header names.
    pub keyword: Style,

    /// [`Style`] for comments.
    pub comment: Style,

    /// [`Style`] for tag lines.
    pub tag: Style,

    /// [`Style`] for lines only recorded, not executed.
    pub dim: Style,

    /// [`Style`] for errors.
    pub err: Style,

    /// Indicates whether styles are applied at all.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header: Style::new().magenta().force_styling(true),
            keyword: Style::new().blue().force_styling(true),
            comment: Style::new().dim().italic().force_styling(true),
            tag: Style::new().cyan().force_styling(true),
            dim: Style::new().dim().force_styling(true),
            err: Style::new().red().force_styling(true),
            is_present: console::colors_enabled(),
        }
    }
}

impl Styles {
    /// Creates new [`Styles`] following the given [`Coloring`] policy.
    #[must_use]
    pub fn new(coloring: Coloring) -> Self {
        let mut styles = Self::default();
        styles.apply_coloring(coloring);
        styles
    }

    /// Applies the given [`Coloring`] policy.
    pub fn apply_coloring(&mut self, coloring: Coloring) {
        match coloring {
            Coloring::Auto => {}
            Coloring::Always => self.is_present = true,
            Coloring::Never => self.is_present = false,
        }
    }

    /// Paints `input` with the given [`Style`] if styling is present, or
    /// leaves it "as is" otherwise.
    #[must_use]
    pub fn paint<'a>(
        &self,
        style: &Style,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        let input = input.into();
        if self.is_present && !input.is_empty() {
            style.apply_to(input).to_string().into()
        } else {
            input
        }
    }

    /// Paints `input` with [`Styles::header`].
    #[must_use]
    pub fn header<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.paint(&self.header, input)
    }

    /// Paints `input` with [`Styles::keyword`].
    #[must_use]
    pub fn keyword<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.paint(&self.keyword, input)
    }

    /// Paints `input` with [`Styles::comment`].
    #[must_use]
    pub fn comment<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.paint(&self.comment, input)
    }

    /// Paints `input` with [`Styles::tag`].
    #[must_use]
    pub fn tag<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.paint(&self.tag, input)
    }

    /// Paints `input` with [`Styles::dim`].
    #[must_use]
    pub fn dim<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.paint(&self.dim, input)
    }

    /// Paints `input` with [`Styles::err`].
    #[must_use]
    pub fn err<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.paint(&self.err, input)
    }
}
