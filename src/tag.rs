// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Label`] filter of a run.

use std::fmt;

/// Tag text a block has to mention to be run.
///
/// Matching is a plain substring check against the raw text of tag lines,
/// so `@slow` admits a block tagged `@slower` as well. An empty [`Label`]
/// admits everything.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Label(String);

impl Label {
    /// Creates a new [`Label`] out of the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the text of this [`Label`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Indicates whether this [`Label`] filters nothing out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Evaluates this [`Label`] against the tag texts in scope.
    #[must_use]
    pub fn admits<I, S>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.is_empty() || tags.into_iter().any(|t| t.as_ref().contains(&self.0))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_label_admits_everything() {
        assert!(Label::default().admits(Vec::<String>::new()));
        assert!(Label::new("").admits(["@fast"]));
    }

    #[test]
    fn label_is_a_substring_match() {
        let label = Label::new("@slow");

        assert!(label.admits(["", "@db @slow", ""]));
        assert!(label.admits(["@slower"]));
        assert!(!label.admits(["@fast", "", "@db"]));
        assert!(!label.admits(Vec::<&str>::new()));
    }
}
