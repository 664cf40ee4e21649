// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors recorded while running a feature file.

use std::{any::Any, io, path::PathBuf};

use derive_more::with_trait::Display;

/// Error recorded into a [`Report`].
///
/// None of these escape a run: the first one becomes [`Report::error`], and
/// all of them are rendered into the transcript.
///
/// [`Report`]: crate::Report
/// [`Report::error`]: crate::Report::error
#[derive(Debug, Display, derive_more::Error)]
pub enum Error {
    /// Feature file is missing or unreadable.
    #[display("Failed to read `{}`: {source}", path.display())]
    Read {
        /// Path the file was looked up at.
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// No registered pattern matches a step.
    #[display("No matching definition for: {text}")]
    NoMatch {
        /// Step text, after placeholder substitution.
        text: String,
    },

    /// Step callable (or its completion signal) returned an error.
    #[display("{_0:#}")]
    Step(#[error(not(source))] anyhow::Error),

    /// Step callable (or its completion signal) panicked.
    #[display("Step panicked: {message}")]
    Panic {
        /// Panic payload, rendered as text.
        message: String,
    },

    /// `Examples:` seen without a preceding non-empty `Scenario Outline:`.
    #[display("Examples without a Scenario Outline")]
    ExamplesWithoutOutline,

    /// `Examples:` not followed by a data table.
    #[display("Expecting a data table")]
    ExamplesWithoutTable,

    /// Table line with no step or `Examples:` to belong to.
    #[display("Hanging Data Table line")]
    HangingDataTable,

    /// Doc-string with no step to belong to.
    #[display("Hanging Doc String")]
    HangingDocString,

    /// Manual check answered negatively.
    #[display("Not confirmed: {question}")]
    Declined {
        /// Question asked.
        question: String,
    },

    /// Manual check met with no [`Prompt`] configured.
    ///
    /// [`Prompt`]: crate::Prompt
    #[display("No prompt configured to ask: {question}")]
    NoPrompt {
        /// Question that would have been asked.
        question: String,
    },
}

impl Error {
    /// Creates an [`Error::Panic`] out of a caught panic payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_owned()))
            .unwrap_or_else(|| "opaque panic payload".to_owned());
        Self::Panic { message }
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::Step(e)
    }
}

#[cfg(test)]
mod tests {
    use std::panic;

    use super::*;

    #[test]
    fn panic_payloads_become_messages() {
        let payload = panic::catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(Error::from_panic(&*payload).to_string(), "Step panicked: boom 1");

        let payload = panic::catch_unwind(|| panic!("static")).unwrap_err();
        assert_eq!(Error::from_panic(&*payload).to_string(), "Step panicked: static");

        let payload = panic::catch_unwind(|| panic::panic_any(42_u8)).unwrap_err();
        assert_eq!(
            Error::from_panic(&*payload).to_string(),
            "Step panicked: opaque panic payload",
        );
    }

    #[test]
    fn errors_are_std_errors() {
        let err: Box<dyn std::error::Error> = Box::new(Error::ExamplesWithoutTable);

        assert_eq!(err.to_string(), "Expecting a data table");
        assert!(err.source().is_none());
    }

    #[test]
    fn step_errors_render_their_context_chain() {
        let err = Error::from(
            anyhow::anyhow!("expected 2 cucumbers").context("Then step"),
        );

        assert_eq!(err.to_string(), "Then step: expected 2 cucumbers");
    }

    #[test]
    fn read_error_names_the_path() {
        let err = Error::Read {
            path: PathBuf::from("missing.feature"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };

        assert_eq!(err.to_string(), "Failed to read `missing.feature`: not found");
        assert!(std::error::Error::source(&err).is_some());
    }
}
