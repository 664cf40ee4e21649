// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Completion`] of a step callable and conversions into it.

use std::{fmt, future::Future};

use futures::{future::LocalBoxFuture, FutureExt as _};
use sealed::sealed;

/// One-shot signal a run waits on before moving to the next line.
pub type Signal = LocalBoxFuture<'static, anyhow::Result<()>>;

/// Outcome of a successfully invoked step callable.
///
/// Either the step is [done](Completion::done) right away, or its effect
/// completes once the wrapped [`Signal`] resolves. In the latter case the run
/// suspends on the step's line and resumes exactly once, right after the
/// [`Signal`] fires. A [`Signal`] never firing leaves the run pending forever.
#[must_use]
pub struct Completion(Option<Signal>);

impl Completion {
    /// Creates a [`Completion`] of a step that is already done.
    pub const fn done() -> Self {
        Self(None)
    }

    /// Creates a [`Completion`] finishing once the given `signal` resolves.
    pub fn after<F>(signal: F) -> Self
    where
        F: Future<Output = ()> + 'static,
    {
        Self(Some(signal.map(Ok).boxed_local()))
    }

    /// Creates a [`Completion`] finishing once the given `signal` resolves,
    /// failing the step if it resolves to an error.
    pub fn try_after<F, E>(signal: F) -> Self
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Into<anyhow::Error>,
    {
        Self(Some(signal.map(|r| r.map_err(Into::into)).boxed_local()))
    }

    /// Indicates whether this [`Completion`] still has to be waited on.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.0.is_some()
    }

    /// Unwraps the [`Signal`] to wait on, if any.
    #[must_use]
    pub fn into_signal(self) -> Option<Signal> {
        self.0
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::done()
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Completion")
            .field(&if self.is_pending() { "pending" } else { "done" })
            .finish()
    }
}

/// Return value of a step callable.
///
/// Implemented for `()`, [`Completion`] and any [`Result`] of those whose
/// error converts into an [`anyhow::Error`].
#[sealed]
pub trait IntoCompletion {
    /// Converts this value into a [`Completion`], or the error failing the
    /// step.
    ///
    /// # Errors
    ///
    /// If this value represents a failed step.
    fn into_completion(self) -> anyhow::Result<Completion>;
}

#[sealed]
impl IntoCompletion for () {
    fn into_completion(self) -> anyhow::Result<Completion> {
        Ok(Completion::done())
    }
}

#[sealed]
impl IntoCompletion for Completion {
    fn into_completion(self) -> anyhow::Result<Completion> {
        Ok(self)
    }
}

#[sealed]
impl<T, E> IntoCompletion for Result<T, E>
where
    T: IntoCompletion,
    E: Into<anyhow::Error>,
{
    fn into_completion(self) -> anyhow::Result<Completion> {
        self.map_err(Into::into).and_then(T::into_completion)
    }
}
