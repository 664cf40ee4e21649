// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Prompt`] answering manual checks.

use async_trait::async_trait;

/// Source of answers to manual checks (`Ask`/`Confirm` lines).
///
/// A run waits on [`Prompt::ask()`] the same way it waits on a step's
/// completion signal. A negative answer fails the run.
#[async_trait(?Send)]
pub trait Prompt {
    /// Asks the given `question`, resolving to `true` once it's confirmed.
    async fn ask(&self, question: &str) -> bool;
}

#[async_trait(?Send)]
impl<F> Prompt for F
where
    F: Fn(&str) -> bool,
{
    async fn ask(&self, question: &str) -> bool {
        self(question)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    struct Stubborn;

    #[async_trait(?Send)]
    impl Prompt for Stubborn {
        async fn ask(&self, _: &str) -> bool {
            false
        }
    }

    #[test]
    fn closures_answer_synchronously() {
        let prompt = |q: &str| q.contains("green");

        assert!(block_on(prompt.ask("is it green?")));
        assert!(!block_on(prompt.ask("is it red?")));
    }

    #[test]
    fn trait_objects_are_usable() {
        let prompt: Box<dyn Prompt> = Box::new(Stubborn);

        assert!(!block_on(prompt.ask("anything?")));
    }
}
