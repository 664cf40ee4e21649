// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions for a [`Collection`] which is used to store step callables
//! and the patterns selecting them.

mod args;
mod collection;
mod completion;
mod context;

pub use self::{
    args::{Arg, Args, Param},
    collection::{Collection, Definition, Match, Step},
    completion::{Completion, IntoCompletion, Signal},
    context::Context,
};
