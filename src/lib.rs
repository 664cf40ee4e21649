// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line-oriented interpreter of [Gherkin] feature files.
//!
//! Every line of a feature file is classified on its own by a configurable
//! [`Vocabulary`] and executed in order against a [`Collection`] of step
//! callables selected by regular expressions. A step may finish right away or
//! hand back a [`Completion`] signal, in which case the run suspends until the
//! signal fires.
//!
//! ```rust
//! use cornichon::{Collection, Completion, Interpreter, Param, Vocabulary};
//! use futures::executor::block_on;
//! use regex::Regex;
//!
//! let steps = Collection::new()
//!     .step(Regex::new(r"^there are (\d+) cucumbers$").unwrap(), &[], |_| ())
//!     .step(
//!         Regex::new(r"^I eat (\d+) cucumbers$").unwrap(),
//!         &[Param::Captures],
//!         |args| -> anyhow::Result<Completion> {
//!             let n: u32 = args.capture(0).unwrap_or_default().parse()?;
//!             anyhow::ensure!(n < 20, "too many");
//!             Ok(Completion::after(async {}))
//!         },
//!     );
//!
//! let report = block_on(Interpreter::new(Vocabulary::english(), steps).run_text(
//!     "Feature: eating\n\
//!      \x20 Scenario: a few\n\
//!      \x20   Given there are 12 cucumbers\n\
//!      \x20   When I eat 5 cucumbers\n",
//!     "",
//! ));
//!
//! assert!(report.success, "{}", report.transcript);
//! ```
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    clippy::unwrap_used,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod cli;
pub mod data_table;
pub mod error;
pub mod parser;
pub mod prompt;
pub mod runner;
pub mod step;
pub mod tag;
pub mod vocabulary;
pub mod writer;

#[doc(inline)]
pub use self::{
    data_table::DataTable,
    error::Error,
    parser::Statement,
    prompt::Prompt,
    runner::{Config, Interpreter, Report},
    step::{Args, Collection, Completion, Context, IntoCompletion, Param},
    tag::Label,
    vocabulary::{Keyword, Vocabulary},
    writer::{Coloring, Output},
};
