// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of a host running feature files.

use std::path::PathBuf;

use smart_default::SmartDefault;

use crate::{writer::Coloring, Config, Interpreter, Report};

pub use clap::Parser;

/// Root CLI (command line interface) of a feature files runner.
///
/// # Example
///
/// ```rust,no_run
/// # use cornichon::{cli, Collection, Interpreter, Vocabulary};
/// #
/// let opts = cli::Opts::parsed();
/// let interpreter = Interpreter::new(Vocabulary::english(), Collection::new())
///     .with_config(opts.config());
///
/// let failed = opts
///     .run_blocking(&interpreter)
///     .into_iter()
///     .filter(|r| !r.success)
///     .count();
/// std::process::exit(i32::from(failed > 0));
/// ```
#[derive(clap::Parser, Clone, Debug, SmartDefault)]
#[command(
    name = "cornichon",
    about = "Run feature files against registered steps",
    long_about = None
)]
pub struct Opts {
    /// Tag text a block has to mention to be run.
    ///
    /// Matching is a plain substring check, so `@slow` also runs blocks
    /// tagged `@slower`. Runs everything when omitted.
    #[arg(long, short = 'l', value_name = "tag")]
    pub label: Option<String>,

    /// Coloring policy for a transcript.
    #[arg(long, value_name = "auto|always|never", default_value = "auto")]
    #[default(Coloring::Auto)]
    pub color: Coloring,

    /// Feature files to run, `.feature` extension may be omitted.
    #[arg(value_name = "feature")]
    pub features: Vec<PathBuf>,
}

impl Opts {
    /// Shortcut for [`clap::Parser::parse()`], which doesn't require the trait
    /// being imported.
    #[must_use]
    pub fn parsed() -> Self {
        <Self as Parser>::parse()
    }

    /// Returns the label to filter by, empty if none.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    /// Returns the [`Config`] described by these [`Opts`].
    #[must_use]
    pub fn config(&self) -> Config {
        Config::default().coloring(self.color)
    }

    /// Runs every feature file of these [`Opts`] one after another, printing
    /// each transcript to the stdout.
    pub async fn run(&self, interpreter: &Interpreter) -> Vec<Report> {
        let mut reports = Vec::with_capacity(self.features.len());
        for path in &self.features {
            let report = interpreter.run(path, self.label()).await;
            print!("{}", report.transcript);
            reports.push(report);
        }
        reports
    }

    /// Blocking version of [`Opts::run()`].
    pub fn run_blocking(&self, interpreter: &Interpreter) -> Vec<Report> {
        futures::executor::block_on(self.run(interpreter))
    }
}

impl From<&Opts> for Config {
    fn from(opts: &Opts) -> Self {
        opts.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_color_and_features() {
        let opts = Opts::try_parse_from([
            "cornichon",
            "-l",
            "@slow",
            "--color",
            "never",
            "eat",
            "drink.feature",
        ])
        .unwrap();

        assert_eq!(opts.label(), "@slow");
        assert_eq!(opts.color, Coloring::Never);
        assert_eq!(opts.features, [PathBuf::from("eat"), "drink.feature".into()]);
        assert_eq!(Config::from(&opts).coloring, Coloring::Never);
    }

    #[test]
    fn defaults_run_everything() {
        let opts = Opts::try_parse_from(["cornichon"]).unwrap();

        assert_eq!(opts.label(), "");
        assert_eq!(opts.color, Coloring::Auto);
        assert!(opts.features.is_empty());
        assert_eq!(Opts::default().color, opts.color);
    }

    #[test]
    fn rejects_unknown_coloring() {
        assert!(Opts::try_parse_from(["cornichon", "--color", "rainbow"]).is_err());
    }
}
