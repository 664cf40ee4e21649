// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for turning feature files into flat [`Statement`] sequences.
//!
//! Parsing is line oriented: the [`Lexer`] classifies every line on its own,
//! and the [`Assembler`] hangs doc-string and table lines off the statement
//! owning them. No tree is built; nesting is the engine's business.

mod assembler;
mod lexer;
mod statement;

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Error, Vocabulary};

pub use self::{
    assembler::Assembler,
    lexer::{Lexer, DOC_STRING_DELIMITER},
    statement::Statement,
};

/// Extension appended to feature file paths given without one.
pub const FEATURE_EXTENSION: &str = "feature";

/// Parses the given feature file `text` into top-level [`Statement`]s.
#[must_use]
pub fn parse(text: &str, vocabulary: &Vocabulary) -> Vec<Statement> {
    let lexer = Lexer::new(vocabulary);
    let mut assembler = Assembler::new();
    for (n, line) in text.lines().enumerate() {
        assembler.push(lexer.lex(n + 1, line));
    }
    assembler.finish()
}

/// Reads and [`parse`]s the feature file at the given `path`.
///
/// A `path` without an extension gets the `.feature` one.
///
/// # Errors
///
/// If the file cannot be read.
pub fn read(
    path: impl AsRef<Path>,
    vocabulary: &Vocabulary,
) -> Result<Vec<Statement>, Error> {
    let path = resolve(path.as_ref());
    let text = fs::read_to_string(&path)
        .map_err(|source| Error::Read { path, source })?;
    Ok(parse(&text, vocabulary))
}

/// Appends [`FEATURE_EXTENSION`] to a `path` without an extension.
#[must_use]
pub fn resolve(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(FEATURE_EXTENSION)
    }
}
