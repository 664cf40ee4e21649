// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `Examples` rows replayed over a `Scenario Outline`.

use std::borrow::Cow;

use lazy_regex::regex;

use crate::{parser::Statement, DataTable};

/// `Examples` table being replayed, along with its source lines.
#[derive(Debug)]
pub(crate) struct Examples<'a> {
    table: DataTable,
    lines: Vec<&'a Statement>,
    row: usize,
}

impl<'a> Examples<'a> {
    /// Collects the table attached to the given `Examples` header.
    ///
    /// Returns [`None`] if there is no table at all.
    pub(crate) fn collect(header: &'a Statement) -> Option<Self> {
        let lines = header.table_lines().collect::<Vec<_>>();
        if lines.is_empty() {
            return None;
        }
        Some(Self {
            table: DataTable::parse(lines.iter().map(|s| &s.text)),
            lines,
            row: 0,
        })
    }

    /// Returns the source line of the current row.
    pub(crate) fn line(&self) -> Option<&'a Statement> {
        self.lines.get(self.row).copied()
    }

    /// Moves to the next row, returning `false` if there is none.
    pub(crate) fn advance(&mut self) -> bool {
        self.row += 1;
        self.row < self.table.len()
    }

    /// Returns the 1-based index of the current data row.
    pub(crate) const fn row(&self) -> usize {
        self.row
    }

    /// Substitutes `<name>` placeholders in the given `text` with the cells
    /// of the current row.
    pub(crate) fn substitute<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let header = self.table.header().unwrap_or_default();
        let row = self.table.row(self.row).unwrap_or_default();
        substitute(text, header, row)
    }
}

/// Replaces every `<name>` in `text` with the `row` cell under the `header`
/// cell `name`. Unknown names are left intact.
pub(crate) fn substitute<'t>(
    text: &'t str,
    header: &[String],
    row: &[String],
) -> Cow<'t, str> {
    regex!(r"<([^<>]+)>").replace_all(text, |caps: &regex::Captures<'_>| {
        header
            .iter()
            .position(|name| *name == caps[1])
            .and_then(|i| row.get(i))
            .map_or_else(|| caps[0].to_owned(), Clone::clone)
    })
}
