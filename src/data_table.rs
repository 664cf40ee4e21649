// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `|`-delimited data tables attached to steps and `Examples`.

use std::{collections::HashMap, fmt};

/// Rows of trimmed cells parsed from `|`-delimited lines.
///
/// The first row is conventionally a header, but nothing here enforces it:
/// [`DataTable::raw()`] gives everything back as written.
///
/// # Example
///
/// ```rust
/// use cornichon::DataTable;
///
/// let table = DataTable::parse(["| name  | age |", "| Alice | 30  |"]);
///
/// assert_eq!(table.header(), Some(&["name".to_owned(), "age".to_owned()][..]));
/// assert_eq!(table.hashes()[0]["age"], "30");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataTable {
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Creates a new [`DataTable`] out of already split rows.
    #[must_use]
    pub const fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Parses a [`DataTable`] out of raw table lines, one row per line.
    #[must_use]
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            lines
                .into_iter()
                .map(|line| parse_row(line.as_ref()))
                .collect(),
        )
    }

    /// Returns all the rows, header included.
    #[must_use]
    pub fn raw(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the first row, if any.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Returns all the rows below the header.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Returns the row at the given `index`, header being `0`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Returns every row below the header as a map keyed by header cells.
    #[must_use]
    pub fn hashes(&self) -> Vec<HashMap<String, String>> {
        let Some(header) = self.header() else {
            return Vec::new();
        };
        self.rows()
            .iter()
            .map(|row| header.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }

    /// Interprets a two-column table as key-value pairs.
    ///
    /// Returns [`None`] if any row doesn't have exactly two cells.
    #[must_use]
    pub fn rows_hash(&self) -> Option<HashMap<String, String>> {
        self.rows
            .iter()
            .map(|row| match row.as_slice() {
                [key, value] => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    /// Applies `f` to every cell, producing a new [`DataTable`].
    #[must_use]
    pub fn map_cells(&self, mut f: impl FnMut(&str) -> String) -> Self {
        Self::new(
            self.rows
                .iter()
                .map(|row| row.iter().map(|cell| f(cell)).collect())
                .collect(),
        )
    }

    /// Returns the number of rows, header included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Indicates whether this [`DataTable`] has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of cells in the first row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Splits a single table line into trimmed cells.
///
/// The segment before the first `|` is discarded, as is the one after the
/// last `|` when the line ends with it.
#[must_use]
pub fn parse_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').skip(1).map(|cell| cell.trim().to_owned()).collect()
}

impl From<Vec<Vec<&str>>> for DataTable {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(String::from).collect())
                .collect(),
        )
    }
}

impl From<Vec<Vec<String>>> for DataTable {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

impl From<DataTable> for Vec<Vec<String>> {
    fn from(table: DataTable) -> Self {
        table.rows
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "| {} |", row.join(" | "))?;
        }
        Ok(())
    }
}
