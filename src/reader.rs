//! Line source for whitespace-delimited numeric tables
//!
//! [`RowReader`] turns any [`BufRead`] into a stream of [`Row`]s. Tokenizing
//! is all it does; deciding what a blank or short row means is left to the
//! [`StatisticsEngine`](crate::engine::StatisticsEngine).
//!
//! Lines are decoded lossily: invalid UTF-8 becomes `U+FFFD`, so a bad byte
//! in a selected column surfaces as a parse error naming its row, column and
//! token, and bad bytes in skipped rows or unselected columns are ignored
//! like any other content there.

use crate::engine::StatisticsEngine;
use crate::error::StatsError;
use std::io::BufRead;

/// One line of input split on whitespace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// 0-based line number
    pub index: u64,
    pub tokens: Vec<String>,
}

impl Row {
    /// Check if the line held no tokens
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Iterator over the rows of a text table
///
/// ```
/// use colstats::reader::RowReader;
///
/// let input = "1.0 2.0\n3.0 4.0\n";
/// let rows: Vec<_> = RowReader::new(input.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].tokens, vec!["3.0", "4.0"]);
/// ```
#[derive(Debug)]
pub struct RowReader<R> {
    inner: R,
    line: Vec<u8>,
    next_index: u64,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::new(),
            next_index: 0,
        }
    }

    /// Read the next row, `None` at end of stream
    pub fn next_row(&mut self) -> Result<Option<Row>, StatsError> {
        self.line.clear();
        if self.inner.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }

        let index = self.next_index;
        self.next_index += 1;
        let text = String::from_utf8_lossy(&self.line);
        Ok(Some(Row {
            index,
            tokens: text.split_whitespace().map(str::to_owned).collect(),
        }))
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row, StatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

impl StatisticsEngine {
    /// Feed every row of `reader` into the engine
    ///
    /// Stops reading as soon as the row range is exhausted. The first error
    /// aborts the whole stream.
    pub fn consume<R: BufRead>(&mut self, reader: &mut RowReader<R>) -> Result<(), StatsError> {
        while let Some(row) = reader.next_row()? {
            if self.ingest_row(row.index, &row.tokens)?.is_break() {
                tracing::debug!(row = row.index, "stopped reading past end of row range");
                break;
            }
        }
        Ok(())
    }
}
