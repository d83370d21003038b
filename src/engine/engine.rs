//! Row-oriented ingestion across many columns

use super::selection::{ColumnSelection, RowRange};
use crate::statistics::ColumnStatistics;
use crate::error::StatsError;
use core::ops::ControlFlow;

#[cfg(feature = "std")]
use std::{collections::BTreeMap, string::ToString, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::ToString, vec::Vec};

/// Immutable engine configuration
///
/// ```
/// use colstats::engine::{ColumnSelection, EngineConfig, RowRange};
///
/// let config = EngineConfig::new()
///     .with_rows(RowRange::new(1, 100))
///     .with_columns(ColumnSelection::from_indices([0, 2]));
/// assert_eq!(config.rows().max_row, 100);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    rows: RowRange,
    columns: ColumnSelection,
}

impl EngineConfig {
    /// Every row, every column
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict ingestion to a row range
    pub fn with_rows(mut self, rows: RowRange) -> Self {
        self.rows = rows;
        self
    }

    /// Restrict ingestion to a set of columns
    pub fn with_columns(mut self, columns: ColumnSelection) -> Self {
        self.columns = columns;
        self
    }

    pub fn rows(&self) -> &RowRange {
        &self.rows
    }

    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }
}

/// Column layout fixed by the first accepted row
#[derive(Clone, Debug)]
struct Layout {
    /// Tokens every later accepted row must provide
    width: usize,
    /// Tracked column indices, ascending
    columns: Vec<usize>,
}

/// Streaming statistics over the selected rows and columns of a table
///
/// Rows are fed in input order through [`ingest_row`](Self::ingest_row).
/// Rows outside the configured [`RowRange`] are skipped without looking at
/// their tokens. The first accepted row fixes the expected width: its full
/// token count when every column is selected, otherwise one past the largest
/// selected column (which must exist in that row). Every later accepted row
/// must have at least that many tokens, and extra tokens are ignored.
///
/// Any error is fatal for the run; the engine should be discarded rather than
/// finalized after one.
///
/// # Example
///
/// ```
/// use colstats::engine::{EngineConfig, StatisticsEngine};
///
/// let mut engine = StatisticsEngine::new(EngineConfig::new());
/// engine.ingest_row(0, &["1.0", "10"]).unwrap();
/// engine.ingest_row(1, &["2.0", "20"]).unwrap();
///
/// let stats = engine.finalize_all();
/// assert_eq!(stats[&0].mean(), 1.5);
/// assert_eq!(stats[&1].median(), 15.0);
/// ```
#[derive(Clone, Debug)]
pub struct StatisticsEngine {
    config: EngineConfig,
    layout: Option<Layout>,
    columns: BTreeMap<usize, ColumnStatistics>,
    rows_accepted: u64,
    rows_skipped: u64,
}

impl StatisticsEngine {
    /// Create an engine that owns its configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            layout: None,
            columns: BTreeMap::new(),
            rows_accepted: 0,
            rows_skipped: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rows that passed the row range and were ingested
    pub fn rows_accepted(&self) -> u64 {
        self.rows_accepted
    }

    /// Rows skipped because they fall outside the row range
    pub fn rows_skipped(&self) -> u64 {
        self.rows_skipped
    }

    /// Ingest one row of tokens
    ///
    /// Returns `ControlFlow::Break` once `row` is at or past the end of the
    /// row range, signalling that no later row can be accepted.
    pub fn ingest_row<S: AsRef<str>>(
        &mut self,
        row: u64,
        tokens: &[S],
    ) -> Result<ControlFlow<()>, StatsError> {
        let rows = *self.config.rows();
        if !rows.contains(row) {
            self.rows_skipped += 1;
            return Ok(Self::flow_after(&rows, row));
        }

        if tokens.is_empty() {
            return Err(StatsError::BlankRow { row });
        }

        let layout = match &mut self.layout {
            Some(layout) => layout,
            slot @ None => {
                let columns = self.config.columns().resolve(tokens.len())?;
                // Every column of the first row, or just enough to reach the
                // last selected one
                let width = columns.last().map_or(0, |&c| c + 1);
                tracing::debug!(width, tracked = columns.len(), "column layout established");

                for &column in &columns {
                    self.columns.insert(column, ColumnStatistics::new());
                }
                slot.insert(Layout { width, columns })
            }
        };

        if tokens.len() < layout.width {
            return Err(StatsError::ShortRow {
                row,
                expected: layout.width,
                found: tokens.len(),
            });
        }

        // Parse the whole row before touching any column
        let mut values = Vec::with_capacity(layout.columns.len());
        for &column in &layout.columns {
            let token = tokens[column].as_ref();
            values.push((column, parse_value(row, column, token)?));
        }

        for (column, value) in values {
            if let Some(stats) = self.columns.get_mut(&column) {
                stats.ingest(value)?;
            }
        }
        self.rows_accepted += 1;

        Ok(Self::flow_after(&rows, row))
    }

    fn flow_after(rows: &RowRange, row: u64) -> ControlFlow<()> {
        if rows.is_exhausted_after(row) {
            tracing::trace!(row, "row range exhausted");
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Finalize every tracked column
    ///
    /// Columns are only known once a row is accepted, so an engine that never
    /// accepted a row yields an empty map.
    pub fn finalize_all(mut self) -> BTreeMap<usize, ColumnStatistics> {
        for stats in self.columns.values_mut() {
            stats.finalize();
        }

        tracing::debug!(
            columns = self.columns.len(),
            accepted = self.rows_accepted,
            skipped = self.rows_skipped,
            "statistics finalized"
        );
        self.columns
    }
}

/// Parse a token into a finite `f64`
fn parse_value(row: u64, column: usize, token: &str) -> Result<f64, StatsError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(StatsError::Parse {
            row,
            column,
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: EngineConfig, rows: &[&str]) -> Result<BTreeMap<usize, ColumnStatistics>, StatsError> {
        let mut engine = StatisticsEngine::new(config);
        for (i, line) in rows.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if engine.ingest_row(i as u64, &tokens)?.is_break() {
                break;
            }
        }
        Ok(engine.finalize_all())
    }

    #[test]
    fn test_all_columns() {
        let stats = run(EngineConfig::new(), &["1 10", "2 20", "12 120"]).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[&0].mean(), 5.0);
        assert_eq!(stats[&0].variance(), 37.0);
        assert_eq!(stats[&0].median(), 2.0);
        assert_eq!(stats[&1].median(), 20.0);
        assert_eq!(stats[&1].max(), 120.0);
    }

    #[test]
    fn test_empty_stream() {
        let stats = run(EngineConfig::new(), &[]).unwrap();
        assert!(stats.is_empty());

        let config = EngineConfig::new().with_columns("0:1000000000000".parse().unwrap());
        let stats = run(config, &[]).unwrap();
        assert!(stats.is_empty());

        let config = EngineConfig::new().with_rows(RowRange::new(5, 9));
        let stats = run(config, &["1", "2"]).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_row_range_skips_malformed_rows() {
        let config = EngineConfig::new().with_rows(RowRange::new(1, 2));
        let stats = run(config, &["garbage here", "1", "3", "", "not a number"]).unwrap();
        assert_eq!(stats[&0].count(), 2);
        assert_eq!(stats[&0].mean(), 2.0);
    }

    #[test]
    fn test_break_after_range_end() {
        let mut engine = StatisticsEngine::new(EngineConfig::new().with_rows(RowRange::new(0, 1)));
        assert!(engine.ingest_row(0, &["1"]).unwrap().is_continue());
        assert!(engine.ingest_row(1, &["2"]).unwrap().is_break());
    }

    #[test]
    fn test_column_selection() {
        let config = EngineConfig::new().with_columns(ColumnSelection::from_indices([2]));
        let stats = run(config, &["x y 1", "x y 2 extra"]).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[&2].mean(), 1.5);
    }

    #[test]
    fn test_selected_column_out_of_range() {
        let config = EngineConfig::new().with_columns(ColumnSelection::from_indices([3]));
        let err = run(config, &["1 2 3"]).unwrap_err();
        assert!(matches!(err, StatsError::ColumnOutOfRange { column: 3, width: 3 }));
    }

    #[test]
    fn test_short_row_is_fatal() {
        let err = run(EngineConfig::new(), &["1 2 3", "4 5"]).unwrap_err();
        assert!(matches!(
            err,
            StatsError::ShortRow {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_selection_sets_width() {
        let config = EngineConfig::new().with_columns(ColumnSelection::from_indices([0]));
        let stats = run(config, &["1 2 3", "4", "7 8"]).unwrap();
        assert_eq!(stats[&0].count(), 3);
        assert_eq!(stats[&0].mean(), 4.0);

        let config = EngineConfig::new().with_columns(ColumnSelection::from_indices([0, 2]));
        let err = run(config, &["1 2 3 4", "5 6 7", "8 9"]).unwrap_err();
        assert!(matches!(
            err,
            StatsError::ShortRow {
                row: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let stats = run(EngineConfig::new(), &["1 2", "3 4 5 6"]).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[&1].mean(), 3.0);
    }

    #[test]
    fn test_blank_row_in_range() {
        let err = run(EngineConfig::new(), &["1", "   ", "2"]).unwrap_err();
        assert!(matches!(err, StatsError::BlankRow { row: 1 }));
    }

    #[test]
    fn test_parse_error_context() {
        let err = run(EngineConfig::new(), &["1 2", "3 nan"]).unwrap_err();
        match err {
            StatsError::Parse { row, column, token } => {
                assert_eq!(row, 1);
                assert_eq!(column, 1);
                assert_eq!(token, "nan");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = run(EngineConfig::new(), &["inf"]).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_deterministic() {
        let rows = ["3.25 -1", "1e3 7", "0.1 0.2", "42 42"];
        let a = run(EngineConfig::new(), &rows).unwrap();
        let b = run(EngineConfig::new(), &rows).unwrap();
        for (col, sa) in &a {
            let sb = &b[col];
            assert_eq!(sa.mean().to_bits(), sb.mean().to_bits());
            assert_eq!(sa.variance().to_bits(), sb.variance().to_bits());
            assert_eq!(sa.median().to_bits(), sb.median().to_bits());
        }
    }
}
