//! Row and column selection
//!
//! Indices are 0-based. Row ranges are inclusive on both ends; column
//! selections are sorted, merged inclusive ranges where no ranges at all
//! means "every column of the first row".

use crate::error::StatsError;
use core::ops::RangeInclusive;
use core::str::FromStr;

#[cfg(feature = "std")]
use std::{string::ToString, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec::Vec};

/// Inclusive range of row indices
///
/// Parses from `"start:end"`, `"start:"`, `":end"` or a single `"n"`.
///
/// ```
/// use colstats::engine::RowRange;
///
/// let rows: RowRange = "2:5".parse().unwrap();
/// assert!(rows.contains(2) && rows.contains(5));
/// assert!(!rows.contains(6));
///
/// let open: RowRange = "10:".parse().unwrap();
/// assert!(open.contains(u64::MAX));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    pub min_row: u64,
    pub max_row: u64,
}

impl Default for RowRange {
    fn default() -> Self {
        Self::all()
    }
}

impl RowRange {
    /// Every row
    pub fn all() -> Self {
        Self {
            min_row: 0,
            max_row: u64::MAX,
        }
    }

    /// Rows `min_row..=max_row`
    pub fn new(min_row: u64, max_row: u64) -> Self {
        Self { min_row, max_row }
    }

    /// Check if a row index is selected
    pub fn contains(&self, row: u64) -> bool {
        row >= self.min_row && row <= self.max_row
    }

    /// Check if no row after `row` can be selected
    pub fn is_exhausted_after(&self, row: u64) -> bool {
        row >= self.max_row
    }
}

impl FromStr for RowRange {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid(s, "empty row range"));
        }

        let (min_row, max_row) = match s.split_once(':') {
            Some((start, end)) => {
                let start = if start.trim().is_empty() {
                    0
                } else {
                    parse_index(s, start)?
                };
                let end = if end.trim().is_empty() {
                    u64::MAX
                } else {
                    parse_index(s, end)?
                };
                (start, end)
            }
            None => {
                let row = parse_index(s, s)?;
                (row, row)
            }
        };

        if min_row > max_row {
            return Err(invalid(s, "range start exceeds range end"));
        }
        Ok(Self { min_row, max_row })
    }
}

/// Set of selected column indices
///
/// Parses from a comma-separated list of single indices and inclusive
/// `"start:end"` ranges, e.g. `"0:2,5"`.
///
/// ```
/// use colstats::engine::ColumnSelection;
///
/// let cols: ColumnSelection = "3,0:1,1".parse().unwrap();
/// assert_eq!(cols.indices().collect::<Vec<_>>(), vec![0, 1, 3]);
/// assert!(ColumnSelection::all().is_all());
/// ```
///
/// Ranges are kept as given and only expanded against a real row width, so
/// a huge range costs nothing until [`resolve`](Self::resolve) rejects it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSelection {
    /// Sorted by start, non-overlapping, non-adjacent
    ranges: Vec<RangeInclusive<usize>>,
}

impl ColumnSelection {
    /// Every column of the first row
    pub fn all() -> Self {
        Self::default()
    }

    /// An explicit set of columns
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self::from_ranges(indices.into_iter().map(|i| i..=i).collect())
    }

    fn from_ranges(mut ranges: Vec<RangeInclusive<usize>>) -> Self {
        ranges.sort_by_key(|r| *r.start());

        let mut merged: Vec<RangeInclusive<usize>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if *range.start() <= last.end().saturating_add(1) => {
                    if range.end() > last.end() {
                        *last = *last.start()..=*range.end();
                    }
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    /// Check if this selects every column
    pub fn is_all(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Explicitly selected indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(|r| r.clone())
    }

    /// Explicitly selected ranges in ascending order
    pub fn ranges(&self) -> &[RangeInclusive<usize>] {
        &self.ranges
    }

    /// Largest explicitly selected index
    pub fn max_index(&self) -> Option<usize> {
        self.ranges.last().map(|r| *r.end())
    }

    /// Columns to track for a first row of `width` tokens
    pub fn resolve(&self, width: usize) -> Result<Vec<usize>, StatsError> {
        if self.is_all() {
            return Ok((0..width).collect());
        }
        match self.max_index() {
            Some(column) if column >= width => {
                Err(StatsError::ColumnOutOfRange { column, width })
            }
            _ => Ok(self.indices().collect()),
        }
    }
}

impl FromStr for ColumnSelection {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid(s, "empty column list"));
        }

        let mut ranges = Vec::new();
        for item in trimmed.split(',') {
            let item = item.trim();
            if item.is_empty() {
                return Err(invalid(s, "empty column entry"));
            }
            match item.split_once(':') {
                Some((start, end)) => {
                    let start = parse_column(s, start)?;
                    let end = parse_column(s, end)?;
                    if start > end {
                        return Err(invalid(s, "range start exceeds range end"));
                    }
                    ranges.push(start..=end);
                }
                None => {
                    let column = parse_column(s, item)?;
                    ranges.push(column..=column);
                }
            }
        }
        Ok(Self::from_ranges(ranges))
    }
}

fn parse_index(input: &str, token: &str) -> Result<u64, StatsError> {
    token
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid(input, "not a non-negative integer"))
}

fn parse_column(input: &str, token: &str) -> Result<usize, StatsError> {
    usize::try_from(parse_index(input, token)?)
        .map_err(|_| invalid(input, "column index too large"))
}

fn invalid(input: &str, reason: &'static str) -> StatsError {
    StatsError::InvalidSelection {
        input: input.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_range_forms() {
        assert_eq!("1:5".parse::<RowRange>().unwrap(), RowRange::new(1, 5));
        assert_eq!("3".parse::<RowRange>().unwrap(), RowRange::new(3, 3));
        assert_eq!(":4".parse::<RowRange>().unwrap(), RowRange::new(0, 4));
        assert_eq!(
            "7:".parse::<RowRange>().unwrap(),
            RowRange::new(7, u64::MAX)
        );
        assert_eq!(RowRange::default(), RowRange::all());
    }

    #[test]
    fn test_row_range_rejects_garbage() {
        for bad in ["", "5:1", "a:b", "-1:3", "1:2:3"] {
            let err = bad.parse::<RowRange>().unwrap_err();
            assert!(err.is_format_error(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_row_range_contains() {
        let rows = RowRange::new(2, 4);
        assert!(!rows.contains(1));
        assert!(rows.contains(2));
        assert!(rows.contains(4));
        assert!(!rows.contains(5));
        assert!(rows.is_exhausted_after(4));
        assert!(!rows.is_exhausted_after(3));
    }

    #[test]
    fn test_column_selection_parse() {
        let cols: ColumnSelection = "1:5,7".parse().unwrap();
        assert_eq!(cols.indices().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 7]);
        assert_eq!(cols.max_index(), Some(7));

        let dup: ColumnSelection = " 2 , 2, 0 ".parse().unwrap();
        assert_eq!(dup.indices().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_column_selection_rejects_garbage() {
        for bad in ["", ",", "1,,2", "3:1", "x"] {
            assert!(bad.parse::<ColumnSelection>().is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_column_ranges_merge() {
        let cols: ColumnSelection = "4:6,0,5:9,1,11".parse().unwrap();
        assert_eq!(cols.ranges(), &[0..=1, 4..=9, 11..=11]);
        assert_eq!(cols, ColumnSelection::from_indices([0, 1, 4, 5, 6, 7, 8, 9, 11]));
    }

    #[test]
    fn test_huge_column_range_is_lazy() {
        let input = format!("0:{}", usize::MAX);
        let cols: ColumnSelection = input.parse().unwrap();
        assert_eq!(cols.ranges().len(), 1);
        assert_eq!(cols.max_index(), Some(usize::MAX));
        assert!(matches!(
            cols.resolve(4),
            Err(StatsError::ColumnOutOfRange { width: 4, .. })
        ));
    }

    #[test]
    fn test_column_index_overflow() {
        let too_big = format!("{}0", u64::MAX);
        assert!(too_big.parse::<ColumnSelection>().is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(ColumnSelection::all().resolve(3).unwrap(), vec![0, 1, 2]);

        let cols = ColumnSelection::from_indices([0, 2]);
        assert_eq!(cols.resolve(3).unwrap(), vec![0, 2]);
        assert!(matches!(
            cols.resolve(2),
            Err(StatsError::ColumnOutOfRange { column: 2, width: 2 })
        ));
    }
}
