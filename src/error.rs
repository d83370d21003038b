//! Error type for streaming statistics
//!
//! All recoverable failures surface as a [`StatsError`].

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error raised while ingesting a stream or building a histogram
///
/// Variants fall into three families (see [`is_parse_error`](Self::is_parse_error),
/// [`is_format_error`](Self::is_format_error) and
/// [`is_domain_error`](Self::is_domain_error)). All of them are fatal for the
/// unit of work that produced them; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// A token could not be parsed as a finite `f64`
    #[error("row {row}, column {column}: cannot parse {token:?} as a finite number")]
    Parse {
        row: u64,
        column: usize,
        token: String,
    },
    /// A non-finite value was handed directly to a column
    #[error("non-finite value {value} rejected")]
    NonFinite { value: f64 },
    /// A row inside the active range has fewer tokens than the established width
    #[error("row {row}: expected at least {expected} columns, found {found}")]
    ShortRow {
        row: u64,
        expected: usize,
        found: usize,
    },
    /// A blank or whitespace-only row inside the active range
    #[error("row {row}: blank line")]
    BlankRow { row: u64 },
    /// A selected column does not exist in the first accepted row
    #[error("column {column} out of range: first row has {width} columns")]
    ColumnOutOfRange { column: usize, width: usize },
    /// A row or column selection string is malformed
    #[error("invalid selection {input:?}: {reason}")]
    InvalidSelection { input: String, reason: &'static str },
    /// Histogram requested over a zero (or empty) value range
    #[error("histogram: value range is empty (min {min:e}, max {max:e})")]
    DegenerateRange { min: f64, max: f64 },
    /// Histogram requested with zero bins
    #[error("histogram: bin count must be positive")]
    InvalidBinCount,
    /// Reading from the line source failed
    #[cfg(feature = "std")]
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    /// Token could not be turned into a finite number
    pub fn is_parse_error(&self) -> bool {
        matches!(self, StatsError::Parse { .. } | StatsError::NonFinite { .. })
    }

    /// Input is structurally wrong: short or blank rows, bad column references
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            StatsError::ShortRow { .. }
                | StatsError::BlankRow { .. }
                | StatsError::ColumnOutOfRange { .. }
                | StatsError::InvalidSelection { .. }
        )
    }

    /// Request cannot be satisfied for this data (histogram preconditions)
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            StatsError::DegenerateRange { .. } | StatsError::InvalidBinCount
        )
    }
}
