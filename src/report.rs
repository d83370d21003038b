//! Plain-text statistics report

use crate::statistics::ColumnStatistics;
use core::fmt;

/// Displays the summary of one column
///
/// ```
/// use colstats::report::ColumnReport;
/// use colstats::statistics::ColumnStatistics;
///
/// let mut column = ColumnStatistics::new();
/// column.ingest(1.0).unwrap();
/// column.ingest(2.0).unwrap();
/// column.finalize();
///
/// let text = ColumnReport::new(0, &column).to_string();
/// assert!(text.contains("#elem : 2"));
/// assert!(text.contains("mean  : 1.5e0"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ColumnReport<'a> {
    column: usize,
    stats: &'a ColumnStatistics,
}

impl<'a> ColumnReport<'a> {
    pub fn new(column: usize, stats: &'a ColumnStatistics) -> Self {
        Self { column, stats }
    }
}

impl fmt::Display for ColumnReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        writeln!(f, "column {}", self.column)?;
        writeln!(f, "#elem : {}", s.count())?;
        writeln!(f, "min   : {:e}", s.min())?;
        writeln!(f, "max   : {:e}", s.max())?;
        writeln!(f, "mean  : {:e}", s.mean())?;
        writeln!(f, "std   : {:e}", s.std_dev())?;
        writeln!(f, "var   : {:e}", s.variance())?;
        writeln!(f, "med   : {:e}", s.median())
    }
}
