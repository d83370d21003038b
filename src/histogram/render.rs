//! ASCII bar rendering

use super::builder::Histogram;
use crate::math;
use core::fmt;

/// Default width, in characters, of the tallest bar
pub const DEFAULT_BAR_WIDTH: usize = 60;

/// Displays a histogram as one proportional `#` bar per bin
///
/// The largest bin gets exactly `width` characters; the others are scaled
/// and rounded to the nearest character.
///
/// ```
/// use colstats::histogram::HistogramBuilder;
/// use colstats::statistics::ColumnStatistics;
///
/// let mut column = ColumnStatistics::new();
/// for value in [0.0, 0.5, 1.0, 1.0] {
///     column.ingest(value).unwrap();
/// }
/// column.finalize();
///
/// let hist = HistogramBuilder::new(2).build(&column).unwrap();
/// let text = hist.render(10).to_string();
/// assert!(text.lines().nth(1).unwrap().ends_with("##########"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BarChart<'a> {
    histogram: &'a Histogram,
    width: usize,
}

impl Histogram {
    /// Render with the tallest bar `width` characters wide
    pub fn render(&self, width: usize) -> BarChart<'_> {
        BarChart {
            histogram: self,
            width,
        }
    }
}

impl BarChart<'_> {
    /// Bar length for a bin count
    pub fn bar_len(&self, count: u64) -> usize {
        let max = self.histogram.max_count();
        if max == 0 {
            return 0;
        }
        math::round(count as f64 / max as f64 * self.width as f64) as usize
    }
}

impl fmt::Display for BarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bin in self.histogram {
            write!(
                f,
                "[{:>12.5e}, {:>12.5e}) {:>8} ",
                bin.left, bin.right, bin.count
            )?;
            for _ in 0..self.bar_len(bin.count) {
                f.write_str("#")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
