//! Equal-width histograms rebuilt from retained column values

use crate::math;
use crate::statistics::ColumnStatistics;
use crate::error::StatsError;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// A histogram bin covering `[left, right)`
///
/// The last bin of a histogram is closed on the right.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bin {
    pub left: f64,
    pub right: f64,
    pub count: u64,
}

impl Bin {
    /// Midpoint of the bin
    pub fn center(&self) -> f64 {
        0.5 * (self.left + self.right)
    }
}

/// Contiguous equal-width bins over `[min, max]`, ascending by `left`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    bins: Vec<Bin>,
    bin_width: f64,
}

impl Histogram {
    /// All bins, ascending
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Nominal width of every bin
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check if there are no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum of all bin counts
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Bin> {
        self.bins.iter()
    }
}

impl<'a> IntoIterator for &'a Histogram {
    type Item = &'a Bin;
    type IntoIter = core::slice::Iter<'a, Bin>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}

/// Maps `[min, max]` onto bin positions
///
/// When `max - min` overflows, offsets and widths are kept at half scale so
/// every intermediate stays finite.
#[derive(Clone, Copy, Debug)]
struct Scale {
    min: f64,
    width: f64,
    halved: bool,
}

impl Scale {
    fn new(min: f64, max: f64, n: usize) -> Self {
        let span = max - min;
        if span.is_finite() {
            Self {
                min,
                width: span / n as f64,
                halved: false,
            }
        } else {
            Self {
                min,
                width: (0.5 * max - 0.5 * min) / n as f64,
                halved: true,
            }
        }
    }

    /// Left edge of bin `i`
    fn edge(&self, i: usize) -> f64 {
        if self.halved {
            2.0 * (0.5 * self.min + i as f64 * self.width)
        } else {
            self.min + i as f64 * self.width
        }
    }

    /// Bin holding `value`; `max` and anything past the end go to the last bin
    fn index(&self, value: f64, n: usize) -> usize {
        let offset = if self.halved {
            0.5 * value - 0.5 * self.min
        } else {
            value - self.min
        };
        let pos = math::floor(offset / self.width);
        if pos.is_nan() || pos < 0.0 {
            0
        } else if pos >= n as f64 {
            n - 1
        } else {
            pos as usize
        }
    }

    /// Infinite only for a single bin spanning more than `f64::MAX`
    fn bin_width(&self) -> f64 {
        if self.halved {
            2.0 * self.width
        } else {
            self.width
        }
    }
}

/// Builds a [`Histogram`] from a finalized column
///
/// Bin `i` spans `[min + i * w, min + (i + 1) * w)` with
/// `w = (max - min) / bin_count`. The last bin's right edge is pinned to
/// `max` exactly, and values equal to `max` (which index to `bin_count`)
/// are counted in the last bin. Ranges wider than `f64::MAX` are binned
/// at half scale, so edges stay finite.
///
/// The values come from the column's median tracker. Both halves are read
/// and no ordering is assumed within them.
///
/// # Example
///
/// ```
/// use colstats::histogram::HistogramBuilder;
/// use colstats::statistics::ColumnStatistics;
///
/// let mut column = ColumnStatistics::new();
/// for value in [0.0, 1.0, 2.0, 3.0, 4.0] {
///     column.ingest(value).unwrap();
/// }
/// column.finalize();
///
/// let hist = HistogramBuilder::new(2).build(&column).unwrap();
/// let counts: Vec<u64> = hist.iter().map(|b| b.count).collect();
/// assert_eq!(counts, vec![2, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistogramBuilder {
    bin_count: usize,
}

impl HistogramBuilder {
    /// Builder for `bin_count` bins
    pub fn new(bin_count: usize) -> Self {
        Self { bin_count }
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Bin every value retained by `column`
    ///
    /// Fails with [`StatsError::InvalidBinCount`] for zero bins and with
    /// [`StatsError::DegenerateRange`] unless `max > min`, which includes
    /// the empty column.
    pub fn build(&self, column: &ColumnStatistics) -> Result<Histogram, StatsError> {
        let n = self.bin_count;
        if n == 0 {
            return Err(StatsError::InvalidBinCount);
        }

        let (min, max) = (column.min(), column.max());
        if max <= min {
            return Err(StatsError::DegenerateRange { min, max });
        }

        let scale = Scale::new(min, max, n);
        let mut bins: Vec<Bin> = (0..n)
            .map(|i| Bin {
                left: scale.edge(i),
                right: scale.edge(i + 1),
                count: 0,
            })
            .collect();
        if let Some(last) = bins.last_mut() {
            last.right = max;
        }

        let (lower, upper) = column.tracker().retained_values();
        for value in lower.chain(upper) {
            bins[scale.index(value, n)].count += 1;
        }

        let bin_width = scale.bin_width();
        tracing::debug!(bins = n, bin_width, values = column.count(), "histogram built");
        Ok(Histogram { bins, bin_width })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[f64]) -> ColumnStatistics {
        let mut stats = ColumnStatistics::new();
        for &v in values {
            stats.ingest(v).unwrap();
        }
        stats.finalize();
        stats
    }

    fn counts(hist: &Histogram) -> Vec<u64> {
        hist.iter().map(|b| b.count).collect()
    }

    #[test]
    fn test_basic_binning() {
        let stats = column(&[1.0, 2.0, 12.0, 22.0, 17.0, 4.0, 8.0, 77.0, 13.0, 7.0]);
        let hist = HistogramBuilder::new(4).build(&stats).unwrap();

        // width 19: [1,20) [20,39) [39,58) [58,77]
        assert_eq!(hist.bin_width(), 19.0);
        assert_eq!(counts(&hist), vec![8, 1, 0, 1]);
        assert_eq!(hist.total(), 10);
        assert_eq!(hist.max_count(), 8);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let stats = column(&[0.0, 10.0, 10.0, 10.0]);
        let hist = HistogramBuilder::new(5).build(&stats).unwrap();
        assert_eq!(counts(&hist), vec![1, 0, 0, 0, 3]);
    }

    #[test]
    fn test_overflowing_range() {
        let stats = column(&[-1e308, 0.0, 1e308]);
        let hist = HistogramBuilder::new(4).build(&stats).unwrap();

        assert_eq!(counts(&hist), vec![1, 0, 1, 1]);
        assert_eq!(hist.bin_width(), 5e307);
        let lefts: Vec<f64> = hist.iter().map(|b| b.left).collect();
        assert_eq!(lefts, vec![-1e308, -5e307, 0.0, 5e307]);
        assert_eq!(hist.bins()[3].right, 1e308);
    }

    #[test]
    fn test_full_f64_range() {
        let stats = column(&[f64::MIN, 1.0, f64::MAX, f64::MAX]);
        for n in [1, 2, 3, 7] {
            let hist = HistogramBuilder::new(n).build(&stats).unwrap();
            assert_eq!(hist.total(), 4);
            assert_eq!(hist.bins()[0].count, 1 + (n == 1) as u64 * 3);
            assert!(hist.bins()[n - 1].count >= 2);
            assert!(hist.iter().all(|b| b.left.is_finite() && b.right.is_finite()));
            assert_eq!(hist.bins()[n - 1].right, f64::MAX);
        }
    }

    #[test]
    fn test_edges() {
        let stats = column(&[0.1, 0.7, 0.3]);
        let hist = HistogramBuilder::new(3).build(&stats).unwrap();

        let bins = hist.bins();
        assert_eq!(bins[0].left, 0.1);
        assert_eq!(bins[2].right, 0.7);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].right, pair[1].left);
            assert!(pair[0].left < pair[1].left);
        }
    }

    #[test]
    fn test_single_bin() {
        let stats = column(&[3.0, -2.0, 5.5, 1.0]);
        let hist = HistogramBuilder::new(1).build(&stats).unwrap();
        assert_eq!(counts(&hist), vec![4]);
        assert_eq!(hist.bins()[0].left, -2.0);
        assert_eq!(hist.bins()[0].right, 5.5);
    }

    #[test]
    fn test_degenerate_range() {
        let stats = column(&[2.0, 2.0, 2.0]);
        let err = HistogramBuilder::new(10).build(&stats).unwrap_err();
        assert!(matches!(err, StatsError::DegenerateRange { min, max } if min == 2.0 && max == 2.0));
    }

    #[test]
    fn test_empty_column() {
        let err = HistogramBuilder::new(10).build(&column(&[])).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_zero_bins() {
        let err = HistogramBuilder::new(0)
            .build(&column(&[1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(err, StatsError::InvalidBinCount));
    }

    #[test]
    fn test_many_bins_sparse() {
        let stats = column(&[0.0, 1.0]);
        let hist = HistogramBuilder::new(100).build(&stats).unwrap();
        assert_eq!(hist.len(), 100);
        assert_eq!(hist.bins()[0].count, 1);
        assert_eq!(hist.bins()[99].count, 1);
        assert_eq!(hist.total(), 2);
    }
}
