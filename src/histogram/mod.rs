//! Histograms over finalized columns
//!
//! [`HistogramBuilder`] bins the values retained by a column's median tracker
//! into equal-width [`Bin`]s; [`Histogram::render`] draws them as ASCII bars.
//!
//! # Example
//!
//! ```
//! use colstats::histogram::{HistogramBuilder, DEFAULT_BAR_WIDTH};
//! use colstats::statistics::ColumnStatistics;
//!
//! let mut column = ColumnStatistics::new();
//! for value in [1.0, 2.0, 12.0, 22.0, 17.0, 4.0, 8.0, 77.0, 13.0, 7.0] {
//!     column.ingest(value).unwrap();
//! }
//! column.finalize();
//!
//! let hist = HistogramBuilder::new(4).build(&column).unwrap();
//! assert_eq!(hist.total(), 10);
//! print!("{}", hist.render(DEFAULT_BAR_WIDTH));
//! ```

mod builder;
mod render;

pub use builder::{Bin, Histogram, HistogramBuilder};
pub use render::{BarChart, DEFAULT_BAR_WIDTH};
