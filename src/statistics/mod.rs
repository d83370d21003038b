//! Streaming statistics for a single column of numbers
//!
//! - [`MomentAccumulator`]: count, mean and variance in one stable pass
//! - [`MedianTracker`]: exact running median over two balanced heaps
//! - [`ColumnStatistics`]: both of the above plus min and max
//!
//! # Example
//!
//! ```
//! use colstats::statistics::ColumnStatistics;
//!
//! let mut column = ColumnStatistics::new();
//!
//! for value in [1.0, 2.0, 12.0, 22.0, 17.0, 4.0, 8.0, 77.0, 13.0, 7.0] {
//!     column.ingest(value).unwrap();
//! }
//! column.finalize();
//!
//! println!("Mean: {}", column.mean());
//! println!("Median: {}", column.median());
//! println!("Stddev: {}", column.std_dev());
//! ```

mod column;
mod median;
mod moments;

pub use column::ColumnStatistics;
pub use median::{ExtremumHeap, HeapOrder, MaxFirst, MedianTracker, MinFirst};
pub use moments::{MomentAccumulator, Moments};
