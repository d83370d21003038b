//! # Colstats
//!
//! Streaming descriptive statistics for columns of numbers.
//!
//! Colstats reads a whitespace-delimited numeric table row by row and keeps,
//! per selected column, everything needed for a full summary without a second
//! pass over the input.
//!
//! ## Features
//!
//! - **Moments**: count, mean and variance via Welford's one-pass algorithm
//! - **Exact Median**: a running median over two balanced heaps
//! - **Histograms**: equal-width bins rebuilt from the retained values
//! - **Row/Column Selection**: `"start:end"` row ranges and `"0:2,5"` column lists
//! - **Deterministic**: the same input always yields bit-identical results
//!
//! ## Quick Start
//!
//! ```rust
//! use colstats::prelude::*;
//!
//! let mut engine = StatisticsEngine::new(EngineConfig::new());
//! for (row, line) in ["1 10", "2 20", "12 30"].iter().enumerate() {
//!     let tokens: Vec<&str> = line.split_whitespace().collect();
//!     engine.ingest_row(row as u64, &tokens).unwrap();
//! }
//!
//! let columns = engine.finalize_all();
//! assert_eq!(columns[&0].mean(), 5.0);
//! assert_eq!(columns[&0].median(), 2.0);
//!
//! let hist = HistogramBuilder::new(3).build(&columns[&1]).unwrap();
//! assert_eq!(hist.total(), 3);
//! ```
//!
//! ## Memory
//!
//! The median tracker keeps every ingested value, so memory grows with the
//! number of values. In exchange the median is exact and histograms need no
//! second read of the input.
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support, line reader over `BufRead`
//! - `cli` (default): The `colstats` command-line binary
//! - `serde`: Enable serialization of histograms, selections and summaries
//!
//! Without `std` the statistics, engine, histogram and report modules build on
//! `core` and `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Error type always available
pub mod error;

mod math;

pub mod engine;
pub mod histogram;
pub mod report;
pub mod statistics;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod reader;

pub mod prelude {
    pub use crate::error::StatsError;

    pub use crate::engine::{ColumnSelection, EngineConfig, RowRange, StatisticsEngine};
    pub use crate::histogram::{Bin, Histogram, HistogramBuilder};
    pub use crate::report::ColumnReport;
    pub use crate::statistics::{ColumnStatistics, MedianTracker, MomentAccumulator};

    #[cfg(feature = "std")]
    pub use crate::reader::RowReader;
}

pub use engine::{EngineConfig, StatisticsEngine};
pub use histogram::{Histogram, HistogramBuilder};
pub use statistics::ColumnStatistics;
pub use error::StatsError;
