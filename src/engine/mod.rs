//! Multi-column ingestion
//!
//! [`StatisticsEngine`] routes the selected columns of each accepted row into
//! per-column [`ColumnStatistics`](crate::statistics::ColumnStatistics),
//! driven by an immutable [`EngineConfig`].
//!
//! # Example
//!
//! ```
//! use colstats::engine::{EngineConfig, StatisticsEngine};
//!
//! let config = EngineConfig::new().with_rows("1:".parse().unwrap());
//! let mut engine = StatisticsEngine::new(config);
//!
//! for (row, line) in ["# header", "1 2", "3 4"].iter().enumerate() {
//!     let tokens: Vec<&str> = line.split_whitespace().collect();
//!     engine.ingest_row(row as u64, &tokens).unwrap();
//! }
//!
//! let stats = engine.finalize_all();
//! assert_eq!(stats[&1].mean(), 3.0);
//! ```

#[allow(clippy::module_inception)]
mod engine;
mod selection;

pub use engine::{EngineConfig, StatisticsEngine};
pub use selection::{ColumnSelection, RowRange};
