//! Per-column statistics
//!
//! Combines a [`MomentAccumulator`], a [`MedianTracker`] and running min/max
//! for a single column of input.

use super::median::MedianTracker;
use super::moments::{MomentAccumulator, Moments};
use crate::math;
use crate::error::StatsError;

/// Statistics for one column of a stream
///
/// Values are checked for finiteness on the way in, so the inner structures
/// only ever see finite numbers.
///
/// `min` starts at `f64::MAX` and `max` at `f64::MIN`. A column that never
/// receives a value keeps those sentinels and reports `0` for mean, variance
/// and median.
///
/// # Example
///
/// ```
/// use colstats::statistics::ColumnStatistics;
///
/// let mut column = ColumnStatistics::new();
/// for value in [1.0, 2.0] {
///     column.ingest(value).unwrap();
/// }
/// column.finalize();
///
/// assert_eq!(column.mean(), 1.5);
/// assert_eq!(column.variance(), 0.5);
/// assert_eq!(column.median(), 1.5);
/// ```
#[derive(Clone, Debug)]
pub struct ColumnStatistics {
    moments: MomentAccumulator,
    tracker: MedianTracker,
    min: f64,
    max: f64,
    num_elements: u64,
    /// Set by `finalize`
    finalized: Moments,
}

impl Default for ColumnStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnStatistics {
    /// Create statistics for an empty column
    pub fn new() -> Self {
        Self {
            moments: MomentAccumulator::new(),
            tracker: MedianTracker::new(),
            min: f64::MAX,
            max: f64::MIN,
            num_elements: 0,
            finalized: Moments::default(),
        }
    }

    /// Observe one value
    ///
    /// Returns [`StatsError::NonFinite`] for NaN or infinite input and leaves
    /// the statistics untouched.
    pub fn ingest(&mut self, value: f64) -> Result<(), StatsError> {
        if !value.is_finite() {
            return Err(StatsError::NonFinite { value });
        }

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        self.moments.add(value);
        self.tracker.add(value);
        self.num_elements += 1;
        Ok(())
    }

    /// Fix mean and variance from the values seen so far
    ///
    /// Idempotent. The median needs no finalization since it is current after
    /// every insert.
    pub fn finalize(&mut self) {
        self.finalized = self.moments.finalize();
    }

    /// Number of values
    pub fn count(&self) -> u64 {
        self.num_elements
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.num_elements == 0
    }

    /// Mean as of the last `finalize`
    pub fn mean(&self) -> f64 {
        self.finalized.mean
    }

    /// Sample variance as of the last `finalize`
    pub fn variance(&self) -> f64 {
        self.finalized.variance
    }

    /// Sample standard deviation as of the last `finalize`
    pub fn std_dev(&self) -> f64 {
        math::sqrt(self.finalized.variance)
    }

    /// Current median
    pub fn median(&self) -> f64 {
        self.tracker.median()
    }

    /// Smallest value, `f64::MAX` when empty
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest value, `f64::MIN` when empty
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`, or `None` when empty
    pub fn range(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.max - self.min)
        }
    }

    /// The median tracker, whose retained values cover the whole column
    pub fn tracker(&self) -> &MedianTracker {
        &self.tracker
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ColumnStatistics {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ColumnStatistics", 7)?;
        state.serialize_field("count", &self.num_elements)?;
        state.serialize_field("min", &self.min)?;
        state.serialize_field("max", &self.max)?;
        state.serialize_field("mean", &self.mean())?;
        state.serialize_field("std_dev", &self.std_dev())?;
        state.serialize_field("variance", &self.variance())?;
        state.serialize_field("median", &self.median())?;
        state.end()
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

    #[test]
    fn test_empty_keeps_sentinels() {
        let stats = column(&[]);
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.median(), 0.0);
        assert_eq!(stats.min(), f64::MAX);
        assert_eq!(stats.max(), f64::MIN);
        assert_eq!(stats.range(), None);
    }

    #[test]
    fn test_single_value() {
        let stats = column(&[1.0]);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.mean(), 1.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.median(), 1.0);
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 1.0);
    }

    #[test]
    fn test_three_values() {
        let stats = column(&[1.0, 2.0, 12.0]);
        assert_eq!(stats.mean(), 5.0);
        assert_eq!(stats.variance(), 37.0);
        assert_eq!(stats.median(), 2.0);
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 12.0);
        assert_eq!(stats.range(), Some(11.0));
    }

    #[test]
    fn test_std_dev() {
        let stats = column(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        // 32 / 7
        assert!((stats.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut stats = column(&[1.0, 2.0]);
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                stats.ingest(bad),
                Err(StatsError::NonFinite { .. })
            ));
        }
        stats.finalize();
        assert_eq!(stats.count(), 2);
        assert_eq!(stats.mean(), 1.5);
        assert_eq!(stats.max(), 2.0);
    }

    #[test]
    fn test_mean_requires_finalize() {
        let mut stats = ColumnStatistics::new();
        stats.ingest(4.0).unwrap();
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.median(), 4.0);
        stats.finalize();
        assert_eq!(stats.mean(), 4.0);
    }

    #[test]
    fn test_negative_values() {
        let stats = column(&[-3.0, -1.0, -2.0]);
        assert_eq!(stats.min(), -3.0);
        assert_eq!(stats.max(), -1.0);
        assert_eq!(stats.median(), -2.0);
        assert_eq!(stats.mean(), -2.0);
    }
}
