//! Running mean and variance
//!
//! Streaming first and second moments via Welford's numerically stable
//! one-pass recurrence.


/// Final moments of a stream
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moments {
    /// Arithmetic mean, `0` for an empty stream
    pub mean: f64,
    /// Sample variance (Bessel-corrected), `0` for fewer than two values
    pub variance: f64,
}

/// Running moments calculator using Welford's algorithm
///
/// After the `k`-th value `d`:
///
/// ```text
/// qk += (k - 1) * (d - mk)^2 / k
/// mk += (d - mk) / k
/// ```
///
/// Mean and variance are read off `mk` and `qk / (k - 1)`. Unlike summing
/// `(x - mean)^2` in a second pass, the recurrence never subtracts two large,
/// nearly equal sums, so it stays accurate for long streams and for data far
/// away from zero.
///
/// [`finalize`](Self::finalize) is pure and idempotent: it can be called any
/// number of times, and further calls to [`add`](Self::add) are allowed
/// afterwards (the next `finalize` reflects them).
///
/// Values must be finite; callers reject NaN and infinities before ingestion.
///
/// # Example
///
/// ```
/// use colstats::statistics::MomentAccumulator;
///
/// let mut acc = MomentAccumulator::new();
/// for value in [1.0, 2.0, 12.0] {
///     acc.add(value);
/// }
///
/// let moments = acc.finalize();
/// assert_eq!(moments.mean, 5.0);
/// assert_eq!(moments.variance, 37.0);
/// ```
#[derive(Clone, Debug)]
pub struct MomentAccumulator {
    /// Number of values seen
    count: u64,
    /// Running mean (mk)
    mk: f64,
    /// Running sum of squared deviations (qk)
    qk: f64,
}

impl Default for MomentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MomentAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mk: 0.0,
            qk: 0.0,
        }
    }

    /// Add a finite value
    pub fn add(&mut self, value: f64) {
        debug_assert!(value.is_finite(), "non-finite value reached moments");

        self.count += 1;
        let k = self.count as f64;
        let delta = value - self.mk;
        self.qk += (k - 1.0) * delta * delta / k;
        self.mk += delta / k;
    }

    /// Number of values seen
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Running mean, `0` when empty
    pub fn mean(&self) -> f64 {
        self.mk
    }

    /// Sample variance, `0` for fewer than two values
    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.qk / (self.count - 1) as f64
        } else {
            0.0
        }
    }

    /// Compute the final mean and variance
    pub fn finalize(&self) -> Moments {
        Moments {
            mean: self.mean(),
            variance: self.variance(),
        }
    }
}
