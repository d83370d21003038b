//! Exact running median
//!
//! A dual-heap tracker: a max-first heap holds the lower half of the values
//! seen so far and a min-first heap holds the upper half. The halves never
//! differ in size by more than one, so the median is always at one or both
//! roots.
//!
//! # Memory
//!
//! Every value is retained for the life of the tracker. That is what makes
//! the median exact and lets a histogram be rebuilt after the stream ends;
//! memory grows as `O(n)`.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

#[cfg(feature = "std")]
use std::collections::BinaryHeap;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::collections::BinaryHeap;

/// Ordering policy for an [`ExtremumHeap`]
pub trait HeapOrder {
    /// `Greater` if `a` must sit closer to the root than `b`
    fn order(a: f64, b: f64) -> Ordering;
}

/// Largest value at the root
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxFirst;

/// Smallest value at the root
#[derive(Clone, Copy, Debug, Default)]
pub struct MinFirst;

impl HeapOrder for MaxFirst {
    #[inline]
    fn order(a: f64, b: f64) -> Ordering {
        a.total_cmp(&b)
    }
}

impl HeapOrder for MinFirst {
    #[inline]
    fn order(a: f64, b: f64) -> Ordering {
        b.total_cmp(&a)
    }
}

/// A value ordered by the heap's direction
struct Key<O> {
    value: f64,
    _order: PhantomData<O>,
}

impl<O> Key<O> {
    fn new(value: f64) -> Self {
        Self {
            value,
            _order: PhantomData,
        }
    }
}

impl<O> Clone for Key<O> {
    fn clone(&self) -> Self {
        Self::new(self.value)
    }
}

impl<O> fmt::Debug for Key<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<O: HeapOrder> PartialEq for Key<O> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<O: HeapOrder> Eq for Key<O> {}

impl<O: HeapOrder> PartialOrd for Key<O> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<O: HeapOrder> Ord for Key<O> {
    fn cmp(&self, other: &Self) -> Ordering {
        O::order(self.value, other.value)
    }
}

/// Binary heap of `f64` parameterized by ordering direction
///
/// Supports insert, peek-extreme and remove-extreme in `O(log n)`.
/// Iteration yields values in heap order, not sorted.
#[derive(Clone, Debug)]
pub struct ExtremumHeap<O> {
    heap: BinaryHeap<Key<O>>,
}

impl<O: HeapOrder> Default for ExtremumHeap<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: HeapOrder> ExtremumHeap<O> {
    /// Create an empty heap
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Number of values held
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The extreme value (max for [`MaxFirst`], min for [`MinFirst`])
    pub fn peek(&self) -> Option<f64> {
        self.heap.peek().map(|k| k.value)
    }

    /// Insert a value
    pub fn push(&mut self, value: f64) {
        self.heap.push(Key::new(value));
    }

    /// Remove and return the extreme value
    pub fn pop(&mut self) -> Option<f64> {
        self.heap.pop().map(|k| k.value)
    }

    /// All values in heap order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.heap.iter().map(|k| k.value)
    }
}

/// Exact running median over a stream of finite values
///
/// Insertion rules, with `n` values already held:
///
/// - `n == 0`: the value goes to the lower half.
/// - `n == 1`: the smaller of the two values ends up in the lower half, the
///   larger in the upper half.
/// - `n >= 2`: values below the current median go low, values above go high,
///   and a value equal to the median goes to the smaller half (lower half on
///   a size tie).
///
/// After each insertion a size difference of two is fixed by moving one root
/// across, then the median is recomputed from the roots. Each step is
/// `O(log n)`.
///
/// The final median does not depend on arrival order, but the sequence of
/// intermediate medians does.
///
/// # Panics
///
/// Insertion panics if the halves ever differ by more than one after
/// rebalancing. That can only happen through a logic error in this type.
///
/// # Example
///
/// ```
/// use colstats::statistics::MedianTracker;
///
/// let mut tracker = MedianTracker::new();
/// for value in [1.0, 2.0, 12.0] {
///     tracker.add(value);
/// }
/// assert_eq!(tracker.median(), 2.0);
///
/// tracker.add(22.0);
/// assert_eq!(tracker.median(), 7.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MedianTracker {
    /// Values <= median, largest first
    lower: ExtremumHeap<MaxFirst>,
    /// Values >= median, smallest first
    upper: ExtremumHeap<MinFirst>,
    /// Cached median, 0 while empty
    current: f64,
}

impl MedianTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a finite value and refresh the median
    pub fn add(&mut self, value: f64) {
        debug_assert!(value.is_finite(), "non-finite value reached median tracker");

        match self.len() {
            0 => self.lower.push(value),
            1 => self.insert_second(value),
            _ => self.insert_steady(value),
        }

        self.rebalance();
        self.recompute();
    }

    /// Route the second value so that lower <= upper
    fn insert_second(&mut self, value: f64) {
        // The single value always lives in the lower half at this point
        match self.lower.peek() {
            Some(first) if value < first => {
                self.lower.pop();
                self.upper.push(first);
                self.lower.push(value);
            }
            _ => self.upper.push(value),
        }
    }

    fn insert_steady(&mut self, value: f64) {
        if value < self.current {
            self.lower.push(value);
        } else if value > self.current {
            self.upper.push(value);
        } else if self.lower.len() <= self.upper.len() {
            self.lower.push(value);
        } else {
            self.upper.push(value);
        }
    }

    fn rebalance(&mut self) {
        let (lo, hi) = (self.lower.len(), self.upper.len());
        if lo == hi + 2 {
            if let Some(v) = self.lower.pop() {
                self.upper.push(v);
            }
        } else if hi == lo + 2 {
            if let Some(v) = self.upper.pop() {
                self.lower.push(v);
            }
        }

        let (lo, hi) = (self.lower.len(), self.upper.len());
        assert!(
            lo.abs_diff(hi) <= 1,
            "median heaps out of balance: lower {} upper {}",
            lo,
            hi
        );
    }

    fn recompute(&mut self) {
        self.current = match (self.lower.peek(), self.upper.peek()) {
            (Some(lo), Some(hi)) if self.lower.len() == self.upper.len() => 0.5 * (lo + hi),
            (Some(lo), _) if self.lower.len() > self.upper.len() => lo,
            (_, Some(hi)) => hi,
            _ => 0.0,
        };
    }

    /// Current median, `0` when empty
    pub fn median(&self) -> f64 {
        self.current
    }

    /// Total number of retained values
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the lower half
    pub fn lower_len(&self) -> usize {
        self.lower.len()
    }

    /// Size of the upper half
    pub fn upper_len(&self) -> usize {
        self.upper.len()
    }

    /// Retained values as `(lower half, upper half)`
    ///
    /// Each half is yielded in heap order, not sorted. Their union is every
    /// value ever added.
    pub fn retained_values(
        &self,
    ) -> (
        impl Iterator<Item = f64> + '_,
        impl Iterator<Item = f64> + '_,
    ) {
        (self.lower.iter(), self.upper.iter())
    }

    /// Iterate over every retained value in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.lower.iter().chain(self.upper.iter())
    }
}
