//! Interval value types.
//!
//! An [`Interval`] is a closed `(start, end)` pair over any totally ordered scalar. Intervals are
//! plain values: they are compared, hashed and ordered by `(start, end)` lexicographically.
//! Records coming from an external source are first represented as a [`RawExtent`], which can
//! describe malformed data, and only become intervals after validation.

use std::borrow::Cow;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use num::traits::SaturatingSub;
use num::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod overlap;
pub mod raw;
pub mod set;

pub use overlap::{IntervalPredicate, Overlap};
pub use raw::{validate, RawExtent, Rejected};
pub use set::IntervalSet;

/// Scalar type usable as an interval endpoint.
pub trait Endpoint: Copy + Ord + Hash + Debug { }

impl<T> Endpoint for T where T: Copy + Ord + Hash + Debug { }

/// A closed interval `[start, end]`.
///
/// `start <= end` is expected but not enforced; the engine never reorders the endpoints of an
/// interval it was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T> Interval<T>
where
    T: Endpoint,
{
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    #[inline(always)]
    pub fn start(&self) -> T {
        self.start
    }

    #[inline(always)]
    pub fn end(&self) -> T {
        self.end
    }

    /// `self` strictly contains `other`: it starts before and ends after it.
    #[inline]
    pub fn strictly_contains(&self, other: &Self) -> bool {
        self.start < other.start && self.end > other.end
    }

    /// The two intervals share at least one point.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.end < other.start || other.end < self.start)
    }

    /// `other` does not end before `self` starts.
    #[inline]
    pub fn is_reached_by(&self, other: &Self) -> bool {
        !(other.end < self.start)
    }

    #[inline]
    pub fn contains_point(&self, pos: T) -> bool {
        pos >= self.start && pos <= self.end
    }

    /// Smallest interval covering both.
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            start: std::cmp::min(self.start, other.start),
            end: std::cmp::max(self.end, other.end),
        }
    }

    /// `end - start`, or zero for a reversed interval. Saturates at the largest value of `T`.
    pub fn width(&self) -> T
    where
        T: SaturatingSub + Zero,
    {
        if self.end > self.start {
            self.end.saturating_sub(&self.start)
        } else {
            T::zero()
        }
    }
}

impl<T: Endpoint> From<(T, T)> for Interval<T> {
    fn from((start, end): (T, T)) -> Self {
        Interval::new(start, end)
    }
}

impl<T: Endpoint> From<Interval<T>> for (T, T) {
    fn from(ival: Interval<T>) -> Self {
        (ival.start, ival.end)
    }
}

impl<T: Display> Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.start, self.end)
    }
}

// Intervals travel as 2-element arrays, the same shape sources and sinks use.
impl<T: Serialize> Serialize for Interval<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.start, &self.end).serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Interval<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (start, end) = <(T, T)>::deserialize(deserializer)?;

        Ok(Self { start, end })
    }
}

#[inline]
pub(crate) fn is_sorted<T: Endpoint>(ivals: &[Interval<T>]) -> bool {
    ivals.windows(2).all(|w| w[0] <= w[1])
}

/// Borrow the input when it is already sorted by `(start, end)`, otherwise sort a copy.
pub(crate) fn sorted_view<T: Endpoint>(ivals: &[Interval<T>]) -> Cow<'_, [Interval<T>]> {
    if is_sorted(ivals) {
        Cow::Borrowed(ivals)
    } else {
        let mut owned = ivals.to_vec();
        owned.sort_unstable();

        Cow::Owned(owned)
    }
}
