use std::ops::Deref;

use tracing::debug;

use super::{is_sorted, Endpoint, Interval, RawExtent, Rejected};

/// A sequence of intervals kept sorted by `(start, end)`.
///
/// Duplicates are kept; operations that need set semantics deduplicate their own output.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct IntervalSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T: Endpoint> IntervalSet<T> {
    pub fn new() -> Self {
        Self { intervals: Vec::new() }
    }

    /// Build a set from intervals in any order.
    pub fn from_unsorted(mut intervals: Vec<Interval<T>>) -> Self {
        if !is_sorted(&intervals) {
            intervals.sort_unstable();
        }

        Self { intervals }
    }

    /// Validate raw extents, keeping the valid ones.
    ///
    /// Malformed records never abort ingestion; they are returned alongside the set so the
    /// caller can report them.
    pub fn from_raw<I>(raw: I) -> (Self, Vec<Rejected>)
    where
        I: IntoIterator<Item = RawExtent<T>>,
    {
        let mut intervals = Vec::new();
        let mut rejected = Vec::new();

        for (index, extent) in raw.into_iter().enumerate() {
            match extent.to_interval() {
                Ok(ival) => intervals.push(ival),
                Err(reason) => {
                    debug!(index, %reason, "Skipping malformed extent");
                    rejected.push(Rejected { index, reason });
                }
            }
        }

        (Self::from_unsorted(intervals), rejected)
    }

    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.intervals
    }

    pub fn into_vec(self) -> Vec<Interval<T>> {
        self.intervals
    }

    /// Lowest start and highest end in the set.
    pub fn bounds(&self) -> Option<Interval<T>> {
        let first = self.intervals.first()?;
        let max_end = self.intervals.iter()
            .map(|ival| ival.end())
            .max()
            .unwrap_or(first.end());

        Some(Interval::new(first.start(), max_end))
    }
}

impl<T> Deref for IntervalSet<T> {
    type Target = [Interval<T>];

    fn deref(&self) -> &Self::Target {
        &self.intervals
    }
}

impl<T> AsRef<[Interval<T>]> for IntervalSet<T> {
    fn as_ref(&self) -> &[Interval<T>] {
        &self.intervals
    }
}

impl<T: Endpoint> FromIterator<Interval<T>> for IntervalSet<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a IntervalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = std::slice::Iter<'a, Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
