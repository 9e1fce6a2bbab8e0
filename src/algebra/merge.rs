use itertools::Itertools;
use num::traits::{SaturatingAdd, SaturatingSub};
use num::Zero;

use crate::interval::{Endpoint, Interval};

/// Synthesise `(a.start, b.end)` for every pair `a` before `b` (in sorted order) with
/// `a.end >= b.start`.
///
/// The input is sorted and deduplicated first. Every qualifying pair is considered, not just
/// neighbouring ones, and every synthesised span is kept (deduplicated); spans are not merged
/// transitively. When `b` is nested inside `a` the span ends at `b.end`, which is shorter than
/// `a`. Use [`coalesce`] for maximal connected spans.
pub fn merge_adjacent<T: Endpoint>(intervals: &[Interval<T>]) -> Vec<Interval<T>> {
    let sorted: Vec<_> = intervals.iter()
        .copied()
        .sorted_unstable()
        .dedup()
        .collect();

    sorted.iter()
        .tuple_combinations()
        .filter(|(a, b)| a.end() >= b.start())
        .map(|(a, b)| Interval::new(a.start(), b.end()))
        .sorted_unstable()
        .dedup()
        .collect()
}

/// Merge intervals into maximal spans: two intervals end up in the same span when they share a
/// point, directly or through a chain of other intervals.
pub fn coalesce<T: Endpoint>(intervals: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut merged: Vec<Interval<T>> = Vec::new();
    let mut to_add: Option<Interval<T>> = None;

    for ival in intervals.iter().copied().sorted_unstable() {
        match to_add {
            Some(ref mut curr) if ival.start() <= curr.end() => {
                *curr = curr.hull(&ival);
            },
            _ => {
                if let Some(prev) = to_add.replace(ival) {
                    merged.push(prev);
                }
            }
        }
    }

    if let Some(last) = to_add {
        merged.push(last);
    }

    merged
}

/// Total width covered by the intervals, counting shared stretches once. Saturates at the
/// largest value of `T`.
pub fn coverage<T>(intervals: &[Interval<T>]) -> T
where
    T: Endpoint + Zero + SaturatingAdd + SaturatingSub,
{
    coalesce(intervals).iter()
        .fold(T::zero(), |acc, ival| acc.saturating_add(&ival.width()))
}
