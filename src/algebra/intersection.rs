use std::borrow::Cow;

use smallvec::SmallVec;
use tracing::trace;

use crate::errors::ExtentError;
use crate::interval::{sorted_view, Endpoint, Interval};

const TUPLE_ON_STACK: usize = 4;

/// One interval from each input list, all sharing a common point.
pub type IntersectionTuple<T> = SmallVec<[Interval<T>; TUPLE_ON_STACK]>;

/// Synchronised sweep over `k` sorted interval lists.
///
/// One cursor is kept per list. At every step the current intervals form a tuple; if the
/// largest start does not exceed the smallest end, they share a point and the tuple is emitted.
/// Then every cursor whose current interval ends at that smallest end is advanced, ties
/// included. The sweep stops as soon as any cursor runs off the end of its list, since no later
/// tuple could include that list any more.
///
/// Lists are sorted first if needed. Within each list intervals are expected to be pairwise
/// disjoint; for overlapping intervals inside one list the sweep may skip tuples.
///
/// Returns an empty result if any list is empty, and a
/// [`ExtentError::PreconditionViolation`] if there are no lists at all.
pub fn k_way_intersection<T, S>(lists: &[S]) -> Result<Vec<IntersectionTuple<T>>, ExtentError>
where
    T: Endpoint,
    S: AsRef<[Interval<T>]>,
{
    if lists.is_empty() {
        return Err(ExtentError::PreconditionViolation("k-way intersection needs at least one interval list"));
    }

    if lists.iter().any(|l| l.as_ref().is_empty()) {
        return Ok(Vec::new());
    }

    let lists: Vec<Cow<'_, [Interval<T>]>> = lists.iter()
        .map(|l| sorted_view(l.as_ref()))
        .collect();

    let mut cursors = vec![0usize; lists.len()];
    let mut tuples = Vec::new();

    loop {
        let mut max_start = lists[0][cursors[0]].start();
        let mut min_end = lists[0][cursors[0]].end();
        for (list, &cursor) in lists.iter().zip(&cursors).skip(1) {
            max_start = std::cmp::max(max_start, list[cursor].start());
            min_end = std::cmp::min(min_end, list[cursor].end());
        }

        if max_start <= min_end {
            tuples.push(lists.iter()
                .zip(&cursors)
                .map(|(list, &cursor)| list[cursor])
                .collect());
        }

        let mut exhausted = false;
        for (list, cursor) in lists.iter().zip(cursors.iter_mut()) {
            if list[*cursor].end() == min_end {
                *cursor += 1;
                exhausted |= *cursor >= list.len();
            }
        }

        if exhausted {
            trace!(?cursors, "A list ran out, stopping intersection sweep");
            break;
        }
    }

    Ok(tuples)
}
