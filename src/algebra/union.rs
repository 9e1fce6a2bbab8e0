use std::cmp::Reverse;
use std::collections::BinaryHeap;

use itertools::Itertools;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::interval::{sorted_view, Endpoint, Interval, IntervalPredicate, Overlap};

/// Deduplicated collection of `(a, b)` pairs for which a predicate held.
#[derive(Clone, Debug)]
pub struct UnionPairs<T> {
    pairs: FxHashSet<(Interval<T>, Interval<T>)>,
}

impl<T: Endpoint> Default for UnionPairs<T> {
    fn default() -> Self {
        Self { pairs: FxHashSet::default() }
    }
}

impl<T: Endpoint> UnionPairs<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the pair was already present.
    pub fn insert(&mut self, a: Interval<T>, b: Interval<T>) -> bool {
        self.pairs.insert((a, b))
    }

    pub fn contains(&self, a: &Interval<T>, b: &Interval<T>) -> bool {
        self.pairs.contains(&(*a, *b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Interval<T>, Interval<T>)> + '_ {
        self.pairs.iter()
    }

    pub fn sorted_pairs(&self) -> Vec<(Interval<T>, Interval<T>)> {
        self.pairs.iter()
            .copied()
            .sorted_unstable()
            .collect()
    }

    /// Sorted, deduplicated first elements.
    pub fn firsts(&self) -> Vec<Interval<T>> {
        self.pairs.iter()
            .map(|(a, _)| *a)
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Sorted, deduplicated second elements.
    pub fn seconds(&self) -> Vec<Interval<T>> {
        self.pairs.iter()
            .map(|(_, b)| *b)
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Every interval that takes part in at least one pair, sorted and deduplicated.
    pub fn members(&self) -> Vec<Interval<T>> {
        self.pairs.iter()
            .flat_map(|(a, b)| [*a, *b])
            .sorted_unstable()
            .dedup()
            .collect()
    }
}

impl<T: Endpoint> Extend<(Interval<T>, Interval<T>)> for UnionPairs<T> {
    fn extend<I: IntoIterator<Item = (Interval<T>, Interval<T>)>>(&mut self, iter: I) {
        self.pairs.extend(iter)
    }
}

impl<T: Endpoint> FromIterator<(Interval<T>, Interval<T>)> for UnionPairs<T> {
    fn from_iter<I: IntoIterator<Item = (Interval<T>, Interval<T>)>>(iter: I) -> Self {
        Self { pairs: iter.into_iter().collect() }
    }
}

/// All pairs from `a × b` satisfying `predicate`.
///
/// Quadratic, with no early exit: most predicates are not monotonic over sorted input. This is
/// the reference that [`sweep_union`] is checked against.
pub fn pairwise_union<T, P>(a: &[Interval<T>], b: &[Interval<T>], predicate: P) -> UnionPairs<T>
where
    T: Endpoint,
    P: IntervalPredicate<T>,
{
    let mut pairs = UnionPairs::new();

    for ival_a in a {
        for ival_b in b {
            if predicate.test(ival_a, ival_b) {
                pairs.insert(*ival_a, *ival_b);
            }
        }
    }

    pairs
}

/// One input of the sweep: a cursor over its sorted intervals, plus the intervals seen so far
/// whose end has not been passed by the sweep position yet.
struct SweepSide<'a, T> {
    ivals: &'a [Interval<T>],
    pos: usize,

    /// Ends of every open interval
    open: BinaryHeap<Reverse<T>>,

    /// Open intervals that have not been written to the output yet, keyed on their end
    unrecorded: BinaryHeap<Reverse<(T, Interval<T>)>>,
}

impl<'a, T: Endpoint> SweepSide<'a, T> {
    fn new(ivals: &'a [Interval<T>]) -> Self {
        Self {
            ivals,
            pos: 0,
            open: BinaryHeap::new(),
            unrecorded: BinaryHeap::new(),
        }
    }

    fn peek(&self) -> Option<&Interval<T>> {
        self.ivals.get(self.pos)
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.ivals.len()
    }

    /// Close every interval that ends before `pos`. Sweep positions only grow, so closed
    /// intervals never reopen.
    fn close_before(&mut self, pos: T) {
        while matches!(self.open.peek(), Some(Reverse(end)) if *end < pos) {
            self.open.pop();
        }

        while matches!(self.unrecorded.peek(), Some(Reverse((end, _))) if *end < pos) {
            self.unrecorded.pop();
        }
    }

    fn push_open(&mut self, ival: Interval<T>, recorded: bool) {
        self.open.push(Reverse(ival.end()));

        if !recorded {
            self.unrecorded.push(Reverse((ival.end(), ival)));
        }
    }

    fn drain_unrecorded(&mut self, into: &mut Vec<Interval<T>>) {
        into.extend(self.unrecorded.drain().map(|Reverse((_, ival))| ival));
    }
}

/// Every interval of `a` or `b` that overlaps (see [`Overlap::Symmetric`]) at least one interval
/// of the other input. Sorted and deduplicated.
///
/// Both inputs are swept once in `(start, end)` order, advancing whichever cursor holds the
/// smaller interval. Each side keeps the intervals it has seen whose end the sweep has not passed
/// yet. A new interval overlaps exactly the open intervals of the other side, so when that set is
/// non-empty the new interval and all of them are recorded. Once one side is exhausted and none
/// of its intervals are open any more, the tail of the other side cannot overlap anything and is
/// not scanned.
///
/// Inputs are sorted first if needed. Produces the same set as
/// `pairwise_union(a, b, Overlap::Symmetric).members()` for intervals with `start <= end`.
pub fn sweep_union<T: Endpoint>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let a = sorted_view(a);
    let b = sorted_view(b);
    let mut sides = [SweepSide::new(&a), SweepSide::new(&b)];
    let mut result = Vec::new();

    loop {
        let curr_side = match (sides[0].peek(), sides[1].peek()) {
            (Some(ival_a), Some(ival_b)) => if ival_a <= ival_b { 0 } else { 1 },
            (Some(_), None) => 0,
            (None, Some(_)) => 1,
            (None, None) => break,
        };
        let other_side = 1 - curr_side;

        let ival = sides[curr_side].ivals[sides[curr_side].pos];
        sides[curr_side].pos += 1;
        sides[other_side].close_before(ival.start());

        if sides[other_side].open.is_empty() {
            if sides[other_side].is_exhausted() {
                trace!(side = curr_side, pos = sides[curr_side].pos, "Other side exhausted, stopping sweep");
                break;
            }

            sides[curr_side].push_open(ival, false);
        } else {
            result.push(ival);
            sides[other_side].drain_unrecorded(&mut result);
            sides[curr_side].push_open(ival, true);
        }
    }

    result.sort_unstable();
    result.dedup();
    result
}

/// Fold `union` over a sequence of interval lists, in order.
///
/// The accumulator starts as the first list and is replaced by the members of
/// `union(accumulator, next)` at every step, so an interval survives only while it keeps
/// overlapping the next list. Symmetric folds use [`sweep_union`], the other predicates use
/// [`pairwise_union`].
pub fn fold_union<'a, T, I>(lists: I, predicate: Overlap) -> Vec<Interval<T>>
where
    T: Endpoint + 'a,
    I: IntoIterator<Item = &'a [Interval<T>]>,
{
    let mut lists = lists.into_iter();
    let Some(first) = lists.next() else {
        return Vec::new();
    };

    let mut acc: Vec<Interval<T>> = first.iter()
        .copied()
        .sorted_unstable()
        .dedup()
        .collect();

    for next in lists {
        acc = match predicate {
            Overlap::Symmetric => sweep_union(&acc, next),
            other => pairwise_union(&acc, next, other).members(),
        };
    }

    acc
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::interval::{Interval, Overlap};
    use super::{fold_union, pairwise_union, sweep_union, UnionPairs};

    type Ival = Interval<i64>;

    fn ivals(pairs: &[(i64, i64)]) -> Vec<Ival> {
        pairs.iter().map(|&p| Ival::from(p)).collect()
    }

    fn random_sorted(rng: &mut StdRng, max_len: usize) -> Vec<Ival> {
        let n = rng.gen_range(0..=max_len);
        let mut out: Vec<_> = (0..n)
            .map(|_| {
                let start = rng.gen_range(0..100);
                Ival::new(start, start + rng.gen_range(0..15))
            })
            .collect();
        out.sort();

        out
    }

    #[test]
    fn test_pairwise_union_symmetric() {
        let a = ivals(&[(1, 5), (10, 12)]);
        let b = ivals(&[(4, 6), (13, 20)]);

        let pairs = pairwise_union(&a, &b, Overlap::Symmetric);

        assert_eq!(pairs.sorted_pairs(), vec![(Ival::new(1, 5), Ival::new(4, 6))]);
        assert_eq!(pairs.members(), ivals(&[(1, 5), (4, 6)]));
    }

    #[test]
    fn test_pairwise_union_containment_is_directional() {
        let a = ivals(&[(1, 10), (20, 30)]);
        let b = ivals(&[(2, 3), (4, 12), (21, 29)]);

        let pairs = pairwise_union(&a, &b, Overlap::StrictlyContains);
        assert_eq!(pairs.sorted_pairs(), vec![
            (Ival::new(1, 10), Ival::new(2, 3)),
            (Ival::new(20, 30), Ival::new(21, 29)),
        ]);
        assert_eq!(pairs.firsts(), ivals(&[(1, 10), (20, 30)]));
        assert_eq!(pairs.seconds(), ivals(&[(2, 3), (21, 29)]));

        let reversed = pairwise_union(&b, &a, Overlap::StrictlyContains);
        assert!(reversed.is_empty());
    }

    #[test]
    fn test_pairwise_union_deduplicates() {
        let a = ivals(&[(1, 5), (1, 5)]);
        let b = ivals(&[(2, 3)]);

        let pairs = pairwise_union(&a, &b, Overlap::Symmetric);
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&Ival::new(1, 5), &Ival::new(2, 3)));
    }

    #[test]
    fn test_sweep_union_simple() {
        let a = ivals(&[(1, 3), (5, 8), (20, 25)]);
        let b = ivals(&[(2, 4), (9, 10), (24, 30)]);

        assert_eq!(sweep_union(&a, &b), ivals(&[(1, 3), (2, 4), (20, 25), (24, 30)]));
    }

    #[test]
    fn test_sweep_union_long_interval_spans_many() {
        // A single long interval on one side overlaps several on the other, and a nested
        // interval that starts later still has to be found.
        let a = ivals(&[(1, 10), (2, 8)]);
        let b = ivals(&[(2, 3), (4, 5), (7, 7), (12, 14)]);

        assert_eq!(sweep_union(&a, &b), ivals(&[(1, 10), (2, 3), (2, 8), (4, 5), (7, 7)]));
    }

    #[test]
    fn test_sweep_union_unsorted_input() {
        let a = ivals(&[(20, 25), (1, 3)]);
        let b = ivals(&[(24, 30), (2, 4)]);

        assert_eq!(sweep_union(&a, &b), ivals(&[(1, 3), (2, 4), (20, 25), (24, 30)]));
    }

    #[test]
    fn test_sweep_union_empty() {
        let a = ivals(&[(1, 3)]);

        assert!(sweep_union(&a, &[]).is_empty());
        assert!(sweep_union(&[], &a).is_empty());
        assert!(sweep_union::<i64>(&[], &[]).is_empty());
    }

    #[test]
    fn test_sweep_matches_pairwise() {
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..500 {
            let a = random_sorted(&mut rng, 25);
            let b = random_sorted(&mut rng, 25);

            let reference = pairwise_union(&a, &b, Overlap::Symmetric).members();
            assert_eq!(sweep_union(&a, &b), reference, "a = {a:?}, b = {b:?}");
        }
    }

    #[test]
    fn test_fold_union_drops_non_overlapping() {
        let l1 = ivals(&[(1, 5), (10, 12), (30, 31)]);
        let l2 = ivals(&[(4, 6), (11, 11)]);
        let l3 = ivals(&[(5, 5)]);

        let folded = fold_union([l1.as_slice(), l2.as_slice(), l3.as_slice()], Overlap::Symmetric);

        // After l2: (1,5) (4,6) (10,12) (11,11). Only (1,5) and (4,6) reach 5, plus (5,5) itself.
        assert_eq!(folded, ivals(&[(1, 5), (4, 6), (5, 5)]));
    }

    #[test]
    fn test_fold_union_reaches_is_one_sided() {
        let l1 = ivals(&[(5, 8)]);
        let l2 = ivals(&[(1, 2), (20, 30)]);

        let folded = fold_union([l1.as_slice(), l2.as_slice()], Overlap::Reaches);
        assert_eq!(folded, ivals(&[(5, 8), (20, 30)]));

        let symmetric = fold_union([l1.as_slice(), l2.as_slice()], Overlap::Symmetric);
        assert!(symmetric.is_empty());
    }

    #[test]
    fn test_fold_union_single_and_none() {
        let l1 = ivals(&[(3, 4), (1, 2), (3, 4)]);

        assert_eq!(fold_union([l1.as_slice()], Overlap::Symmetric), ivals(&[(1, 2), (3, 4)]));
        assert!(fold_union(std::iter::empty::<&[Ival]>(), Overlap::Symmetric).is_empty());
    }

    #[test]
    fn test_union_pairs_from_iter() {
        let pairs: UnionPairs<i64> = vec![
            (Ival::new(1, 2), Ival::new(2, 3)),
            (Ival::new(1, 2), Ival::new(2, 3)),
        ].into_iter().collect();

        assert_eq!(pairs.len(), 1);
    }
}
