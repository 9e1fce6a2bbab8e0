use std::fmt::{self, Display};
use std::ops::Deref;

use serde::Serialize;

use crate::interval::{Endpoint, Interval};

/// A gap-free line: intervals in visiting order where each one starts no later than the
/// previous one ends. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Line<T> {
    intervals: Vec<Interval<T>>,
}

impl<T: Endpoint> Line<T> {
    fn start_with(ival: Interval<T>) -> Self {
        Self { intervals: vec![ival] }
    }

    /// Whether `ival` continues this line without a gap.
    #[inline]
    fn accepts(&self, ival: &Interval<T>) -> bool {
        self.intervals.last()
            .is_some_and(|last| ival.start() <= last.end())
    }

    /// From the first start to the largest end.
    pub fn span(&self) -> Interval<T> {
        let first = self.intervals[0];
        let max_end = self.intervals.iter()
            .map(|ival| ival.end())
            .fold(first.end(), std::cmp::max);

        Interval::new(first.start(), max_end)
    }

    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.intervals
    }

    pub fn into_vec(self) -> Vec<Interval<T>> {
        self.intervals
    }
}

impl<T> Deref for Line<T> {
    type Target = [Interval<T>];

    fn deref(&self) -> &Self::Target {
        &self.intervals
    }
}

impl<T: Display> Display for Line<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ival) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }

            write!(f, "{ival}")?;
        }

        Ok(())
    }
}

/// Greedily group intervals into gap-free lines in a single pass.
///
/// An interval joins the current line if it starts no later than the line's last interval
/// ends; otherwise it opens a new line. The input order is kept as is, so it should already be
/// sorted by `(start, end)`.
pub fn partition_gap_free<T: Endpoint>(intervals: &[Interval<T>]) -> Vec<Line<T>> {
    let mut lines = Vec::new();
    let mut curr_line: Option<Line<T>> = None;

    for ival in intervals {
        match curr_line {
            Some(ref mut line) if line.accepts(ival) => line.intervals.push(*ival),
            _ => {
                if let Some(done) = curr_line.replace(Line::start_with(*ival)) {
                    lines.push(done);
                }
            }
        }
    }

    lines.extend(curr_line);
    lines
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::interval::Interval;
    use super::partition_gap_free;

    type Ival = Interval<i64>;

    fn ivals(pairs: &[(i64, i64)]) -> Vec<Ival> {
        pairs.iter().map(|&p| Ival::from(p)).collect()
    }

    #[test]
    fn test_partition() {
        let lines = partition_gap_free(&ivals(&[(1, 5), (3, 8), (10, 12)]));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_slice(), ivals(&[(1, 5), (3, 8)]).as_slice());
        assert_eq!(lines[1].as_slice(), ivals(&[(10, 12)]).as_slice());
        assert_eq!(lines[0].span(), Ival::new(1, 8));
    }

    #[test]
    fn test_compares_with_last_interval_only() {
        // (2,3) ends before (5,6) starts, even though (1,10) would have covered it
        let lines = partition_gap_free(&ivals(&[(1, 10), (2, 3), (5, 6)]));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].span(), Ival::new(1, 10));
        assert_eq!(lines[1].as_slice(), &[Ival::new(5, 6)]);
    }

    #[test]
    fn test_touching_intervals_share_a_line() {
        let lines = partition_gap_free(&ivals(&[(1, 5), (5, 6), (7, 7)]));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let input = ivals(&[(1, 5), (2, 2), (3, 8), (9, 9), (9, 12), (20, 30), (31, 31)]);
        let lines = partition_gap_free(&input);

        let mut flattened: Vec<Ival> = lines.iter()
            .flat_map(|line| line.iter().copied())
            .collect();
        flattened.sort();

        assert_eq!(partition_gap_free(&flattened), lines);
    }

    #[test]
    fn test_idempotent_random() {
        let mut rng = StdRng::seed_from_u64(4321);

        for _ in 0..500 {
            let n = rng.gen_range(0..40);
            let mut input: Vec<Ival> = (0..n)
                .map(|_| {
                    let start = rng.gen_range(0..200);
                    Ival::new(start, start + rng.gen_range(0..20))
                })
                .collect();
            input.sort();

            let lines = partition_gap_free(&input);
            let mut flattened: Vec<Ival> = lines.iter()
                .flat_map(|line| line.iter().copied())
                .collect();
            assert_eq!(flattened, input);

            for pair in lines.windows(2) {
                let prev_last = pair[0].as_slice()[pair[0].len() - 1];
                assert!(pair[1].as_slice()[0].start() > prev_last.end(), "input = {input:?}");
            }

            flattened.sort();
            assert_eq!(partition_gap_free(&flattened), lines, "input = {input:?}");
        }
    }

    #[test]
    fn test_display() {
        let lines = partition_gap_free(&ivals(&[(1, 5), (3, 8)]));

        assert_eq!(lines[0].to_string(), "(1,5) (3,8)");
    }

    #[test]
    fn test_empty() {
        assert!(partition_gap_free::<i64>(&[]).is_empty());
    }
}
