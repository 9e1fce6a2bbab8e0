use super::{Endpoint, Interval};

/// Named relations between two intervals.
///
/// These are distinct questions and must not be used interchangeably:
///
/// * [`Overlap::StrictlyContains`] asks "is `b` inside `a`". Used by the extend query
///   ([`crate::query::extend_pairs`]).
/// * [`Overlap::Symmetric`] asks "do `a` and `b` share a point". Used by
///   [`crate::algebra::sweep_union`], [`crate::query::find_extend`] and by default in
///   [`crate::algebra::fold_union`].
/// * [`Overlap::Reaches`] only asks "does `b` not end before `a` starts". It is one-sided and
///   only used by [`crate::algebra::fold_union`] when explicitly requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Overlap {
    /// `a.start < b.start && a.end > b.end`
    StrictlyContains,

    /// `!(a.end < b.start || b.end < a.start)`
    #[default]
    Symmetric,

    /// `!(b.end < a.start)`
    Reaches,
}

impl Overlap {
    #[inline]
    pub fn holds<T: Endpoint>(self, a: &Interval<T>, b: &Interval<T>) -> bool {
        match self {
            Self::StrictlyContains => a.strictly_contains(b),
            Self::Symmetric => a.overlaps(b),
            Self::Reaches => a.is_reached_by(b),
        }
    }
}

/// Any binary test over intervals that can drive [`crate::algebra::pairwise_union`].
pub trait IntervalPredicate<T> {
    fn test(&self, a: &Interval<T>, b: &Interval<T>) -> bool;
}

impl<T: Endpoint> IntervalPredicate<T> for Overlap {
    #[inline]
    fn test(&self, a: &Interval<T>, b: &Interval<T>) -> bool {
        self.holds(a, b)
    }
}

impl<T, F> IntervalPredicate<T> for F
where
    F: Fn(&Interval<T>, &Interval<T>) -> bool,
{
    #[inline]
    fn test(&self, a: &Interval<T>, b: &Interval<T>) -> bool {
        self(a, b)
    }
}
