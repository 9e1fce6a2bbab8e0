use num::traits::{SaturatingAdd, SaturatingSub};
use num::Zero;
use serde::Serialize;
use tracing::warn;

use crate::algebra::coverage;
use crate::errors::ExtentError;
use crate::interval::{Endpoint, Interval, IntervalSet, RawExtent, Rejected};

/// One named source of intervals: a table column pair, a document field, a spreadsheet column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source<T> {
    pub label: String,
    pub set: IntervalSet<T>,

    /// Records skipped while building `set`
    pub rejected: Vec<Rejected>,
}

/// Interval sets keyed by source label, in the order they were added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalCollection<T> {
    sources: Vec<Source<T>>,
}

impl<T: Endpoint> Default for IntervalCollection<T> {
    fn default() -> Self {
        Self { sources: Vec::new() }
    }
}

impl<T: Endpoint> IntervalCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, replacing any earlier one with the same label in place.
    pub fn insert(&mut self, label: impl Into<String>, set: IntervalSet<T>) {
        self.insert_source(Source { label: label.into(), set, rejected: Vec::new() })
    }

    /// Validate and add a source. Malformed records are dropped and reported through the
    /// returned source's `rejected` list.
    pub fn insert_raw<I>(&mut self, label: impl Into<String>, raw: I)
    where
        I: IntoIterator<Item = RawExtent<T>>,
    {
        let label = label.into();
        let (set, rejected) = IntervalSet::from_raw(raw);

        if !rejected.is_empty() {
            warn!(source = %label, skipped = rejected.len(), kept = set.len(), "Skipped malformed extents");
        }

        self.insert_source(Source { label, set, rejected })
    }

    fn insert_source(&mut self, source: Source<T>) {
        match self.sources.iter_mut().find(|s| s.label == source.label) {
            Some(existing) => *existing = source,
            None => self.sources.push(source),
        }
    }

    pub fn get(&self, label: &str) -> Option<&IntervalSet<T>> {
        self.sources.iter()
            .find(|s| s.label == label)
            .map(|s| &s.set)
    }

    pub fn require(&self, label: &str) -> Result<&IntervalSet<T>, ExtentError> {
        self.get(label)
            .ok_or_else(|| ExtentError::UnknownSource(label.to_string()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.sources.iter().map(|s| s.label.as_str())
    }

    pub fn sets(&self) -> impl Iterator<Item = &IntervalSet<T>> + '_ {
        self.sources.iter().map(|s| &s.set)
    }

    pub fn sources(&self) -> &[Source<T>] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn total_rejected(&self) -> usize {
        self.sources.iter().map(|s| s.rejected.len()).sum()
    }
}

/// Summary numbers for one source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceStats<T> {
    pub label: String,
    pub intervals: usize,
    pub rejected: usize,
    pub bounds: Option<Interval<T>>,
    pub coverage: T,
}

impl<T> IntervalCollection<T>
where
    T: Endpoint + Zero + SaturatingAdd + SaturatingSub,
{
    pub fn stats(&self) -> Vec<SourceStats<T>> {
        self.sources.iter()
            .map(|s| SourceStats {
                label: s.label.clone(),
                intervals: s.set.len(),
                rejected: s.rejected.len(),
                bounds: s.set.bounds(),
                coverage: coverage(&s.set),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ExtentError;
    use crate::interval::{Interval, IntervalSet, RawExtent};
    use super::IntervalCollection;

    type Ival = Interval<i64>;

    #[test]
    fn test_insertion_order_and_replace() {
        let mut coll = IntervalCollection::new();
        coll.insert("b", IntervalSet::from_unsorted(vec![Ival::new(1, 2)]));
        coll.insert("a", IntervalSet::from_unsorted(vec![Ival::new(3, 4)]));
        coll.insert("b", IntervalSet::from_unsorted(vec![Ival::new(5, 6)]));

        assert_eq!(coll.labels().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(coll.get("b").unwrap().as_slice(), &[Ival::new(5, 6)]);
        assert!(matches!(coll.require("c"), Err(ExtentError::UnknownSource(_))));
    }

    #[test]
    fn test_insert_raw_and_stats() {
        let mut coll = IntervalCollection::new();
        coll.insert_raw("col1", vec![
            RawExtent::from((1, 5)),
            RawExtent::from((None, Some(5))),
            RawExtent::from((3, 8)),
        ]);

        assert_eq!(coll.total_rejected(), 1);

        let stats = coll.stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].intervals, 2);
        assert_eq!(stats[0].rejected, 1);
        assert_eq!(stats[0].bounds, Some(Ival::new(1, 8)));
        assert_eq!(stats[0].coverage, 7);
    }
}
