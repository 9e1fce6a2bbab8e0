//! The pipelines the engine is used for, expressed over an [`IntervalCollection`].

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info_span};

use crate::algebra::{
    fold_union, k_way_intersection, merge_adjacent, pairwise_union, partition_gap_free,
    sweep_union, IntersectionTuple, Line, UnionPairs,
};
use crate::collection::{IntervalCollection, Source};
use crate::errors::ExtentError;
use crate::interval::{Endpoint, Interval, IntervalSet, Overlap};

/// What to compute over a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// Fold union over all sources in order, then group the survivors into gap-free lines
    Union { predicate: Overlap },

    /// Synchronised k-way intersection over all sources
    Intersection,

    /// Strict containment between sources. With an anchor, the anchor source is searched
    /// against every other source; without one, every pair of sources `i < j` is searched.
    /// Reports the containment pairs if `pairs` is set, otherwise the gap-free lines of every
    /// interval taking part in a pair.
    Extend { anchor: Option<String>, pairs: bool },

    /// Symmetric union over every pair of sources, merged and grouped into gap-free lines
    FindExtend,
}

/// Containment pairs found between two sources: every `a` from `outer` strictly contains its
/// `b` from `inner`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourcePairs<T> {
    pub outer: String,
    pub inner: String,
    pub pairs: Vec<(Interval<T>, Interval<T>)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutput<T> {
    Lines(Vec<Line<T>>),
    Tuples(Vec<IntersectionTuple<T>>),
    Pairs(Vec<SourcePairs<T>>),
}

impl<T: Endpoint> QueryOutput<T> {
    /// Number of lines, tuples or pairs.
    pub fn len(&self) -> usize {
        match self {
            Self::Lines(lines) => lines.len(),
            Self::Tuples(tuples) => tuples.len(),
            Self::Pairs(groups) => groups.iter().map(|g| g.pairs.len()).sum(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lines(_) => "lines",
            Self::Tuples(_) => "tuples",
            Self::Pairs(_) => "pairs",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Query {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Union { .. } => "union",
            Self::Intersection => "intersection",
            Self::Extend { .. } => "extend",
            Self::FindExtend => "find-extend",
        }
    }

    pub fn run<T: Endpoint>(&self, collection: &IntervalCollection<T>) -> Result<QueryOutput<T>, ExtentError> {
        let span = info_span!("query", name = self.name(), sources = collection.len());
        let _enter = span.enter();

        match self {
            Self::Union { predicate } => {
                let survivors = fold_union(collection.sets().map(|s| s.as_slice()), *predicate);
                debug!(survivors = survivors.len(), "Union fold done");

                Ok(QueryOutput::Lines(partition_gap_free(&survivors)))
            },
            Self::Intersection => {
                let sets: Vec<_> = collection.sets().map(|s| s.as_slice()).collect();

                Ok(QueryOutput::Tuples(k_way_intersection(&sets)?))
            },
            Self::Extend { anchor, pairs } => {
                let groups = containment_search(collection, anchor.as_deref())?;
                debug!(sources = groups.len(), "Containment search done");

                if *pairs {
                    return Ok(QueryOutput::Pairs(groups));
                }

                let all_pairs: UnionPairs<T> = groups.into_iter()
                    .flat_map(|g| g.pairs)
                    .collect();

                Ok(QueryOutput::Lines(partition_gap_free(&all_pairs.members())))
            },
            Self::FindExtend => Ok(QueryOutput::Lines(find_extend(collection))),
        }
    }
}

fn search_pair<T: Endpoint>(outer: &str, outer_set: &IntervalSet<T>, inner: &Source<T>) -> Option<SourcePairs<T>> {
    let found = pairwise_union(outer_set.as_slice(), inner.set.as_slice(), Overlap::StrictlyContains);
    debug!(outer, inner = %inner.label, pairs = found.len(), "Containment search");

    if found.is_empty() {
        return None;
    }

    Some(SourcePairs {
        outer: outer.to_string(),
        inner: inner.label.clone(),
        pairs: found.sorted_pairs(),
    })
}

/// `A..B` search: pairs `(a, b)` where `a` strictly contains `b`, grouped by the two sources
/// they come from. Source pairs without any containment are left out.
///
/// With an `anchor`, `a` is taken from the anchor source and `b` from each other source in
/// turn. Without one, every pair of sources `i < j` (in insertion order) is searched with `a`
/// from source `i`.
pub fn containment_search<T: Endpoint>(
    collection: &IntervalCollection<T>,
    anchor: Option<&str>
) -> Result<Vec<SourcePairs<T>>, ExtentError> {
    let groups: Vec<SourcePairs<T>> = match anchor {
        Some(label) => {
            let anchor_set = collection.require(label)?;

            collection.sources().iter()
                .filter(|s| s.label != label)
                .filter_map(|inner| search_pair(label, anchor_set, inner))
                .collect()
        },
        None => collection.sources().iter()
            .tuple_combinations()
            .filter_map(|(outer, inner)| search_pair(&outer.label, &outer.set, inner))
            .collect(),
    };

    Ok(groups)
}

/// Every containment pair of [`containment_search`], deduplicated into one set.
pub fn extend_pairs<T: Endpoint>(
    collection: &IntervalCollection<T>,
    anchor: Option<&str>
) -> Result<UnionPairs<T>, ExtentError> {
    Ok(containment_search(collection, anchor)?
        .into_iter()
        .flat_map(|g| g.pairs)
        .collect())
}

/// Symmetric union over every unordered pair of sources, accumulated into one set, then
/// [`merge_adjacent`] and [`partition_gap_free`].
pub fn find_extend<T: Endpoint>(collection: &IntervalCollection<T>) -> Vec<Line<T>> {
    let sets: Vec<_> = collection.sets().collect();
    let mut united: Vec<Interval<T>> = sets.iter()
        .tuple_combinations()
        .flat_map(|(a, b)| sweep_union(a.as_slice(), b.as_slice()))
        .collect();
    united.sort_unstable();
    united.dedup();

    partition_gap_free(&merge_adjacent(&united))
}
