//! The interval set algebra engine.
//!
//! Every operation here is a pure function over fully materialised, already validated
//! intervals: nothing is retained between calls, inputs are only read, and outputs are freshly
//! allocated. Empty input always yields an empty result.

pub mod union;
pub mod intersection;
pub mod merge;
pub mod lines;

pub use union::{fold_union, pairwise_union, sweep_union, UnionPairs};
pub use intersection::{k_way_intersection, IntersectionTuple};
pub use merge::{coalesce, coverage, merge_adjacent};
pub use lines::{partition_gap_free, Line};
