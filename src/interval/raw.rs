use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::errors::{ExtentError, MalformedReason};
use super::{Endpoint, Interval};

/// An extent as handed over by a source reader, before validation.
///
/// Sources must not silently drop partial records. Empty records, records with the wrong number
/// of endpoints and records with a null endpoint are all representable here so that validation
/// can reject them explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawExtent<T>(pub SmallVec<[Option<T>; 2]>);

impl<T> RawExtent<T> {
    pub fn empty() -> Self {
        Self(SmallVec::new())
    }

    pub fn from_pair(start: Option<T>, end: Option<T>) -> Self {
        Self(smallvec![start, end])
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl<T> Default for RawExtent<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Endpoint> RawExtent<T> {
    pub fn to_interval(&self) -> Result<Interval<T>, MalformedReason> {
        match self.0.as_slice() {
            [] => Err(MalformedReason::Empty),
            [Some(start), Some(end)] => Ok(Interval::new(*start, *end)),
            [None, _] => Err(MalformedReason::MissingEndpoint(0)),
            [_, None] => Err(MalformedReason::MissingEndpoint(1)),
            other => Err(MalformedReason::WrongArity(other.len())),
        }
    }
}

impl<T> From<(Option<T>, Option<T>)> for RawExtent<T> {
    fn from((start, end): (Option<T>, Option<T>)) -> Self {
        Self::from_pair(start, end)
    }
}

impl<T> From<(T, T)> for RawExtent<T> {
    fn from((start, end): (T, T)) -> Self {
        Self::from_pair(Some(start), Some(end))
    }
}

impl<T> FromIterator<Option<T>> for RawExtent<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whether a raw extent describes a usable interval.
pub fn validate<T: Endpoint>(raw: &RawExtent<T>) -> bool {
    raw.to_interval().is_ok()
}

/// A record that was skipped during ingestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rejected {
    /// Position of the record in its source
    pub index: usize,
    pub reason: MalformedReason,
}

impl From<Rejected> for ExtentError {
    fn from(value: Rejected) -> Self {
        ExtentError::MalformedInterval { index: value.index, reason: value.reason }
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use crate::errors::MalformedReason;
    use crate::interval::Interval;
    use super::{validate, RawExtent};

    type Raw = RawExtent<i64>;

    #[test]
    fn test_valid_pair() {
        let raw = Raw::from((1, 5));

        assert!(validate(&raw));
        assert_eq!(raw.to_interval(), Ok(Interval::new(1, 5)));
    }

    #[test]
    fn test_reversed_pair_is_not_rejected() {
        assert_eq!(Raw::from((9, 2)).to_interval(), Ok(Interval::new(9, 2)));
    }

    #[test]
    fn test_rejections() {
        assert_eq!(Raw::empty().to_interval(), Err(MalformedReason::Empty));
        assert_eq!(Raw::from((None, Some(5))).to_interval(), Err(MalformedReason::MissingEndpoint(0)));
        assert_eq!(Raw::from((Some(5), None)).to_interval(), Err(MalformedReason::MissingEndpoint(1)));
        assert_eq!(RawExtent(smallvec![Some(1)]).to_interval(), Err(MalformedReason::WrongArity(1)));
        assert_eq!(
            RawExtent(smallvec![Some(1), Some(2), Some(3)]).to_interval(),
            Err(MalformedReason::WrongArity(3))
        );

        assert!(!validate(&Raw::from((None, None))));
    }

    #[test]
    fn test_deserialize_from_json() {
        let raws: Vec<Raw> = serde_json::from_str("[[1, 5], [null, 5], [3], []]").unwrap();

        assert_eq!(raws.len(), 4);
        assert!(validate(&raws[0]));
        assert_eq!(raws[1].to_interval(), Err(MalformedReason::MissingEndpoint(0)));
        assert_eq!(raws[2].arity(), 1);
        assert_eq!(raws[3].to_interval(), Err(MalformedReason::Empty));
    }
}
