use std::io::Read;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::collection::IntervalCollection;
use crate::errors::ExtentError;
use crate::interval::{Endpoint, RawExtent};

/// One document-store style source: a label and its extents. A `null` extent stands for an
/// absent record and is kept so it can be rejected during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord<T> {
    pub label: String,
    pub extents: Vec<Option<RawExtent<T>>>,
}

pub fn read_json<T, R>(reader: R) -> Result<IntervalCollection<T>, ExtentError>
where
    T: Endpoint + DeserializeOwned,
    R: Read,
{
    let records: Vec<SourceRecord<T>> = serde_json::from_reader(reader)?;
    let mut collection = IntervalCollection::new();

    for record in records {
        let raw = record.extents.into_iter().map(Option::unwrap_or_default);
        collection.insert_raw(record.label, raw);
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use crate::interval::Interval;
    use super::read_json;

    #[test]
    fn test_read_json() {
        let input = r#"[
            {"label": "col1", "extents": [[1, 5], [null, 5], [3, 8], null]},
            {"label": "col2", "extents": [[4, 6], [7], [10, 12]]}
        ]"#;

        let coll = read_json::<i64, _>(input.as_bytes()).unwrap();

        assert_eq!(coll.labels().collect::<Vec<_>>(), vec!["col1", "col2"]);
        assert_eq!(coll.get("col1").unwrap().as_slice(), &[Interval::new(1, 5), Interval::new(3, 8)]);
        assert_eq!(coll.get("col2").unwrap().len(), 2);
        assert_eq!(coll.total_rejected(), 3);
    }

    #[test]
    fn test_read_json_syntax_error() {
        assert!(read_json::<i64, _>("[{".as_bytes()).is_err());
    }
}
