use std::io::BufRead;
use std::str::FromStr;

use itertools::Itertools;
use tracing::debug;

use crate::collection::IntervalCollection;
use crate::errors::ExtentError;
use crate::interval::{Endpoint, RawExtent};

const NULL_CELLS: [&str; 3] = ["NULL", "null", "None"];

/// A start/end column pair of the table, by position in the header.
struct ColumnPair {
    label: String,
    start: usize,
    end: usize,
}

/// Label for a start/end column pair: the shared prefix for `x_start`/`x_end`, otherwise both
/// names joined.
fn pair_label(start_col: &str, end_col: &str) -> String {
    match (start_col.strip_suffix("_start"), end_col.strip_suffix("_end")) {
        (Some(a), Some(b)) if a == b => a.to_string(),
        _ => format!("{start_col}..{end_col}"),
    }
}

fn parse_cell<T: FromStr>(cell: Option<&str>, line: usize) -> Option<T> {
    let cell = cell?.trim();
    if cell.is_empty() || NULL_CELLS.contains(&cell) {
        return None;
    }

    match cell.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(line, cell, "Unparseable endpoint, treating as missing");
            None
        }
    }
}

/// Read a delimited table with a header row.
///
/// The delimiter is a tab if the header contains one, a comma otherwise. An `id` column is
/// ignored and the remaining columns are paired up in order as start/end. Every row contributes
/// one raw extent to every pair, so empty cells, `NULL`s and short rows surface as malformed
/// records instead of disappearing.
pub fn read_table<T, R>(reader: R) -> Result<IntervalCollection<T>, ExtentError>
where
    T: Endpoint + FromStr,
    R: BufRead,
{
    let mut lines = reader.lines().enumerate();

    let Some((_, header)) = lines.next() else {
        return Ok(IntervalCollection::new());
    };
    let header = header?;
    let delimiter = if header.contains('\t') { '\t' } else { ',' };

    let columns: Vec<(usize, &str)> = header.split(delimiter)
        .map(str::trim)
        .enumerate()
        .filter(|(_, name)| !name.eq_ignore_ascii_case("id"))
        .collect();

    if columns.len() % 2 != 0 {
        return Err(ExtentError::ParseError {
            line: 1,
            message: format!("expected start/end column pairs, found {} data columns", columns.len()),
        });
    }

    let pairs: Vec<ColumnPair> = columns.iter()
        .tuples()
        .map(|((start, start_col), (end, end_col))| ColumnPair {
            label: pair_label(start_col, end_col),
            start: *start,
            end: *end,
        })
        .collect();

    let mut raw: Vec<Vec<RawExtent<T>>> = vec![Vec::new(); pairs.len()];

    for (i, row) in lines {
        let row = row?;
        if row.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = row.split(delimiter).collect();
        for (pair, extents) in pairs.iter().zip(raw.iter_mut()) {
            let start = parse_cell(cells.get(pair.start).copied(), i + 1);
            let end = parse_cell(cells.get(pair.end).copied(), i + 1);

            extents.push(match (start, end) {
                (None, None) => RawExtent::empty(),
                (start, end) => RawExtent::from_pair(start, end),
            });
        }
    }

    let mut collection = IntervalCollection::new();
    for (pair, extents) in pairs.into_iter().zip(raw) {
        collection.insert_raw(pair.label, extents);
    }

    Ok(collection)
}
