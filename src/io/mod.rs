//! Source readers and sink writers.
//!
//! These only move intervals in and out of the engine: readers produce [`RawExtent`]s per
//! source label (keeping malformed records so validation sees them) and writers serialise query
//! output as rows of `(start, end)`.
//!
//! [`RawExtent`]: crate::interval::RawExtent

use std::fs::{self, File};
use std::io::{stdout, BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use flate2::read::MultiGzDecoder;
use serde::de::DeserializeOwned;

use crate::collection::IntervalCollection;
use crate::errors::ExtentError;
use crate::interval::Endpoint;

pub mod json;
pub mod output;
pub mod table;

pub use output::write_output;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// A JSON array of `{"label": ..., "extents": [[start, end], ...]}` documents
    #[default]
    Json,

    /// Delimited text with a header row, columns paired up as start/end
    Table,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab separated endpoints, one interval, tuple or containment pair per row
    #[default]
    Rows,

    /// One gap-free line or intersection tuple per row, as `(s,e) (s,e)`; pairs as
    /// `outer(s,e) < inner(s,e)`
    Lines,

    /// The query output as JSON
    Json,
}

/// Open a file for reading, transparently decompressing it if the name ends in `.gz`.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, ExtentError> {
    let is_gzipped = path.file_name()
        .map(|v| v.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false);

    let file = File::open(path)
        .map_err(|source| ExtentError::FileReadError { source })?;

    let reader: Box<dyn BufRead> = if is_gzipped {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

/// Open the output destination, defaulting to stdout. Parent directories are created.
pub fn create_output(path: Option<&Path>) -> Result<Box<dyn Write>, ExtentError> {
    let writer: Box<dyn Write> = if let Some(path) = path {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?
        }

        Box::new(File::create(path)?)
    } else {
        Box::new(stdout())
    };

    Ok(writer)
}

pub fn read_collection<T>(path: &Path, format: InputFormat) -> Result<IntervalCollection<T>, ExtentError>
where
    T: Endpoint + DeserializeOwned + FromStr,
{
    let reader = open_input(path)?;

    match format {
        InputFormat::Json => json::read_json(reader),
        InputFormat::Table => table::read_table(reader),
    }
}
