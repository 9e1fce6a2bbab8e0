use std::path::PathBuf;

use crate::io::{InputFormat, OutputFormat};
use crate::query::Query;

/// Everything one run needs, passed explicitly instead of living in globals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub input_format: InputFormat,

    /// Where to write results. `None` means stdout.
    pub output: Option<PathBuf>,
    pub output_format: OutputFormat,

    pub query: Query,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, query: Query) -> Self {
        Self {
            input: input.into(),
            input_format: InputFormat::default(),
            output: None,
            output_format: OutputFormat::default(),
            query,
        }
    }

    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.input_format = format;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>, format: OutputFormat) -> Self {
        self.output = output;
        self.output_format = format;
        self
    }
}
