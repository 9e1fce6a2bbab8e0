use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// Why a raw extent could not be turned into an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The record had no endpoints at all
    Empty,

    /// The record did not have exactly two endpoints
    WrongArity(usize),

    /// The endpoint at the given position (0 = start, 1 = end) was null
    MissingEndpoint(usize),
}

impl Display for MalformedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Empty => write!(f, "empty record"),
            Self::WrongArity(n) => write!(f, "expected 2 endpoints, found {n}"),
            Self::MissingEndpoint(0) => write!(f, "missing start endpoint"),
            Self::MissingEndpoint(_) => write!(f, "missing end endpoint"),
        }
    }
}

#[derive(Debug)]
pub enum ExtentError {
    /// A record from a source could not be turned into an interval. Operations skip these,
    /// this variant only travels as far as the validation diagnostics.
    MalformedInterval { index: usize, reason: MalformedReason },

    /// The caller broke an operation's contract, e.g. intersecting zero lists
    PreconditionViolation(&'static str),

    /// A query referred to a source label that is not in the collection
    UnknownSource(String),

    /// An input file could not be parsed
    ParseError { line: usize, message: String },

    /// Error variant when we couldn't read from a file
    FileReadError { source: io::Error },

    /// Error variant when we could not (de)serialize JSON
    SerializationError { source: serde_json::Error },

    /// Other IO errors
    IOError(io::Error),
}

impl Error for ExtentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::FileReadError { ref source } => Some(source),
            Self::SerializationError { ref source } => Some(source),
            Self::IOError(ref source) => Some(source),
            _ => None
        }
    }
}

impl From<io::Error> for ExtentError {
    fn from(value: io::Error) -> Self {
        Self::IOError(value)
    }
}

impl From<serde_json::Error> for ExtentError {
    fn from(value: serde_json::Error) -> Self {
        Self::SerializationError {
            source: value
        }
    }
}

impl Display for ExtentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::MalformedInterval { index, reason } =>
                write!(f, "Malformed interval at record {index}: {reason}"),
            Self::PreconditionViolation(what) =>
                write!(f, "Precondition violated: {what}"),
            Self::UnknownSource(ref label) =>
                write!(f, "No interval source named '{label}'"),
            Self::ParseError { line, ref message } =>
                write!(f, "Could not parse input at line {line}: {message}"),
            Self::FileReadError { source: _ } =>
                write!(f, "Could not read from file!"),
            Self::SerializationError { source: _ } =>
                write!(f, "Could not (de)serialize JSON data!"),
            Self::IOError(ref err) =>
                err.fmt(f),
        }
    }
}
