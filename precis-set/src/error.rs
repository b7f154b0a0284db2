use std::fmt;

/// Represents any kind of error that can occur while building a set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) line: Option<u64>,
}

/// The kind of error that occurred while building a set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A line that is not blank, a comment, a codepoint or a range.
    InvalidLine(String),
    /// A codepoint greater than U+10FFFF.
    OutOfRange(u32),
    /// A range whose low end is greater than its high end.
    ReversedRange {
        /// The low end of the range, as written.
        lo: u32,
        /// The high end of the range, as written.
        hi: u32,
    },
    /// Two ranges that share at least one codepoint.
    Overlap {
        /// The range that sorts first.
        first: (u32, u32),
        /// The range that overlaps it.
        second: (u32, u32),
    },
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error { kind, line: None }
    }

    pub(crate) fn with_line(self, line: Option<u64>) -> Error {
        Error { line, ..self }
    }

    /// Return the specific kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Return the line number at which this error occurred, if available.
    ///
    /// Lines are numbered from 1. Errors raised while building a set from
    /// ranges directly carry no line number.
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Unwrap this error into its underlying kind.
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "error on line {}: ", line)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ErrorKind::InvalidLine(ref line) => {
                write!(f, "unable to parse line: {:?}", line)
            }
            ErrorKind::OutOfRange(cp) => {
                write!(f, "codepoint {:04X} is greater than 10FFFF", cp)
            }
            ErrorKind::ReversedRange { lo, hi } => {
                write!(f, "range {:04X}..{:04X} has lo > hi", lo, hi)
            }
            ErrorKind::Overlap { first, second } => write!(
                f,
                "range {:04X}..{:04X} overlaps {:04X}..{:04X}",
                first.0, first.1, second.0, second.1
            ),
        }
    }
}
