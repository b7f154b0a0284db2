use std::fmt;

use crate::ucd::UnicodeVersion;

/// Why a string was rejected.
///
/// The `Display` form is the reason text surfaced to callers, e.g.
/// `DISALLOWED/has_compat` or `bidi rule`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Reason {
    /// A codepoint is not allowed by the string class. The tag is the
    /// classifier's reason, or the name of the context rule that failed.
    Disallowed(&'static str),
    /// The string is empty after mapping.
    Empty,
    /// The string contains right-to-left text and fails the Bidi Rule.
    BidiRule,
    /// Applying the profile to its own output keeps changing it.
    NotIdempotent,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Reason::Disallowed(tag) => write!(f, "DISALLOWED/{}", tag),
            Reason::Empty => write!(f, "empty"),
            Reason::BidiRule => write!(f, "bidi rule"),
            Reason::NotIdempotent => write!(f, "DISALLOWED/not_idempotent"),
        }
    }
}

/// A string rejected by a string class or a profile.
///
/// `start` and `end` are codepoint (not byte) offsets into `input`, with
/// `end` exclusive. For per-codepoint failures `input` is the string as it
/// reached the string class, i.e. after every mapping stage ran. Failures
/// that concern the whole string span all of it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("'{label}' can't enforce {input:?} in position {start}..{end}: {reason}")]
pub struct Rejection {
    label: String,
    input: String,
    start: usize,
    end: usize,
    reason: Reason,
}

impl Rejection {
    pub(crate) fn new(
        label: &str,
        input: &str,
        start: usize,
        end: usize,
        reason: Reason,
    ) -> Rejection {
        Rejection {
            label: label.to_string(),
            input: input.to_string(),
            start,
            end,
            reason,
        }
    }

    /// A rejection spanning all of `input`.
    pub(crate) fn whole(label: &str, input: &str, reason: Reason) -> Rejection {
        Rejection::new(label, input, 0, input.chars().count(), reason)
    }

    /// The name of the profile or string class that rejected the input.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The rejected string.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The codepoint offset at which the offending span starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The codepoint offset just past the offending span.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Why the input was rejected.
    pub fn reason(&self) -> Reason {
        self.reason
    }
}

/// Any error produced by this crate.
///
/// Rejections are ordinary, recoverable outcomes of enforcement. Every other
/// variant reports a bad configuration and is expected only while things
/// are being set up.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was rejected.
    #[error(transparent)]
    Rejected(#[from] Rejection),
    /// The input is not text.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The database reported a version not of the form major.minor.patch.
    #[error("unexpected Unicode version format: {0:?}")]
    Version(String),
    /// The database implements a different Unicode version than the
    /// bundled tables, and a strict adapter was requested.
    #[error(
        "Unicode tables target version {tables} but the database \
         implements version {database}"
    )]
    VersionMismatch {
        /// The version of the bundled tables.
        tables: UnicodeVersion,
        /// The version reported by the database.
        database: UnicodeVersion,
    },
    /// A bundled codepoint table failed to parse.
    #[error("invalid codepoint table '{name}': {err}")]
    Table {
        /// The name of the table.
        name: &'static str,
        /// The underlying parse error.
        #[source]
        err: precis_set::Error,
    },
    /// No profile is registered under this name.
    #[error("unknown profile: {0:?}")]
    UnknownProfile(String),
    /// The case mapping mode is not one of `none`, `lower` or `fold`.
    #[error("unknown case mapping: {0:?}")]
    UnknownCaseMapping(String),
}

impl Error {
    /// Return the rejection if this error is one.
    pub fn rejection(&self) -> Option<&Rejection> {
        match *self {
            Error::Rejected(ref rejection) => Some(rejection),
            _ => None,
        }
    }
}
