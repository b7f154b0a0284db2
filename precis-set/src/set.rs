use std::fmt;
use std::iter::FusedIterator;
use std::slice;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, ErrorKind};

/// The largest Unicode codepoint.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// An immutable set of Unicode codepoints.
///
/// The set is stored as a flat, sorted sequence of range boundaries. The low
/// end of each inclusive range `[lo, hi]` sits at an even index and its high
/// end at the following odd index (a singleton `c` is stored as `[c, c]`).
/// Ranges never overlap or touch, which makes the boundary sequence strictly
/// increasing except within a singleton.
///
/// A codepoint is a member if a binary search for it either finds it
/// exactly, or lands on an odd index, i.e., strictly inside a range.
///
/// Two sets are equal if and only if they contain the same codepoints.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct CodepointSet {
    bounds: Vec<u32>,
}

impl CodepointSet {
    /// Build a set from a table of codepoints and codepoint ranges.
    ///
    /// Each data line is `HHHH` or `HHHH..HHHH` in hexadecimal (either
    /// case). Anything after a `#` is a comment. Blank lines are ignored.
    ///
    /// This returns an error if a line cannot be parsed, if a codepoint is
    /// greater than U+10FFFF, if a range has its ends reversed or if any two
    /// ranges overlap.
    pub fn new(table: &str) -> Result<CodepointSet, Error> {
        let mut ranges = vec![];
        for (i, line) in table.lines().enumerate() {
            let lineno = i as u64 + 1;
            if let Some((lo, hi)) =
                parse_line(line).map_err(|e| e.with_line(Some(lineno)))?
            {
                ranges.push((lo, hi, Some(lineno)));
            }
        }
        CodepointSet::build(ranges)
    }

    /// Build a set from a sequence of inclusive `(lo, hi)` ranges.
    ///
    /// The ranges may appear in any order. They are validated exactly like
    /// the ranges of a table given to [`CodepointSet::new`].
    pub fn from_ranges<I>(ranges: I) -> Result<CodepointSet, Error>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        CodepointSet::build(
            ranges.into_iter().map(|(lo, hi)| (lo, hi, None)).collect(),
        )
    }

    fn build(
        mut ranges: Vec<(u32, u32, Option<u64>)>,
    ) -> Result<CodepointSet, Error> {
        for &(lo, hi, line) in &ranges {
            check_range(lo, hi).map_err(|e| e.with_line(line))?;
        }
        ranges.sort();

        let mut bounds: Vec<u32> = Vec::with_capacity(ranges.len() * 2);
        let mut prev: Option<(u32, u32)> = None;
        for (lo, hi, line) in ranges {
            match prev {
                Some((plo, phi)) if lo <= phi => {
                    return Err(Error::new(ErrorKind::Overlap {
                        first: (plo, phi),
                        second: (lo, hi),
                    })
                    .with_line(line));
                }
                Some((plo, phi)) if lo == phi + 1 => {
                    // Adjacent to the previous range, so widen it in place.
                    let last = bounds.len() - 1;
                    bounds[last] = hi;
                    prev = Some((plo, hi));
                }
                _ => {
                    bounds.push(lo);
                    bounds.push(hi);
                    prev = Some((lo, hi));
                }
            }
        }
        Ok(CodepointSet { bounds })
    }

    /// Return true if and only if the given codepoint is in this set.
    ///
    /// Values greater than U+10FFFF are never members.
    pub fn contains(&self, cp: u32) -> bool {
        if cp > MAX_CODEPOINT {
            return false;
        }
        match self.bounds.binary_search(&cp) {
            Ok(_) => true,
            Err(i) => i % 2 == 1,
        }
    }

    /// Return the number of codepoints in this set.
    ///
    /// This walks every range, so it is meant for checking a table against
    /// its known cardinality rather than for use on a hot path.
    pub fn size(&self) -> u32 {
        self.ranges().map(|(lo, hi)| hi - lo + 1).sum()
    }

    /// Return true if and only if this set contains no codepoints.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Return an iterator over the inclusive ranges in this set, in
    /// ascending order. Adjacent ranges have already been merged.
    pub fn ranges(&self) -> Ranges<'_> {
        Ranges { it: self.bounds.chunks_exact(2) }
    }
}

/// An iterator over the ranges of a [`CodepointSet`].
///
/// This is created by [`CodepointSet::ranges`].
#[derive(Clone, Debug)]
pub struct Ranges<'a> {
    it: slice::ChunksExact<'a, u32>,
}

impl<'a> Iterator for Ranges<'a> {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        self.it.next().map(|pair| (pair[0], pair[1]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Ranges<'a> {
    fn next_back(&mut self) -> Option<(u32, u32)> {
        self.it.next_back().map(|pair| (pair[0], pair[1]))
    }
}

impl<'a> ExactSizeIterator for Ranges<'a> {}

impl<'a> FusedIterator for Ranges<'a> {}

impl FromStr for CodepointSet {
    type Err = Error;

    fn from_str(table: &str) -> Result<CodepointSet, Error> {
        CodepointSet::new(table)
    }
}

/// Writes the set back out in table form, one range per line.
impl fmt::Display for CodepointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (lo, hi)) in self.ranges().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if lo == hi {
                write!(f, "{:04X}", lo)?;
            } else {
                write!(f, "{:04X}..{:04X}", lo, hi)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CodepointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodepointSet({:?})", self.to_string())
    }
}

/// Parse one table line. Blank and comment lines yield `None`.
fn parse_line(line: &str) -> Result<Option<(u32, u32)>, Error> {
    lazy_static! {
        static ref PARTS: Regex = Regex::new(
            r"(?x)
            ^
            (?P<lo>[0-9A-Fa-f]{1,8})
            (?:\.\.(?P<hi>[0-9A-Fa-f]{1,8}))?
            $
            "
        )
        .unwrap();
    }

    let data = match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    };
    let data = data.trim();
    if data.is_empty() {
        return Ok(None);
    }
    let caps = match PARTS.captures(data) {
        Some(caps) => caps,
        None => return err!(ErrorKind::InvalidLine(line.trim().to_string())),
    };
    let lo = parse_hex(&caps["lo"])?;
    let hi = match caps.name("hi") {
        Some(m) => parse_hex(m.as_str())?,
        None => lo,
    };
    Ok(Some((lo, hi)))
}

fn parse_hex(digits: &str) -> Result<u32, Error> {
    // At most eight hex digits always fit.
    match u32::from_str_radix(digits, 16) {
        Ok(cp) => Ok(cp),
        Err(_) => err!(ErrorKind::InvalidLine(digits.to_string())),
    }
}

fn check_range(lo: u32, hi: u32) -> Result<(), Error> {
    if lo > MAX_CODEPOINT {
        return err!(ErrorKind::OutOfRange(lo));
    }
    if hi > MAX_CODEPOINT {
        return err!(ErrorKind::OutOfRange(hi));
    }
    if lo > hi {
        return err!(ErrorKind::ReversedRange { lo, hi });
    }
    Ok(())
}
