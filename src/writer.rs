use std::env;
use std::io::{self, Write};

use precis_core::ucd::UnicodeVersion;
use precis_core::DerivedProperty;
use precis_set::CodepointSet;

use crate::error::Result;

/// A writer of command output.
///
/// Everything is written line by line. Codepoint tables are preceded by a
/// header of `#` comments recording the command that produced them, so the
/// output remains a valid table.
pub struct Writer<W: io::Write> {
    wtr: io::BufWriter<W>,
    escape: bool,
    wrote_header: bool,
}

impl<W: io::Write> Writer<W> {
    pub fn new(wtr: W) -> Writer<W> {
        Writer { wtr: io::BufWriter::new(wtr), escape: false, wrote_header: false }
    }

    /// When enabled, every codepoint of a string outside of printable ASCII
    /// is written as a `\u{..}` escape.
    pub fn escape(&mut self, yes: bool) -> &mut Writer<W> {
        self.escape = yes;
        self
    }

    /// Write one string on its own line.
    pub fn string(&mut self, text: &str) -> Result<()> {
        if self.escape {
            writeln!(self.wtr, "{}", escape(text))?;
        } else {
            writeln!(self.wtr, "{}", text)?;
        }
        Ok(())
    }

    /// Write a run of codepoints sharing one derived property value and
    /// reason.
    pub fn property_run(
        &mut self,
        start: u32,
        end: u32,
        prop: DerivedProperty,
        reason: &str,
    ) -> Result<()> {
        writeln!(self.wtr, "{:04X}-{:04X} {}/{}", start, end, prop, reason)?;
        Ok(())
    }

    /// Write a single codepoint, along with the string it forms.
    pub fn codepoint(&mut self, cp: u32) -> Result<()> {
        match std::char::from_u32(cp) {
            Some(c) => {
                writeln!(self.wtr, "U+{:04X} {}", cp, escape(c.encode_utf8(&mut [0; 4])))?
            }
            None => writeln!(self.wtr, "U+{:04X}", cp)?,
        }
        Ok(())
    }

    /// Write a codepoint set as a table, labeled with the name of the set and
    /// the Unicode version it was computed with.
    pub fn codepoint_set(
        &mut self,
        name: &str,
        version: UnicodeVersion,
        set: &CodepointSet,
    ) -> Result<()> {
        self.header()?;
        writeln!(self.wtr, "# Unicode {}", version)?;
        writeln!(self.wtr, "# {}", name)?;
        writeln!(self.wtr, "# Codepoints: {}", set.size())?;
        writeln!(self.wtr)?;
        if !set.is_empty() {
            writeln!(self.wtr, "{}", set)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }

    fn header(&mut self) -> Result<()> {
        if self.wrote_header {
            return Ok(());
        }
        self.wrote_header = true;
        let mut argv = vec!["precis".to_string()];
        for arg in env::args_os().skip(1) {
            let x = arg.to_string_lossy();
            if x.contains('\n') {
                argv.push("[snip (arg too long)]".to_string());
            } else {
                argv.push(x.into_owned());
            }
        }
        writeln!(self.wtr, "# DO NOT EDIT THIS FILE. IT WAS AUTOMATICALLY GENERATED BY:")?;
        writeln!(self.wtr, "#")?;
        writeln!(self.wtr, "#  {}", argv.join(" "))?;
        writeln!(self.wtr, "#")?;
        Ok(())
    }
}

/// Escape everything outside of printable ASCII, and backslashes, as
/// `\u{..}`.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ' '..='~' => escaped.push(c),
            _ => escaped.push_str(&format!("\\u{{{:x}}}", c as u32)),
        }
    }
    escaped
}
