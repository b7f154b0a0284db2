use std::io;
use std::ops;

use precis_core::ucd::BundledDatabase;
use precis_core::{get_profile, Enforcer, UcdAdapter};
use precis_set::MAX_CODEPOINT;

use crate::error::Result;
use crate::writer::Writer;

/// Wraps clap matches and provides convenient accessors to various parameters.
pub struct ArgMatches<'a>(&'a clap::ArgMatches<'a>);

impl<'a> ops::Deref for ArgMatches<'a> {
    type Target = clap::ArgMatches<'a>;
    fn deref(&self) -> &clap::ArgMatches<'a> {
        &self.0
    }
}

impl<'a> ArgMatches<'a> {
    pub fn new(matches: &'a clap::ArgMatches<'a>) -> ArgMatches<'a> {
        ArgMatches(matches)
    }

    /// Build the Unicode adapter, honoring `--strict-version`.
    pub fn adapter(&self) -> Result<UcdAdapter<BundledDatabase>> {
        if self.is_present("strict-version") {
            Ok(UcdAdapter::strict(BundledDatabase)?)
        } else {
            Ok(UcdAdapter::bundled()?)
        }
    }

    /// Look up the profile named by the `profile` argument.
    pub fn profile<'u>(
        &self,
        ucd: &'u UcdAdapter<BundledDatabase>,
    ) -> Result<Enforcer<'u, BundledDatabase>> {
        let name = match self.value_of("profile") {
            Some(name) => name,
            None => return err!("missing profile name"),
        };
        Ok(get_profile(name, ucd)?)
    }

    /// The inclusive codepoint range given by `--start` and `--end`.
    pub fn range(&self) -> Result<(u32, u32)> {
        let start = self.codepoint("start")?.unwrap_or(0);
        let end = self.codepoint("end")?.unwrap_or(MAX_CODEPOINT);
        if start > end {
            return err!(
                "--start U+{:04X} is greater than --end U+{:04X}",
                start,
                end
            );
        }
        Ok((start, end))
    }

    fn codepoint(&self, name: &str) -> Result<Option<u32>> {
        let hex = match self.value_of(name) {
            None => return Ok(None),
            Some(hex) => hex,
        };
        let digits = hex.trim_start_matches("U+").trim_start_matches("u+");
        match u32::from_str_radix(digits, 16) {
            Ok(cp) if cp <= MAX_CODEPOINT => Ok(Some(cp)),
            Ok(cp) => err!("--{} U+{:X} is not a codepoint", name, cp),
            Err(err) => err!("--{} {:?} is not hexadecimal: {}", name, hex, err),
        }
    }

    /// A writer to stdout, honoring `--escape`.
    pub fn writer(&self) -> Writer<io::Stdout> {
        let mut wtr = Writer::new(io::stdout());
        wtr.escape(self.is_present("escape"));
        wtr
    }
}
