use precis_core::ucd::UnicodeDatabase;
use precis_core::{Enforcer, Reason};

use crate::args::ArgMatches;
use crate::error::Result;

pub fn command(args: ArgMatches<'_>) -> Result<()> {
    let ucd = args.adapter()?;
    let profile = args.profile(&ucd)?;
    let (start, end) = args.range()?;
    let mut wtr = args.writer();

    let found = unstable(&profile, start, end);
    for &cp in &found {
        wtr.codepoint(cp)?;
    }
    wtr.flush()?;
    if !found.is_empty() {
        return err!(
            "{} is not idempotent on {} codepoints",
            profile.name(),
            found.len()
        );
    }
    Ok(())
}

/// The codepoints in `start..=end` that, enforced alone, never settle on a
/// stable output.
///
/// Surrogates are skipped since they cannot form a string.
pub fn unstable<D: UnicodeDatabase>(
    profile: &Enforcer<'_, D>,
    start: u32,
    end: u32,
) -> Vec<u32> {
    let mut found = vec![];
    for cp in start..=end {
        let c = match std::char::from_u32(cp) {
            None => continue,
            Some(c) => c,
        };
        let text = c.encode_utf8(&mut [0; 4]).to_string();
        if let Err(err) = profile.enforce(&text) {
            if err.reason() == Reason::NotIdempotent {
                found.push(cp);
            }
        }
    }
    found
}
