use precis_core::ucd::UnicodeDatabase;
use precis_core::{derived_property, DerivedProperty, UcdAdapter};
use precis_set::CodepointSet;

use crate::args::ArgMatches;
use crate::error::Result;

pub fn command(args: ArgMatches<'_>) -> Result<()> {
    let ucd = args.adapter()?;
    let (start, end) = args.range()?;
    let mut wtr = args.writer();
    match args.value_of("table") {
        Some(name) => {
            let prop = match DerivedProperty::from_name(name) {
                Some(prop) => prop,
                None => return err!("unrecognized derived property: {}", name),
            };
            let set = property_set(&ucd, prop, start, end)?;
            wtr.codepoint_set(prop.as_str(), ucd.version(), &set)?;
        }
        None => {
            for run in runs(&ucd, start, end) {
                wtr.property_run(run.start, run.end, run.prop, run.reason)?;
            }
        }
    }
    wtr.flush()
}

/// A maximal range of codepoints with the same derived property value and
/// reason.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Run {
    pub start: u32,
    pub end: u32,
    pub prop: DerivedProperty,
    pub reason: &'static str,
}

/// Split `start..=end` into runs of equal derived property.
pub fn runs<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    start: u32,
    end: u32,
) -> Vec<Run> {
    let mut runs: Vec<Run> = vec![];
    for cp in start..=end {
        let (prop, reason) = derived_property(cp, ucd);
        if let Some(last) = runs.last_mut() {
            if last.prop == prop && last.reason == reason {
                last.end = cp;
                continue;
            }
        }
        runs.push(Run { start: cp, end: cp, prop, reason });
    }
    runs
}

/// The codepoints in `start..=end` whose derived property is `prop`.
pub fn property_set<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    prop: DerivedProperty,
    start: u32,
    end: u32,
) -> Result<CodepointSet> {
    let ranges = runs(ucd, start, end)
        .into_iter()
        .filter(|run| run.prop == prop)
        .map(|run| (run.start, run.end));
    Ok(CodepointSet::from_ranges(ranges)?)
}

#[cfg(test)]
mod tests {
    use precis_core::{DerivedProperty, UcdAdapter};

    use super::{property_set, runs, Run};

    #[test]
    fn ascii_runs() {
        let ucd = UcdAdapter::bundled().unwrap();
        let got = runs(&ucd, 0, 0x7F);
        let want = vec![
            Run {
                start: 0x00,
                end: 0x1F,
                prop: DerivedProperty::Disallowed,
                reason: "controls",
            },
            Run {
                start: 0x20,
                end: 0x20,
                prop: DerivedProperty::FreePVal,
                reason: "spaces",
            },
            Run {
                start: 0x21,
                end: 0x7E,
                prop: DerivedProperty::PValid,
                reason: "ascii7",
            },
            Run {
                start: 0x7F,
                end: 0x7F,
                prop: DerivedProperty::Disallowed,
                reason: "controls",
            },
        ];
        assert_eq!(got, want);
    }

    #[test]
    fn runs_cover_range() {
        let ucd = UcdAdapter::bundled().unwrap();
        let got = runs(&ucd, 0x0600, 0x06FF);
        assert_eq!(got.first().unwrap().start, 0x0600);
        assert_eq!(got.last().unwrap().end, 0x06FF);
        for pair in got.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
            assert!((pair[0].prop, pair[0].reason) != (pair[1].prop, pair[1].reason));
        }
    }

    #[test]
    fn context_sets() {
        let ucd = UcdAdapter::bundled().unwrap();
        let set = property_set(&ucd, DerivedProperty::ContextJ, 0, 0x10FFFF).unwrap();
        assert_eq!(set.to_string(), "200C..200D");

        let set = property_set(&ucd, DerivedProperty::ContextO, 0, 0x0700).unwrap();
        assert_eq!(
            set.to_string(),
            "00B7\n0375\n05F3..05F4\n0660..0669\n06F0..06F9"
        );
    }
}
