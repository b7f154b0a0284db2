/*!
Stages of the profile pipeline.

Each profile runs five stages in order: width mapping, additional mapping,
case mapping, normalization and directionality. A stage is a plain function
of the adapter and the output of the previous stage, so profiles are built
by picking functions from this module (or supplying new ones) rather than
by overriding methods.
*/

use lazy_static::lazy_static;
use regex::Regex;

use crate::adapter::UcdAdapter;
use crate::bidi;
use crate::error::Reason;
use crate::ucd::{NormalizationForm, UnicodeDatabase};

/// One stage of a profile.
///
/// A stage either maps its input to a new string or rejects it with a
/// reason covering the whole input.
pub type Stage<D> = fn(&UcdAdapter<D>, &str) -> Result<String, Reason>;

/// Leave the text as is.
pub fn identity<D: UnicodeDatabase>(
    _: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    Ok(text.to_string())
}

/// Map fullwidth and halfwidth characters to their decompositions.
pub fn width_map<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    Ok(ucd.width_map(text))
}

/// Map non-ASCII spaces to U+0020.
pub fn nonascii_space<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    Ok(ucd.map_nonascii_space_to_ascii(text))
}

/// Map non-ASCII spaces to U+0020, strip leading and trailing U+0020, then
/// collapse each interior run of U+0020 to one.
///
/// Only U+0020 is stripped (RFC 8266 §2.1). Tabs and other whitespace are
/// left in place for the string class to reject.
pub fn nickname_spaces<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    lazy_static! {
        static ref RUNS: Regex = Regex::new(r" {2,}").unwrap();
    }
    let spaced = ucd.map_nonascii_space_to_ascii(text);
    Ok(RUNS.replace_all(spaced.trim_matches(' '), " ").into_owned())
}

/// Map to lowercase with the full mappings of `Lowercase_Mapping`.
pub fn lowercase<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    Ok(ucd.lowercase(text))
}

/// Apply Unicode Default Case Folding.
pub fn case_fold<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    Ok(ucd.case_fold(text))
}

pub fn nfc<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    Ok(ucd.normalize(NormalizationForm::Nfc, text))
}

pub fn nfkc<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    Ok(ucd.normalize(NormalizationForm::Nfkc, text))
}

/// Apply the Bidi Rule, but only to text containing right-to-left
/// characters.
pub fn bidi_rule<D: UnicodeDatabase>(
    ucd: &UcdAdapter<D>,
    text: &str,
) -> Result<String, Reason> {
    if bidi::has_rtl(text, ucd) && !bidi::bidi_rule(text, ucd) {
        return Err(Reason::BidiRule);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UCD;

    #[test]
    fn nickname_space_handling() {
        assert_eq!(nickname_spaces(&UCD, " Juliet ").unwrap(), "Juliet");
        assert_eq!(
            nickname_spaces(&UCD, "\u{3000}a  \u{a0} b\u{2000}").unwrap(),
            "a b"
        );
        assert_eq!(nickname_spaces(&UCD, "    ").unwrap(), "");
        assert_eq!(nickname_spaces(&UCD, "\ta\t").unwrap(), "\ta\t");
    }

    #[test]
    fn case_mapping() {
        assert_eq!(lowercase(&UCD, "Fußball").unwrap(), "fußball");
        assert_eq!(case_fold(&UCD, "Fußball").unwrap(), "fussball");
        assert_eq!(lowercase(&UCD, "\u{03ab}").unwrap(), "\u{03cb}");
        assert_eq!(case_fold(&UCD, "\u{03ab}").unwrap(), "\u{03cb}");
    }

    #[test]
    fn normalization() {
        assert_eq!(nfc(&UCD, "E\u{301}").unwrap(), "\u{c9}");
        assert_eq!(nfkc(&UCD, "\u{03d4}").unwrap(), "\u{03ab}");
        assert_eq!(nfc(&UCD, "\u{03d4}").unwrap(), "\u{03d4}");
    }

    #[test]
    fn directionality() {
        assert_eq!(bidi_rule(&UCD, "Juliet*").unwrap(), "Juliet*");
        assert_eq!(bidi_rule(&UCD, "\u{05d0}*"), Err(Reason::BidiRule));
        assert_eq!(bidi_rule(&UCD, "\u{05d0}\u{05d1}").unwrap(), "\u{05d0}\u{05d1}");
    }

    #[test]
    fn stages_as_pointers() {
        let stages: [Stage<crate::ucd::BundledDatabase>; 3] =
            [identity, width_map, nonascii_space];
        let mut text = "\u{ff21}\u{3000}".to_string();
        for stage in stages.iter() {
            text = stage(&UCD, &text).unwrap();
        }
        assert_eq!(text, "A ");
    }
}
