use std::fmt;

use precis_set::MAX_CODEPOINT;

use crate::adapter::UcdAdapter;
use crate::ucd::{GeneralCategory, UnicodeDatabase};

/// The value of the PRECIS derived property of a codepoint (RFC 8264 §8).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DerivedProperty {
    /// Allowed in every string class.
    PValid,
    /// Allowed in the FreeformClass only.
    FreePVal,
    /// Never allowed.
    Disallowed,
    /// Not assigned in the Unicode version in use.
    Unassigned,
    /// A join control, allowed only in some contexts.
    ContextJ,
    /// Other codepoints allowed only in some contexts.
    ContextO,
}

impl DerivedProperty {
    /// The name used for this value in the PRECIS registry, e.g. `PVALID`.
    pub fn as_str(&self) -> &'static str {
        match *self {
            DerivedProperty::PValid => "PVALID",
            DerivedProperty::FreePVal => "FREE_PVAL",
            DerivedProperty::Disallowed => "DISALLOWED",
            DerivedProperty::Unassigned => "UNASSIGNED",
            DerivedProperty::ContextJ => "CONTEXTJ",
            DerivedProperty::ContextO => "CONTEXTO",
        }
    }

    /// Parse a registry name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<DerivedProperty> {
        let all = [
            DerivedProperty::PValid,
            DerivedProperty::FreePVal,
            DerivedProperty::Disallowed,
            DerivedProperty::Unassigned,
            DerivedProperty::ContextJ,
            DerivedProperty::ContextO,
        ];
        all.iter().cloned().find(|p| p.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DerivedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use self::DerivedProperty::*;

/// RFC 5892 §2.6, sorted by codepoint.
const EXCEPTIONS: &[(u32, DerivedProperty)] = &[
    (0x00B7, ContextO), // MIDDLE DOT
    (0x00DF, PValid),   // LATIN SMALL LETTER SHARP S
    (0x0375, ContextO), // GREEK LOWER NUMERAL SIGN (KERAIA)
    (0x03C2, PValid),   // GREEK SMALL LETTER FINAL SIGMA
    (0x05F3, ContextO), // HEBREW PUNCTUATION GERESH
    (0x05F4, ContextO), // HEBREW PUNCTUATION GERSHAYIM
    (0x0640, Disallowed), // ARABIC TATWEEL
    (0x0660, ContextO),
    (0x0661, ContextO),
    (0x0662, ContextO),
    (0x0663, ContextO),
    (0x0664, ContextO),
    (0x0665, ContextO),
    (0x0666, ContextO),
    (0x0667, ContextO),
    (0x0668, ContextO),
    (0x0669, ContextO),
    (0x06F0, ContextO),
    (0x06F1, ContextO),
    (0x06F2, ContextO),
    (0x06F3, ContextO),
    (0x06F4, ContextO),
    (0x06F5, ContextO),
    (0x06F6, ContextO),
    (0x06F7, ContextO),
    (0x06F8, ContextO),
    (0x06F9, ContextO),
    (0x06FD, PValid),     // ARABIC SIGN SINDHI AMPERSAND
    (0x06FE, PValid),     // ARABIC SIGN SINDHI POSTPOSITION MEN
    (0x07FA, Disallowed), // NKO LAJANYALAN
    (0x0F0B, PValid),     // TIBETAN MARK INTERSYLLABIC TSHEG
    (0x3007, PValid),     // IDEOGRAPHIC NUMBER ZERO
    (0x302E, Disallowed), // HANGUL SINGLE DOT TONE MARK
    (0x302F, Disallowed), // HANGUL DOUBLE DOT TONE MARK
    (0x3031, Disallowed), // VERTICAL KANA REPEAT MARK
    (0x3032, Disallowed),
    (0x3033, Disallowed),
    (0x3034, Disallowed),
    (0x3035, Disallowed),
    (0x303B, Disallowed), // VERTICAL IDEOGRAPHIC ITERATION MARK
    (0x30FB, ContextO),   // KATAKANA MIDDLE DOT
];

/// RFC 8264 §9.7. Empty for every Unicode version so far.
const BACKWARD_COMPATIBLE: &[(u32, DerivedProperty)] = &[];

fn lookup(table: &[(u32, DerivedProperty)], cp: u32) -> Option<DerivedProperty> {
    table
        .binary_search_by_key(&cp, |&(k, _)| k)
        .ok()
        .map(|i| table[i].1)
}

/// Compute the derived property of `cp`, along with the name of the rule
/// that decided it.
///
/// The rules of RFC 8264 §8 are tried in order and the first that applies
/// wins. The rule name is only meant for diagnostics. Values above U+10FFFF
/// are `DISALLOWED/other`.
pub fn derived_property<D: UnicodeDatabase>(
    cp: u32,
    ucd: &UcdAdapter<D>,
) -> (DerivedProperty, &'static str) {
    use crate::ucd::GeneralCategory::*;

    if cp > MAX_CODEPOINT {
        return (Disallowed, "other");
    }
    if let Some(prop) = lookup(EXCEPTIONS, cp) {
        return (prop, "exceptions");
    }
    if let Some(prop) = lookup(BACKWARD_COMPATIBLE, cp) {
        return (prop, "backward_compatible");
    }

    let category = ucd.category(cp);
    if category == GeneralCategory::Cn && !ucd.is_noncharacter(cp) {
        (Unassigned, "unassigned")
    } else if 0x21 <= cp && cp <= 0x7E {
        (PValid, "ascii7")
    } else if cp == 0x200C || cp == 0x200D {
        (ContextJ, "join_control")
    } else if ucd.is_old_hangul_jamo(cp) {
        (Disallowed, "old_hangul_jamo")
    } else if ucd.is_default_ignorable(cp) || ucd.is_noncharacter(cp) {
        (Disallowed, "precis_ignorable_properties")
    } else if ucd.is_control(cp) {
        (Disallowed, "controls")
    } else if ucd.has_compatibility_decomposition(cp) {
        (FreePVal, "has_compat")
    } else {
        match category {
            Ll | Lu | Lo | Nd | Lm | Mn | Mc => (PValid, "letter_digits"),
            Lt | Nl | No | Me => (FreePVal, "other_letter_digits"),
            Zs => (FreePVal, "spaces"),
            Sm | Sc | Sk | So => (FreePVal, "symbols"),
            Pc | Pd | Ps | Pe | Pi | Pf | Po => (FreePVal, "punctuation"),
            _ => (Disallowed, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{derived_property, lookup, DerivedProperty, EXCEPTIONS};
    use crate::UCD;

    use super::DerivedProperty::*;

    #[test]
    fn examples() {
        assert_eq!(derived_property(0, &UCD), (Disallowed, "controls"));
        assert_eq!(
            derived_property(0x10FFFF, &UCD),
            (Disallowed, "precis_ignorable_properties")
        );
        assert_eq!(derived_property(0x30, &UCD), (PValid, "ascii7"));
        assert_eq!(derived_property(0x20, &UCD), (FreePVal, "spaces"));
        assert_eq!(
            derived_property(0xAD, &UCD),
            (Disallowed, "precis_ignorable_properties")
        );
        assert_eq!(derived_property(0x200C, &UCD), (ContextJ, "join_control"));
        assert_eq!(derived_property(0x1100, &UCD), (Disallowed, "old_hangul_jamo"));
        assert_eq!(derived_property(0x1FBF, &UCD), (FreePVal, "has_compat"));
        assert_eq!(derived_property(0xFF01, &UCD), (FreePVal, "has_compat"));
        assert_eq!(derived_property('a' as u32, &UCD).0, PValid);
        assert_eq!(derived_property(0x00E9, &UCD), (PValid, "letter_digits"));
        assert_eq!(derived_property(0x0300, &UCD), (PValid, "letter_digits"));
        assert_eq!(derived_property(0x20DD, &UCD), (FreePVal, "other_letter_digits"));
        assert_eq!(derived_property(0x2200, &UCD), (FreePVal, "symbols"));
        assert_eq!(derived_property(0x00A1, &UCD), (FreePVal, "punctuation"));
        assert_eq!(derived_property(0xE000, &UCD), (Disallowed, "other"));
        assert_eq!(derived_property(0xD800, &UCD), (Disallowed, "other"));
        assert_eq!(derived_property(0x08E2, &UCD).0, Disallowed);
        assert_eq!(derived_property(0x2FFFF, &UCD).0, Disallowed);
        assert_eq!(derived_property(0x0378, &UCD), (Unassigned, "unassigned"));
    }

    #[test]
    fn beyond_codepoints() {
        assert_eq!(derived_property(0x110000, &UCD), (Disallowed, "other"));
        assert_eq!(derived_property(u32::MAX, &UCD), (Disallowed, "other"));
    }

    #[test]
    fn exceptions() {
        assert_eq!(EXCEPTIONS.len(), 41);
        for pair in EXCEPTIONS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
        for &(cp, prop) in EXCEPTIONS {
            assert_eq!(derived_property(cp, &UCD), (prop, "exceptions"));
        }
        assert_eq!(lookup(EXCEPTIONS, 0x00DF), Some(PValid));
        assert_eq!(lookup(EXCEPTIONS, 0x0640), Some(Disallowed));
        assert_eq!(lookup(EXCEPTIONS, 0x066A), None);
    }

    #[test]
    fn names() {
        assert_eq!(FreePVal.to_string(), "FREE_PVAL");
        assert_eq!(DerivedProperty::from_name("pvalid"), Some(PValid));
        assert_eq!(DerivedProperty::from_name("CONTEXTO"), Some(ContextO));
        assert_eq!(DerivedProperty::from_name("FREEPVAL"), None);
    }

    #[test]
    fn total() {
        let mut counts = [0usize; 6];
        for cp in 0..=0x10FFFF {
            let (prop, reason) = derived_property(cp, &UCD);
            assert!(!reason.is_empty());
            counts[prop as usize] += 1;
        }
        assert_eq!(counts.iter().sum::<usize>(), 0x110000);
        assert_eq!(counts[ContextJ as usize], 2);
        // 2048 surrogates are always DISALLOWED.
        assert!(counts[Disallowed as usize] > 2048);
    }
}
