/*!
The context rules of RFC 5892 Appendix A, for codepoints whose derived
property is CONTEXTJ or CONTEXTO.

Rules that look at neighboring codepoints fail when the neighbor would lie
past either end of the string. The katakana middle dot and the two digit
families look at the whole string, so every occurrence in one string
gets the same answer.
*/

use crate::adapter::UcdAdapter;
use crate::ucd::UnicodeDatabase;

/// A context rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContextRule {
    /// ZERO WIDTH NON-JOINER, U+200C.
    ZeroWidthNonJoiner,
    /// ZERO WIDTH JOINER, U+200D.
    ZeroWidthJoiner,
    /// MIDDLE DOT, U+00B7.
    MiddleDot,
    /// GREEK LOWER NUMERAL SIGN, U+0375.
    GreekKeraia,
    /// HEBREW PUNCTUATION GERESH and GERSHAYIM, U+05F3 and U+05F4.
    HebrewPunctuation,
    /// KATAKANA MIDDLE DOT, U+30FB.
    KatakanaMiddleDot,
    /// ARABIC-INDIC DIGIT ZERO through NINE.
    ArabicIndic,
    /// EXTENDED ARABIC-INDIC DIGIT ZERO through NINE.
    ExtendedArabicIndic,
}

impl ContextRule {
    /// The rule governing `cp`, if there is one.
    pub fn for_codepoint<D: UnicodeDatabase>(
        cp: u32,
        ucd: &UcdAdapter<D>,
    ) -> Option<ContextRule> {
        if ucd.is_arabic_indic(cp) {
            return Some(ContextRule::ArabicIndic);
        }
        if ucd.is_extended_arabic_indic(cp) {
            return Some(ContextRule::ExtendedArabicIndic);
        }
        match cp {
            0x200C => Some(ContextRule::ZeroWidthNonJoiner),
            0x200D => Some(ContextRule::ZeroWidthJoiner),
            0x00B7 => Some(ContextRule::MiddleDot),
            0x0375 => Some(ContextRule::GreekKeraia),
            0x05F3 | 0x05F4 => Some(ContextRule::HebrewPunctuation),
            0x30FB => Some(ContextRule::KatakanaMiddleDot),
            _ => None,
        }
    }

    /// The name reported when this rule fails.
    pub fn name(&self) -> &'static str {
        match *self {
            ContextRule::ZeroWidthNonJoiner => "zero_width_nonjoiner",
            ContextRule::ZeroWidthJoiner => "zero_width_joiner",
            ContextRule::MiddleDot => "middle_dot",
            ContextRule::GreekKeraia => "greek_keraia",
            ContextRule::HebrewPunctuation => "hebrew_punctuation",
            ContextRule::KatakanaMiddleDot => "katakana_middle_dot",
            ContextRule::ArabicIndic => "arabic_indic",
            ContextRule::ExtendedArabicIndic => "extended_arabic_indic",
        }
    }

    /// Return true if this rule accepts `text[offset]` in its context.
    pub fn holds<D: UnicodeDatabase>(
        &self,
        text: &[char],
        offset: usize,
        ucd: &UcdAdapter<D>,
    ) -> bool {
        let before = before(text, offset);
        let after = after(text, offset);
        match *self {
            ContextRule::ZeroWidthNonJoiner => {
                before.map_or(false, |cp| ucd.is_virama(cp))
                    || ucd.valid_join_type(text, offset)
            }
            ContextRule::ZeroWidthJoiner => {
                before.map_or(false, |cp| ucd.is_virama(cp))
            }
            ContextRule::MiddleDot => {
                before == Some(0x006C) && after == Some(0x006C)
            }
            ContextRule::GreekKeraia => {
                after.map_or(false, |cp| ucd.is_greek_script(cp))
            }
            ContextRule::HebrewPunctuation => {
                before.map_or(false, |cp| ucd.is_hebrew_script(cp))
            }
            ContextRule::KatakanaMiddleDot => {
                text.iter().any(|&c| ucd.is_hiragana_katakana_han(c as u32))
            }
            ContextRule::ArabicIndic => {
                !text.iter().any(|&c| ucd.is_extended_arabic_indic(c as u32))
            }
            ContextRule::ExtendedArabicIndic => {
                !text.iter().any(|&c| ucd.is_arabic_indic(c as u32))
            }
        }
    }
}

fn before(text: &[char], offset: usize) -> Option<u32> {
    if offset == 0 {
        return None;
    }
    text.get(offset - 1).map(|&c| c as u32)
}

fn after(text: &[char], offset: usize) -> Option<u32> {
    text.get(offset + 1).map(|&c| c as u32)
}

/// Apply the context rule of `text[offset]`, returning the name of the rule
/// if it fails.
///
/// # Panics
///
/// When `offset` is out of bounds, or when `text[offset]` has no context
/// rule. Only codepoints whose derived property is CONTEXTJ or CONTEXTO
/// may be checked.
pub fn context_rule_error<D: UnicodeDatabase>(
    text: &[char],
    offset: usize,
    ucd: &UcdAdapter<D>,
) -> Option<&'static str> {
    let cp = text[offset] as u32;
    let rule = match ContextRule::for_codepoint(cp, ucd) {
        Some(rule) => rule,
        None => panic!("no context rule for U+{:04X}", cp),
    };
    if rule.holds(text, offset, ucd) {
        None
    } else {
        Some(rule.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{context_rule_error, ContextRule};
    use crate::derived::{derived_property, DerivedProperty};
    use crate::UCD;

    fn holds(rule: ContextRule, text: &str, offset: usize) -> bool {
        let chars: Vec<char> = text.chars().collect();
        rule.holds(&chars, offset, &UCD)
    }

    fn error(text: &str, offset: usize) -> Option<&'static str> {
        let chars: Vec<char> = text.chars().collect();
        context_rule_error(&chars, offset, &UCD)
    }

    #[test]
    fn zero_width_nonjoiner() {
        let rule = ContextRule::ZeroWidthNonJoiner;
        assert!(holds(rule, "\u{094d}\u{200c}", 1));
        assert!(!holds(rule, "\u{a872}\u{200c}", 1));
        assert!(!holds(rule, "\u{200c}", 0));
        assert!(holds(rule, "\u{a872}\u{200c}\u{0622}", 1));
        assert!(!holds(rule, "\u{0622}\u{200c}\u{a872}", 1));
    }

    #[test]
    fn zero_width_joiner() {
        let rule = ContextRule::ZeroWidthJoiner;
        assert!(holds(rule, "\u{094d}\u{200d}", 1));
        assert!(!holds(rule, "A\u{200d}", 1));
        assert!(!holds(rule, "\u{a872}\u{200d}\u{0622}", 1));
        assert!(!holds(rule, "\u{200d}", 0));
    }

    #[test]
    fn middle_dot() {
        let rule = ContextRule::MiddleDot;
        assert!(holds(rule, "\u{006c}\u{00b7}\u{006c}", 1));
        assert!(!holds(rule, "\u{006d}\u{00b7}\u{006c}", 1));
        assert!(!holds(rule, "\u{006c}\u{00b7}\u{006d}", 1));
        assert!(!holds(rule, "\u{00b7}\u{006c}", 0));
        assert!(!holds(rule, "\u{006c}\u{00b7}", 1));
    }

    #[test]
    fn greek_keraia() {
        let rule = ContextRule::GreekKeraia;
        assert!(holds(rule, "\u{0375}\u{03ff}", 0));
        assert!(!holds(rule, "\u{0375}\u{1d25}", 0));
        assert!(!holds(rule, "\u{0375}", 0));
    }

    #[test]
    fn hebrew_punctuation() {
        let rule = ContextRule::HebrewPunctuation;
        assert!(holds(rule, "\u{0591}\u{05f3}", 1));
        assert!(holds(rule, "\u{0591}\u{05f4}", 1));
        assert!(!holds(rule, "\u{0031}\u{05f3}", 1));
        assert!(!holds(rule, "\u{0031}\u{05f4}", 1));
        assert!(!holds(rule, "\u{05f3}", 0));
    }

    #[test]
    fn katakana_middle_dot() {
        let rule = ContextRule::KatakanaMiddleDot;
        assert!(holds(rule, "\u{30fb}\u{2e99}", 0));
        assert!(holds(rule, "\u{30f0}\u{30fb}\u{0021}", 1));
        assert!(holds(rule, "\u{30fb}\u{3400}", 0));
        assert!(!holds(rule, "\u{30fb}\u{3006}", 0));
        assert!(!holds(rule, "\u{0021}\u{30fb}", 1));
        assert!(!holds(rule, "\u{30fb}", 0));
    }

    #[test]
    fn arabic_indic() {
        let rule = ContextRule::ArabicIndic;
        assert!(holds(rule, "\u{0660}\u{0661}\u{0662}\u{0669}", 0));
        assert!(!holds(rule, "\u{0660}\u{0661}\u{0662}\u{06f0}", 0));
    }

    #[test]
    fn extended_arabic_indic() {
        let rule = ContextRule::ExtendedArabicIndic;
        assert!(holds(rule, "\u{06f0}\u{06f1}\u{06f2}\u{06f9}", 0));
        assert!(!holds(rule, "\u{06f0}\u{06f1}\u{06f2}\u{0660}", 0));
    }

    #[test]
    fn whole_string_rules_agree() {
        let text = "\u{0660}\u{06f0}\u{0661}";
        assert_eq!(error(text, 0), Some("arabic_indic"));
        assert_eq!(error(text, 2), Some("arabic_indic"));
        assert_eq!(error(text, 1), Some("extended_arabic_indic"));

        let text = "\u{30fb}a\u{30fb}";
        assert_eq!(error(text, 0), error(text, 2));
    }

    #[test]
    fn rule_errors() {
        assert_eq!(error("\u{094d}\u{200c}", 1), None);
        assert_eq!(error("\u{200c}", 0), Some("zero_width_nonjoiner"));
        assert_eq!(error("\u{200d}", 0), Some("zero_width_joiner"));
        assert_eq!(error("a\u{00b7}", 1), Some("middle_dot"));
        assert_eq!(error("\u{0375}", 0), Some("greek_keraia"));
        assert_eq!(error("\u{05f4}", 0), Some("hebrew_punctuation"));
        assert_eq!(error("\u{30fb}", 0), Some("katakana_middle_dot"));
    }

    #[test]
    #[should_panic(expected = "no context rule for U+0061")]
    fn no_rule() {
        error("a", 0);
    }

    #[test]
    fn every_context_codepoint_has_a_rule() {
        for cp in 0..=0x10FFFF {
            match derived_property(cp, &UCD).0 {
                DerivedProperty::ContextJ | DerivedProperty::ContextO => {
                    assert!(
                        ContextRule::for_codepoint(cp, &UCD).is_some(),
                        "U+{:04X}",
                        cp
                    );
                }
                _ => {}
            }
        }
    }
}
