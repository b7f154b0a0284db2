/*!
The interface to the Unicode character database consumed by this crate, and
a bundled implementation of it.

Everything PRECIS needs from the UCD beyond the static tables in
[`tables`](crate::tables) goes through [`UnicodeDatabase`]: general category,
canonical combining class, bidirectional class, normalization, case
mapping and the version of Unicode the database implements. All of them must
describe that one version.
*/

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

pub use unicode_bidi::BidiClass;

/// A Unicode version, as major.minor.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UnicodeVersion {
    /// The major version.
    pub major: u32,
    /// The minor version.
    pub minor: u32,
}

impl UnicodeVersion {
    /// Parse a version of the form `major.minor.patch`, dropping the patch
    /// level.
    pub fn parse(version: &str) -> Result<UnicodeVersion, Error> {
        lazy_static! {
            static ref VERSION: Regex =
                Regex::new(r"^([0-9]+)\.([0-9]+)\.[0-9]+$").unwrap();
        }
        let caps = match VERSION.captures(version) {
            Some(caps) => caps,
            None => return Err(Error::Version(version.to_string())),
        };
        let number = |i: usize| {
            caps[i].parse::<u32>().map_err(|_| Error::Version(version.to_string()))
        };
        Ok(UnicodeVersion { major: number(1)?, minor: number(2)? })
    }
}

impl fmt::Display for UnicodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A General_Category value, named by its short alias.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GeneralCategory {
    Lu,
    Ll,
    Lt,
    Lm,
    Lo,
    Mn,
    Mc,
    Me,
    Nd,
    Nl,
    No,
    Pc,
    Pd,
    Ps,
    Pe,
    Pi,
    Pf,
    Po,
    Sm,
    Sc,
    Sk,
    So,
    Zs,
    Zl,
    Zp,
    Cc,
    Cf,
    Cs,
    Co,
    Cn,
}

impl GeneralCategory {
    /// The short alias of this category, e.g. `"Lu"`.
    pub fn as_str(&self) -> &'static str {
        use self::GeneralCategory::*;

        match *self {
            Lu => "Lu",
            Ll => "Ll",
            Lt => "Lt",
            Lm => "Lm",
            Lo => "Lo",
            Mn => "Mn",
            Mc => "Mc",
            Me => "Me",
            Nd => "Nd",
            Nl => "Nl",
            No => "No",
            Pc => "Pc",
            Pd => "Pd",
            Ps => "Ps",
            Pe => "Pe",
            Pi => "Pi",
            Pf => "Pf",
            Po => "Po",
            Sm => "Sm",
            Sc => "Sc",
            Sk => "Sk",
            So => "So",
            Zs => "Zs",
            Zl => "Zl",
            Zp => "Zp",
            Cc => "Cc",
            Cf => "Cf",
            Cs => "Cs",
            Co => "Co",
            Cn => "Cn",
        }
    }
}

impl fmt::Display for GeneralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Unicode normalization form.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NormalizationForm {
    /// Canonical decomposition followed by canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
    /// Compatibility decomposition followed by canonical composition.
    Nfkc,
    /// Compatibility decomposition.
    Nfkd,
}

/// Per-codepoint queries against a Unicode character database.
///
/// Codepoints are plain `u32` values so that every value in
/// `[0, 0x10FFFF]`, surrogates included, can be asked about. Implementations
/// must answer for all of them.
///
/// Nothing here is required to be thread safe. An adapter built on a
/// database is `Send` or `Sync` exactly when the database is.
pub trait UnicodeDatabase {
    /// The General_Category of `cp`.
    fn category(&self, cp: u32) -> GeneralCategory;

    /// The Canonical_Combining_Class of `cp`.
    fn combining_class(&self, cp: u32) -> u8;

    /// The Bidi_Class of `cp`.
    fn bidi_class(&self, cp: u32) -> BidiClass;

    /// Normalize `text` to the given form.
    fn normalize(&self, form: NormalizationForm, text: &str) -> String;

    /// Map `text` with the full, language-independent Lowercase_Mapping.
    fn lowercase(&self, text: &str) -> String;

    /// Apply full Default Case Folding to `text`.
    fn case_fold(&self, text: &str) -> String;

    /// The Unicode version implemented, as `major.minor.patch`.
    fn version(&self) -> String;
}

impl<'a, D: UnicodeDatabase + ?Sized> UnicodeDatabase for &'a D {
    fn category(&self, cp: u32) -> GeneralCategory {
        (**self).category(cp)
    }

    fn combining_class(&self, cp: u32) -> u8 {
        (**self).combining_class(cp)
    }

    fn bidi_class(&self, cp: u32) -> BidiClass {
        (**self).bidi_class(cp)
    }

    fn normalize(&self, form: NormalizationForm, text: &str) -> String {
        (**self).normalize(form, text)
    }

    fn lowercase(&self, text: &str) -> String {
        (**self).lowercase(text)
    }

    fn case_fold(&self, text: &str) -> String {
        (**self).case_fold(text)
    }

    fn version(&self) -> String {
        (**self).version()
    }
}

/// The Unicode version of the ICU4X 1.5 compiled data.
const ICU4X_UNICODE_VERSION: &str = "15.1.0";

/// A database compiled into the binary.
///
/// Every answer comes from the compiled data of a single ICU4X release, so
/// properties, normalization and case mappings agree on one Unicode version.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledDatabase;

impl UnicodeDatabase for BundledDatabase {
    fn category(&self, cp: u32) -> GeneralCategory {
        use icu_properties::GeneralCategory as G;

        #[allow(unreachable_patterns)]
        match icu_properties::maps::general_category().get32(cp) {
            G::UppercaseLetter => GeneralCategory::Lu,
            G::LowercaseLetter => GeneralCategory::Ll,
            G::TitlecaseLetter => GeneralCategory::Lt,
            G::ModifierLetter => GeneralCategory::Lm,
            G::OtherLetter => GeneralCategory::Lo,
            G::NonspacingMark => GeneralCategory::Mn,
            G::SpacingMark => GeneralCategory::Mc,
            G::EnclosingMark => GeneralCategory::Me,
            G::DecimalNumber => GeneralCategory::Nd,
            G::LetterNumber => GeneralCategory::Nl,
            G::OtherNumber => GeneralCategory::No,
            G::ConnectorPunctuation => GeneralCategory::Pc,
            G::DashPunctuation => GeneralCategory::Pd,
            G::OpenPunctuation => GeneralCategory::Ps,
            G::ClosePunctuation => GeneralCategory::Pe,
            G::InitialPunctuation => GeneralCategory::Pi,
            G::FinalPunctuation => GeneralCategory::Pf,
            G::OtherPunctuation => GeneralCategory::Po,
            G::MathSymbol => GeneralCategory::Sm,
            G::CurrencySymbol => GeneralCategory::Sc,
            G::ModifierSymbol => GeneralCategory::Sk,
            G::OtherSymbol => GeneralCategory::So,
            G::SpaceSeparator => GeneralCategory::Zs,
            G::LineSeparator => GeneralCategory::Zl,
            G::ParagraphSeparator => GeneralCategory::Zp,
            G::Control => GeneralCategory::Cc,
            G::Format => GeneralCategory::Cf,
            G::Surrogate => GeneralCategory::Cs,
            G::PrivateUse => GeneralCategory::Co,
            G::Unassigned => GeneralCategory::Cn,
            _ => GeneralCategory::Cn,
        }
    }

    fn combining_class(&self, cp: u32) -> u8 {
        icu_properties::maps::canonical_combining_class().get32(cp).0
    }

    fn bidi_class(&self, cp: u32) -> BidiClass {
        use icu_properties::BidiClass as B;

        if std::char::from_u32(cp).is_none() {
            return BidiClass::L;
        }
        match icu_properties::maps::bidi_class().get32(cp) {
            B::LeftToRight => BidiClass::L,
            B::RightToLeft => BidiClass::R,
            B::ArabicLetter => BidiClass::AL,
            B::EuropeanNumber => BidiClass::EN,
            B::EuropeanSeparator => BidiClass::ES,
            B::EuropeanTerminator => BidiClass::ET,
            B::ArabicNumber => BidiClass::AN,
            B::CommonSeparator => BidiClass::CS,
            B::NonspacingMark => BidiClass::NSM,
            B::BoundaryNeutral => BidiClass::BN,
            B::ParagraphSeparator => BidiClass::B,
            B::SegmentSeparator => BidiClass::S,
            B::WhiteSpace => BidiClass::WS,
            B::OtherNeutral => BidiClass::ON,
            B::LeftToRightEmbedding => BidiClass::LRE,
            B::LeftToRightOverride => BidiClass::LRO,
            B::RightToLeftEmbedding => BidiClass::RLE,
            B::RightToLeftOverride => BidiClass::RLO,
            B::PopDirectionalFormat => BidiClass::PDF,
            B::LeftToRightIsolate => BidiClass::LRI,
            B::RightToLeftIsolate => BidiClass::RLI,
            B::FirstStrongIsolate => BidiClass::FSI,
            B::PopDirectionalIsolate => BidiClass::PDI,
            _ => BidiClass::L,
        }
    }

    fn normalize(&self, form: NormalizationForm, text: &str) -> String {
        use icu_normalizer::{ComposingNormalizer, DecomposingNormalizer};

        match form {
            NormalizationForm::Nfc => ComposingNormalizer::new_nfc().normalize(text),
            NormalizationForm::Nfd => {
                DecomposingNormalizer::new_nfd().normalize(text)
            }
            NormalizationForm::Nfkc => {
                ComposingNormalizer::new_nfkc().normalize(text)
            }
            NormalizationForm::Nfkd => {
                DecomposingNormalizer::new_nfkd().normalize(text)
            }
        }
    }

    fn lowercase(&self, text: &str) -> String {
        icu_casemap::CaseMapper::new()
            .lowercase_to_string(text, &icu_locid::LanguageIdentifier::UND)
    }

    fn case_fold(&self, text: &str) -> String {
        icu_casemap::CaseMapper::new().fold_string(text)
    }

    fn version(&self) -> String {
        ICU4X_UNICODE_VERSION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BidiClass, BundledDatabase, GeneralCategory, NormalizationForm,
        UnicodeDatabase, UnicodeVersion,
    };

    #[test]
    fn parse_version() {
        assert_eq!(
            UnicodeVersion::parse("9.0.0").unwrap(),
            UnicodeVersion { major: 9, minor: 0 }
        );
        assert_eq!(
            UnicodeVersion::parse("15.1.0").unwrap(),
            UnicodeVersion { major: 15, minor: 1 }
        );
        assert_eq!(UnicodeVersion::parse("12.1.3").unwrap().to_string(), "12.1");
    }

    #[test]
    fn parse_version_malformed() {
        for bad in &["", "9", "9.0", "9.0.0.0", "v9.0.0", "9.0.x", " 9.0.0"] {
            assert!(UnicodeVersion::parse(bad).is_err(), "{:?}", bad);
        }
        assert!(UnicodeVersion::parse("99999999999.0.0").is_err());
    }

    #[test]
    fn version_order() {
        let v = |major, minor| UnicodeVersion { major, minor };
        assert!(v(9, 0) < v(10, 0));
        assert!(v(12, 0) < v(12, 1));
    }

    #[test]
    fn bundled_version_parses() {
        UnicodeVersion::parse(&BundledDatabase.version()).unwrap();
    }

    #[test]
    fn bundled_category() {
        let db = BundledDatabase;
        assert_eq!(db.category('A' as u32), GeneralCategory::Lu);
        assert_eq!(db.category('a' as u32), GeneralCategory::Ll);
        assert_eq!(db.category(' ' as u32), GeneralCategory::Zs);
        assert_eq!(db.category(0x0300), GeneralCategory::Mn);
        assert_eq!(db.category(0x00AD), GeneralCategory::Cf);
        assert_eq!(db.category(0x0000), GeneralCategory::Cc);
        assert_eq!(db.category(0xD800), GeneralCategory::Cs);
        assert_eq!(db.category(0xE000), GeneralCategory::Co);
        assert_eq!(db.category(0x10FFFF), GeneralCategory::Cn);
        assert_eq!(db.category(0x1FBF), GeneralCategory::Sk);
    }

    #[test]
    fn bundled_combining_class() {
        let db = BundledDatabase;
        assert_eq!(db.combining_class('a' as u32), 0);
        assert_eq!(db.combining_class(0x094D), 9);
        assert_eq!(db.combining_class(0x0300), 230);
        assert_eq!(db.combining_class(0xDC00), 0);
    }

    #[test]
    fn bundled_bidi_class() {
        let db = BundledDatabase;
        assert_eq!(db.bidi_class('A' as u32), BidiClass::L);
        assert_eq!(db.bidi_class(0x05D0), BidiClass::R);
        assert_eq!(db.bidi_class(0x0621), BidiClass::AL);
        assert_eq!(db.bidi_class('0' as u32), BidiClass::EN);
        assert_eq!(db.bidi_class(0x10E60), BidiClass::AN);
        assert_eq!(db.bidi_class(0x0300), BidiClass::NSM);
        assert_eq!(db.bidi_class('*' as u32), BidiClass::ON);
        assert_eq!(db.bidi_class(0xD800), BidiClass::L);
    }

    #[test]
    fn bundled_normalize() {
        let db = BundledDatabase;
        assert_eq!(db.normalize(NormalizationForm::Nfc, "E\u{301}"), "\u{C9}");
        assert_eq!(db.normalize(NormalizationForm::Nfd, "\u{C9}"), "E\u{301}");
        assert_eq!(db.normalize(NormalizationForm::Nfkc, "\u{FF01}"), "!");
        assert_eq!(db.normalize(NormalizationForm::Nfkd, "\u{212B}"), "A\u{30A}");
        assert_eq!(db.normalize(NormalizationForm::Nfc, "\u{1FBF}"), "\u{1FBF}");
    }

    #[test]
    fn bundled_case_mapping() {
        let db = BundledDatabase;
        assert_eq!(db.lowercase("Fu\u{df}BALL"), "fu\u{df}ball");
        assert_eq!(db.case_fold("Fu\u{df}BALL"), "fussball");
        assert_eq!(db.lowercase("\u{130}"), "i\u{307}");
        assert_eq!(db.case_fold("\u{13A0}"), "\u{13A0}");
        assert_eq!(db.case_fold("\u{AB70}"), "\u{13A0}");
    }

    #[test]
    fn bundled_newer_capitals() {
        let db = BundledDatabase;
        let pairs = [
            ("\u{A7C0}", "\u{A7C1}"),
            ("\u{2C2F}", "\u{2C5F}"),
            ("\u{10570}", "\u{10597}"),
            ("\u{16E40}", "\u{16E60}"),
        ];
        for &(upper, lower) in &pairs {
            assert_eq!(db.lowercase(upper), lower, "{:?}", upper);
            assert_eq!(db.case_fold(upper), lower, "{:?}", upper);
            assert_eq!(db.case_fold(lower), lower, "{:?}", lower);
        }
    }

    // Unicode 15.1 added U+2FFC and U+31EF; Unicode 16.0 added U+1C89 and
    // U+A7CB. Every data source must see the same assignments.
    #[test]
    fn bundled_sources_share_version() {
        let db = BundledDatabase;
        assert_eq!(db.version(), "15.1.0");
        assert_eq!(db.category(0x2FFC), GeneralCategory::So);
        assert_eq!(db.category(0x31EF), GeneralCategory::So);
        assert_eq!(db.category(0x2EBF0), GeneralCategory::Lo);
        for &cp in &[0x1C89, 0xA7CB] {
            assert_eq!(db.category(cp), GeneralCategory::Cn);
            let text = std::char::from_u32(cp).unwrap().to_string();
            assert_eq!(db.lowercase(&text), text);
            assert_eq!(db.case_fold(&text), text);
            assert_eq!(db.normalize(NormalizationForm::Nfkc, &text), text);
        }
    }

    #[test]
    fn unassigned_codepoints_are_inert() {
        let db = BundledDatabase;
        for cp in 0..0x40000 {
            if db.category(cp) != GeneralCategory::Cn {
                continue;
            }
            assert_eq!(db.combining_class(cp), 0, "U+{:04X}", cp);
            let text = std::char::from_u32(cp).unwrap().to_string();
            assert_eq!(db.case_fold(&text), text, "U+{:04X}", cp);
            assert_eq!(db.lowercase(&text), text, "U+{:04X}", cp);
            assert_eq!(
                db.normalize(NormalizationForm::Nfkd, &text),
                text,
                "U+{:04X}",
                cp
            );
        }
    }

    #[test]
    fn database_by_reference() {
        let db = BundledDatabase;
        let by_ref: &dyn UnicodeDatabase = &db;
        assert_eq!(by_ref.category('A' as u32), GeneralCategory::Lu);
        assert_eq!((&db).version(), db.version());
    }
}
