use tracing::{debug, warn};

use crate::error::Error;
use crate::tables::{self, Tables};
use crate::ucd::{
    BidiClass, BundledDatabase, GeneralCategory, NormalizationForm,
    UnicodeDatabase, UnicodeVersion,
};

/// The Joining_Type of a codepoint, for the values PRECIS cares about.
///
/// Codepoints that are not joining (`U`) or join causing (`C`) have no
/// `JoinType`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum JoinType {
    /// Dual_Joining (`D`).
    Dual,
    /// Right_Joining (`R`).
    Right,
    /// Left_Joining (`L`).
    Left,
    /// Transparent (`T`).
    Transparent,
}

/// A Unicode database extended with the properties PRECIS derives from it.
///
/// An adapter owns one [`UnicodeDatabase`] and the bundled codepoint tables.
/// It is built once and then only read, so one adapter can serve every
/// string class and profile in a program.
#[derive(Clone)]
pub struct UcdAdapter<D> {
    db: D,
    version: UnicodeVersion,
    tables: Tables,
}

impl UcdAdapter<BundledDatabase> {
    /// An adapter over the database compiled into this crate.
    pub fn bundled() -> Result<UcdAdapter<BundledDatabase>, Error> {
        UcdAdapter::new(BundledDatabase)
    }
}

impl<D: UnicodeDatabase> UcdAdapter<D> {
    /// Build an adapter over `db`.
    ///
    /// If `db` implements a different version of Unicode than the bundled
    /// tables, a warning is logged and the adapter is built anyway. Use
    /// [`UcdAdapter::strict`] to refuse instead.
    pub fn new(db: D) -> Result<UcdAdapter<D>, Error> {
        let adapter = UcdAdapter::build(db)?;
        if !adapter.versions_agree() {
            warn!(
                database = %adapter.version,
                tables = %tables::UNICODE_VERSION,
                "Unicode database and codepoint tables disagree on version",
            );
        }
        Ok(adapter)
    }

    /// Build an adapter over `db`, failing unless `db` implements the same
    /// major.minor version of Unicode as the bundled tables.
    pub fn strict(db: D) -> Result<UcdAdapter<D>, Error> {
        let adapter = UcdAdapter::build(db)?;
        if !adapter.versions_agree() {
            return Err(Error::VersionMismatch {
                tables: tables::UNICODE_VERSION,
                database: adapter.version,
            });
        }
        Ok(adapter)
    }

    fn build(db: D) -> Result<UcdAdapter<D>, Error> {
        let version = UnicodeVersion::parse(&db.version())?;
        let tables = Tables::new()?;
        debug!(
            database = %version,
            tables = %tables::UNICODE_VERSION,
            "built Unicode adapter",
        );
        Ok(UcdAdapter { db, version, tables })
    }

    fn versions_agree(&self) -> bool {
        self.version == tables::UNICODE_VERSION
    }

    /// The Unicode version implemented by the database.
    pub fn version(&self) -> UnicodeVersion {
        self.version
    }

    /// The Unicode version of the bundled tables.
    pub fn table_version(&self) -> UnicodeVersion {
        tables::UNICODE_VERSION
    }

    /// The underlying database.
    pub fn database(&self) -> &D {
        &self.db
    }

    pub fn category(&self, cp: u32) -> GeneralCategory {
        self.db.category(cp)
    }

    pub fn combining_class(&self, cp: u32) -> u8 {
        self.db.combining_class(cp)
    }

    pub fn bidi_class(&self, cp: u32) -> BidiClass {
        self.db.bidi_class(cp)
    }

    pub fn normalize(&self, form: NormalizationForm, text: &str) -> String {
        self.db.normalize(form, text)
    }

    pub fn lowercase(&self, text: &str) -> String {
        self.db.lowercase(text)
    }

    pub fn case_fold(&self, text: &str) -> String {
        self.db.case_fold(text)
    }

    /// C0 and C1 controls, plus DEL.
    pub fn is_control(&self, cp: u32) -> bool {
        cp <= 0x1F || (0x7F <= cp && cp <= 0x9F)
    }

    /// The 66 noncharacters: the last two codepoints of every plane and
    /// U+FDD0..U+FDEF.
    pub fn is_noncharacter(&self, cp: u32) -> bool {
        (cp & 0xFFFF) >= 0xFFFE || (0xFDD0 <= cp && cp <= 0xFDEF)
    }

    pub fn is_default_ignorable(&self, cp: u32) -> bool {
        self.tables.default_ignorable.contains(cp)
    }

    /// Conjoining jamo: any codepoint whose Hangul_Syllable_Type is L, V
    /// or T.
    pub fn is_old_hangul_jamo(&self, cp: u32) -> bool {
        self.tables.old_hangul_jamo.contains(cp)
    }

    pub fn is_greek_script(&self, cp: u32) -> bool {
        self.tables.script_greek.contains(cp)
    }

    pub fn is_hebrew_script(&self, cp: u32) -> bool {
        self.tables.script_hebrew.contains(cp)
    }

    pub fn is_hiragana_katakana_han(&self, cp: u32) -> bool {
        self.tables.script_hiragana_katakana_han.contains(cp)
    }

    /// Canonical_Combining_Class=Virama.
    pub fn is_virama(&self, cp: u32) -> bool {
        self.combining_class(cp) == 9
    }

    /// ARABIC-INDIC DIGIT ZERO through NINE.
    pub fn is_arabic_indic(&self, cp: u32) -> bool {
        0x0660 <= cp && cp <= 0x0669
    }

    /// EXTENDED ARABIC-INDIC DIGIT ZERO through NINE.
    pub fn is_extended_arabic_indic(&self, cp: u32) -> bool {
        0x06F0 <= cp && cp <= 0x06F9
    }

    pub fn join_type(&self, cp: u32) -> Option<JoinType> {
        if self.tables.join_type_dual.contains(cp) {
            Some(JoinType::Dual)
        } else if self.tables.join_type_right.contains(cp) {
            Some(JoinType::Right)
        } else if self.tables.join_type_left.contains(cp) {
            Some(JoinType::Left)
        } else if self.tables.join_type_transparent.contains(cp) {
            Some(JoinType::Transparent)
        } else {
            None
        }
    }

    /// Return true if NFKC changes the single character string `cp`.
    ///
    /// Surrogates have no decomposition.
    pub fn has_compatibility_decomposition(&self, cp: u32) -> bool {
        let c = match std::char::from_u32(cp) {
            Some(c) => c,
            None => return false,
        };
        let mut buf = [0; 4];
        let single = c.encode_utf8(&mut buf);
        self.normalize(NormalizationForm::Nfkc, single) != *single
    }

    /// Replace halfwidth and fullwidth forms (U+FF01..U+FFEF) with their
    /// compatibility decomposition, when it is a single character.
    pub fn width_map(&self, text: &str) -> String {
        let mut mapped = String::with_capacity(text.len());
        for c in text.chars() {
            if '\u{FF01}' <= c && c <= '\u{FFEF}' {
                let mut buf = [0; 4];
                let norm = self
                    .normalize(NormalizationForm::Nfkc, c.encode_utf8(&mut buf));
                let mut chars = norm.chars();
                if let (Some(narrow), None) = (chars.next(), chars.next()) {
                    mapped.push(narrow);
                    continue;
                }
            }
            mapped.push(c);
        }
        mapped
    }

    /// Replace every space separator (Zs) other than U+0020 with U+0020.
    pub fn map_nonascii_space_to_ascii(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                if c != ' ' && self.category(c as u32) == GeneralCategory::Zs {
                    ' '
                } else {
                    c
                }
            })
            .collect()
    }

    /// Return true if the join control at `text[offset]` sits in a cursive
    /// context: `(L|D) T* <offset> T* (R|D)`.
    ///
    /// Either side ending at the string boundary fails.
    pub fn valid_join_type(&self, text: &[char], offset: usize) -> bool {
        let before = text[..offset].iter().rev();
        let after = text.get(offset + 1..).unwrap_or(&[]).iter();
        self.scan_join(before, JoinType::Left)
            && self.scan_join(after, JoinType::Right)
    }

    fn scan_join<'c, I>(&self, chars: I, term: JoinType) -> bool
    where
        I: Iterator<Item = &'c char>,
    {
        for &c in chars {
            match self.join_type(c as u32) {
                Some(JoinType::Dual) => return true,
                Some(JoinType::Transparent) => continue,
                Some(jt) if jt == term => return true,
                _ => return false,
            }
        }
        false
    }
}

impl<D> std::fmt::Debug for UcdAdapter<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UcdAdapter")
            .field("version", &self.version)
            .field("table_version", &tables::UNICODE_VERSION)
            .finish()
    }
}
