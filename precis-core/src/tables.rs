/*!
Codepoint tables derived from the Unicode character database.

Each table is a text asset in `CodepointSet` format that records its source
file, the property value it lists and its cardinality in leading comments.
All of them were extracted from the same release of Unicode, given by
[`UNICODE_VERSION`].
*/

use precis_set::CodepointSet;

use crate::error::Error;
use crate::ucd::UnicodeVersion;

/// The version of Unicode the bundled tables were extracted from.
pub const UNICODE_VERSION: UnicodeVersion = UnicodeVersion { major: 9, minor: 0 };

pub(crate) const DEFAULT_IGNORABLE: &str =
    include_str!("tables/default_ignorable.txt");
pub(crate) const JOIN_TYPE_DUAL: &str = include_str!("tables/join_type_dual.txt");
pub(crate) const JOIN_TYPE_RIGHT: &str =
    include_str!("tables/join_type_right.txt");
pub(crate) const JOIN_TYPE_LEFT: &str = include_str!("tables/join_type_left.txt");
pub(crate) const JOIN_TYPE_TRANSPARENT: &str =
    include_str!("tables/join_type_transparent.txt");
pub(crate) const OLD_HANGUL_JAMO: &str =
    include_str!("tables/old_hangul_jamo.txt");
pub(crate) const SCRIPT_GREEK: &str = include_str!("tables/script_greek.txt");
pub(crate) const SCRIPT_HEBREW: &str = include_str!("tables/script_hebrew.txt");
pub(crate) const SCRIPT_HIRAGANA_KATAKANA_HAN: &str =
    include_str!("tables/script_hiragana_katakana_han.txt");

/// Every bundled table, parsed.
#[derive(Clone, Debug)]
pub(crate) struct Tables {
    pub default_ignorable: CodepointSet,
    pub join_type_dual: CodepointSet,
    pub join_type_right: CodepointSet,
    pub join_type_left: CodepointSet,
    pub join_type_transparent: CodepointSet,
    pub old_hangul_jamo: CodepointSet,
    pub script_greek: CodepointSet,
    pub script_hebrew: CodepointSet,
    pub script_hiragana_katakana_han: CodepointSet,
}

impl Tables {
    pub fn new() -> Result<Tables, Error> {
        Ok(Tables {
            default_ignorable: load("default_ignorable", DEFAULT_IGNORABLE)?,
            join_type_dual: load("join_type_dual", JOIN_TYPE_DUAL)?,
            join_type_right: load("join_type_right", JOIN_TYPE_RIGHT)?,
            join_type_left: load("join_type_left", JOIN_TYPE_LEFT)?,
            join_type_transparent: load(
                "join_type_transparent",
                JOIN_TYPE_TRANSPARENT,
            )?,
            old_hangul_jamo: load("old_hangul_jamo", OLD_HANGUL_JAMO)?,
            script_greek: load("script_greek", SCRIPT_GREEK)?,
            script_hebrew: load("script_hebrew", SCRIPT_HEBREW)?,
            script_hiragana_katakana_han: load(
                "script_hiragana_katakana_han",
                SCRIPT_HIRAGANA_KATAKANA_HAN,
            )?,
        })
    }
}

fn load(name: &'static str, table: &str) -> Result<CodepointSet, Error> {
    CodepointSet::new(table).map_err(|err| Error::Table { name, err })
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use regex::Regex;

    use super::*;

    /// The cardinality a table claims for itself.
    fn declared_size(table: &str) -> u32 {
        lazy_static! {
            static ref COUNT: Regex =
                Regex::new(r"(?m)^# Codepoints: ([0-9]+)$").unwrap();
        }
        COUNT.captures(table).unwrap()[1].parse().unwrap()
    }

    #[test]
    fn sizes_match_headers() {
        let tables = Tables::new().unwrap();
        let all = [
            (&tables.default_ignorable, DEFAULT_IGNORABLE),
            (&tables.join_type_dual, JOIN_TYPE_DUAL),
            (&tables.join_type_right, JOIN_TYPE_RIGHT),
            (&tables.join_type_left, JOIN_TYPE_LEFT),
            (&tables.join_type_transparent, JOIN_TYPE_TRANSPARENT),
            (&tables.old_hangul_jamo, OLD_HANGUL_JAMO),
            (&tables.script_greek, SCRIPT_GREEK),
            (&tables.script_hebrew, SCRIPT_HEBREW),
            (&tables.script_hiragana_katakana_han, SCRIPT_HIRAGANA_KATAKANA_HAN),
        ];
        for &(set, text) in all.iter() {
            assert_eq!(set.size(), declared_size(text));
        }
    }

    #[test]
    fn known_sizes() {
        let tables = Tables::new().unwrap();
        assert_eq!(tables.default_ignorable.size(), 4173);
        assert_eq!(tables.join_type_left.size(), 3);
        assert_eq!(tables.script_hiragana_katakana_han.size(), 82125);
    }

    #[test]
    fn tables_agree_with_version() {
        for text in &[DEFAULT_IGNORABLE, JOIN_TYPE_DUAL, SCRIPT_GREEK] {
            assert!(text.starts_with("# Unicode 9.0.0:"));
        }
        assert_eq!(UNICODE_VERSION.to_string(), "9.0");
    }

    #[test]
    fn join_types_disjoint() {
        let tables = Tables::new().unwrap();
        let sets = [
            &tables.join_type_dual,
            &tables.join_type_right,
            &tables.join_type_left,
            &tables.join_type_transparent,
        ];
        for (i, a) in sets.iter().enumerate() {
            for b in &sets[i + 1..] {
                for (lo, hi) in a.ranges() {
                    for cp in lo..=hi {
                        assert!(!b.contains(cp), "U+{:04X}", cp);
                    }
                }
            }
        }
    }

    #[test]
    fn table_error_names_table() {
        let err = load("broken", "0041\n0040..0030\n").unwrap_err();
        match err {
            Error::Table { name, ref err } => {
                assert_eq!(name, "broken");
                assert_eq!(err.line(), Some(2));
            }
            ref other => panic!("unexpected error: {:?}", other),
        }
    }
}
