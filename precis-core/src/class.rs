use crate::adapter::UcdAdapter;
use crate::context::context_rule_error;
use crate::derived::{derived_property, DerivedProperty};
use crate::error::{Reason, Rejection};
use crate::ucd::UnicodeDatabase;

/// A PRECIS string class (RFC 8264 §4).
///
/// A string class decides which derived property values it accepts. Values
/// that need context are accepted when their context rule holds.
pub struct StringClass<'a, D> {
    name: &'static str,
    allowed: &'static [DerivedProperty],
    ucd: &'a UcdAdapter<D>,
}

impl<'a, D: UnicodeDatabase> StringClass<'a, D> {
    /// The IdentifierClass, which accepts only PVALID codepoints.
    pub fn identifier(ucd: &'a UcdAdapter<D>) -> StringClass<'a, D> {
        StringClass {
            name: "IdentifierClass",
            allowed: &[DerivedProperty::PValid],
            ucd,
        }
    }

    /// The FreeformClass, which also accepts FREE_PVAL codepoints.
    pub fn free_form(ucd: &'a UcdAdapter<D>) -> StringClass<'a, D> {
        StringClass {
            name: "FreeFormClass",
            allowed: &[DerivedProperty::PValid, DerivedProperty::FreePVal],
            ucd,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return true if this class accepts `prop` without consulting a
    /// context rule.
    pub fn allows(&self, prop: DerivedProperty) -> bool {
        self.allowed.contains(&prop)
    }

    pub fn ucd(&self) -> &'a UcdAdapter<D> {
        self.ucd
    }

    /// Check every codepoint of `text`, returning it unchanged if all are
    /// accepted.
    ///
    /// A rejection names `label` and the first offending codepoint. When a
    /// context rule fails, the reason is the name of that rule.
    pub fn enforce(&self, text: &str, label: &str) -> Result<String, Rejection> {
        let chars: Vec<char> = text.chars().collect();
        for (i, &c) in chars.iter().enumerate() {
            let (prop, why) = derived_property(c as u32, self.ucd);
            if self.allows(prop) {
                continue;
            }
            let why = match prop {
                DerivedProperty::ContextJ | DerivedProperty::ContextO => {
                    match context_rule_error(&chars, i, self.ucd) {
                        None => continue,
                        Some(rule) => rule,
                    }
                }
                _ => why,
            };
            return Err(Rejection::new(
                label,
                text,
                i,
                i + 1,
                Reason::Disallowed(why),
            ));
        }
        Ok(text.to_string())
    }
}

impl<'a, D> Clone for StringClass<'a, D> {
    fn clone(&self) -> StringClass<'a, D> {
        *self
    }
}

impl<'a, D> Copy for StringClass<'a, D> {}

impl<'a, D> std::fmt::Debug for StringClass<'a, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringClass")
            .field("name", &self.name)
            .field("allowed", &self.allowed)
            .finish()
    }
}
