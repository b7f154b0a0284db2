use std::str::FromStr;

use tracing::debug;

use crate::adapter::UcdAdapter;
use crate::class::StringClass;
use crate::error::{Error, Reason, Rejection};
use crate::stage::{self, Stage};
use crate::ucd::UnicodeDatabase;

/// How many more times the pipeline is run on its own output, looking for
/// a fixed point, before the profile is declared not idempotent.
const MAX_REAPPLY: usize = 3;

/// The case mapping stage of the Username and Nickname profiles.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CaseMapping {
    /// No case mapping.
    Preserve,
    /// Map to lowercase.
    Lower,
    /// Unicode Default Case Folding.
    Fold,
}

impl FromStr for CaseMapping {
    type Err = Error;

    fn from_str(s: &str) -> Result<CaseMapping, Error> {
        match s {
            "none" => Ok(CaseMapping::Preserve),
            "lower" => Ok(CaseMapping::Lower),
            "fold" => Ok(CaseMapping::Fold),
            _ => Err(Error::UnknownCaseMapping(s.to_string())),
        }
    }
}

impl CaseMapping {
    fn stage<D: UnicodeDatabase>(&self) -> Stage<D> {
        match *self {
            CaseMapping::Preserve => stage::identity,
            CaseMapping::Lower => stage::lowercase,
            CaseMapping::Fold => stage::case_fold,
        }
    }
}

/// A PRECIS profile (RFC 8264 §5): five mapping stages followed by the
/// rules of a string class.
///
/// A profile starts out with every stage the identity except normalization,
/// which is NFC. The `with_*` methods replace one stage each.
pub struct Profile<'a, D> {
    name: String,
    base: StringClass<'a, D>,
    width: Stage<D>,
    additional: Stage<D>,
    case: Stage<D>,
    normalization: Stage<D>,
    directionality: Stage<D>,
}

impl<'a, D: UnicodeDatabase> Profile<'a, D> {
    pub fn new(name: &str, base: StringClass<'a, D>) -> Profile<'a, D> {
        Profile {
            name: name.to_string(),
            base,
            width: stage::identity,
            additional: stage::identity,
            case: stage::identity,
            normalization: stage::nfc,
            directionality: stage::identity,
        }
    }

    /// UsernameCasePreserved and UsernameCaseMapped (RFC 8265 §3).
    pub fn username(
        ucd: &'a UcdAdapter<D>,
        case: CaseMapping,
    ) -> Profile<'a, D> {
        let name = match case {
            CaseMapping::Preserve => "UsernameCasePreserved",
            CaseMapping::Fold => "UsernameCaseMapped",
            CaseMapping::Lower => "UsernameCaseMapped:ToLower",
        };
        Profile::new(name, StringClass::identifier(ucd))
            .with_width_mapping(stage::width_map)
            .with_case_mapping(case.stage())
            .with_directionality(stage::bidi_rule)
    }

    /// OpaqueString (RFC 8265 §4).
    pub fn opaque_string(ucd: &'a UcdAdapter<D>) -> Profile<'a, D> {
        Profile::new("OpaqueString", StringClass::free_form(ucd))
            .with_additional_mapping(stage::nonascii_space)
    }

    /// NicknameCasePreserved and NicknameCaseMapped (RFC 8266 §2).
    pub fn nickname(
        ucd: &'a UcdAdapter<D>,
        case: CaseMapping,
    ) -> Profile<'a, D> {
        let name = match case {
            CaseMapping::Preserve => "NicknameCasePreserved",
            CaseMapping::Fold => "NicknameCaseMapped",
            CaseMapping::Lower => "NicknameCaseMapped:ToLower",
        };
        Profile::new(name, StringClass::free_form(ucd))
            .with_additional_mapping(stage::nickname_spaces)
            .with_case_mapping(case.stage())
            .with_normalization(stage::nfkc)
    }

    /// Use `name` in rejections.
    pub fn renamed(mut self, name: &str) -> Profile<'a, D> {
        self.name = name.to_string();
        self
    }

    pub fn with_width_mapping(mut self, stage: Stage<D>) -> Profile<'a, D> {
        self.width = stage;
        self
    }

    pub fn with_additional_mapping(mut self, stage: Stage<D>) -> Profile<'a, D> {
        self.additional = stage;
        self
    }

    pub fn with_case_mapping(mut self, stage: Stage<D>) -> Profile<'a, D> {
        self.case = stage;
        self
    }

    pub fn with_normalization(mut self, stage: Stage<D>) -> Profile<'a, D> {
        self.normalization = stage;
        self
    }

    pub fn with_directionality(mut self, stage: Stage<D>) -> Profile<'a, D> {
        self.directionality = stage;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The string class applied after the mapping stages.
    pub fn base(&self) -> &StringClass<'a, D> {
        &self.base
    }

    /// Enforce this profile on `text`, returning the canonical form.
    ///
    /// The pipeline is run again on its own output until the output stops
    /// changing. A profile that keeps changing its output, or that rejects
    /// its own output, fails with `DISALLOWED/not_idempotent`.
    pub fn enforce(&self, text: &str) -> Result<String, Rejection> {
        let mut out = self.apply(text).map_err(|err| {
            debug!(profile = %self.name, reason = %err.reason(), "rejected");
            err
        })?;
        for _ in 0..MAX_REAPPLY {
            let again = match self.apply(&out) {
                Ok(again) => again,
                Err(_) => break,
            };
            if again == out {
                return Ok(out);
            }
            out = again;
        }
        debug!(profile = %self.name, "output is not stable");
        Err(Rejection::whole(&self.name, text, Reason::NotIdempotent))
    }

    /// Enforce this profile on UTF-8 encoded `bytes`, returning the
    /// canonical form as UTF-8.
    pub fn enforce_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, Error> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| Error::InvalidArgument("not a string"))?;
        Ok(self.enforce(text)?.into_bytes())
    }

    /// Run the five stages, the empty check and the string class once.
    fn apply(&self, text: &str) -> Result<String, Rejection> {
        let ucd = self.base.ucd();
        let mut temp = text.to_string();
        for &stage in &[
            self.width,
            self.additional,
            self.case,
            self.normalization,
            self.directionality,
        ] {
            temp = stage(ucd, &temp)
                .map_err(|why| Rejection::whole(&self.name, &temp, why))?;
        }
        if temp.is_empty() {
            return Err(Rejection::whole(&self.name, &temp, Reason::Empty));
        }
        self.base.enforce(&temp, &self.name)
    }
}

impl<'a, D> Clone for Profile<'a, D> {
    fn clone(&self) -> Profile<'a, D> {
        Profile {
            name: self.name.clone(),
            base: self.base,
            width: self.width,
            additional: self.additional,
            case: self.case,
            normalization: self.normalization,
            directionality: self.directionality,
        }
    }
}

impl<'a, D> std::fmt::Debug for Profile<'a, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("base", &self.base)
            .finish()
    }
}
