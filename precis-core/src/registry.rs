use crate::adapter::UcdAdapter;
use crate::class::StringClass;
use crate::error::{Error, Rejection};
use crate::profile::{CaseMapping, Profile};
use crate::ucd::UnicodeDatabase;

/// Every name [`get_profile`] knows, in their canonical spelling.
pub const PROFILE_NAMES: &[&str] = &[
    "IdentifierClass",
    "FreeFormClass",
    "UsernameCasePreserved",
    "UsernameCaseMapped",
    "UsernameCaseMapped:ToLower",
    "OpaqueString",
    "NicknameCasePreserved",
    "NicknameCaseMapped",
    "NicknameCaseMapped:ToLower",
    "Nickname",
];

/// Normalize a profile name for lookup: ASCII lowercase, with `_` read as
/// `:`.
pub fn canonical_name(name: &str) -> String {
    name.to_ascii_lowercase().replace('_', ":")
}

/// Something that can be looked up by name: a bare string class or a
/// profile.
#[derive(Clone, Debug)]
pub enum Enforcer<'a, D> {
    /// A string class, applied without any mapping.
    Class(StringClass<'a, D>),
    /// A profile.
    Profile(Profile<'a, D>),
}

impl<'a, D: UnicodeDatabase> Enforcer<'a, D> {
    pub fn name(&self) -> &str {
        match *self {
            Enforcer::Class(ref class) => class.name(),
            Enforcer::Profile(ref profile) => profile.name(),
        }
    }

    pub fn enforce(&self, text: &str) -> Result<String, Rejection> {
        match *self {
            Enforcer::Class(ref class) => class.enforce(text, class.name()),
            Enforcer::Profile(ref profile) => profile.enforce(text),
        }
    }

    pub fn enforce_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, Error> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| Error::InvalidArgument("not a string"))?;
        Ok(self.enforce(text)?.into_bytes())
    }
}

/// Look up a string class or profile by name, ignoring ASCII case.
pub fn get_profile<'a, D: UnicodeDatabase>(
    name: &str,
    ucd: &'a UcdAdapter<D>,
) -> Result<Enforcer<'a, D>, Error> {
    let enforcer = match &*canonical_name(name) {
        "identifierclass" => Enforcer::Class(StringClass::identifier(ucd)),
        "freeformclass" => Enforcer::Class(StringClass::free_form(ucd)),
        "usernamecasepreserved" => {
            Enforcer::Profile(Profile::username(ucd, CaseMapping::Preserve))
        }
        "usernamecasemapped" => {
            Enforcer::Profile(Profile::username(ucd, CaseMapping::Fold))
        }
        "usernamecasemapped:tolower" => {
            Enforcer::Profile(Profile::username(ucd, CaseMapping::Lower))
        }
        "opaquestring" => Enforcer::Profile(Profile::opaque_string(ucd)),
        "nicknamecasepreserved" => {
            Enforcer::Profile(Profile::nickname(ucd, CaseMapping::Preserve))
        }
        "nicknamecasemapped" => {
            Enforcer::Profile(Profile::nickname(ucd, CaseMapping::Fold))
        }
        "nicknamecasemapped:tolower" => {
            Enforcer::Profile(Profile::nickname(ucd, CaseMapping::Lower))
        }
        "nickname" => Enforcer::Profile(
            Profile::nickname(ucd, CaseMapping::Fold).renamed("Nickname"),
        ),
        _ => return Err(Error::UnknownProfile(name.to_string())),
    };
    Ok(enforcer)
}
