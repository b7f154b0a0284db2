/*!
Enforcement of PRECIS profiles (RFC 8264, RFC 8265 and RFC 8266).

PRECIS prepares internationalized identity strings, such as usernames,
passwords and nicknames, so that strings a person would consider the same
compare equal. A profile maps its input through a fixed sequence of stages
and then checks every codepoint of the result against a string class.

Everything starts from a [`UcdAdapter`], which pairs a
[`UnicodeDatabase`](ucd::UnicodeDatabase) with the codepoint tables bundled
in this crate. Build it once and hand references to it to the string classes
and profiles that need it.

```
use precis_core::{get_profile, UcdAdapter};

let ucd = UcdAdapter::bundled().unwrap();
let profile = get_profile("UsernameCaseMapped", &ucd).unwrap();
assert_eq!(profile.enforce("Juliet").unwrap(), "juliet");

let err = profile.enforce("Juliet Capulet").unwrap_err();
assert_eq!(err.reason().to_string(), "DISALLOWED/spaces");
assert_eq!((err.start(), err.end()), (6, 7));
```
*/

pub use crate::adapter::{JoinType, UcdAdapter};
pub use crate::bidi::{bidi_rule, has_rtl};
pub use crate::class::StringClass;
pub use crate::context::{context_rule_error, ContextRule};
pub use crate::derived::{derived_property, DerivedProperty};
pub use crate::error::{Error, Reason, Rejection};
pub use crate::profile::{CaseMapping, Profile};
pub use crate::registry::{canonical_name, get_profile, Enforcer, PROFILE_NAMES};
pub use crate::stage::Stage;

pub mod stage;
pub mod tables;
pub mod ucd;

mod adapter;
mod bidi;
mod class;
mod context;
mod derived;
mod error;
mod profile;
mod registry;

#[cfg(test)]
lazy_static::lazy_static! {
    /// One adapter over the bundled database, shared by every test.
    pub(crate) static ref UCD: UcdAdapter<ucd::BundledDatabase> =
        UcdAdapter::bundled().unwrap();
}
