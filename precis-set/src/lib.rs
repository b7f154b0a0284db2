/*!
An immutable set of Unicode codepoints.

Sets are built once from a line oriented table in which every data line is
either a single hexadecimal codepoint (`HHHH`) or an inclusive range
(`HHHH..HHHH`). Blank lines and `#` comments are ignored. Adjacent ranges are
merged at construction and overlapping ranges are rejected, so two sets built
from equivalent tables compare equal.

```
use precis_set::CodepointSet;

let set = CodepointSet::new("
05F3..05F4  # geresh and gershayim
05C0
").unwrap();
assert!(set.contains(0x05F4));
assert!(!set.contains(0x05F5));
assert_eq!(set.size(), 3);
```
*/

#![deny(missing_docs)]

pub use crate::error::{Error, ErrorKind};
pub use crate::set::{CodepointSet, Ranges, MAX_CODEPOINT};

macro_rules! err {
    ($kind:expr) => {
        Err(crate::error::Error::new($kind))
    };
}

mod error;
mod set;
