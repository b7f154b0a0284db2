// The Bidi Rule of RFC 5893 §2. All six conditions must hold:
//
// 1. The first character must be L, R or AL. R or AL make an RTL label, L
//    makes an LTR label.
// 2. An RTL label may only contain R, AL, AN, EN, ES, CS, ET, ON, BN and NSM.
// 3. An RTL label must end with R, AL, EN or AN, followed by zero or more
//    NSM.
// 4. An RTL label must not contain both EN and AN.
// 5. An LTR label may only contain L, EN, ES, CS, ET, ON, BN and NSM.
// 6. An LTR label must end with L or EN, followed by zero or more NSM.

use crate::adapter::UcdAdapter;
use crate::ucd::{BidiClass, UnicodeDatabase};

use crate::ucd::BidiClass::*;

/// The constraints on one direction of label.
struct Direction {
    allowed: &'static [BidiClass],
    terminal: &'static [BidiClass],
    exclusive: &'static [BidiClass],
}

const LTR: Direction = Direction {
    allowed: &[L, EN, ES, CS, ET, ON, BN, NSM],
    terminal: &[L, EN],
    exclusive: &[],
};

const RTL: Direction = Direction {
    allowed: &[R, AL, AN, EN, ES, CS, ET, ON, BN, NSM],
    terminal: &[R, AL, EN, AN],
    exclusive: &[EN, AN],
};

/// Return true if `text` contains a character of class R, AL or AN.
pub fn has_rtl<D: UnicodeDatabase>(text: &str, ucd: &UcdAdapter<D>) -> bool {
    text.chars()
        .any(|c| matches!(ucd.bidi_class(c as u32), R | AL | AN))
}

/// Return true if `text` satisfies the Bidi Rule. The empty string does
/// not.
pub fn bidi_rule<D: UnicodeDatabase>(text: &str, ucd: &UcdAdapter<D>) -> bool {
    let classes: Vec<BidiClass> =
        text.chars().map(|c| ucd.bidi_class(c as u32)).collect();
    match classes.first() {
        Some(&L) => check(&classes, &LTR),
        Some(&R) | Some(&AL) => check(&classes, &RTL),
        _ => false,
    }
}

fn check(classes: &[BidiClass], dir: &Direction) -> bool {
    let last = match classes.iter().rposition(|&class| class != NSM) {
        Some(last) => last,
        None => return false,
    };
    if !dir.terminal.contains(&classes[last]) {
        return false;
    }
    let mut seen = if dir.exclusive.contains(&classes[last]) {
        Some(classes[last])
    } else {
        None
    };
    for &class in classes.get(1..last).unwrap_or(&[]) {
        if !dir.allowed.contains(&class) {
            return false;
        }
        if dir.exclusive.contains(&class) {
            match seen {
                Some(prev) if prev != class => return false,
                _ => seen = Some(class),
            }
        }
    }
    true
}
