//! Fixed category labels offered to clients for filtering.

use serde::Serialize;

/// A selectable category. `value` is what clients send back, `label` is what
/// they display; for the built-in list the two are identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Hapak {
    pub value: &'static str,
    pub label: &'static str,
}

const fn hapak(name: &'static str) -> Hapak {
    Hapak {
        value: name,
        label: name,
    }
}

/// The category list, in the order it is served.
pub const HAPAKS: [Hapak; 10] = [
    hapak("חפק1"),
    hapak("חפק2"),
    hapak("חפק3"),
    hapak("חפק4"),
    hapak("חפק5"),
    hapak("חפק6"),
    hapak("חפק7"),
    hapak("חפק8"),
    hapak("חפק9"),
    hapak("חפק10"),
];
