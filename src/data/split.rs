//! Logical dataset splits

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three logical splits a training run draws from.
///
/// `NonBlacklistedValidation` is the validation split filtered down to
/// examples not on the blacklist; it is sized independently of the full
/// validation split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    /// Full training split
    Train,
    /// Full validation split
    Validation,
    /// Validation split with blacklisted examples removed
    NonBlacklistedValidation,
}

impl Split {
    /// Stable lower-case name, used in logs and summary rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::NonBlacklistedValidation => "non-blacklisted-validation",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
