//! Per-step mode flag selectors

use crate::data::Split;

/// Mode flags set fresh for every step.
///
/// The pair selects which data path and graph branch a step evaluates.
/// Only three combinations occur in practice, one per step kind; the
/// constructors below are the only way the orchestrator builds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFlags {
    /// Step applies an optimizer update against the training split
    pub is_training: bool,
    /// Validation step draws from the non-blacklisted split
    pub validating_non_blacklisted: bool,
}

impl ModeFlags {
    /// Flags for a training step: `{is_training: true, validating_non_blacklisted: false}`
    pub fn training() -> Self {
        Self {
            is_training: true,
            validating_non_blacklisted: false,
        }
    }

    /// Flags for a standard validation step: `{false, false}`
    pub fn validation() -> Self {
        Self {
            is_training: false,
            validating_non_blacklisted: false,
        }
    }

    /// Flags for a non-blacklisted validation step: `{false, true}`
    pub fn non_blacklisted_validation() -> Self {
        Self {
            is_training: false,
            validating_non_blacklisted: true,
        }
    }

    /// The split these flags route a step to
    pub fn split(&self) -> Split {
        if self.is_training {
            Split::Train
        } else if self.validating_non_blacklisted {
            Split::NonBlacklistedValidation
        } else {
            Split::Validation
        }
    }
}
