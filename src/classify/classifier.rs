use serde::Serialize;
use crate::config::MagnitudeBands;
use super::tier::Tier;

/// Every input the decision table reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub has_previous: bool,
    pub hashes_equal: bool,
    pub structural_only: bool,
    pub critical_terms_found: bool,
    pub real_change_confirmed: bool,
    /// Added plus removed policy sentences.
    pub magnitude: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub has_changes: bool,
    pub skip_notification: bool,
}

impl Classification {
    fn notify(tier: Tier) -> Self {
        Self { tier, has_changes: true, skip_notification: false }
    }

    fn suppress(tier: Tier) -> Self {
        Self { tier, has_changes: false, skip_notification: true }
    }
}

/// The significance decision table, first matching row wins.
///
/// A critical term in a changed sentence always overrides a structural
/// verdict. Below the magnitude bands it notifies only when the verifier
/// agrees that policy content moved.
pub fn classify(signals: &Signals, bands: &MagnitudeBands) -> Classification {
    if !signals.has_previous {
        return Classification {
            tier: Tier::NewPolicy,
            has_changes: false,
            skip_notification: false,
        };
    }

    if signals.hashes_equal {
        return Classification::suppress(Tier::NoChange);
    }

    if signals.structural_only {
        return if signals.critical_terms_found {
            Classification::notify(Tier::CriticalPolicyInStructural)
        } else {
            Classification::suppress(Tier::StructuralOnly)
        };
    }

    let magnitude = signals.magnitude;
    if magnitude > bands.major {
        Classification::notify(Tier::MajorAddition)
    } else if magnitude > bands.moderate {
        Classification::notify(Tier::ModerateChange)
    } else if magnitude > bands.minor {
        Classification::notify(Tier::MinorModification)
    } else if signals.critical_terms_found && signals.real_change_confirmed {
        Classification::notify(Tier::CriticalMinorChange)
    } else if signals.critical_terms_found {
        Classification::suppress(Tier::StructuralWithKeywords)
    } else {
        Classification::suppress(Tier::FormattingOnly)
    }
}
