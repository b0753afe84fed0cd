use std::fmt;
use serde::{Deserialize, Serialize};

/// Outcome of classifying one document comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    NewPolicy,
    NoChange,
    StructuralOnly,
    CriticalPolicyInStructural,
    MajorAddition,
    ModerateChange,
    MinorModification,
    CriticalMinorChange,
    StructuralWithKeywords,
    FormattingOnly,
    /// Classification failed; reported as a change so nothing is dropped.
    Unclassified,
}

impl Tier {
    pub const ALL: [Tier; 11] = [
        Tier::NewPolicy,
        Tier::NoChange,
        Tier::StructuralOnly,
        Tier::CriticalPolicyInStructural,
        Tier::MajorAddition,
        Tier::ModerateChange,
        Tier::MinorModification,
        Tier::CriticalMinorChange,
        Tier::StructuralWithKeywords,
        Tier::FormattingOnly,
        Tier::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::NewPolicy => "NEW_POLICY",
            Tier::NoChange => "NO_CHANGE",
            Tier::StructuralOnly => "STRUCTURAL_ONLY",
            Tier::CriticalPolicyInStructural => "CRITICAL_POLICY_IN_STRUCTURAL",
            Tier::MajorAddition => "MAJOR_ADDITION",
            Tier::ModerateChange => "MODERATE_CHANGE",
            Tier::MinorModification => "MINOR_MODIFICATION",
            Tier::CriticalMinorChange => "CRITICAL_MINOR_CHANGE",
            Tier::StructuralWithKeywords => "STRUCTURAL_WITH_KEYWORDS",
            Tier::FormattingOnly => "FORMATTING_ONLY",
            Tier::Unclassified => "UNCLASSIFIED",
        }
    }

    /// Severity order used for sorting and alert routing. Suppressed tiers
    /// share the lowest non-zero rank. Notifying tiers whose size is unknown,
    /// a critical edit inside a structural update or an unclassified fault,
    /// are routed with minor modifications.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::NoChange => 0,
            Tier::FormattingOnly | Tier::StructuralOnly | Tier::StructuralWithKeywords => 1,
            Tier::NewPolicy => 2,
            Tier::CriticalMinorChange => 3,
            Tier::MinorModification | Tier::CriticalPolicyInStructural | Tier::Unclassified => 4,
            Tier::ModerateChange => 5,
            Tier::MajorAddition => 6,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self.rank() {
            0 => "✓",
            1 => "·",
            2 => "○",
            3 | 4 => "◇",
            _ => "◆",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for tier in Tier::ALL {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.as_str()));
        }
    }

    #[test]
    fn test_magnitude_tiers_ordered() {
        assert!(Tier::FormattingOnly.rank() < Tier::CriticalMinorChange.rank());
        assert!(Tier::CriticalMinorChange.rank() <= Tier::MinorModification.rank());
        assert!(Tier::MinorModification.rank() < Tier::ModerateChange.rank());
        assert!(Tier::ModerateChange.rank() < Tier::MajorAddition.rank());
    }

    #[test]
    fn test_unsized_alerts_route_with_minor_modifications() {
        let minor = Tier::MinorModification.rank();
        assert_eq!(Tier::CriticalPolicyInStructural.rank(), minor);
        assert_eq!(Tier::Unclassified.rank(), minor);
        assert!(Tier::StructuralWithKeywords.rank() < Tier::CriticalMinorChange.rank());
    }
}
