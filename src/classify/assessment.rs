use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use crate::snapshot::ContentHash;
use super::tier::Tier;

/// Intermediate signals behind a full comparison, kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSignals {
    pub structural_similarity: Option<f64>,
    pub structural_only: bool,
    pub added: usize,
    pub removed: usize,
    pub critical_terms: BTreeSet<String>,
    /// Pooled token Jaccard of the policy sentences on each side.
    pub policy_similarity: Option<f64>,
    pub real_change_confirmed: bool,
}

/// Result of comparing a document against its last persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeAssessment {
    pub is_new: bool,
    pub has_changes: bool,
    pub tier: Tier,
    pub description: String,
    pub skip_notification: bool,
    pub magnitude: usize,
    pub previous_hash: Option<ContentHash>,
    pub current_hash: ContentHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<AssessmentSignals>,
}

impl ChangeAssessment {
    pub fn new_policy(current_hash: ContentHash) -> Self {
        Self {
            is_new: true,
            has_changes: false,
            tier: Tier::NewPolicy,
            description: "First snapshot of this document".to_string(),
            skip_notification: false,
            magnitude: 0,
            previous_hash: None,
            current_hash,
            signals: None,
        }
    }

    pub fn no_change(previous_hash: ContentHash, current_hash: ContentHash) -> Self {
        Self {
            is_new: false,
            has_changes: false,
            tier: Tier::NoChange,
            description: "Content unchanged".to_string(),
            skip_notification: true,
            magnitude: 0,
            previous_hash: Some(previous_hash),
            current_hash,
            signals: None,
        }
    }

    /// Fail-safe result when classification could not complete.
    pub fn unclassified(
        previous_hash: Option<ContentHash>,
        current_hash: ContentHash,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self {
            is_new: previous_hash.is_none(),
            has_changes: true,
            tier: Tier::Unclassified,
            description: format!("Change could not be classified: {}", reason),
            skip_notification: false,
            magnitude: 0,
            previous_hash,
            current_hash,
            signals: None,
        }
    }

    /// Whether the store should replace its baseline with the current
    /// snapshot. Tolerated noise keeps the old baseline so small edits
    /// cannot accumulate unnoticed.
    pub fn should_persist(&self) -> bool {
        self.has_changes || self.is_new
    }

    pub fn should_notify(&self) -> bool {
        !self.skip_notification
    }
}
