use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};
use crate::config::EngineConfig;
use crate::detect::{
    ChangeVerifier, CriticalScan, CriticalTermScanner, PolicyExtractor, SentenceDiff, SentenceDiffer,
    StructuralDetector, StructuralVerdict,
};
use crate::error::{PolicyDriftError, Result};
use crate::snapshot::{ContentHash, Snapshot};
use crate::text::{Normalizer, SentenceProfile};
use super::assessment::{AssessmentSignals, ChangeAssessment};
use super::classifier::{classify, Signals};
use super::tier::Tier;

/// The change significance engine.
///
/// Holds only compiled configuration, so one instance can be shared across
/// threads and every call to [`ChangeEngine::assess`] is independent.
#[derive(Debug, Clone)]
pub struct ChangeEngine {
    config: EngineConfig,
    normalizer: Normalizer,
    structural: StructuralDetector,
    policy: PolicyExtractor,
    differ: SentenceDiffer,
    verifier: ChangeVerifier,
    critical: CriticalTermScanner,
}

impl ChangeEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let normalizer = Normalizer::from_config(&config)?;
        let structural = StructuralDetector::from_config(&config, normalizer.clone())?;
        let policy = PolicyExtractor::from_config(&config)?;
        let differ = SentenceDiffer::new(config.similarity, config.general_match_threshold);
        let verifier = ChangeVerifier::new(config.verifier_threshold);
        let critical = CriticalTermScanner::from_config(&config)?;

        Ok(Self {
            config,
            normalizer,
            structural,
            policy,
            differ,
            verifier,
            critical,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Compares `current` against the last persisted snapshot.
    ///
    /// Never fails: internal faults produce [`Tier::Unclassified`], which
    /// reports a change and notifies.
    pub fn assess(&self, previous: Option<&Snapshot>, current: &Snapshot) -> ChangeAssessment {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_assess(previous, current)));

        let assessment = match outcome {
            Ok(Ok(assessment)) => assessment,
            Ok(Err(e)) => {
                warn!(url = %current.url, error = %e, "classification failed, reporting as unclassified change");
                self.unclassified(previous, current, e)
            }
            Err(_) => {
                warn!(url = %current.url, "classification panicked, reporting as unclassified change");
                self.unclassified(previous, current, "internal error")
            }
        };

        if assessment.should_notify() {
            info!(url = %current.url, tier = %assessment.tier, magnitude = assessment.magnitude, "{}", assessment.description);
        } else {
            debug!(url = %current.url, tier = %assessment.tier, "notification suppressed");
        }

        assessment
    }

    /// Runs the pipeline, surfacing internal errors instead of degrading.
    pub fn try_assess(&self, previous: Option<&Snapshot>, current: &Snapshot) -> Result<ChangeAssessment> {
        let current_hash = ContentHash::of(&current.content);

        let Some(previous) = previous else {
            return Ok(ChangeAssessment::new_policy(current_hash));
        };

        let previous_hash = ContentHash::of(&previous.content);
        if previous_hash == current_hash {
            return Ok(ChangeAssessment::no_change(previous_hash, current_hash));
        }

        self.check_size(previous)?;
        self.check_size(current)?;

        let structural = self.structural.compare(&previous.content, &current.content);

        let previous_sentences = self.sentence_profiles(&previous.content);
        let current_sentences = self.sentence_profiles(&current.content);
        let critical = self.critical.scan(&previous_sentences, &current_sentences);

        let previous_policy = self.policy_only(&previous_sentences);
        let current_policy = self.policy_only(&current_sentences);
        let verification = self.verifier.verify(&previous_policy, &current_policy);
        let real_change_confirmed = verification.confirmed;

        let diff = if structural.structural_only {
            SentenceDiff::default()
        } else {
            self.differ.diff(&previous_policy, &current_policy)
        };

        debug!(
            magnitude = diff.magnitude(),
            added = diff.added.len(),
            removed = diff.removed.len(),
            real_change_confirmed,
            "sentence diff"
        );

        let signals = Signals {
            has_previous: true,
            hashes_equal: false,
            structural_only: structural.structural_only,
            critical_terms_found: critical.found(),
            real_change_confirmed,
            magnitude: diff.magnitude(),
        };
        let classification = classify(&signals, &self.config.magnitude_bands);

        Ok(ChangeAssessment {
            is_new: false,
            has_changes: classification.has_changes,
            tier: classification.tier,
            description: describe(classification.tier, &structural, &diff, &critical),
            skip_notification: classification.skip_notification,
            magnitude: diff.magnitude(),
            previous_hash: Some(previous_hash),
            current_hash,
            signals: Some(AssessmentSignals {
                structural_similarity: structural.similarity,
                structural_only: structural.structural_only,
                added: diff.added.len(),
                removed: diff.removed.len(),
                critical_terms: critical.terms,
                policy_similarity: verification.similarity,
                real_change_confirmed,
            }),
        })
    }

    /// Policy-relevant sentences that differ between two raw extractions.
    pub fn policy_diff(&self, previous: &str, current: &str) -> SentenceDiff {
        let previous = self.policy_only(&self.sentence_profiles(previous));
        let current = self.policy_only(&self.sentence_profiles(current));
        self.differ.diff(&previous, &current)
    }

    /// Normalized sentences of a raw extraction, in document order.
    pub fn sentences(&self, raw: &str) -> Vec<String> {
        self.policy.sentences(&self.normalizer.normalize(raw))
    }

    fn sentence_profiles(&self, raw: &str) -> Vec<SentenceProfile> {
        SentenceProfile::profile_all(&self.sentences(raw))
    }

    fn policy_only(&self, sentences: &[SentenceProfile]) -> Vec<SentenceProfile> {
        sentences
            .iter()
            .filter(|s| self.policy.is_policy_relevant(&s.text))
            .cloned()
            .collect()
    }

    fn check_size(&self, snapshot: &Snapshot) -> Result<()> {
        let size = snapshot.content.len();
        let limit = self.config.max_content_bytes;
        if size > limit {
            return Err(PolicyDriftError::ContentTooLarge { size, limit });
        }
        Ok(())
    }

    fn unclassified(
        &self,
        previous: Option<&Snapshot>,
        current: &Snapshot,
        reason: impl std::fmt::Display,
    ) -> ChangeAssessment {
        ChangeAssessment::unclassified(
            previous.map(|p| ContentHash::of(&p.content)),
            ContentHash::of(&current.content),
            reason,
        )
    }
}

fn describe(tier: Tier, structural: &StructuralVerdict, diff: &SentenceDiff, critical: &CriticalScan) -> String {
    let counts = format!(
        "{} policy sentence(s) changed ({} added, {} removed)",
        diff.magnitude(),
        diff.added.len(),
        diff.removed.len()
    );
    let terms = critical.terms.iter().cloned().collect::<Vec<_>>().join(", ");

    match tier {
        Tier::StructuralOnly => match structural.similarity {
            Some(similarity) => format!(
                "Only navigation or page structure changed (core similarity {:.2})",
                similarity
            ),
            None => "Only navigation or page structure changed".to_string(),
        },
        Tier::CriticalPolicyInStructural => format!(
            "Critical policy terms changed inside a mostly structural update: {}",
            terms
        ),
        Tier::MajorAddition => format!("Major policy change: {}", counts),
        Tier::ModerateChange => format!("Moderate policy change: {}", counts),
        Tier::MinorModification => format!("Minor policy modification: {}", counts),
        Tier::CriticalMinorChange => format!("Small policy change with critical terms ({}): {}", terms, counts),
        Tier::StructuralWithKeywords => format!(
            "Critical terms ({}) appear in changed text but policy content is essentially unchanged",
            terms
        ),
        Tier::FormattingOnly => format!("Formatting or wording changes only: {}", counts),
        Tier::NewPolicy => "First snapshot of this document".to_string(),
        Tier::NoChange => "Content unchanged".to_string(),
        Tier::Unclassified => "Change could not be classified".to_string(),
    }
}
