use std::collections::HashSet;
use serde::Serialize;
use crate::similarity::SimilarityStrategy;
use crate::text::SentenceProfile;

/// Sentences present on one side only, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentenceDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SentenceDiff {
    pub fn magnitude(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn changed(&self) -> impl Iterator<Item = &str> {
        self.added.iter().chain(self.removed.iter()).map(String::as_str)
    }
}

/// Pairs each sentence with a counterpart on the other side scoring at
/// least `threshold`; sentences without one are added or removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceDiffer {
    strategy: SimilarityStrategy,
    threshold: f64,
}

impl SentenceDiffer {
    pub fn new(strategy: SimilarityStrategy, threshold: f64) -> Self {
        Self { strategy, threshold }
    }

    pub fn strategy(&self) -> SimilarityStrategy {
        self.strategy
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn diff(&self, previous: &[SentenceProfile], current: &[SentenceProfile]) -> SentenceDiff {
        SentenceDiff {
            added: self.unmatched(current, previous),
            removed: self.unmatched(previous, current),
        }
    }

    pub fn diff_text(&self, previous: &[String], current: &[String]) -> SentenceDiff {
        self.diff(
            &SentenceProfile::profile_all(previous),
            &SentenceProfile::profile_all(current),
        )
    }

    fn unmatched(&self, side: &[SentenceProfile], other: &[SentenceProfile]) -> Vec<String> {
        let exact: HashSet<&str> = other.iter().map(|s| s.text.as_str()).collect();

        side.iter()
            .filter(|sentence| !exact.contains(sentence.text.as_str()))
            .filter(|sentence| !self.has_counterpart(sentence, other))
            .map(|sentence| sentence.text.clone())
            .collect()
    }

    fn has_counterpart(&self, sentence: &SentenceProfile, other: &[SentenceProfile]) -> bool {
        other
            .iter()
            .any(|candidate| self.strategy.score(sentence, candidate) >= self.threshold)
    }
}
