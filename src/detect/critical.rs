use std::collections::BTreeSet;
use serde::Serialize;
use tracing::debug;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::text::{SentenceProfile, Vocabulary};
use super::differ::{SentenceDiff, SentenceDiffer};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CriticalScan {
    /// Critical terms found in changed sentences, lowercased.
    pub terms: BTreeSet<String>,
    pub changed_sentences: usize,
}

impl CriticalScan {
    pub fn found(&self) -> bool {
        !self.terms.is_empty()
    }
}

/// Looks for high-consequence vocabulary in every changed sentence of the
/// whole document, policy-relevant or not.
#[derive(Debug, Clone)]
pub struct CriticalTermScanner {
    vocabulary: Vocabulary,
    differ: SentenceDiffer,
}

impl CriticalTermScanner {
    pub fn new(vocabulary: Vocabulary, differ: SentenceDiffer) -> Self {
        Self { vocabulary, differ }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(
            Vocabulary::new(&config.critical_terms)?,
            SentenceDiffer::new(config.similarity, config.strict_match_threshold),
        ))
    }

    pub fn scan(&self, previous: &[SentenceProfile], current: &[SentenceProfile]) -> CriticalScan {
        self.scan_diff(&self.differ.diff(previous, current))
    }

    pub fn scan_diff(&self, diff: &SentenceDiff) -> CriticalScan {
        let terms: BTreeSet<String> = diff
            .changed()
            .flat_map(|sentence| self.vocabulary.find_terms(sentence))
            .collect();

        debug!(
            changed = diff.magnitude(),
            terms = ?terms,
            "critical term scan"
        );

        CriticalScan {
            terms,
            changed_sentences: diff.magnitude(),
        }
    }
}
