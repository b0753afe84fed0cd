use std::collections::HashSet;
use std::hash::Hash;
use serde::{Deserialize, Serialize};
use crate::text::SentenceProfile;

/// Score given when one sentence contains the other verbatim.
pub const SUBSTRING_SIMILARITY: f64 = 0.95;
pub const PHRASE_WEIGHT: f64 = 0.7;
pub const WORD_WEIGHT: f64 = 0.3;

/// |A ∩ B| / |A ∪ B|, or `None` when both sets are empty.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> Option<f64> {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        None
    } else {
        Some(intersection as f64 / union as f64)
    }
}

/// How two sentences are scored against each other, in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityStrategy {
    /// Plain Jaccard over the word sets.
    TokenJaccard,
    /// Containment scores 0.95; otherwise word-bigram overlap weighted with
    /// word overlap, never below the plain word Jaccard.
    #[default]
    PhraseWeighted,
}

impl SimilarityStrategy {
    pub fn score(&self, a: &SentenceProfile, b: &SentenceProfile) -> f64 {
        if a.text == b.text {
            return 1.0;
        }

        let word_similarity = jaccard(&a.words, &b.words).unwrap_or(0.0);

        match self {
            SimilarityStrategy::TokenJaccard => word_similarity,
            SimilarityStrategy::PhraseWeighted => {
                if a.text.is_empty() || b.text.is_empty() {
                    return 0.0;
                }
                if a.text.contains(&b.text) || b.text.contains(&a.text) {
                    return SUBSTRING_SIMILARITY;
                }
                let phrase_similarity = jaccard(&a.bigrams, &b.bigrams).unwrap_or(0.0);
                let weighted = PHRASE_WEIGHT * phrase_similarity + WORD_WEIGHT * word_similarity;
                weighted.max(word_similarity)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityStrategy::TokenJaccard => "token_jaccard",
            SimilarityStrategy::PhraseWeighted => "phrase_weighted",
        }
    }
}
