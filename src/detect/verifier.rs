use std::collections::HashSet;
use serde::Serialize;
use tracing::debug;
use crate::similarity::jaccard;
use crate::text::SentenceProfile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verification {
    /// `None` when neither side has policy sentences.
    pub similarity: Option<f64>,
    pub confirmed: bool,
}

/// Second opinion on whether policy content really moved: one token
/// Jaccard over the pooled vocabulary of each side's policy sentences.
///
/// Pooling makes the check insensitive to sentence boundaries and order, so
/// a reflowed or re-split paragraph stays unconfirmed while a new clause
/// that brings new words lowers the score.
#[derive(Debug, Clone, Copy)]
pub struct ChangeVerifier {
    threshold: f64,
}

impl ChangeVerifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn verify(&self, previous: &[SentenceProfile], current: &[SentenceProfile]) -> Verification {
        let previous_words = pooled_words(previous);
        let current_words = pooled_words(current);

        let similarity = jaccard(&previous_words, &current_words);
        let confirmed = similarity.is_some_and(|s| s < self.threshold);

        debug!(
            ?similarity,
            confirmed,
            previous_words = previous_words.len(),
            current_words = current_words.len(),
            "policy change verification"
        );

        Verification { similarity, confirmed }
    }
}

fn pooled_words(sentences: &[SentenceProfile]) -> HashSet<&str> {
    sentences
        .iter()
        .flat_map(|s| s.words.iter().map(String::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles(sentences: &[&str]) -> Vec<SentenceProfile> {
        sentences.iter().map(|s| SentenceProfile::new(*s)).collect()
    }

    #[test]
    fn test_resplit_paragraph_is_not_confirmed() {
        let previous = profiles(&["ads must not promote gambling services and advertisers must be licensed"]);
        let current = profiles(&["ads must not promote gambling services", "advertisers must be licensed"]);
        let verification = ChangeVerifier::new(0.8).verify(&previous, &current);
        assert_eq!(verification.similarity, Some(1.0));
        assert!(!verification.confirmed);
    }

    #[test]
    fn test_new_vocabulary_is_confirmed() {
        let previous = profiles(&["ads must not promote gambling services"]);
        let current = profiles(&[
            "ads must not promote gambling services",
            "dangerous products are now prohibited effective january 2026",
        ]);
        let verification = ChangeVerifier::new(0.8).verify(&previous, &current);
        assert!(verification.similarity.unwrap() < 0.5);
        assert!(verification.confirmed);
    }

    #[test]
    fn test_small_edit_in_long_document_is_diluted() {
        let previous = profiles(&[
            "alcohol ads are allowed in canada",
            "advertisers must verify their business identity before campaigns launch",
            "healthcare advertisers need certification from the regional regulator",
        ]);
        let mut current = previous.clone();
        current[0] = SentenceProfile::new("alcohol ads are prohibited in canada");

        assert!(!ChangeVerifier::new(0.8).verify(&previous, &current).confirmed);
        assert!(ChangeVerifier::new(0.95).verify(&previous, &current).confirmed);
    }

    #[test]
    fn test_no_policy_text_on_either_side() {
        let verification = ChangeVerifier::new(0.8).verify(&[], &[]);
        assert_eq!(verification.similarity, None);
        assert!(!verification.confirmed);
    }

    #[test]
    fn test_emptied_policy_is_confirmed() {
        let previous = profiles(&["ads must not promote gambling services"]);
        let verification = ChangeVerifier::new(0.8).verify(&previous, &[]);
        assert_eq!(verification.similarity, Some(0.0));
        assert!(verification.confirmed);
    }
}
