use crate::config::EngineConfig;
use crate::error::Result;
use crate::text::{split_sentences, Vocabulary};

/// Keeps the sentences of normalized text that use policy vocabulary.
#[derive(Debug, Clone)]
pub struct PolicyExtractor {
    vocabulary: Vocabulary,
    min_sentence_chars: usize,
}

impl PolicyExtractor {
    pub fn new(vocabulary: Vocabulary, min_sentence_chars: usize) -> Self {
        Self { vocabulary, min_sentence_chars }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(
            Vocabulary::new(&config.policy_terms)?,
            config.min_sentence_chars,
        ))
    }

    pub fn sentences(&self, normalized: &str) -> Vec<String> {
        split_sentences(normalized, self.min_sentence_chars)
    }

    pub fn is_policy_relevant(&self, sentence: &str) -> bool {
        self.vocabulary.matches(sentence)
    }

    pub fn filter(&self, sentences: &[String]) -> Vec<String> {
        sentences
            .iter()
            .filter(|s| self.is_policy_relevant(s))
            .cloned()
            .collect()
    }

    pub fn extract(&self, normalized: &str) -> Vec<String> {
        self.filter(&self.sentences(normalized))
    }
}
