mod breadcrumb;
mod normalizer;
mod sentences;
mod vocabulary;

pub use breadcrumb::BreadcrumbStripper;
pub use normalizer::Normalizer;
pub use sentences::{split_sentences, words, SentenceProfile};
pub use vocabulary::Vocabulary;

use regex::Regex;
use crate::error::{PolicyDriftError, Result};

/// Compiles a configured pattern case-insensitively.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){}", pattern)).map_err(|source| PolicyDriftError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
