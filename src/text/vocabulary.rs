use std::collections::BTreeSet;
use regex::Regex;
use crate::error::Result;
use super::compile_pattern;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive term list matched on whole words and phrases, so "fee"
/// does not fire inside "feedback". Terms that begin or end with a symbol
/// ("18+") are anchored only on their word side.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    matcher: Option<Regex>,
}

impl Vocabulary {
    pub fn new(terms: &[String]) -> Result<Self> {
        let mut terms: Vec<String> = terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        // Longest first: the regex alternation is leftmost-first.
        terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));

        let matcher = if terms.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = terms.iter().map(|t| Self::alternative(t)).collect();
            Some(compile_pattern(&format!("(?:{})", alternatives.join("|")))?)
        };

        Ok(Self { terms, matcher })
    }

    fn alternative(term: &str) -> String {
        let leading = term.chars().next().is_some_and(is_word_char);
        let trailing = term.chars().last().is_some_and(is_word_char);
        format!(
            "{}{}{}",
            if leading { r"\b" } else { "" },
            regex::escape(term),
            if trailing { r"\b" } else { "" },
        )
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(text))
    }

    pub fn find_terms(&self, text: &str) -> BTreeSet<String> {
        let Some(matcher) = &self.matcher else {
            return BTreeSet::new();
        };

        matcher
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> Vocabulary {
        let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        Vocabulary::new(&terms).unwrap()
    }

    #[test]
    fn test_whole_word_match() {
        let v = vocab(&["fee", "ban"]);
        assert!(v.matches("a new fee applies"));
        assert!(!v.matches("send feedback"));
        assert!(!v.matches("urban planning"));
    }

    #[test]
    fn test_case_insensitive() {
        let v = vocab(&["prohibited"]);
        assert!(v.matches("PROHIBITED content"));
    }

    #[test]
    fn test_phrase_prefers_longest() {
        let v = vocab(&["must", "must not"]);
        let found = v.find_terms("ads must not promote");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["must not"]);
    }

    #[test]
    fn test_symbol_terms() {
        let v = vocab(&["18+"]);
        assert!(v.matches("content rated 18+ only"));
        assert!(v.matches("rated 18+"));
        assert!(!v.matches("118+"));
    }

    #[test]
    fn test_dedupes_terms() {
        let v = vocab(&["Fee", "fee", " fee "]);
        assert_eq!(v.terms(), &["fee".to_string()]);
    }

    #[test]
    fn test_empty_vocabulary_never_matches() {
        let v = vocab(&[]);
        assert!(v.is_empty());
        assert!(!v.matches("anything"));
        assert!(v.find_terms("anything").is_empty());
    }
}
