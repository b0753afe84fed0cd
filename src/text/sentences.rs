use std::collections::HashSet;

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Splits text on sentence-terminal punctuation followed by whitespace or the
/// end of input. Fragments of `min_chars` characters or fewer are dropped.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut push = |fragment: &str| {
        let sentence = fragment.trim().trim_end_matches(is_terminal).trim_end();
        if sentence.chars().count() > min_chars {
            sentences.push(sentence.to_string());
        }
    };

    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }
        while let Some(&(_, next)) = chars.peek() {
            if !is_terminal(next) {
                break;
            }
            chars.next();
        }
        match chars.peek() {
            Some(&(end, next)) if next.is_whitespace() => {
                push(&text[start..end]);
                start = end;
            }
            None => {
                push(&text[start..]);
                start = text.len();
            }
            Some(_) => {}
        }
    }
    if start < text.len() {
        push(&text[start..]);
    }

    sentences
}

/// Alphanumeric word tokens.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// A sentence with its word and word-bigram sets precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceProfile {
    pub text: String,
    pub words: HashSet<String>,
    pub bigrams: HashSet<String>,
}

impl SentenceProfile {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens: Vec<&str> = words(&text).collect();
        let bigrams = tokens
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1]))
            .collect();
        let words = tokens.iter().map(|w| w.to_string()).collect();

        Self { text, words, bigrams }
    }

    pub fn profile_all(sentences: &[String]) -> Vec<SentenceProfile> {
        sentences.iter().map(|s| SentenceProfile::new(s.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_terminal_punctuation() {
        let text = "ads must not promote gambling services. dangerous products are prohibited! is crypto allowed for advertisers?";
        assert_eq!(
            split_sentences(text, 20),
            vec![
                "ads must not promote gambling services",
                "dangerous products are prohibited",
                "is crypto allowed for advertisers",
            ]
        );
    }

    #[test]
    fn test_drops_short_fragments() {
        let text = "home. policies. advertisers must verify their identity before launch.";
        assert_eq!(
            split_sentences(text, 20),
            vec!["advertisers must verify their identity before launch"]
        );
    }

    #[test]
    fn test_decimal_points_do_not_split() {
        let text = "the fee rises from 1.5 percent to 2.0 percent for all advertisers.";
        assert_eq!(split_sentences(text, 20).len(), 1);
    }

    #[test]
    fn test_trailing_text_without_terminal() {
        let text = "first sentence is long enough here. second sentence without a full stop";
        assert_eq!(split_sentences(text, 20).len(), 2);
    }

    #[test]
    fn test_collapsed_ellipsis() {
        let text = "wait for the announcement coming soon... then comply with every rule!!";
        assert_eq!(
            split_sentences(text, 20),
            vec!["wait for the announcement coming soon", "then comply with every rule"]
        );
    }

    #[test]
    fn test_profile_tokens() {
        let profile = SentenceProfile::new("ads must not, must not promote");
        assert_eq!(profile.words.len(), 4);
        assert!(profile.bigrams.contains("must not"));
        assert!(profile.bigrams.contains("not promote"));
        assert_eq!(profile.bigrams.len(), 4);
    }
}
