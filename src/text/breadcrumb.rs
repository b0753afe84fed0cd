use std::ops::Range;
use regex::Regex;
use crate::error::Result;
use super::compile_pattern;
use super::vocabulary::Vocabulary;

const SENTENCE_PUNCTUATION: [char; 4] = ['.', '!', '?', ':'];

/// Cuts breadcrumb trails ("Home > Policies > Ads") out of each line,
/// leaving the rest of the line in place.
///
/// A separator only counts when surrounded by whitespace, so "and/or" and
/// URLs survive. Fragments between two separators must be short. The text
/// before the first and after the last separator joins the trail whole when
/// it is short, and otherwise gives up only its adjacent word; a trail that
/// borrows a word that way needs at least two separators. Conservative
/// strippers also refuse fragments carrying sentence punctuation.
///
/// Trails containing a protected term are never cut.
#[derive(Debug, Clone)]
pub struct BreadcrumbStripper {
    separator: Option<Regex>,
    max_fragment_words: usize,
    allow_punctuation: bool,
    protected: Option<Vocabulary>,
}

impl BreadcrumbStripper {
    pub fn new(separators: &[String], max_fragment_words: usize, allow_punctuation: bool) -> Result<Self> {
        let separator = if separators.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = separators
                .iter()
                .map(|s| regex::escape(s.trim()))
                .collect();
            Some(compile_pattern(&format!(r"\s+(?:{})\s+", alternatives.join("|")))?)
        };

        Ok(Self {
            separator,
            max_fragment_words,
            allow_punctuation,
            protected: None,
        })
    }

    pub fn conservative(separators: &[String], max_fragment_words: usize) -> Result<Self> {
        Self::new(separators, max_fragment_words, false)
    }

    /// Also cuts fragments that carry sentence punctuation.
    pub fn aggressive(separators: &[String], max_fragment_words: usize) -> Result<Self> {
        Self::new(separators, max_fragment_words, true)
    }

    pub fn protecting(mut self, terms: Vocabulary) -> Self {
        self.protected = (!terms.is_empty()).then_some(terms);
        self
    }

    /// True when the whole line is a single trail.
    pub fn is_breadcrumb(&self, line: &str) -> bool {
        match self.trails(line).as_slice() {
            [only] => line[..only.start].trim().is_empty() && line[only.end..].trim().is_empty(),
            _ => false,
        }
    }

    pub fn strip(&self, text: &str) -> String {
        if self.separator.is_none() {
            return text.to_string();
        }

        text.lines()
            .map(|line| self.strip_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn strip_line(&self, line: &str) -> String {
        let trails = self.trails(line);
        if trails.is_empty() {
            return line.to_string();
        }

        let mut kept = String::with_capacity(line.len());
        let mut last = 0;
        for trail in trails {
            kept.push_str(&line[last..trail.start]);
            kept.push(' ');
            last = trail.end;
        }
        kept.push_str(&line[last..]);
        kept
    }

    fn trails(&self, line: &str) -> Vec<Range<usize>> {
        let Some(separator) = &self.separator else {
            return Vec::new();
        };

        let separators: Vec<Range<usize>> = separator.find_iter(line).map(|m| m.range()).collect();
        let Some(last) = separators.len().checked_sub(1) else {
            return Vec::new();
        };

        // Fragment `i` lies before separator `i`; fragment `last + 1` ends the line.
        let fragment = |i: usize| -> Range<usize> {
            let start = if i == 0 { 0 } else { separators[i - 1].end };
            let end = separators.get(i).map_or(line.len(), |s| s.start);
            start..end
        };

        let mut trails = Vec::new();
        let mut first = 0;
        while first <= last {
            let mut end = first;
            while end < last && self.is_short(&line[fragment(end + 1)]) {
                end += 1;
            }

            let trail = self.trail_span(
                line,
                fragment(first),
                fragment(end + 1),
                first == 0,
                end == last,
                end > first,
            );
            if let Some(trail) = trail {
                trails.push(trail);
            }
            first = end + 1;
        }
        trails
    }

    fn trail_span(
        &self,
        line: &str,
        left: Range<usize>,
        right: Range<usize>,
        starts_line: bool,
        ends_line: bool,
        chained: bool,
    ) -> Option<Range<usize>> {
        let left_text = &line[left.clone()];
        let (start, left_cut) = if starts_line && self.is_short(left_text) {
            (left.start + left_text.len() - left_text.trim_start().len(), false)
        } else {
            let text = left_text.trim_end();
            let word = text.split_whitespace().last()?;
            if !self.is_short(word) {
                return None;
            }
            (left.start + text.len() - word.len(), true)
        };

        let right_text = &line[right.clone()];
        let (end, right_cut) = if ends_line && self.is_short(right_text) {
            (right.start + right_text.trim_end().len(), false)
        } else {
            let text = right_text.trim_start();
            let word = text.split_whitespace().next()?;
            if !self.is_short(word) {
                return None;
            }
            (right.start + right_text.len() - text.len() + word.len(), true)
        };

        if (left_cut || right_cut) && !chained {
            return None;
        }

        if self.protected.as_ref().is_some_and(|p| p.matches(&line[start..end])) {
            return None;
        }

        Some(start..end)
    }

    fn is_short(&self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        !fragment.is_empty()
            && fragment.split_whitespace().count() <= self.max_fragment_words
            && (self.allow_punctuation || !fragment.contains(SENTENCE_PUNCTUATION))
    }
}
