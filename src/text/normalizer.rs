use regex::Regex;
use crate::config::{BoilerplateRule, EngineConfig};
use crate::error::Result;
use super::breadcrumb::BreadcrumbStripper;
use super::compile_pattern;
use super::vocabulary::Vocabulary;

/// Upper bound on passes while searching for a fixed point. Each pass only
/// deletes text or substitutes placeholders the rules never match, so real
/// input settles in two or three.
const MAX_PASSES: usize = 8;

#[derive(Debug, Clone)]
struct CompiledRule {
    regex: Regex,
    replace_with: String,
}

/// Turns a raw extraction into comparable text: breadcrumbs and boilerplate
/// removed, timestamps genericized, whitespace collapsed, lowercased.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: Vec<CompiledRule>,
    breadcrumbs: BreadcrumbStripper,
}

impl Normalizer {
    pub fn new(rules: &[BoilerplateRule], breadcrumbs: BreadcrumbStripper) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    regex: compile_pattern(&rule.pattern)?,
                    replace_with: rule.replace_with.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules, breadcrumbs })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let breadcrumbs = BreadcrumbStripper::conservative(
            &config.breadcrumb_separators,
            config.breadcrumb_max_words,
        )?
        .protecting(Vocabulary::new(&config.critical_terms)?);
        Self::new(&config.boilerplate, breadcrumbs)
    }

    /// Idempotent: the result is a fixed point of `normalize`.
    pub fn normalize(&self, raw: &str) -> String {
        let mut current = self.normalize_once(raw);
        for _ in 1..MAX_PASSES {
            let next = self.normalize_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn normalize_once(&self, text: &str) -> String {
        let mut text = self.breadcrumbs.strip(text);

        for rule in &self.rules {
            text = rule
                .regex
                .replace_all(&text, rule.replace_with.as_str())
                .into_owned();
        }

        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}
