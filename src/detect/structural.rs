use std::collections::HashSet;
use regex::Regex;
use serde::Serialize;
use tracing::debug;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::similarity::jaccard;
use crate::text::{compile_pattern, words, BreadcrumbStripper, Normalizer};

/// Words of this many characters or fewer are ignored in the core.
const MIN_CORE_WORD_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StructuralVerdict {
    /// `None` when both cores are empty.
    pub similarity: Option<f64>,
    pub structural_only: bool,
}

/// Decides whether a diff is confined to navigation and page chrome by
/// comparing the word sets of each page's core text.
#[derive(Debug, Clone)]
pub struct StructuralDetector {
    normalizer: Normalizer,
    breadcrumbs: BreadcrumbStripper,
    navigation: Vec<Regex>,
    threshold: f64,
    empty_core_is_structural: bool,
}

impl StructuralDetector {
    pub fn new(
        normalizer: Normalizer,
        breadcrumbs: BreadcrumbStripper,
        navigation: Vec<Regex>,
        threshold: f64,
        empty_core_is_structural: bool,
    ) -> Self {
        Self {
            normalizer,
            breadcrumbs,
            navigation,
            threshold,
            empty_core_is_structural,
        }
    }

    pub fn from_config(config: &EngineConfig, normalizer: Normalizer) -> Result<Self> {
        let breadcrumbs =
            BreadcrumbStripper::aggressive(&config.breadcrumb_separators, config.breadcrumb_max_words)?;
        let navigation = config
            .navigation_patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(
            normalizer,
            breadcrumbs,
            navigation,
            config.structural_threshold,
            config.empty_core_is_structural,
        ))
    }

    /// The page with trails, boilerplate and navigation phrases removed.
    pub fn core(&self, raw: &str) -> String {
        let mut core = self.normalizer.normalize(&self.breadcrumbs.strip(raw));
        for pattern in &self.navigation {
            core = pattern.replace_all(&core, " ").into_owned();
        }
        core.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn core_words(&self, raw: &str) -> HashSet<String> {
        words(&self.core(raw))
            .filter(|w| w.chars().count() > MIN_CORE_WORD_CHARS)
            .map(str::to_string)
            .collect()
    }

    pub fn compare(&self, previous: &str, current: &str) -> StructuralVerdict {
        let previous_words = self.core_words(previous);
        let current_words = self.core_words(current);

        let similarity = jaccard(&previous_words, &current_words);
        let structural_only = match similarity {
            Some(s) => s > self.threshold,
            None => self.empty_core_is_structural,
        };

        debug!(
            ?similarity,
            structural_only,
            previous_words = previous_words.len(),
            current_words = current_words.len(),
            "structural comparison"
        );

        StructuralVerdict { similarity, structural_only }
    }
}
