pub mod defaults;

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{PolicyDriftError, Result};
use crate::similarity::SimilarityStrategy;

/// One ordered boilerplate substitution. Matches are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoilerplateRule {
    pub pattern: String,
    #[serde(default)]
    pub replace_with: String,
}

/// Magnitude cut-offs, each an exclusive lower bound for its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnitudeBands {
    pub major: usize,
    pub moderate: usize,
    pub minor: usize,
}

impl Default for MagnitudeBands {
    fn default() -> Self {
        Self {
            major: defaults::MAJOR_MAGNITUDE,
            moderate: defaults::MODERATE_MAGNITUDE,
            minor: defaults::MINOR_MAGNITUDE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Core word-set Jaccard above which a diff counts as structural only.
    pub structural_threshold: f64,
    /// Verdict when both structural cores reduce to nothing.
    pub empty_core_is_structural: bool,
    pub general_match_threshold: f64,
    pub strict_match_threshold: f64,
    /// Token Jaccard at or above which an apparent policy edit is spurious.
    pub verifier_threshold: f64,
    pub min_sentence_chars: usize,
    pub magnitude_bands: MagnitudeBands,
    pub similarity: SimilarityStrategy,
    pub boilerplate: Vec<BoilerplateRule>,
    pub navigation_patterns: Vec<String>,
    pub breadcrumb_separators: Vec<String>,
    pub breadcrumb_max_words: usize,
    pub policy_terms: Vec<String>,
    pub critical_terms: Vec<String>,
    pub max_content_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            structural_threshold: defaults::STRUCTURAL_THRESHOLD,
            empty_core_is_structural: false,
            general_match_threshold: defaults::GENERAL_MATCH_THRESHOLD,
            strict_match_threshold: defaults::STRICT_MATCH_THRESHOLD,
            verifier_threshold: defaults::VERIFIER_THRESHOLD,
            min_sentence_chars: defaults::MIN_SENTENCE_CHARS,
            magnitude_bands: MagnitudeBands::default(),
            similarity: SimilarityStrategy::default(),
            boilerplate: defaults::boilerplate_rules(),
            navigation_patterns: defaults::navigation_patterns(),
            breadcrumb_separators: defaults::breadcrumb_separators(),
            breadcrumb_max_words: defaults::BREADCRUMB_MAX_WORDS,
            policy_terms: defaults::policy_terms(),
            critical_terms: defaults::critical_terms(),
            max_content_bytes: defaults::MAX_CONTENT_BYTES,
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|_| PolicyDriftError::ConfigNotFound(path.display().to_string()))?;

        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        let ratios = [
            ("structural_threshold", self.structural_threshold),
            ("general_match_threshold", self.general_match_threshold),
            ("strict_match_threshold", self.strict_match_threshold),
            ("verifier_threshold", self.verifier_threshold),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                problems.push(format!("{} must be within [0, 1], got {}", name, value));
            }
        }

        let bands = &self.magnitude_bands;
        if !(bands.major > bands.moderate && bands.moderate > bands.minor) {
            problems.push(format!(
                "magnitude_bands must be strictly decreasing (major > moderate > minor), got {}/{}/{}",
                bands.major, bands.moderate, bands.minor
            ));
        }

        if self.breadcrumb_separators.iter().any(|s| s.trim().is_empty()) {
            problems.push("breadcrumb_separators must not contain blank entries".to_string());
        }

        for rule in &self.boilerplate {
            if enables_multi_line(&rule.pattern) {
                problems.push(format!(
                    "boilerplate pattern '{}' enables multi-line mode; rules also run on collapsed single-line text",
                    rule.pattern
                ));
            }
        }

        if self.max_content_bytes == 0 {
            problems.push("max_content_bytes must be greater than zero".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PolicyDriftError::Config(problems.join("; ")))
        }
    }
}

/// True when an inline flag group such as `(?m)` or `(?im:...)` turns on
/// multi-line anchors.
fn enables_multi_line(pattern: &str) -> bool {
    pattern.match_indices("(?").any(|(at, _)| {
        !pattern[..at].ends_with('\\')
            && pattern[at + 2..]
                .chars()
                .take_while(|c| c.is_ascii_alphabetic())
                .any(|c| c == 'm')
    })
}
