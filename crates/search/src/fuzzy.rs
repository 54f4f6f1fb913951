//! Fuzzy text matching on top of Levenshtein distance.
//!
//! A text matches a query when it contains the query verbatim, or when any of
//! its whitespace-separated tokens lies within the configured edit distance of
//! the query.

use crate::levenshtein_distance;
use crate::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Thresholds for the Levenshtein fallback.
///
/// Every field has its own default so that partial configuration files only
/// override what they mention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyConfig {
    /// Whether the edit-distance fallback runs at all. Exact substring
    /// matching always applies.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Absolute maximum edit distance between a token and the query
    #[serde(default = "default_max_distance")]
    pub max_distance: usize,

    /// Also accept tokens whose distance is small relative to the query length
    #[serde(default = "default_true")]
    pub use_relative: bool,

    /// Maximum `distance / query length` accepted when `use_relative` is set
    #[serde(default = "default_max_relative_distance")]
    pub max_relative_distance: f64,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distance: default_max_distance(),
            use_relative: true,
            max_relative_distance: default_max_relative_distance(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_distance() -> usize {
    2
}

fn default_max_relative_distance() -> f64 {
    0.25
}

impl FuzzyConfig {
    /// Configuration with the edit-distance fallback switched off.
    #[must_use]
    pub fn exact_only() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Check that the thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.max_relative_distance.is_finite() || self.max_relative_distance < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "max_relative_distance must be a finite, non-negative number (got {})",
                self.max_relative_distance
            )));
        }
        Ok(())
    }
}

/// Decides whether a text fuzzily contains a query.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    config: FuzzyConfig,
    normalize_case: bool,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(FuzzyConfig::default())
    }
}

impl FuzzyMatcher {
    /// Create a matcher. Case normalization is on.
    pub fn new(config: FuzzyConfig) -> Self {
        Self {
            config,
            normalize_case: true,
        }
    }

    /// Lowercase text and query before comparing (`true`, the default) or
    /// compare them literally (`false`).
    #[must_use]
    pub fn normalize_case(mut self, normalize: bool) -> Self {
        self.normalize_case = normalize;
        self
    }

    /// The thresholds in use.
    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    /// Returns true if `text` fuzzily matches `query`.
    ///
    /// An empty query matches everything.
    pub fn is_match(&self, text: &str, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        let (text, query) = if self.normalize_case {
            (text.to_lowercase(), query.trim().to_lowercase())
        } else {
            (text.trim().to_string(), query.trim().to_string())
        };

        if text.contains(query.as_str()) {
            return true;
        }

        if !self.config.enabled {
            return false;
        }

        let query_len = query.chars().count();

        text.split_whitespace().any(|token| {
            let distance = levenshtein_distance(token, &query);
            if distance <= self.config.max_distance {
                return true;
            }
            self.config.use_relative
                && query_len > 0
                && distance as f64 / query_len as f64 <= self.config.max_relative_distance
        })
    }
}

/// Check `text` against `query` with the default thresholds and case
/// normalization.
///
/// # Example
/// ```
/// use poimap_search::fuzzy_match;
///
/// assert!(fuzzy_match("Bucharest", "Buchrest"));
/// assert!(fuzzy_match("Cluj-Napoca", "cluj"));
/// assert!(!fuzzy_match("Constanta", "Oradea"));
/// ```
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    FuzzyMatcher::default().is_match(text, query)
}
