//! Configuration schema definitions
//!
//! Every field carries its own serde default, so a file only has to mention
//! what it changes.

use crate::error::{Error, Result};
use poimap_geo::{ClusterConfig, ViewportConfig};
use poimap_search::FuzzyConfig;
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub search: FuzzyConfig,

    #[serde(default)]
    pub viewport: ViewportConfig,

    #[serde(default)]
    pub cluster: ClusterConfig,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.viewer.validate()?;
        self.search.validate()?;
        self.viewport.validate()?;
        self.cluster.validate()?;
        Ok(())
    }
}

/// Marker icon style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    #[default]
    Default,
    Dot,
    Text,
}

/// Viewer presentation flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub type_of_icon: IconType,

    /// Show the record list next to the map
    #[serde(default = "default_true")]
    pub is_list_enabled: bool,

    /// Zoom to a record when it is selected in the list
    #[serde(default)]
    pub is_zoom_on_select_enabled: bool,

    /// Only list records inside the viewport
    #[serde(default)]
    pub is_list_filtered_to_viewport: bool,

    /// Only show the record whose id is in the URL
    #[serde(default = "default_true")]
    pub is_show_only_url_record_enabled: bool,

    /// Cap the rendered markers with the viewport reducer
    #[serde(default)]
    pub is_aggressive_optimization_enabled: bool,

    /// Padding ratio applied when fitting the map to all records
    #[serde(default = "default_bounds_padding")]
    pub bounds_padding: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            type_of_icon: IconType::Default,
            is_list_enabled: true,
            is_zoom_on_select_enabled: false,
            is_list_filtered_to_viewport: false,
            is_show_only_url_record_enabled: true,
            is_aggressive_optimization_enabled: false,
            bounds_padding: default_bounds_padding(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_bounds_padding() -> f64 {
    0.6
}

impl ViewerConfig {
    /// Check numeric fields
    pub fn validate(&self) -> Result<()> {
        if !self.bounds_padding.is_finite() || self.bounds_padding < 0.0 {
            return Err(Error::config_validation(format!(
                "viewer.bounds_padding must be finite and non-negative (got {})",
                self.bounds_padding
            )));
        }
        Ok(())
    }

    /// Apply dataset-provided overrides. Supplied fields win.
    #[must_use]
    pub fn merge(&self, patch: &ViewerConfigPatch) -> Self {
        Self {
            type_of_icon: patch.type_of_icon.unwrap_or(self.type_of_icon),
            is_list_enabled: patch.is_list_enabled.unwrap_or(self.is_list_enabled),
            is_zoom_on_select_enabled: patch
                .is_zoom_on_select_enabled
                .unwrap_or(self.is_zoom_on_select_enabled),
            is_list_filtered_to_viewport: patch
                .is_list_filtered_to_viewport
                .unwrap_or(self.is_list_filtered_to_viewport),
            is_show_only_url_record_enabled: patch
                .is_show_only_url_record_enabled
                .unwrap_or(self.is_show_only_url_record_enabled),
            is_aggressive_optimization_enabled: patch
                .is_aggressive_optimization_enabled
                .unwrap_or(self.is_aggressive_optimization_enabled),
            bounds_padding: patch.bounds_padding.unwrap_or(self.bounds_padding),
        }
    }
}

/// Viewer overrides shipped inside a dataset document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_icon: Option<IconType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_list_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_zoom_on_select_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_list_filtered_to_viewport: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_show_only_url_record_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_aggressive_optimization_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds_padding: Option<f64>,
}

impl ViewerConfigPatch {
    /// Returns true if the patch overrides nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the overridden values with the same rules as the config file
    pub fn validate(&self) -> Result<()> {
        ViewerConfig::default().merge(self).validate()
    }
}

/// Cache sizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Number of search queries whose results are memoized
    #[serde(default = "default_filter_cache_capacity")]
    pub filter_cache_capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            filter_cache_capacity: default_filter_cache_capacity(),
        }
    }
}

fn default_filter_cache_capacity() -> usize {
    64
}

/// Data source restrictions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Regexes a dataset URL must match
    #[serde(default = "default_allowed_patterns")]
    pub allowed_patterns: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            allowed_patterns: default_allowed_patterns(),
        }
    }
}

fn default_allowed_patterns() -> Vec<String> {
    crate::source::DEFAULT_ALLOWED_PATTERNS
        .iter()
        .map(|p| (*p).to_string())
        .collect()
}

/// Logging output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Include the module path in log lines
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            show_target: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
