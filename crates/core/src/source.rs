//! Data source policy and relative path resolution
//!
//! A dataset may reference images or other assets with paths relative to the
//! place it was loaded from. Before parsing, those paths are rewritten against
//! the source's base directory.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// URL patterns accepted when no configuration overrides them
pub const DEFAULT_ALLOWED_PATTERNS: &[&str] = &[
    r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$",
    r"^(https?://)?(localhost|127\.0\.0\.1)(:\d+)?([/\w .-]*)*/?$",
];

static DEFAULT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    DEFAULT_ALLOWED_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// Decides which data source URLs may be loaded
#[derive(Debug, Clone)]
pub struct SourcePolicy {
    patterns: Vec<Regex>,
}

impl Default for SourcePolicy {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.clone(),
        }
    }
}

impl SourcePolicy {
    /// Build a policy from configured patterns
    ///
    /// An empty list falls back to the default patterns.
    pub fn new(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| Error::from(e).with_context(format!("pattern {p}"))))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches `url`
    pub fn is_allowed(&self, url: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(url))
    }

    /// Fail with `SourceNotAllowed` unless `url` is allowed
    pub fn check(&self, url: &str) -> Result<()> {
        if self.is_allowed(url) {
            Ok(())
        } else {
            tracing::warn!(url, "Rejected data source");
            Err(Error::source_not_allowed(url))
        }
    }
}

/// Directory that relative paths in a dataset loaded from `source` refer to
///
/// For `http(s)://` URLs this is the origin plus the path up to its last `/`.
/// For file paths it is everything before the last separator, or an empty
/// string when there is none.
pub fn base_directory(source: &str) -> String {
    let scheme_end = ["http://", "https://"]
        .iter()
        .find(|scheme| source.starts_with(*scheme))
        .map(|scheme| scheme.len());

    if let Some(scheme_end) = scheme_end {
        let without_query = source.split(['?', '#']).next().unwrap_or(source);

        let rest = &without_query[scheme_end..];
        return match rest.find('/') {
            None => without_query.to_string(),
            Some(path_start) => {
                let origin_len = scheme_end + path_start;
                let path = &without_query[origin_len..];
                let dir = path.rfind('/').map_or("", |last| &path[..last]);
                format!("{}{}", &without_query[..origin_len], dir)
            }
        };
    }

    match source.rfind(['/', '\\']) {
        Some(last) if last > 0 => source[..last].to_string(),
        _ => String::new(),
    }
}

/// Rewrite relative paths anywhere in `value`
///
/// Strings starting with `./` become `{base}/rest` and a lone `.` becomes
/// `base`. Nothing changes when `base` is empty.
pub fn resolve_relative_paths(value: Value, base: &str) -> Value {
    if base.is_empty() {
        return value;
    }

    match value {
        Value::String(s) => Value::String(resolve_path(s, base)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| resolve_relative_paths(item, base))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, resolve_relative_paths(item, base)))
                .collect(),
        ),
        other => other,
    }
}

fn resolve_path(path: String, base: &str) -> String {
    if path == "." {
        base.to_string()
    } else if let Some(rest) = path.strip_prefix("./") {
        format!("{base}/{rest}")
    } else {
        path
    }
}
