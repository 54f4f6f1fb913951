//! CLI command implementations

pub mod cluster_radius;
pub mod config;
pub mod distance;
pub mod search;
pub mod view;
pub mod viewport;

use crate::OutputFormat;
use anyhow::Result;
use poimap_core::config::Config;
use poimap_core::dataset::Dataset;
use poimap_core::source::SourcePolicy;
use poimap_core::ResultExt;
use std::path::Path;

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl Context {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Load a dataset file
///
/// With `base_url`, the URL must pass the configured source policy and
/// relative paths are resolved against it instead of the file's directory.
pub fn load_dataset(ctx: &Context, path: &Path, base_url: Option<&str>) -> Result<Dataset> {
    tracing::debug!(path = %path.display(), base_url, "Loading dataset");

    let Some(url) = base_url else {
        return Ok(Dataset::from_path(path)?);
    };

    let policy = SourcePolicy::new(&ctx.config.schema.source.allowed_patterns)?;
    policy.check(url)?;
    tracing::debug!(url, "Base URL allowed by source policy");

    let content = std::fs::read_to_string(path)
        .map_err(poimap_core::Error::from)
        .context(format!("Reading dataset {}", path.display()))?;
    Ok(Dataset::from_json_str(&content, Some(url))?)
}
