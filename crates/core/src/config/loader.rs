//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations
    ///
    /// An explicit path must exist. Without one, defaults are used when no
    /// candidate file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        match &config_path {
            Some(p) => tracing::debug!(path = %p.display(), "Loaded configuration"),
            None => tracing::debug!("No configuration file found, using defaults"),
        }

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        schema.validate()?;
        Ok(Self { schema, path: None })
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.schema)?)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".poimap.toml", "poimap.toml", ".config/poimap.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .chain(dirs::config_dir().map(|dir| dir.join("poimap").join("config.toml")))
        .find(|candidate| candidate.is_file())
}

/// Load, parse and validate a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let context = format!("Reading configuration from {}", path.display());

    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(context.clone())?;

    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(context.clone())?;

    schema.validate().context(context)?;
    Ok(schema)
}
