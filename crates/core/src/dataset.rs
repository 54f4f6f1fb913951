//! Dataset ingestion
//!
//! A dataset document is either a bare array of records or an object carrying
//! `metadata`, `records` and optional viewer overrides under `config`.

use crate::config::{ViewerConfig, ViewerConfigPatch};
use crate::error::{Error, Result, ResultExt};
use crate::record::{assign_ids, Metadata, RawRecord, Record};
use crate::source::{base_directory, resolve_relative_paths};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum Response {
    Records(Vec<RawRecord>),
    Wrapped {
        #[serde(default)]
        metadata: Metadata,
        records: Vec<RawRecord>,
        #[serde(default)]
        config: Option<ViewerConfigPatch>,
    },
}

/// Records loaded from one source, with their metadata and viewer overrides
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub metadata: Metadata,
    pub overrides: ViewerConfigPatch,
    pub records: Vec<Record>,
}

impl Dataset {
    /// Parse a dataset document
    ///
    /// When `source` is given, relative paths in the document are resolved
    /// against its base directory first.
    pub fn from_json_str(json: &str, source: Option<&str>) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value, source)
    }

    /// Build a dataset from an already parsed document
    pub fn from_value(value: Value, source: Option<&str>) -> Result<Self> {
        let value = match source {
            Some(source) => resolve_relative_paths(value, &base_directory(source)),
            None => value,
        };

        let response: Response = serde_json::from_value(value).map_err(|e| {
            Error::invalid_dataset(format!("Unrecognized dataset shape: {e}")).with_source(e)
        })?;

        let (metadata, overrides, raw) = match response {
            Response::Records(records) => (Metadata::default(), ViewerConfigPatch::default(), records),
            Response::Wrapped {
                metadata,
                records,
                config,
            } => (metadata, config.unwrap_or_default(), records),
        };

        overrides
            .validate()
            .context("Invalid viewer overrides in dataset config")?;

        let generated = raw
            .iter()
            .filter(|r| r.id.as_deref().is_none_or(str::is_empty))
            .count();
        let records = assign_ids(raw);

        tracing::info!(
            records = records.len(),
            generated_ids = generated,
            overrides = !overrides.is_empty(),
            "Loaded dataset"
        );

        Ok(Self {
            metadata,
            overrides,
            records,
        })
    }

    /// Read a dataset from a local file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let content = std::fs::read_to_string(path).map_err(Error::from)?;
        let source = path.to_string_lossy();
        Self::from_json_str(&content, Some(source.as_ref()))
            .context(format!("Loading dataset from {}", path.display()))
    }

    /// Viewer settings for this dataset: `base` with the dataset's overrides applied
    pub fn viewer_config(&self, base: &ViewerConfig) -> ViewerConfig {
        base.merge(&self.overrides)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IconType;
    use crate::record::Description;
    use crate::ErrorCode;
    use std::io::Write;

    const BARE: &str = r#"[
        {"latitude": 44.43, "longitude": 26.10, "title": "Bucharest"},
        {"id": "cj", "latitude": 46.77, "longitude": 23.59, "title": "Cluj-Napoca",
         "description": ["Botanical garden", "Old town"]}
    ]"#;

    #[test]
    fn test_bare_array() {
        let dataset = Dataset::from_json_str(BARE, None).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].id.as_str(), "id_0");
        assert_eq!(dataset.records[1].id.as_str(), "cj");
        assert!(dataset.metadata.is_empty());
        assert!(dataset.overrides.is_empty());
    }

    #[test]
    fn test_wrapped_object() {
        let json = r#"{
            "metadata": "Romanian cities",
            "records": [{"latitude": 45.79, "longitude": 24.15, "title": "Sibiu"}],
            "config": {"typeOfIcon": "dot", "isListFilteredToViewport": true}
        }"#;

        let dataset = Dataset::from_json_str(json, None).unwrap();
        let viewer = dataset.viewer_config(&ViewerConfig::default());

        assert_eq!(dataset.metadata, Description::Single("Romanian cities".to_string()));
        assert_eq!(viewer.type_of_icon, IconType::Dot);
        assert!(viewer.is_list_filtered_to_viewport);
        assert!(viewer.is_list_enabled);
    }

    #[test]
    fn test_rejects_negative_bounds_padding() {
        let json = r#"{
            "records": [{"latitude": 45.0, "longitude": 27.0, "title": "Braila"}],
            "config": {"boundsPadding": -2}
        }"#;

        let err = Dataset::from_json_str(json, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);

        let json = r#"{"records": [], "config": {"boundsPadding": 0.25}}"#;
        let dataset = Dataset::from_json_str(json, None).unwrap();
        assert_eq!(dataset.viewer_config(&ViewerConfig::default()).bounds_padding, 0.25);
    }

    #[test]
    fn test_wrapped_without_config() {
        let json = r#"{"metadata": ["a", "b"], "records": []}"#;
        let dataset = Dataset::from_json_str(json, None).unwrap();

        assert!(dataset.is_empty());
        assert_eq!(dataset.metadata.joined(), "a b");
        assert_eq!(dataset.viewer_config(&ViewerConfig::default()), ViewerConfig::default());
    }

    #[test]
    fn test_unrecognized_shape() {
        let err = Dataset::from_json_str(r#"{"items": []}"#, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDataset);

        let err = Dataset::from_json_str("not json", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDataset);
    }

    #[test]
    fn test_relative_images_resolved_against_source() {
        let json = r#"[{"latitude": 1.0, "longitude": 2.0, "title": "Pier", "images": ["./pier.jpg"]}]"#;
        let dataset =
            Dataset::from_json_str(json, Some("https://example.org/maps/data.json")).unwrap();

        assert_eq!(dataset.records[0].images, vec!["https://example.org/maps/pier.jpg"]);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cities.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"[{"latitude": 1.0, "longitude": 2.0, "title": "Pier", "images": ["./pier.jpg"]}]"#,
        )
        .unwrap();

        let dataset = Dataset::from_path(&path).unwrap();
        let expected = format!("{}/pier.jpg", dir.path().to_string_lossy());

        assert_eq!(dataset.records[0].images, vec![expected]);
    }

    #[test]
    fn test_from_missing_path() {
        let err = Dataset::from_path("/nonexistent/poimap/cities.json").unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }
}
