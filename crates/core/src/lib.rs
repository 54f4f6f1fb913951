//! Core of the poimap viewer
//!
//! This crate turns a dataset of points of interest into what a map shows:
//!
//! - **Records**: the record model and dataset ingestion, in both response shapes
//! - **Source policy**: allowed data source URLs and relative path resolution
//! - **Configuration**: TOML-based configuration with per-field defaults
//! - **Caching**: bounded, explicitly owned memoization
//! - **Pacing**: debounce and throttle gates for bursty input
//! - **Map view**: search, viewport reduction and clustering for one dataset
//! - **Error handling**: structured errors with codes, context and recovery suggestions
//!
//! # Example
//!
//! ```rust
//! use poimap_core::{config::Config, dataset::Dataset, view::MapView};
//! use poimap_geo::Bounds;
//!
//! let json = r#"[
//!     {"latitude": 0.0, "longitude": 0.0, "title": "Center"},
//!     {"latitude": 0.5, "longitude": 0.5, "title": "Near"},
//!     {"latitude": 5.0, "longitude": 5.0, "title": "Far"}
//! ]"#;
//!
//! let dataset = Dataset::from_json_str(json, None)?;
//! let mut view = MapView::new(dataset, &Config::default());
//!
//! let bounds = Bounds::new(-1.0, -1.0, 1.0, 1.0);
//! let visible = view.reduce("", Some(&bounds), Some(10.0));
//! assert_eq!(visible.len(), 2);
//! # Ok::<(), poimap_core::Error>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod pacing;
pub mod record;
pub mod source;
pub mod view;

pub use error::{exit_codes, Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{BoundedCache, CacheStats};
    pub use crate::config::{Config, ConfigSchema, IconType, ViewerConfig, ViewerConfigPatch};
    pub use crate::dataset::Dataset;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::pacing::{Debouncer, Throttle};
    pub use crate::record::{Description, Metadata, RawRecord, Record, RecordId};
    pub use crate::source::SourcePolicy;
    pub use crate::view::{MapView, ViewSnapshot, VisibilityMode};
    pub use poimap_geo::{Bounds, Coordinate};
}
