//! Configuration loading and schema definitions
//!
//! One TOML file drives the viewer flags, the search thresholds, the viewport
//! budget, clustering, caching, source policy and logging.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
