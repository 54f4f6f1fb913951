//! Fuzzy search for POI records.
//!
//! This crate provides:
//! - Levenshtein edit distance
//! - Fuzzy matching with exact-substring fast path
//! - Order-preserving record filtering
//! - WASM bindings for browser usage

mod error;
mod filter;
mod fuzzy;
mod levenshtein;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Result, SearchError};
pub use filter::{filter_indices, filter_records, Searchable};
pub use fuzzy::{fuzzy_match, FuzzyConfig, FuzzyMatcher};
pub use levenshtein::levenshtein_distance;
