//! WASM bindings for search utilities.

use crate::{FuzzyMatcher, Searchable};
use serde::Deserialize;
use std::borrow::Cow;
use wasm_bindgen::prelude::*;

/// Check if text fuzzily contains query, with the default thresholds.
#[wasm_bindgen]
pub fn fuzzy_contains(query: &str, text: &str) -> bool {
    crate::fuzzy_match(text, query)
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

#[derive(Deserialize)]
struct Item {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<Text>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Text {
    Single(String),
    Multiple(Vec<String>),
}

impl Searchable for Item {
    fn searchable_text(&self) -> Cow<'_, str> {
        let description = match &self.description {
            Some(Text::Single(text)) => text.clone(),
            Some(Text::Multiple(parts)) => parts.join(" "),
            None => String::new(),
        };
        Cow::Owned(format!("{} {}", self.title, description))
    }
}

/// Filter records and return the ids of the matches as JSON.
///
/// # Arguments
/// * `records_json` - JSON array of records with `id`, `title` and optional `description`
/// * `query` - Search query
///
/// # Returns
/// JSON array of matching ids, in input order
#[wasm_bindgen]
pub fn filter_records_json(records_json: &str, query: &str) -> Result<String, JsValue> {
    let items: Vec<Item> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&crate::SearchError::from(e).to_string()))?;

    let ids: Vec<&str> = crate::filter_records(&items, query, &FuzzyMatcher::default())
        .into_iter()
        .map(|item| item.id.as_str())
        .collect();

    serde_json::to_string(&ids).map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
