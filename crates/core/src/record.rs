//! Point-of-interest records
//!
//! [`RawRecord`] is the wire shape. [`Record`] is what the rest of the crate
//! works with: every record has an id and a normalized description.

use poimap_geo::{Coordinate, Located};
use poimap_search::Searchable;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Stable record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier generated for the record at `index`
    pub fn generated(index: usize) -> Self {
        Self(format!("id_{}", to_base36(index)))
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Free text attached to a record or a dataset: one string or a list of lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    /// A single block of text
    Single(String),
    /// Several lines, rendered in order
    Multiple(Vec<String>),
}

impl Default for Description {
    fn default() -> Self {
        Description::Single(String::new())
    }
}

impl Description {
    /// The text as one string, lines joined by a single space
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Description::Single(text) => Cow::Borrowed(text),
            Description::Multiple(lines) => Cow::Owned(lines.join(" ")),
        }
    }

    /// Returns true if there is no text at all
    pub fn is_empty(&self) -> bool {
        match self {
            Description::Single(text) => text.is_empty(),
            Description::Multiple(lines) => lines.iter().all(String::is_empty),
        }
    }
}

/// Dataset-level descriptive text shown above the list
pub type Metadata = Description;

/// A record as it arrives in a dataset document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// A point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    #[serde(default)]
    pub description: Description,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Record {
    /// Convert a raw record, keeping its id when it has a non-empty one
    pub fn from_raw(raw: RawRecord, index: usize) -> Self {
        let id = match raw.id {
            Some(id) if !id.is_empty() => RecordId(id),
            _ => RecordId::generated(index),
        };

        Self {
            id,
            latitude: raw.latitude,
            longitude: raw.longitude,
            title: raw.title,
            description: raw.description.unwrap_or_default(),
            images: raw.images.unwrap_or_default(),
        }
    }
}

impl Located for Record {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl Searchable for Record {
    fn searchable_text(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} {}", self.title, self.description.joined()))
    }
}

/// Give every record an id. Missing or empty ids become `id_<index in base 36>`.
pub fn assign_ids(records: Vec<RawRecord>) -> Vec<Record> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| Record::from_raw(raw, index))
        .collect()
}

/// Lowercase base-36 rendering of `n`
///
/// ```
/// use poimap_core::record::to_base36;
///
/// assert_eq!(to_base36(0), "0");
/// assert_eq!(to_base36(35), "z");
/// assert_eq!(to_base36(36), "10");
/// ```
pub fn to_base36(mut n: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[n % 36]);
        n /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}
