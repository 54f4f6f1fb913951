//! Record filtering by fuzzy query.

use crate::FuzzyMatcher;
use std::borrow::Cow;

/// Items that expose a text to search in.
pub trait Searchable {
    /// The text the query is matched against.
    fn searchable_text(&self) -> Cow<'_, str>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn searchable_text(&self) -> Cow<'_, str> {
        (**self).searchable_text()
    }
}

impl Searchable for str {
    fn searchable_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Searchable for String {
    fn searchable_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// Positions of the records matching `query`, in input order.
///
/// An empty query selects every record.
pub fn filter_indices<T>(records: &[T], query: &str, matcher: &FuzzyMatcher) -> Vec<usize>
where
    T: Searchable + Sync,
{
    if query.is_empty() {
        return (0..records.len()).collect();
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        records
            .par_iter()
            .enumerate()
            .filter(|(_, record)| matcher.is_match(&record.searchable_text(), query))
            .map(|(index, _)| index)
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| matcher.is_match(&record.searchable_text(), query))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Records matching `query`, in input order.
///
/// # Example
/// ```
/// use poimap_search::{filter_records, FuzzyMatcher};
///
/// let cities = vec!["Bucharest".to_string(), "Cluj-Napoca".to_string(), "Iasi".to_string()];
/// let matches = filter_records(&cities, "buchrest", &FuzzyMatcher::default());
/// assert_eq!(matches, vec![&cities[0]]);
/// ```
pub fn filter_records<'a, T>(records: &'a [T], query: &str, matcher: &FuzzyMatcher) -> Vec<&'a T>
where
    T: Searchable + Sync,
{
    filter_indices(records, query, matcher)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}
