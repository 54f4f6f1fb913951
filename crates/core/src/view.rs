//! Map view orchestration
//!
//! [`MapView`] ties a dataset to the search, viewport and clustering settings
//! and decides which records the map and the list show.

use crate::cache::{BoundedCache, CacheStats};
use crate::config::{Config, ViewerConfig};
use crate::dataset::Dataset;
use crate::record::{Metadata, Record};
use poimap_geo::{filter_to_bounds, Bounds, ClusterConfig, Located, ViewportReducer};
use poimap_search::{filter_indices, FuzzyMatcher};
use serde::Serialize;
use std::sync::Arc;

/// How the visible records of a snapshot were chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Padded viewport, capped by zoom level
    Reduced,
    /// Plain viewport filter
    ViewportFiltered,
    /// Every matching record
    All,
}

/// What the map shows for one query and viewport
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a> {
    pub records: Vec<&'a Record>,
    /// Records in the dataset
    pub total: usize,
    /// Records matching the query
    pub matched: usize,
    /// Cluster radius in pixels for the visible records
    pub cluster_radius: u32,
    pub mode: VisibilityMode,
}

/// A dataset with its search and display settings
#[derive(Debug)]
pub struct MapView {
    records: Vec<Record>,
    metadata: Metadata,
    viewer: ViewerConfig,
    matcher: FuzzyMatcher,
    reducer: ViewportReducer,
    cluster: ClusterConfig,
    search_cache: BoundedCache<String, Arc<[usize]>>,
}

impl MapView {
    /// Build a view; the dataset's viewer overrides are applied over the configuration
    pub fn new(dataset: Dataset, config: &Config) -> Self {
        let schema = &config.schema;
        let viewer = dataset.viewer_config(&schema.viewer);

        Self {
            records: dataset.records,
            metadata: dataset.metadata,
            viewer,
            matcher: FuzzyMatcher::new(schema.search.clone()),
            reducer: ViewportReducer::new(schema.viewport.clone()),
            cluster: schema.cluster.clone(),
            search_cache: BoundedCache::new(schema.cache.filter_cache_capacity),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Effective viewer settings
    pub fn viewer(&self) -> &ViewerConfig {
        &self.viewer
    }

    /// Records matching `query`, in dataset order
    pub fn search(&mut self, query: &str) -> Vec<&Record> {
        let indices = self.matching_indices(query);
        indices.iter().map(|&i| &self.records[i]).collect()
    }

    /// Matching records reduced to what is worth rendering in `bounds`
    pub fn reduce(&mut self, query: &str, bounds: Option<&Bounds>, zoom: Option<f64>) -> Vec<&Record> {
        let indices = self.matching_indices(query);
        let matched: Vec<&Record> = indices.iter().map(|&i| &self.records[i]).collect();
        self.reducer
            .reduce(&matched, bounds, zoom)
            .into_iter()
            .copied()
            .collect()
    }

    /// Visible records for the viewer's display policy
    ///
    /// With aggressive optimization the reducer decides. Otherwise the list is
    /// either filtered to the viewport or shows every match.
    pub fn snapshot(&mut self, query: &str, bounds: Option<&Bounds>, zoom: Option<f64>) -> ViewSnapshot<'_> {
        let total = self.records.len();
        let indices = self.matching_indices(query);
        let matched: Vec<&Record> = indices.iter().map(|&i| &self.records[i]).collect();

        let (records, mode) = if self.viewer.is_aggressive_optimization_enabled {
            let reduced = self.reducer.reduce(&matched, bounds, zoom);
            (reduced.into_iter().copied().collect(), VisibilityMode::Reduced)
        } else if self.viewer.is_list_filtered_to_viewport {
            let filtered = filter_to_bounds(&matched, bounds);
            (filtered.into_iter().copied().collect(), VisibilityMode::ViewportFiltered)
        } else {
            (matched.clone(), VisibilityMode::All)
        };

        let cluster_radius = self.cluster.radius_for(records.len());
        tracing::debug!(
            total,
            matched = matched.len(),
            visible = records.len(),
            cluster_radius,
            ?mode,
            "View snapshot"
        );

        ViewSnapshot {
            records,
            total,
            matched: matched.len(),
            cluster_radius,
            mode,
        }
    }

    /// Bounds enclosing every record, padded by the viewer's `bounds_padding`
    pub fn fit_bounds(&self) -> Option<Bounds> {
        Bounds::from_coordinates(self.records.iter().map(Located::coordinate))
            .map(|bounds| bounds.pad(self.viewer.bounds_padding))
    }

    /// Record with the given id
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id.as_str() == id)
    }

    /// Search cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.search_cache.stats()
    }

    fn matching_indices(&mut self, query: &str) -> Arc<[usize]> {
        if query.is_empty() {
            return (0..self.records.len()).collect();
        }

        let records = &self.records;
        let matcher = &self.matcher;
        self.search_cache.get_or_insert_with(query.to_string(), || {
            tracing::debug!(query, "Search cache miss");
            filter_indices(records, query, matcher).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: &str = r#"[
        {"id": "buc", "latitude": 44.43, "longitude": 26.10, "title": "Bucharest"},
        {"id": "clj", "latitude": 46.77, "longitude": 23.59, "title": "Cluj-Napoca"},
        {"id": "tm", "latitude": 45.75, "longitude": 21.23, "title": "Timisoara"},
        {"id": "cta", "latitude": 44.17, "longitude": 28.63, "title": "Constanta",
         "description": "Port by the Black Sea"}
    ]"#;

    fn view_with(config: &Config) -> MapView {
        MapView::new(Dataset::from_json_str(CITIES, None).unwrap(), config)
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_search() {
        let mut view = view_with(&Config::default());

        assert_eq!(view.search("").len(), 4);
        assert_eq!(ids(&view.search("buchrest")), vec!["buc"]);
        assert_eq!(ids(&view.search("black sea")), vec!["cta"]);
        assert!(view.search("zzzzzzzz").is_empty());
    }

    #[test]
    fn test_search_is_memoized() {
        let mut view = view_with(&Config::default());

        view.search("cluj");
        view.search("cluj");
        view.search("");

        let stats = view.cache_stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_reduce_keeps_viewport_records() {
        let mut view = view_with(&Config::default());
        let bounds = Bounds::new(44.0, 25.5, 45.0, 27.0);

        assert_eq!(ids(&view.reduce("", Some(&bounds), Some(10.0))), vec!["buc"]);
        assert!(view.reduce("", None, Some(10.0)).is_empty());
    }

    #[test]
    fn test_snapshot_shows_all_by_default() {
        let mut view = view_with(&Config::default());
        let bounds = Bounds::new(44.0, 25.5, 45.0, 27.0);

        let snapshot = view.snapshot("", Some(&bounds), None);

        assert_eq!(snapshot.mode, VisibilityMode::All);
        assert_eq!(snapshot.records.len(), 4);
        assert_eq!(snapshot.total, 4);
        assert_eq!(snapshot.matched, 4);
        assert_eq!(snapshot.cluster_radius, 40);
    }

    #[test]
    fn test_snapshot_filtered_to_viewport() {
        let mut config = Config::default();
        config.schema.viewer.is_list_filtered_to_viewport = true;
        let mut view = view_with(&config);
        let bounds = Bounds::new(44.0, 25.5, 45.0, 29.0);

        let snapshot = view.snapshot("", Some(&bounds), None);
        assert_eq!(snapshot.mode, VisibilityMode::ViewportFiltered);
        assert_eq!(ids(&snapshot.records), vec!["buc", "cta"]);

        let snapshot = view.snapshot("", None, None);
        assert_eq!(snapshot.records.len(), 4);
    }

    #[test]
    fn test_snapshot_aggressive_optimization() {
        let mut config = Config::default();
        config.schema.viewer.is_aggressive_optimization_enabled = true;
        config.schema.viewport.base_capacity = 1;
        config.schema.viewport.zoom_factor = 1.0;
        let mut view = view_with(&config);

        let bounds = Bounds::new(44.0, 25.0, 47.0, 29.0);
        let snapshot = view.snapshot("", Some(&bounds), Some(12.0));

        assert_eq!(snapshot.mode, VisibilityMode::Reduced);
        assert_eq!(ids(&snapshot.records), vec!["buc"]);
        assert_eq!(snapshot.matched, 4);
    }

    #[test]
    fn test_dataset_overrides_win() {
        let json = r#"{"metadata": "x", "records": [], "config": {"isAggressiveOptimizationEnabled": true}}"#;
        let view = MapView::new(Dataset::from_json_str(json, None).unwrap(), &Config::default());

        assert!(view.viewer().is_aggressive_optimization_enabled);
        assert!(view.fit_bounds().is_none());
    }

    #[test]
    fn test_fit_bounds_padded() {
        let view = view_with(&Config::default());
        let bounds = view.fit_bounds().unwrap();

        // lat span 44.17..46.77 = 2.6, padded by 0.6 on each side
        assert!((bounds.south - (44.17 - 1.56)).abs() < 1e-9);
        assert!((bounds.north - (46.77 + 1.56)).abs() < 1e-9);
        assert!(bounds.west < 21.23 && bounds.east > 28.63);
    }

    #[test]
    fn test_find() {
        let view = view_with(&Config::default());

        assert_eq!(view.find("tm").map(|r| r.title.as_str()), Some("Timisoara"));
        assert!(view.find("missing").is_none());
    }
}
