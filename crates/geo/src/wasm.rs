//! WASM bindings for the geo crate.
//!
//! These bindings allow the viewport reducer to be used from JavaScript/TypeScript
//! in the browser.

use crate::{optimal_cluster_radius, Bounds, Coordinate, Located, ViewportReducer};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Marker record as sent by the map widget. Extra fields are carried through.
#[derive(Serialize, Deserialize)]
struct MarkerRecord {
    latitude: f64,
    longitude: f64,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl Located for MarkerRecord {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Cluster radius in pixels for a record count.
#[wasm_bindgen]
pub fn cluster_radius(count: usize) -> u32 {
    optimal_cluster_radius(count)
}

/// Reduce records to the ones worth rendering in a viewport.
///
/// # Arguments
/// * `records_json` - JSON array of records with `latitude` and `longitude` fields
/// * `south`, `west`, `north`, `east` - Current viewport edges
/// * `zoom` - Current zoom level (NaN when unknown)
///
/// # Returns
/// JSON array of the surviving records
#[wasm_bindgen]
pub fn reduce_records_json(
    records_json: &str,
    south: f64,
    west: f64,
    north: f64,
    east: f64,
    zoom: f64,
) -> Result<String, JsValue> {
    let records: Vec<MarkerRecord> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&crate::GeoError::from(e).to_string()))?;

    let bounds = Bounds::try_new(south, west, north, east)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let visible = ViewportReducer::default().reduce(&records, Some(&bounds), Some(zoom));

    serde_json::to_string(&visible)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
