//! Viewport reduction of marker sets.
//!
//! Keeps rendering responsive on large datasets: only records inside a padded
//! viewport survive, and when there are more of them than the zoom level can
//! afford, the ones closest to the viewport center win.

use crate::{Bounds, GeoError, Located, Result};
use serde::{Deserialize, Serialize};

/// Tuning for [`ViewportReducer`].
///
/// The marker budget is `base_capacity * zoom_factor^(zoom - reference_zoom)`,
/// floored and clamped to `hard_cap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Fraction of the viewport span added on each side before filtering
    #[serde(default = "default_padding_ratio")]
    pub padding_ratio: f64,

    /// Marker budget at `reference_zoom`
    #[serde(default = "default_base_capacity")]
    pub base_capacity: usize,

    /// Zoom level at which the budget equals `base_capacity`
    #[serde(default = "default_reference_zoom")]
    pub reference_zoom: f64,

    /// Budget growth per zoom level
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,

    /// Upper bound on the budget, whatever the zoom
    #[serde(default = "default_hard_cap")]
    pub hard_cap: usize,

    /// Zoom assumed when the map does not report one
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            padding_ratio: default_padding_ratio(),
            base_capacity: default_base_capacity(),
            reference_zoom: default_reference_zoom(),
            zoom_factor: default_zoom_factor(),
            hard_cap: default_hard_cap(),
            default_zoom: default_zoom(),
        }
    }
}

fn default_padding_ratio() -> f64 {
    0.2
}

fn default_base_capacity() -> usize {
    500
}

fn default_reference_zoom() -> f64 {
    8.0
}

fn default_zoom_factor() -> f64 {
    std::f64::consts::SQRT_2
}

fn default_hard_cap() -> usize {
    8000
}

fn default_zoom() -> f64 {
    12.0
}

impl ViewportConfig {
    /// Check that every number is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(GeoError::InvalidConfig(format!(
                "padding_ratio must be finite and non-negative (got {})",
                self.padding_ratio
            )));
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 0.0 {
            return Err(GeoError::InvalidConfig(format!(
                "zoom_factor must be finite and positive (got {})",
                self.zoom_factor
            )));
        }
        if !self.reference_zoom.is_finite() || !self.default_zoom.is_finite() {
            return Err(GeoError::InvalidConfig(
                "reference_zoom and default_zoom must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reduces a record set to what is worth rendering in a viewport.
#[derive(Debug, Clone, Default)]
pub struct ViewportReducer {
    config: ViewportConfig,
}

impl ViewportReducer {
    /// Create a reducer with the given tuning.
    pub fn new(config: ViewportConfig) -> Self {
        Self { config }
    }

    /// The tuning in use.
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Marker budget for a zoom level.
    ///
    /// A missing or non-finite zoom falls back to `default_zoom`.
    pub fn capacity(&self, zoom: Option<f64>) -> usize {
        let zoom = zoom
            .filter(|z| z.is_finite())
            .unwrap_or(self.config.default_zoom);
        let scaled = self.config.base_capacity as f64
            * self.config.zoom_factor.powf(zoom - self.config.reference_zoom);
        let hard_cap = self.config.hard_cap as f64;

        if scaled.is_nan() {
            return self.config.hard_cap;
        }
        scaled.floor().clamp(0.0, hard_cap) as usize
    }

    /// Records to render for the viewport.
    ///
    /// Without bounds nothing is returned. Records outside the padded bounds
    /// or with out-of-range coordinates are dropped; if more than
    /// [`capacity`](Self::capacity) remain they are ordered by squared lat/lng
    /// distance to the center (stable, so ties keep input order) and
    /// truncated. Otherwise input order is kept.
    pub fn reduce<'a, T>(&self, records: &'a [T], bounds: Option<&Bounds>, zoom: Option<f64>) -> Vec<&'a T>
    where
        T: Located + Sync,
    {
        let Some(bounds) = bounds else {
            return Vec::new();
        };
        if records.is_empty() {
            return Vec::new();
        }

        let padded = bounds.pad(self.config.padding_ratio);
        let center = padded.center();

        let keyed = |record: &'a T| {
            let coord = record.coordinate();
            (coord.is_valid() && padded.contains(&coord))
                .then(|| (coord.squared_distance_to(&center), record))
        };

        #[cfg(feature = "parallel")]
        let mut visible: Vec<(f64, &'a T)> = {
            use rayon::prelude::*;
            records.par_iter().filter_map(keyed).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let mut visible: Vec<(f64, &'a T)> = records.iter().filter_map(keyed).collect();

        let capacity = self.capacity(zoom);
        if visible.len() > capacity {
            visible.sort_by(|a, b| a.0.total_cmp(&b.0));
            visible.truncate(capacity);
        }

        visible.into_iter().map(|(_, record)| record).collect()
    }
}

/// Reduce with the default tuning.
pub fn reduce_visible_records<'a, T>(records: &'a [T], bounds: Option<&Bounds>, zoom: Option<f64>) -> Vec<&'a T>
where
    T: Located + Sync,
{
    ViewportReducer::default().reduce(records, bounds, zoom)
}

/// Records inside `bounds`, unpadded and uncapped, in input order.
///
/// Records with out-of-range coordinates are never inside. Without bounds
/// every record is returned.
pub fn filter_to_bounds<'a, T>(records: &'a [T], bounds: Option<&Bounds>) -> Vec<&'a T>
where
    T: Located,
{
    match bounds {
        Some(bounds) => records
            .iter()
            .filter(|record| {
                let coord = record.coordinate();
                coord.is_valid() && bounds.contains(&coord)
            })
            .collect(),
        None => records.iter().collect(),
    }
}
