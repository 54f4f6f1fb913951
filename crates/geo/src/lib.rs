//! Viewport geometry for the POI map.
//!
//! This crate provides:
//! - Coordinates and axis-aligned lat/lng bounds
//! - Zoom-adaptive viewport reduction of marker sets
//! - Cluster radius heuristics
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use poimap_geo::{reduce_visible_records, Bounds, Coordinate};
//!
//! let records = vec![
//!     Coordinate::new(0.0, 0.0),
//!     Coordinate::new(0.0, 1.0),
//!     Coordinate::new(10.0, 10.0),
//! ];
//! let bounds = Bounds::new(-1.0, -1.0, 1.0, 1.0);
//!
//! let visible = reduce_visible_records(&records, Some(&bounds), Some(10.0));
//! assert_eq!(visible, vec![&records[0], &records[1]]);
//! ```

pub mod bounds;
pub mod cluster;
mod error;
pub mod viewport;

#[cfg(feature = "wasm")]
mod wasm;

pub use bounds::Bounds;
pub use cluster::{optimal_cluster_radius, ClusterBreakpoint, ClusterConfig};
pub use error::{GeoError, GeoErrorCode, Result};
pub use viewport::{filter_to_bounds, reduce_visible_records, ViewportConfig, ViewportReducer};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both values are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Squared Euclidean distance in degree space.
    ///
    /// Only meaningful for ordering: no projection, no square root.
    #[inline]
    pub fn squared_distance_to(&self, other: &Coordinate) -> f64 {
        let d_lat = self.latitude - other.latitude;
        let d_lng = self.longitude - other.longitude;
        d_lat * d_lat + d_lng * d_lng
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Items that sit at a point on the map.
pub trait Located {
    /// Where the item is.
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(44.4268, 26.1025);
        assert_eq!(coord.latitude, 44.4268);
        assert_eq!(coord.longitude, 26.1025);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (46.7712, 23.6236).into();
        assert_eq!(coord.latitude, 46.7712);
    }

    #[test]
    fn test_squared_distance() {
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(origin.squared_distance_to(&Coordinate::new(3.0, 4.0)), 25.0);
        assert_eq!(origin.squared_distance_to(&origin), 0.0);
    }
}
