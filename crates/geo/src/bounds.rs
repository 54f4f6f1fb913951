//! Axis-aligned latitude/longitude rectangles.
//!
//! Bounds describe the visible map viewport. They are recomputed by the map
//! widget on every pan, zoom or resize and are read-only input here.

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// An axis-aligned lat/lng rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Southern edge (minimum latitude)
    pub south: f64,
    /// Western edge (minimum longitude)
    pub west: f64,
    /// Northern edge (maximum latitude)
    pub north: f64,
    /// Eastern edge (maximum longitude)
    pub east: f64,
}

impl Bounds {
    /// Creates bounds from their edges, without validation.
    #[inline]
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self { south, west, north, east }
    }

    /// Creates bounds from their edges.
    ///
    /// Fails if an edge is not finite or the rectangle is inverted.
    pub fn try_new(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        if ![south, west, north, east].iter().all(|v| v.is_finite()) {
            return Err(GeoError::InvalidBounds(format!(
                "edges must be finite (south={south}, west={west}, north={north}, east={east})"
            )));
        }
        if south > north {
            return Err(GeoError::InvalidBounds(format!("south ({south}) is above north ({north})")));
        }
        if west > east {
            return Err(GeoError::InvalidBounds(format!("west ({west}) is east of east ({east})")));
        }
        Ok(Self::new(south, west, north, east))
    }

    /// Creates bounds from their south-west and north-east corners.
    #[inline]
    pub fn from_corners(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self::new(south_west.latitude, south_west.longitude, north_east.latitude, north_east.longitude)
    }

    /// Smallest bounds enclosing every valid coordinate.
    ///
    /// Invalid coordinates are skipped. Returns `None` when nothing valid is left.
    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        coordinates
            .into_iter()
            .filter(Coordinate::is_valid)
            .fold(None, |bounds: Option<Bounds>, coord| {
                Some(match bounds {
                    None => Self::new(coord.latitude, coord.longitude, coord.latitude, coord.longitude),
                    Some(b) => b.extend(&coord),
                })
            })
    }

    /// Bounds grown to include `coord`.
    #[must_use]
    pub fn extend(&self, coord: &Coordinate) -> Self {
        Self::new(
            self.south.min(coord.latitude),
            self.west.min(coord.longitude),
            self.north.max(coord.latitude),
            self.east.max(coord.longitude),
        )
    }

    /// Bounds expanded on every side by `ratio` times the span of that axis.
    ///
    /// `pad(0.2)` moves each edge outwards by 20% of the height or width.
    #[must_use]
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lng_buffer = (self.east - self.west).abs() * ratio;

        Self::new(
            self.south - lat_buffer,
            self.west - lng_buffer,
            self.north + lat_buffer,
            self.east + lng_buffer,
        )
    }

    /// Midpoint of the rectangle.
    #[inline]
    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    /// Returns true if `coord` lies inside or on the edge.
    ///
    /// NaN coordinates are never contained.
    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.south <= coord.latitude
            && coord.latitude <= self.north
            && self.west <= coord.longitude
            && coord.longitude <= self.east
    }

    /// South-west corner.
    #[inline]
    pub fn south_west(&self) -> Coordinate {
        Coordinate::new(self.south, self.west)
    }

    /// North-east corner.
    #[inline]
    pub fn north_east(&self) -> Coordinate {
        Coordinate::new(self.north, self.east)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let bounds = Bounds::new(-1.0, -2.0, 3.0, 4.0);
        assert_eq!(bounds.center(), Coordinate::new(1.0, 1.0));
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let bounds = Bounds::new(-1.0, -1.0, 1.0, 1.0);
        assert!(bounds.contains(&Coordinate::new(0.0, 0.0)));
        assert!(bounds.contains(&Coordinate::new(1.0, -1.0)));
        assert!(!bounds.contains(&Coordinate::new(1.0001, 0.0)));
        assert!(!bounds.contains(&Coordinate::new(0.0, -1.5)));
    }

    #[test]
    fn test_contains_rejects_nan() {
        let bounds = Bounds::new(-90.0, -180.0, 90.0, 180.0);
        assert!(!bounds.contains(&Coordinate::new(f64::NAN, 0.0)));
        assert!(!bounds.contains(&Coordinate::new(0.0, f64::NAN)));
    }

    #[test]
    fn test_pad() {
        let padded = Bounds::new(0.0, 10.0, 10.0, 30.0).pad(0.5);
        assert_eq!(padded, Bounds::new(-5.0, 0.0, 15.0, 40.0));
        assert_eq!(padded.center(), Coordinate::new(5.0, 20.0));
    }

    #[test]
    fn test_pad_zero_is_identity() {
        let bounds = Bounds::new(44.0, 26.0, 45.0, 27.0);
        assert_eq!(bounds.pad(0.0), bounds);
    }

    #[test]
    fn test_try_new() {
        assert!(Bounds::try_new(-1.0, -1.0, 1.0, 1.0).is_ok());
        assert!(Bounds::try_new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(Bounds::try_new(-1.0, 1.0, 1.0, -1.0).is_err());
        assert!(Bounds::try_new(f64::NAN, -1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_from_coordinates_skips_invalid() {
        let bounds = Bounds::from_coordinates(vec![
            Coordinate::new(45.75, 21.22),
            Coordinate::new(f64::NAN, 0.0),
            Coordinate::new(47.15, 27.58),
            Coordinate::new(200.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds, Bounds::new(45.75, 21.22, 47.15, 27.58));
    }

    #[test]
    fn test_from_coordinates_empty() {
        assert!(Bounds::from_coordinates(Vec::new()).is_none());
        assert!(Bounds::from_coordinates(vec![Coordinate::new(f64::NAN, 1.0)]).is_none());
    }

    #[test]
    fn test_corners() {
        let bounds = Bounds::from_corners(Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0));
        assert_eq!(bounds.south_west(), Coordinate::new(1.0, 2.0));
        assert_eq!(bounds.north_east(), Coordinate::new(3.0, 4.0));
    }
}
