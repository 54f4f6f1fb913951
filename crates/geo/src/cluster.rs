//! Cluster radius heuristic for the marker-clustering widget.
//!
//! Bigger datasets get a bigger radius so visual cluster density stays
//! roughly constant.

use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};

/// Radius used once the record count exceeds `above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterBreakpoint {
    /// Record count that must be exceeded
    pub above: usize,
    /// Cluster radius in pixels
    pub radius: u32,
}

/// Step function from record count to cluster radius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Radius when no breakpoint is exceeded
    #[serde(default = "default_base_radius")]
    pub base_radius: u32,

    /// Breakpoints in strictly descending `above` order
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<ClusterBreakpoint>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            base_radius: default_base_radius(),
            breakpoints: default_breakpoints(),
        }
    }
}

fn default_breakpoints() -> Vec<ClusterBreakpoint> {
    vec![
        ClusterBreakpoint { above: 10_000, radius: 100 },
        ClusterBreakpoint { above: 5_000, radius: 80 },
        ClusterBreakpoint { above: 1_000, radius: 60 },
    ]
}

fn default_base_radius() -> u32 {
    40
}

impl ClusterConfig {
    /// Check the breakpoint order.
    pub fn validate(&self) -> Result<()> {
        for pair in self.breakpoints.windows(2) {
            if pair[0].above <= pair[1].above {
                return Err(GeoError::InvalidConfig(format!(
                    "cluster breakpoints must be in descending order ({} listed before {})",
                    pair[0].above, pair[1].above
                )));
            }
        }
        Ok(())
    }

    /// Cluster radius in pixels for `count` records.
    pub fn radius_for(&self, count: usize) -> u32 {
        self.breakpoints
            .iter()
            .find(|bp| count > bp.above)
            .map_or(self.base_radius, |bp| bp.radius)
    }
}

/// Cluster radius in pixels for `count` records, with the default breakpoints.
///
/// # Example
/// ```
/// use poimap_geo::optimal_cluster_radius;
///
/// assert_eq!(optimal_cluster_radius(15_000), 100);
/// assert_eq!(optimal_cluster_radius(10), 40);
/// ```
pub fn optimal_cluster_radius(count: usize) -> u32 {
    ClusterConfig::default().radius_for(count)
}
