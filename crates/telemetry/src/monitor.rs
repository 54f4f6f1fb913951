//! Render performance history
//!
//! Keeps the last N render measurements so slow frames can be spotted and
//! averaged. The history is bounded and owned by whoever renders.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

const DEFAULT_MAX_SAMPLES: usize = 100;
const DEFAULT_WARN_THRESHOLD: Duration = Duration::from_millis(3000);

/// One render measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSample {
    pub render_time: Duration,
    pub marker_count: usize,
    /// Time spent reacting to the bounds change that led to this render
    pub bounds_update_time: Option<Duration>,
    pub recorded_at: DateTime<Utc>,
}

/// Averages over the recorded history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub samples: usize,
    pub average_render_ms: f64,
    pub slowest_render_ms: f64,
    pub average_marker_count: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_bounds_update_ms: Option<f64>,
}

/// Bounded history of render measurements
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    samples: VecDeque<RenderSample>,
    max_samples: usize,
    warn_threshold: Duration,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    /// Monitor keeping 100 samples and warning above 3 seconds
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SAMPLES)
    }

    pub fn with_capacity(max_samples: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_samples.min(DEFAULT_MAX_SAMPLES)),
            max_samples,
            warn_threshold: DEFAULT_WARN_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_warn_threshold(mut self, threshold: Duration) -> Self {
        self.warn_threshold = threshold;
        self
    }

    /// Record a render of `marker_count` markers
    pub fn log_render_time(&mut self, render_time: Duration, marker_count: usize) {
        if render_time > self.warn_threshold {
            tracing::warn!(
                render_ms = render_time.as_secs_f64() * 1000.0,
                marker_count,
                "Slow render"
            );
        }

        if self.max_samples == 0 {
            return;
        }
        while self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(RenderSample {
            render_time,
            marker_count,
            bounds_update_time: None,
            recorded_at: Utc::now(),
        });
    }

    /// Attach a bounds update duration to the newest sample
    ///
    /// Ignored when nothing has been rendered yet.
    pub fn log_bounds_update_time(&mut self, duration: Duration) {
        match self.samples.back_mut() {
            Some(sample) => sample.bounds_update_time = Some(duration),
            None => tracing::debug!("Bounds update before any render, not recorded"),
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &RenderSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn average_render_time(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        let total: Duration = self.samples.iter().map(|s| s.render_time).sum();
        Some(total / self.samples.len() as u32)
    }

    pub fn average_marker_count(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let total: usize = self.samples.iter().map(|s| s.marker_count).sum();
        Some(total as f64 / self.samples.len() as f64)
    }

    /// Average over the samples that have a bounds update attached
    pub fn average_bounds_update_time(&self) -> Option<Duration> {
        let updates: Vec<Duration> = self.samples.iter().filter_map(|s| s.bounds_update_time).collect();
        if updates.is_empty() {
            return None;
        }
        Some(updates.iter().sum::<Duration>() / updates.len() as u32)
    }

    pub fn summary(&self) -> PerformanceSummary {
        let to_ms = |d: Duration| d.as_secs_f64() * 1000.0;

        PerformanceSummary {
            samples: self.samples.len(),
            average_render_ms: self.average_render_time().map_or(0.0, to_ms),
            slowest_render_ms: self
                .samples
                .iter()
                .map(|s| s.render_time)
                .max()
                .map_or(0.0, to_ms),
            average_marker_count: self.average_marker_count().unwrap_or(0.0),
            average_bounds_update_ms: self.average_bounds_update_time().map(to_ms),
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
