//! View command - what the viewer shows for a query and viewport

use super::{load_dataset, Context};
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use poimap_core::view::{MapView, ViewSnapshot};
use poimap_geo::Bounds;
use poimap_telemetry::{PerformanceMonitor, Timer};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct JsonViewOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
    #[serde(flatten)]
    snapshot: ViewSnapshot<'a>,
}

/// Run view command
///
/// Without explicit bounds the viewport is fitted to all records, as the
/// viewer does on first load.
pub fn run(
    ctx: &Context,
    dataset_path: &Path,
    base_url: Option<&str>,
    query: &str,
    bounds: Option<Bounds>,
    zoom: Option<f64>,
) -> Result<()> {
    let dataset = load_dataset(ctx, dataset_path, base_url)?;
    let mut view = MapView::new(dataset, &ctx.config);
    let mut monitor = PerformanceMonitor::new();

    let timer = Timer::start("bounds");
    let bounds = bounds.or_else(|| view.fit_bounds());
    let bounds_time = timer.stop();

    let timer = Timer::start("snapshot");
    let snapshot = view.snapshot(query, bounds.as_ref(), zoom);
    monitor.log_render_time(timer.stop(), snapshot.records.len());
    monitor.log_bounds_update_time(bounds_time);

    if ctx.is_json() {
        return output::print_json(&JsonViewOutput { bounds, snapshot });
    }

    output::header(&format!(
        "{} visible, {} matched, {} total",
        snapshot.records.len(),
        snapshot.matched,
        snapshot.total
    ));
    println!(
        "  {} {:?}  {} {}px",
        "mode".dimmed(),
        snapshot.mode,
        "cluster radius".dimmed(),
        snapshot.cluster_radius
    );
    if let Some(b) = bounds {
        println!(
            "  {} {:.4},{:.4},{:.4},{:.4}",
            "bounds".dimmed(),
            b.south,
            b.west,
            b.north,
            b.east
        );
    }
    println!();
    output::print_records(&snapshot.records);

    if ctx.verbose {
        output::print_performance(&monitor.summary());
    }
    Ok(())
}
