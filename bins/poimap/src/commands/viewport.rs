//! Viewport command - records worth rendering in a viewport

use super::{load_dataset, Context};
use crate::output;
use anyhow::Result;
use poimap_core::record::Record;
use poimap_core::view::MapView;
use poimap_geo::{Bounds, ViewportReducer};
use poimap_telemetry::{PerformanceMonitor, Timer};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct JsonViewportOutput<'a> {
    bounds: Bounds,
    zoom: Option<f64>,
    capacity: usize,
    visible: usize,
    records: Vec<&'a Record>,
}

/// Run viewport command
pub fn run(
    ctx: &Context,
    dataset_path: &Path,
    base_url: Option<&str>,
    [south, west, north, east]: [f64; 4],
    zoom: Option<f64>,
    query: &str,
) -> Result<()> {
    let bounds = Bounds::try_new(south, west, north, east).map_err(poimap_core::Error::from)?;
    let dataset = load_dataset(ctx, dataset_path, base_url)?;
    let mut view = MapView::new(dataset, &ctx.config);
    let capacity = ViewportReducer::new(ctx.config.schema.viewport.clone()).capacity(zoom);

    let mut monitor = PerformanceMonitor::new();
    let timer = Timer::start("viewport");
    let records = view.reduce(query, Some(&bounds), zoom);
    monitor.log_render_time(timer.stop(), records.len());

    if ctx.is_json() {
        return output::print_json(&JsonViewportOutput {
            bounds,
            zoom,
            capacity,
            visible: records.len(),
            records,
        });
    }

    output::header(&format!(
        "{} in viewport (budget {})",
        output::format_count(records.len(), "record", "records"),
        capacity
    ));
    output::print_records(&records);

    if ctx.verbose {
        output::print_performance(&monitor.summary());
    }
    Ok(())
}
